//! Application state for the intake server

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::activity::PanelActivity;
use crate::auth::PanelKeys;
use crate::catalog::Catalog;
use crate::config::{Config, LeadSinkConfig};
use crate::llm::{IntentExtractor, ResponsesClient};
use crate::ops::{JsonFileToggleStore, MemoryToggleStore, OpsState, ToggleStore};
use crate::sinks::{JsonlSink, LeadSink, ServiceAccountKey, SheetsSink};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Admin / manager access keys
    pub keys: Arc<PanelKeys>,
    /// Destination for accepted leads
    pub leads: Arc<dyn LeadSink>,
    /// Free-text intent extractor
    pub assistant: Arc<dyn IntentExtractor>,
    /// Ops toggles
    pub ops: OpsState,
    /// Audit trail and AI queue
    pub activity: PanelActivity,
    /// Match schedule and menu
    pub catalog: Arc<Catalog>,
    /// Static assets served at `/`
    pub static_dir: PathBuf,
    pub environment: String,
    pub started_at: Instant,
}

impl AppState {
    /// Build the production state: real sink, model client and toggle store
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let leads: Arc<dyn LeadSink> = match &config.lead_sink {
            LeadSinkConfig::Sheets {
                creds_file,
                sheet_name,
                sheet_id,
            } => {
                let key = ServiceAccountKey::from_file(creds_file)?;
                tracing::info!(
                    client_email = %key.client_email,
                    sheet = %sheet_name,
                    "Lead sink: Google Sheets"
                );
                Arc::new(SheetsSink::new(key, sheet_name.clone(), sheet_id.clone())?)
            }
            LeadSinkConfig::File { path } => {
                tracing::info!(path = %path.display(), "Lead sink: local file");
                Arc::new(JsonlSink::new(path.clone()))
            }
        };

        let assistant = Arc::new(ResponsesClient::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )?);

        let store: Arc<dyn ToggleStore> = match &config.ops_state_file {
            Some(path) => Arc::new(JsonFileToggleStore::new(path.clone())),
            None => {
                tracing::warn!("OPS_STATE_FILE not set, Ops toggles will reset on restart");
                Arc::new(MemoryToggleStore::new())
            }
        };
        let ops = OpsState::load(store).await?;

        let catalog = Catalog::load(config.schedule_file.as_deref(), config.menu_file.as_deref())?;

        Ok(Self {
            environment: config.environment.clone(),
            ..Self::from_parts(
                PanelKeys::new(config.admin_key.clone(), config.manager_key.clone()),
                leads,
                assistant,
                ops,
                catalog,
                config.static_dir.clone(),
            )
        })
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        keys: PanelKeys,
        leads: Arc<dyn LeadSink>,
        assistant: Arc<dyn IntentExtractor>,
        ops: OpsState,
        catalog: Catalog,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            keys: Arc::new(keys),
            leads,
            assistant,
            ops,
            activity: PanelActivity::new(),
            catalog: Arc::new(catalog),
            static_dir,
            environment: "development".to_string(),
            started_at: Instant::now(),
        }
    }
}
