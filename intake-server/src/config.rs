//! Intake server configuration
//!
//! Loaded once at startup from the environment (`.env` is read by `main`).
//! Missing required fields fail startup instead of surfacing per request.

use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_SHEET_NAME: &str = "World Cup AI Reservations";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Where accepted leads are appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadSinkConfig {
    /// Google Sheets via a service-account credential file
    Sheets {
        creds_file: PathBuf,
        sheet_name: String,
        /// Skips the lookup by name when set
        sheet_id: Option<String>,
    },
    /// Local JSON-lines file
    File { path: PathBuf },
}

/// Intake server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// Access key for the admin panel
    pub admin_key: String,
    /// Access key for the manager panel
    pub manager_key: String,
    pub lead_sink: LeadSinkConfig,
    /// Language model API key
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Ops toggle persistence; in memory when unset
    pub ops_state_file: Option<PathBuf>,
    /// Static assets served at `/`
    pub static_dir: PathBuf,
    /// Match schedule (`{"all": [...], "dallas": [...]}`)
    pub schedule_file: Option<PathBuf>,
    /// Menu items (JSON array)
    pub menu_file: Option<PathBuf>,
    /// Daily rolling log files are written here when set
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let admin_key = var("ADMIN_KEY").ok_or("ADMIN_KEY must be set")?;
        let manager_key = var("MANAGER_KEY").ok_or("MANAGER_KEY must be set")?;
        if admin_key == manager_key {
            return Err("ADMIN_KEY and MANAGER_KEY must differ".into());
        }

        let lead_sink = match var("LEAD_SINK").as_deref().unwrap_or("sheets") {
            "sheets" => LeadSinkConfig::Sheets {
                creds_file: var("GOOGLE_CREDS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("google_creds.json")),
                sheet_name: var("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.into()),
                sheet_id: var("SHEET_ID"),
            },
            "file" => LeadSinkConfig::File {
                path: var("LEADS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("leads.jsonl")),
            },
            other => return Err(format!("LEAD_SINK must be 'sheets' or 'file', got '{other}'").into()),
        };

        let http_port = match var("HTTP_PORT") {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| format!("HTTP_PORT is not a valid port: {p}"))?,
            None => 5000,
        };

        Ok(Self {
            http_port,
            admin_key,
            manager_key,
            lead_sink,
            openai_api_key: Self::require_secret(&var, "OPENAI_API_KEY", &environment)?,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".into()),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            ops_state_file: var("OPS_STATE_FILE").map(PathBuf::from),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            schedule_file: var("SCHEDULE_FILE").map(PathBuf::from),
            menu_file: var("MENU_FILE").map(PathBuf::from),
            log_dir: var("LOG_DIR"),
            environment,
        })
    }

    /// Require a secret: must be set in non-development environments.
    fn require_secret(
        var: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> Result<String, BoxError> {
        match var(name) {
            Some(v) => Ok(v),
            None if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
            None => Err(format!("{name} must be set in {environment} environment").into()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
