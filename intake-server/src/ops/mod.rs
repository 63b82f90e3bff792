//! Ops toggles: runtime settings changed from the panels
//!
//! The whole set sits behind one async mutex. A change replaces value,
//! timestamp and author together and is persisted before the lock is
//! released, so readers never see a new value with an old timestamp.

pub mod definitions;
mod store;

pub use definitions::{ACCEPT_BOOKINGS, AI_MODE, AI_REPLIES, CATALOG, MATCH_DAY_MODE, ToggleDef};
pub use store::{JsonFileToggleStore, MemoryToggleStore, ToggleStore};

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::{Role, Toggle, ToggleValue, ToggleView};
use shared::util::now_millis;
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("unknown toggle: {0}")]
    NotFound(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{role} cannot change {key}")]
    Forbidden { key: String, role: Role },

    #[error("ops state I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("ops state is unreadable: {0}")]
    Corrupt(String),
}

impl From<OpsError> for AppError {
    fn from(err: OpsError) -> Self {
        match err {
            OpsError::NotFound(key) => {
                AppError::with_message(ErrorCode::ToggleNotFound, format!("Toggle '{key}' not found"))
                    .with_detail("key", key)
            }
            OpsError::InvalidValue { key, value } => AppError::with_message(
                ErrorCode::ToggleValueInvalid,
                format!("'{value}' is not a valid value for '{key}'"),
            )
            .with_detail("key", key),
            OpsError::Forbidden { key, .. } => {
                AppError::new(ErrorCode::AdminRequired).with_detail("key", key)
            }
            other @ (OpsError::Io(_) | OpsError::Corrupt(_)) => {
                tracing::error!(error = %other, "Ops state persistence failed");
                AppError::new(ErrorCode::StorageFailed)
            }
        }
    }
}

/// Result of an accepted `set_toggle`
#[derive(Debug, Clone)]
pub struct AppliedChange {
    pub previous: ToggleValue,
    pub toggle: Toggle,
}

/// Process-wide Ops toggle set
#[derive(Clone)]
pub struct OpsState {
    toggles: Arc<Mutex<BTreeMap<String, Toggle>>>,
    store: Arc<dyn ToggleStore>,
}

impl OpsState {
    /// Load the stored set, reconciled against the catalog
    ///
    /// Unknown stored keys and values that no longer fit their kind are
    /// dropped; missing toggles are created with their default.
    pub async fn load(store: Arc<dyn ToggleStore>) -> Result<Self, OpsError> {
        let stored = store.load().await?;
        let now = now_millis();

        let mut dirty = false;
        let mut toggles = BTreeMap::new();
        for toggle in stored {
            match definitions::find(&toggle.key) {
                Some(def) if def.accepts(&toggle.value) => {
                    toggles.insert(toggle.key.clone(), toggle);
                    continue;
                }
                Some(_) => tracing::warn!(
                    key = %toggle.key,
                    value = %toggle.value,
                    "Stored toggle value no longer valid, resetting"
                ),
                None => tracing::warn!(key = %toggle.key, "Dropping stored toggle unknown to the catalog"),
            }
            dirty = true;
        }

        for def in CATALOG {
            if !toggles.contains_key(def.key) {
                dirty = true;
                toggles.insert(
                    def.key.to_string(),
                    Toggle {
                        key: def.key.to_string(),
                        value: def.default_value(),
                        last_updated: now,
                        updated_by: None,
                    },
                );
            }
        }

        let state = Self {
            toggles: Arc::new(Mutex::new(toggles)),
            store,
        };
        if dirty {
            let guard = state.toggles.lock().await;
            let snapshot: Vec<Toggle> = guard.values().cloned().collect();
            state.store.save(&snapshot).await?;
        }
        Ok(state)
    }

    /// Change one toggle
    ///
    /// Stamps `max(now, previous + 1)` so `last_updated` always moves forward.
    pub async fn set_toggle(
        &self,
        key: &str,
        value: ToggleValue,
        role: Role,
    ) -> Result<AppliedChange, OpsError> {
        self.set_toggle_with(key, value, role, |_| {}).await
    }

    /// [`set_toggle`](Self::set_toggle), calling `on_applied` before the lock is released
    ///
    /// Anything recorded from `on_applied` is ordered the same way as `last_updated`.
    pub async fn set_toggle_with<F>(
        &self,
        key: &str,
        value: ToggleValue,
        role: Role,
        on_applied: F,
    ) -> Result<AppliedChange, OpsError>
    where
        F: FnOnce(&AppliedChange) + Send,
    {
        let def = definitions::find(key).ok_or_else(|| OpsError::NotFound(key.to_string()))?;
        if !role.satisfies(def.min_role) {
            return Err(OpsError::Forbidden {
                key: key.to_string(),
                role,
            });
        }
        if !def.accepts(&value) {
            return Err(OpsError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        let mut toggles = self.toggles.lock().await;
        let current = toggles
            .get(key)
            .cloned()
            .ok_or_else(|| OpsError::NotFound(key.to_string()))?;

        let updated = Toggle {
            key: key.to_string(),
            value,
            last_updated: now_millis().max(current.last_updated + 1),
            updated_by: Some(role),
        };

        let snapshot: Vec<Toggle> = toggles
            .values()
            .map(|t| if t.key == key { updated.clone() } else { t.clone() })
            .collect();
        self.store.save(&snapshot).await?;
        toggles.insert(key.to_string(), updated.clone());

        tracing::info!(
            key = %key,
            from = %current.value,
            to = %updated.value,
            role = %role,
            last_updated = updated.last_updated,
            "Ops toggle changed"
        );

        let applied = AppliedChange {
            previous: current.value,
            toggle: updated,
        };
        on_applied(&applied);
        Ok(applied)
    }

    pub async fn get(&self, key: &str) -> Option<Toggle> {
        self.toggles.lock().await.get(key).cloned()
    }

    /// Whether a switch toggle is on; unknown keys and choices read as off
    pub async fn is_on(&self, key: &str) -> bool {
        self.get(key)
            .await
            .and_then(|t| t.value.as_bool())
            .unwrap_or(false)
    }

    pub async fn choice(&self, key: &str) -> Option<String> {
        self.get(key)
            .await
            .and_then(|t| t.value.as_choice().map(str::to_string))
    }

    /// Catalog order, each joined with its current value
    pub async fn views(&self) -> Vec<ToggleView> {
        let toggles = self.toggles.lock().await;
        CATALOG
            .iter()
            .filter_map(|def| {
                toggles.get(def.key).map(|t| ToggleView {
                    key: t.key.clone(),
                    label: def.label.to_string(),
                    kind: def.kind(),
                    min_role: def.min_role,
                    value: t.value.clone(),
                    last_updated: t.last_updated,
                    updated_by: t.updated_by,
                })
            })
            .collect()
    }

    /// Newest `last_updated` across the set
    pub async fn last_updated(&self) -> i64 {
        self.toggles
            .lock()
            .await
            .values()
            .map(|t| t.last_updated)
            .max()
            .unwrap_or(0)
    }
}
