//! Read-only match schedule and menu, loaded once at startup

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Scope used when the request names none
pub const DEFAULT_SCOPE: &str = "dallas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleScope {
    Dallas,
    All,
}

impl ScheduleScope {
    /// Exactly `dallas` selects the local schedule; any other value is everything
    pub fn parse(raw: &str) -> Self {
        if raw == DEFAULT_SCOPE {
            Self::Dallas
        } else {
            Self::All
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub all: Vec<Value>,
    #[serde(default)]
    pub dallas: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schedule: Schedule,
    menu: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(schedule: Schedule, menu: Vec<MenuItem>) -> Self {
        Self { schedule, menu }
    }

    /// Load from optional files; an absent path means an empty list
    pub fn load(schedule_file: Option<&Path>, menu_file: Option<&Path>) -> Result<Self, BoxError> {
        let schedule = match schedule_file {
            Some(path) => read_json(path)?,
            None => Schedule::default(),
        };
        let menu = match menu_file {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        Ok(Self { schedule, menu })
    }

    /// Matches in `scope` whose JSON text contains `query` (case-insensitive)
    pub fn matches(&self, scope: ScheduleScope, query: Option<&str>) -> Vec<Value> {
        let source = match scope {
            ScheduleScope::Dallas => &self.schedule.dallas,
            ScheduleScope::All => &self.schedule.all,
        };
        let needle = query.map(str::to_lowercase).filter(|q| !q.is_empty());
        match needle {
            None => source.clone(),
            Some(needle) => source
                .iter()
                .filter(|m| m.to_string().to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        }
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BoxError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&raw).map_err(|e| format!("Invalid JSON in {}: {e}", path.display()))?)
}
