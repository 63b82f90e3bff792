//! Ops Toggle Model

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Toggle value: an on/off switch or one choice of a small closed enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleValue {
    Switch(bool),
    Choice(String),
}

impl ToggleValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ToggleValue::Switch(on) => Some(*on),
            ToggleValue::Choice(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            ToggleValue::Switch(_) => None,
            ToggleValue::Choice(c) => Some(c),
        }
    }
}

impl std::fmt::Display for ToggleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToggleValue::Switch(true) => f.write_str("on"),
            ToggleValue::Switch(false) => f.write_str("off"),
            ToggleValue::Choice(c) => f.write_str(c),
        }
    }
}

/// Kind of a toggle, with the allowed choices for enums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToggleKind {
    Switch,
    Choice { choices: Vec<String> },
}

/// Ops toggle as persisted and as shown in the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    pub key: String,
    pub value: ToggleValue,
    /// Milliseconds since the Unix epoch; moves with every accepted mutation
    pub last_updated: i64,
    /// Role of the last writer (None while still at its default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Role>,
}

/// Toggle merged with its catalog definition, for panel rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleView {
    pub key: String,
    pub label: String,
    pub kind: ToggleKind,
    pub min_role: Role,
    pub value: ToggleValue,
    pub last_updated: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Role>,
}

/// Body of a toggle mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleUpdate {
    pub value: ToggleValue,
}

/// Result of `set_toggle`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleChange {
    pub accepted: bool,
    pub toggle: Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_value_untagged() {
        let v: ToggleValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, ToggleValue::Switch(true));
        let v: ToggleValue = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(v, ToggleValue::Choice("review".into()));
        assert_eq!(serde_json::to_string(&ToggleValue::Switch(false)).unwrap(), "false");
    }

    #[test]
    fn test_display() {
        assert_eq!(ToggleValue::Switch(true).to_string(), "on");
        assert_eq!(ToggleValue::Choice("review".into()).to_string(), "review");
    }
}
