//! Ops toggle catalog

use shared::models::{Role, ToggleKind, ToggleValue};

pub const ACCEPT_BOOKINGS: &str = "accept_bookings";
pub const AI_REPLIES: &str = "ai_replies";
pub const MATCH_DAY_MODE: &str = "match_day_mode";
pub const AI_MODE: &str = "ai_mode";

pub const AI_MODE_CHOICES: &[&str] = &["auto", "review", "off"];

#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    Switch(bool),
    Choice(&'static str),
}

/// One entry of the Ops catalog
#[derive(Debug, Clone, Copy)]
pub struct ToggleDef {
    pub key: &'static str,
    pub label: &'static str,
    /// Empty for on/off switches
    pub choices: &'static [&'static str],
    pub default: DefaultValue,
    pub min_role: Role,
}

impl ToggleDef {
    pub fn kind(&self) -> ToggleKind {
        if self.choices.is_empty() {
            ToggleKind::Switch
        } else {
            ToggleKind::Choice {
                choices: self.choices.iter().map(|c| c.to_string()).collect(),
            }
        }
    }

    pub fn default_value(&self) -> ToggleValue {
        match self.default {
            DefaultValue::Switch(on) => ToggleValue::Switch(on),
            DefaultValue::Choice(c) => ToggleValue::Choice(c.to_string()),
        }
    }

    pub fn accepts(&self, value: &ToggleValue) -> bool {
        match value {
            ToggleValue::Switch(_) => self.choices.is_empty(),
            ToggleValue::Choice(c) => self.choices.contains(&c.as_str()),
        }
    }
}

pub const CATALOG: &[ToggleDef] = &[
    ToggleDef {
        key: ACCEPT_BOOKINGS,
        label: "Accept bookings",
        choices: &[],
        default: DefaultValue::Switch(true),
        min_role: Role::Manager,
    },
    ToggleDef {
        key: AI_REPLIES,
        label: "AI replies",
        choices: &[],
        default: DefaultValue::Switch(true),
        min_role: Role::Manager,
    },
    ToggleDef {
        key: MATCH_DAY_MODE,
        label: "Match day mode",
        choices: &[],
        default: DefaultValue::Switch(false),
        min_role: Role::Manager,
    },
    ToggleDef {
        key: AI_MODE,
        label: "AI mode",
        choices: AI_MODE_CHOICES,
        default: DefaultValue::Choice("auto"),
        min_role: Role::Admin,
    },
];

pub fn find(key: &str) -> Option<&'static ToggleDef> {
    CATALOG.iter().find(|def| def.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_unique() {
        let mut keys: Vec<_> = CATALOG.iter().map(|d| d.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), CATALOG.len());
    }

    #[test]
    fn test_defaults_fit_their_kind() {
        for def in CATALOG {
            assert!(def.accepts(&def.default_value()), "{}", def.key);
        }
    }

    #[test]
    fn test_ai_mode_is_admin_only_choice() {
        let def = find(AI_MODE).unwrap();
        assert_eq!(def.min_role, Role::Admin);
        assert!(def.accepts(&ToggleValue::Choice("review".into())));
        assert!(!def.accepts(&ToggleValue::Choice("manual".into())));
        assert!(!def.accepts(&ToggleValue::Switch(false)));
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("happy_hour").is_none());
    }
}
