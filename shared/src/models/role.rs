//! Panel Role Model

use serde::{Deserialize, Serialize};

/// Panel role resolved from an access key
///
/// Ordered by capability: `Admin` can do everything `Manager` can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Admin,
}

impl Role {
    /// Whether this role satisfies a requirement of `required`
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }

    /// Route segment and wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Display label for panel headings
    pub fn label(self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
