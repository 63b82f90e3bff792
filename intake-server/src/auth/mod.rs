//! Panel access keys
//!
//! Panels are opened with `?key=<access key>`. The key is compared by exact
//! match against the two configured keys and decides the caller's [`Role`].

mod middleware;

pub use middleware::{require_admin, require_panel_key};

use shared::models::Role;

pub struct PanelKeys {
    admin: String,
    manager: String,
}

impl PanelKeys {
    pub fn new(admin: impl Into<String>, manager: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            manager: manager.into(),
        }
    }

    /// Role for a presented key, if it matches either configured key
    pub fn resolve(&self, key: &str) -> Option<Role> {
        if key.is_empty() {
            None
        } else if key == self.admin {
            Some(Role::Admin)
        } else if key == self.manager {
            Some(Role::Manager)
        } else {
            None
        }
    }
}

/// Caller identity injected into request extensions by [`require_panel_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelIdentity {
    pub role: Role,
}
