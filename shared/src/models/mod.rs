//! Data models
//!
//! Shared between the intake server and the panel scripts (via API).

pub mod activity;
pub mod lead;
pub mod role;
pub mod toggle;

// Re-exports
pub use activity::*;
pub use lead::*;
pub use role::*;
pub use toggle::*;
