//! Reservation intake server
//!
//! - Accepts bookings and appends each one as a lead row (Google Sheets or a local file)
//! - Forwards free-text requests to a language model and returns the raw reply
//! - Serves role-gated admin / manager panels whose Ops toggles change behavior at runtime
//!
//! # Module layout
//!
//! ```text
//! intake-server/src/
//! ├── api/          # HTTP routes (public API, panels)
//! ├── auth/         # Panel access keys
//! ├── middleware/   # Request logging
//! ├── ops/          # Ops toggles, catalog, persistence
//! ├── services/     # Booking and intent flows
//! ├── sinks/        # Lead sinks
//! ├── llm/          # Language model client
//! ├── utils/        # Logger, validation
//! ├── activity.rs   # Audit trail, AI queue
//! ├── catalog.rs    # Match schedule, menu
//! ├── config.rs
//! └── state.rs
//! ```

pub mod activity;
pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod llm;
pub mod middleware;
pub mod ops;
pub mod services;
pub mod sinks;
pub mod state;
pub mod utils;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;

/// Security event log (target `security`)
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}
