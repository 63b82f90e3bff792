//! Shared types for the reservation intake service
//!
//! Error codes and response envelopes, plus the lead, toggle and panel
//! activity models used by the server and the panel scripts.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
