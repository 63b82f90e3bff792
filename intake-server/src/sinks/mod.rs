//! Lead sinks
//!
//! An accepted booking becomes one appended row. The row is written exactly
//! once per accepted request; nothing is retried or buffered here.

mod jsonl;
mod sheets;

pub use jsonl::JsonlSink;
pub use sheets::{ServiceAccountKey, SheetsSink};

use async_trait::async_trait;
use shared::models::Lead;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Failure while appending a lead
#[derive(Debug, Error)]
pub enum SinkError {
    /// The store rejected our credential (or it could not be signed)
    #[error("lead store authentication failed: {0}")]
    Authentication(String),

    /// Spreadsheet or sheet does not exist / is not shared with us
    #[error("lead store target not found: {0}")]
    NotFound(String),

    #[error("lead store unreachable: {0}")]
    Network(String),

    #[error("lead store returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("lead file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lead store response: {0}")]
    Decode(String),
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        let code = match &err {
            SinkError::Authentication(_) => ErrorCode::StoreAuthFailed,
            SinkError::NotFound(_) => ErrorCode::StoreNotFound,
            SinkError::Network(_) => ErrorCode::NetworkError,
            SinkError::Upstream { .. } | SinkError::Decode(_) => ErrorCode::UpstreamError,
            SinkError::Io(_) => ErrorCode::StorageFailed,
        };
        tracing::error!(code = %code, error = %err, "Lead append failed");
        AppError::with_message(code, code.message())
    }
}

/// Append-only destination for accepted leads
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Append one row (see [`Lead::row`] for column order)
    async fn append(&self, lead: &Lead) -> Result<(), SinkError>;

    /// Short name for logs and `/health`
    fn name(&self) -> &'static str;
}
