//! Conversational intent extraction
//!
//! Free text goes to a language model verbatim and the raw reply comes back.
//! Nothing downstream parses the reply into a booking.

mod responses;

pub use responses::{ResponsesClient, output_text};

use async_trait::async_trait;
use shared::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("model API rejected the key: {0}")]
    Authentication(String),

    #[error("model API unreachable: {0}")]
    Network(String),

    #[error("model API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("model reply contained no text")]
    EmptyReply,

    #[error("invalid model response: {0}")]
    Decode(String),
}

impl From<IntentError> for AppError {
    fn from(err: IntentError) -> Self {
        let code = match &err {
            IntentError::Network(_) => ErrorCode::NetworkError,
            _ => ErrorCode::UpstreamError,
        };
        tracing::error!(code = %code, error = %err, "Intent extraction failed");
        AppError::with_message(code, code.message())
    }
}

/// Turns free text into a model reply
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<String, IntentError>;

    /// Model identifier shown in the AI panel
    fn model(&self) -> &str;
}
