//! Free-text intent requests

use shared::models::IntentReply;
use shared::{AppError, AppResult, ErrorCode};

use crate::ops::{AI_MODE, AI_REPLIES};
use crate::state::AppState;
use crate::utils::validation::{MAX_INTENT_LEN, validate_text_len};

/// Whether the Ops toggles currently allow model calls
pub async fn assistant_enabled(state: &AppState) -> bool {
    state.ops.is_on(AI_REPLIES).await && state.ops.choice(AI_MODE).await.as_deref() != Some("off")
}

/// Send `text` to the model and return its raw reply
///
/// Every call that reaches the model lands in the AI queue, failed or not.
pub async fn extract_intent(state: &AppState, text: &str) -> AppResult<IntentReply> {
    if text.trim().is_empty() {
        return Err(AppError::new(ErrorCode::AssistantEmptyInput).with_detail("field", "text"));
    }
    validate_text_len(text, "text", MAX_INTENT_LEN)?;

    if !assistant_enabled(state).await {
        return Err(AppError::new(ErrorCode::AssistantDisabled));
    }

    match state.assistant.extract(text).await {
        Ok(reply) => {
            state.activity.record_intent(text, Ok(reply.as_str()));
            tracing::info!(model = state.assistant.model(), chars = reply.len(), "Intent extracted");
            Ok(IntentReply {
                model: state.assistant.model().to_string(),
                reply,
            })
        }
        Err(e) => {
            let err = AppError::from(e);
            state.activity.record_intent(text, Err(err.message.as_str()));
            Err(err)
        }
    }
}
