use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared::models::{IntentReply, IntentRequest};
use shared::{ApiResponse, AppResult};

use super::json_body;
use crate::services::intent::extract_intent;
use crate::state::AppState;

/// POST /api/intent
pub async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<IntentRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<IntentReply>>> {
    let req = json_body(payload)?;
    let reply = extract_intent(&state, &req.text).await?;
    Ok(Json(ApiResponse::success(reply)))
}
