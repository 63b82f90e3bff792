use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::models::{BookingRequest, Lead};
use shared::{ApiResponse, AppResult};

use super::json_body;
use crate::services::booking::submit_booking;
use crate::state::AppState;

/// POST /api/bookings
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Lead>>)> {
    let lead = submit_booking(&state, json_body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message("Booking received", lead)),
    ))
}
