//! Booking intake: validate, check Ops, append one lead

use chrono::Local;
use shared::models::{BookingRequest, Lead};
use shared::{AppError, AppResult, ErrorCode};

use crate::ops::ACCEPT_BOOKINGS;
use crate::state::AppState;
use crate::utils::validation::validate_booking;

/// Append one lead for `req`
///
/// Success is only reported after the sink confirmed the row. Rejections
/// (invalid input, bookings switched off) never reach the sink.
pub async fn submit_booking(state: &AppState, req: BookingRequest) -> AppResult<Lead> {
    let party_size = validate_booking(&req)?;

    if !state.ops.is_on(ACCEPT_BOOKINGS).await {
        tracing::info!("Booking rejected, bookings are switched off");
        return Err(AppError::new(ErrorCode::BookingsClosed));
    }

    let lead = Lead::new(req, party_size, Local::now().naive_local());
    state.leads.append(&lead).await?;

    tracing::info!(
        sink = state.leads.name(),
        party_size = lead.party_size,
        date = %lead.date,
        time = %lead.time,
        "Lead appended"
    );
    Ok(lead)
}
