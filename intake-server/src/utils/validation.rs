//! Input validation helpers
//!
//! Everything here runs before any external call is made.

use shared::models::BookingRequest;
use shared::{AppError, ErrorCode};

/// Guest name
pub const MAX_NAME_LEN: usize = 200;

/// Phone, date, time
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Free-text request sent to the model
pub const MAX_INTENT_LEN: usize = 2000;

/// Validate that a required string is non-blank and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    validate_text_len(value, field, max_len)
}

pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Check a booking and return its party size
pub fn validate_booking(req: &BookingRequest) -> Result<u32, AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&req.date, "date", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&req.time, "time", MAX_SHORT_TEXT_LEN)?;

    if req.party_size < 1 {
        return Err(AppError::new(ErrorCode::PartySizeInvalid).with_detail("field", "party_size"));
    }
    u32::try_from(req.party_size).map_err(|_| {
        AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("party_size {} is out of range", req.party_size),
        )
        .with_detail("field", "party_size")
    })
}
