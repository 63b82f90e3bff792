//! Unified error codes for the intake service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors (panel access keys)
//! - 2xxx: Permission errors
//! - 3xxx: Booking errors
//! - 4xxx: Ops toggle errors
//! - 5xxx: Assistant (language model) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the panel scripts can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// No access key was presented
    NotAuthenticated = 1001,
    /// Access key matches neither configured key
    InvalidAccessKey = 1008,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Booking ====================
    /// Bookings are switched off in Ops
    BookingsClosed = 3001,
    /// Party size must be at least one
    PartySizeInvalid = 3002,

    // ==================== 4xxx: Ops ====================
    /// Toggle key is not part of the Ops catalog
    ToggleNotFound = 4001,
    /// Value does not fit the toggle kind
    ToggleValueInvalid = 4002,

    // ==================== 5xxx: Assistant ====================
    /// Assistant replies are switched off in Ops
    AssistantDisabled = 5001,
    /// Free-text request is blank
    AssistantEmptyInput = 5002,

    // ==================== 9xxx: System ====================
    NetworkError = 9003,
    /// Lead store rejected our credential
    StoreAuthFailed = 9006,
    /// Lead store target spreadsheet or sheet is missing
    StoreNotFound = 9007,
    /// External service answered with an unexpected status
    UpstreamError = 9008,

    // ==================== 94xx: Storage ====================
    /// Local persistence (Ops state, lead file) failed
    StorageFailed = 9401,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Access key is required",
            ErrorCode::InvalidAccessKey => "Access key is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Booking
            ErrorCode::BookingsClosed => "Bookings are currently closed",
            ErrorCode::PartySizeInvalid => "Party size must be at least 1",

            // Ops
            ErrorCode::ToggleNotFound => "Toggle not found",
            ErrorCode::ToggleValueInvalid => "Invalid value for toggle",

            // Assistant
            ErrorCode::AssistantDisabled => "Assistant replies are currently disabled",
            ErrorCode::AssistantEmptyInput => "Request text is empty",

            // System
            ErrorCode::NetworkError => "Network error",
            ErrorCode::StoreAuthFailed => "Lead store authentication failed",
            ErrorCode::StoreNotFound => "Lead store target not found",
            ErrorCode::UpstreamError => "Upstream service error",

            // Storage
            ErrorCode::StorageFailed => "Storage operation failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1008 => Ok(ErrorCode::InvalidAccessKey),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Booking
            3001 => Ok(ErrorCode::BookingsClosed),
            3002 => Ok(ErrorCode::PartySizeInvalid),

            // Ops
            4001 => Ok(ErrorCode::ToggleNotFound),
            4002 => Ok(ErrorCode::ToggleValueInvalid),

            // Assistant
            5001 => Ok(ErrorCode::AssistantDisabled),
            5002 => Ok(ErrorCode::AssistantEmptyInput),

            // System
            9003 => Ok(ErrorCode::NetworkError),
            9006 => Ok(ErrorCode::StoreAuthFailed),
            9007 => Ok(ErrorCode::StoreNotFound),
            9008 => Ok(ErrorCode::UpstreamError),

            // Storage
            9401 => Ok(ErrorCode::StorageFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
