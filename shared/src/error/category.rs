//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Booking errors
/// - 4xxx: Ops toggle errors
/// - 5xxx: Assistant errors
/// - 9xxx: System errors (6xxx-8xxx are unassigned and fall here too)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Booking errors (3xxx)
    Booking,
    /// Ops toggle errors (4xxx)
    Ops,
    /// Assistant errors (5xxx)
    Assistant,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Booking,
            4000..5000 => Self::Ops,
            5000..6000 => Self::Assistant,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Booking => "booking",
            Self::Ops => "ops",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1008), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2003), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Ops);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Assistant);
        assert_eq!(ErrorCategory::from_code(9401), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidAccessKey.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::BookingsClosed.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::ToggleNotFound.category(), ErrorCategory::Ops);
        assert_eq!(
            ErrorCode::AssistantDisabled.category(),
            ErrorCategory::Assistant
        );
        assert_eq!(ErrorCode::StoreAuthFailed.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: ErrorCategory = serde_json::from_str("\"ops\"").unwrap();
        assert_eq!(parsed, ErrorCategory::Ops);
    }
}
