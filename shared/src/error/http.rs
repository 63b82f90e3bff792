//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::ToggleNotFound => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidAccessKey => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::AdminRequired => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (switched off, or transient)
            Self::BookingsClosed | Self::AssistantDisabled | Self::NetworkError => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            // 502 Bad Gateway (external store / model refused us)
            Self::StoreAuthFailed | Self::StoreNotFound | Self::UpstreamError => {
                StatusCode::BAD_GATEWAY
            }

            // 500 Internal Server Error
            Self::StorageFailed | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
