//! HTTP routes for the intake server

pub mod bookings;
pub mod health;
pub mod intent;
pub mod panel;
pub mod schedule;

use axum::{
    Json, Router,
    extract::Query,
    extract::rejection::{JsonRejection, QueryRejection},
    middleware as axum_middleware,
    routing::{get, post},
};
use http::{HeaderName, HeaderValue};
use shared::{AppError, AppResult};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::logging_middleware;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Unwrap a JSON body, turning extractor rejections into validation errors
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Unwrap query parameters, turning extractor rejections into validation errors
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Build a router with all routes registered (no middleware)
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        // Public API
        .route("/health", get(health::health_check))
        .route("/api/bookings", post(bookings::create))
        .route("/api/intent", post(intent::extract))
        .route("/schedule.json", get(schedule::schedule))
        // Panels - access key required
        .merge(panel::router(state.clone()))
        // Everything else - static site (index.html at /)
        .fallback_service(ServeDir::new(&state.static_dir).append_index_html_on_directories(true))
}

/// Build the fully configured application with middleware and state
///
/// Used by both the HTTP server and the integration tests.
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        // Request logging
        .layer(axum_middleware::from_fn(logging_middleware))
        // Trace - request spans (INFO level)
        .layer(TraceLayer::new_for_http())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // CORS - the booking form may be embedded elsewhere
        .layer(CorsLayer::permissive())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, so every inner layer sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
