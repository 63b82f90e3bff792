//! Panel key middleware

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use shared::models::Role;
use shared::{AppError, ErrorCode};

use super::PanelIdentity;
use crate::security_log;
use crate::state::AppState;

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

/// Require a valid panel key in `?key=`
///
/// Resolves the caller's role and injects [`PanelIdentity`] into the request
/// (and response) extensions. Runs before any handler touches panel state.
///
/// | Case | Status |
/// |------|--------|
/// | no `key` | 401 NotAuthenticated |
/// | key matches neither role | 401 InvalidAccessKey |
pub async fn require_panel_key(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = Query::<KeyQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(q)| q.key)
        .filter(|k| !k.is_empty());

    let Some(key) = key else {
        security_log!(WARN, "panel_key_missing", path = %req.uri().path());
        return Err(AppError::not_authenticated());
    };

    match state.keys.resolve(&key) {
        Some(role) => {
            let identity = PanelIdentity { role };
            req.extensions_mut().insert(identity);
            let mut response = next.run(req).await;
            // Request logging runs outside this layer and reads the role from here
            response.extensions_mut().insert(identity);
            Ok(response)
        }
        None => {
            security_log!(WARN, "panel_key_invalid", path = %req.uri().path());
            Err(AppError::invalid_access_key())
        }
    }
}

/// Require the admin role; must run after [`require_panel_key`]
///
/// # Usage
///
/// ```ignore
/// Router::new()
///     .route("/admin", get(panel::admin_page))
///     .route_layer(middleware::from_fn(require_admin));
/// ```
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let identity = req
        .extensions()
        .get::<PanelIdentity>()
        .copied()
        .ok_or_else(AppError::not_authenticated)?;

    if !identity.role.satisfies(Role::Admin) {
        security_log!(
            WARN,
            "admin_required",
            role = %identity.role,
            path = %req.uri().path()
        );
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
