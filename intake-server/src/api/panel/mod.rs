//! Admin / manager panels
//!
//! Every route here sits behind [`require_panel_key`]; `/admin` additionally
//! requires the admin role. Toggle writes check the toggle's own minimum role.

mod handler;
pub mod page;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{require_admin, require_panel_key};
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    let admin_page = Router::new()
        .route("/admin", get(handler::admin_page))
        .route_layer(middleware::from_fn(require_admin));

    let panel = Router::new()
        .route("/manager", get(handler::manager_page))
        .route("/api/panel/ops", get(handler::ops))
        .route("/api/panel/ops/{toggle}", put(handler::set_toggle))
        .route("/api/panel/ai", get(handler::ai))
        .route("/api/panel/ai-queue", get(handler::ai_queue))
        .route("/api/panel/rules", get(handler::rules))
        .route("/api/panel/menu", get(handler::menu))
        .route("/api/panel/audit", get(handler::audit));

    admin_page
        .merge(panel)
        .route_layer(middleware::from_fn_with_state(state, require_panel_key))
}
