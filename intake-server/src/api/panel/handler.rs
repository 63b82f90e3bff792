use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Html,
};
use serde::{Deserialize, Serialize};
use shared::models::{
    AuditEntry, IntentRecord, Role, ToggleChange, ToggleKind, ToggleUpdate, ToggleView,
};
use shared::util::format_millis;
use shared::{ApiResponse, AppResult};

use super::page::render_panel;
use crate::api::{json_body, query_params};
use crate::auth::PanelIdentity;
use crate::catalog::MenuItem;
use crate::ops::{AI_MODE, AI_REPLIES, CATALOG};
use crate::services::intent::assistant_enabled;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct ListQuery {
    limit: Option<usize>,
}

impl ListQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 500)
    }
}

#[derive(Serialize)]
pub struct OpsSnapshot {
    pub role: Role,
    pub toggles: Vec<ToggleView>,
    /// Newest change across all toggles (ms)
    pub last_updated: i64,
    pub last_updated_text: String,
}

#[derive(Serialize)]
pub struct AiStatus {
    pub model: String,
    pub enabled: bool,
    pub ai_replies: bool,
    pub ai_mode: String,
    pub extractions: u64,
    pub failures: u64,
}

#[derive(Serialize)]
pub struct RuleView {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ToggleKind,
    pub min_role: Role,
    pub editable_by: Vec<Role>,
    /// Whether the caller may change it
    pub can_edit: bool,
}

pub async fn admin_page(
    State(state): State<AppState>,
    Extension(identity): Extension<PanelIdentity>,
) -> Html<String> {
    render(&state, Role::Admin, identity).await
}

pub async fn manager_page(
    State(state): State<AppState>,
    Extension(identity): Extension<PanelIdentity>,
) -> Html<String> {
    render(&state, Role::Manager, identity).await
}

async fn render(state: &AppState, panel: Role, identity: PanelIdentity) -> Html<String> {
    let toggles = state.ops.views().await;
    let last_updated = toggles.iter().map(|t| t.last_updated).max().unwrap_or(0);
    Html(render_panel(panel, identity.role, &toggles, last_updated).into_string())
}

/// GET /api/panel/ops
pub async fn ops(
    State(state): State<AppState>,
    Extension(identity): Extension<PanelIdentity>,
) -> Json<ApiResponse<OpsSnapshot>> {
    let toggles = state.ops.views().await;
    let last_updated = toggles.iter().map(|t| t.last_updated).max().unwrap_or(0);
    Json(ApiResponse::success(OpsSnapshot {
        role: identity.role,
        toggles,
        last_updated,
        last_updated_text: format_millis(last_updated),
    }))
}

/// PUT /api/panel/ops/{toggle}
pub async fn set_toggle(
    State(state): State<AppState>,
    Extension(identity): Extension<PanelIdentity>,
    Path(key): Path<String>,
    payload: Result<Json<ToggleUpdate>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ToggleChange>>> {
    let update = json_body(payload)?;
    let activity = &state.activity;
    let applied = state
        .ops
        .set_toggle_with(&key, update.value, identity.role, |applied| {
            activity.record_toggle(
                identity.role,
                &key,
                applied.previous.clone(),
                applied.toggle.value.clone(),
                applied.toggle.last_updated,
            );
        })
        .await?;

    Ok(Json(ApiResponse::success(ToggleChange {
        accepted: true,
        toggle: applied.toggle,
    })))
}

/// GET /api/panel/ai
pub async fn ai(State(state): State<AppState>) -> Json<ApiResponse<AiStatus>> {
    let stats = state.activity.intent_stats();
    Json(ApiResponse::success(AiStatus {
        model: state.assistant.model().to_string(),
        enabled: assistant_enabled(&state).await,
        ai_replies: state.ops.is_on(AI_REPLIES).await,
        ai_mode: state.ops.choice(AI_MODE).await.unwrap_or_default(),
        extractions: stats.total,
        failures: stats.failed,
    }))
}

/// GET /api/panel/ai-queue
pub async fn ai_queue(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<IntentRecord>>>> {
    let query = query_params(query)?;
    Ok(Json(ApiResponse::success(
        state.activity.intent_queue(query.limit()),
    )))
}

/// GET /api/panel/rules
pub async fn rules(
    Extension(identity): Extension<PanelIdentity>,
) -> Json<ApiResponse<Vec<RuleView>>> {
    let rules = CATALOG
        .iter()
        .map(|def| RuleView {
            key: def.key,
            label: def.label,
            kind: def.kind(),
            min_role: def.min_role,
            editable_by: [Role::Manager, Role::Admin]
                .into_iter()
                .filter(|r| r.satisfies(def.min_role))
                .collect(),
            can_edit: identity.role.satisfies(def.min_role),
        })
        .collect();
    Json(ApiResponse::success(rules))
}

/// GET /api/panel/menu
pub async fn menu(State(state): State<AppState>) -> Json<ApiResponse<Vec<MenuItem>>> {
    Json(ApiResponse::success(state.catalog.menu().to_vec()))
}

/// GET /api/panel/audit
pub async fn audit(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Vec<AuditEntry>>>> {
    let query = query_params(query)?;
    Ok(Json(ApiResponse::success(state.activity.audit(query.limit()))))
}
