use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::AppResult;

use super::query_params;
use crate::catalog::{DEFAULT_SCOPE, ScheduleScope};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScheduleQuery {
    scope: Option<String>,
    q: Option<String>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    /// Echoed as given
    pub scope: String,
    pub count: usize,
    pub matches: Vec<Value>,
}

/// GET /schedule.json
pub async fn schedule(
    State(state): State<AppState>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> AppResult<Json<ScheduleResponse>> {
    let query = query_params(query)?;
    let scope = query.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string());
    let matches = state
        .catalog
        .matches(ScheduleScope::parse(&scope), query.q.as_deref());
    Ok(Json(ScheduleResponse {
        scope,
        count: matches.len(),
        matches,
    }))
}
