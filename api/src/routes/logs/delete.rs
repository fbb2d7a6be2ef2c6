use crate::response::{error_response, ok};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use db::models::session_log::Model as SessionLogModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClearQuery {
    /// RFC 3339; only rows that occurred before it are removed.
    pub before: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct Cleared {
    pub deleted: u64,
}

/// DELETE /api/logs?before=2025-01-01T00:00:00Z
///
/// Without `before` every row is removed.
pub async fn clear_logs(
    State(app_state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Response {
    match SessionLogModel::clear(app_state.db(), query.before).await {
        Ok(deleted) => {
            tracing::info!(deleted, before = ?query.before, "session logs cleared");
            ok(StatusCode::OK, Cleared { deleted }, "Session logs cleared")
        }
        Err(e) => error_response(e),
    }
}
