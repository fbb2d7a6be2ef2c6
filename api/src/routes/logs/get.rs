use crate::response::{error_response, error_with, ok};
use crate::routes::common::{Paged, Pagination};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use db::models::session_log::{LogFilter, Model as SessionLogModel, SessionEvent, SessionStatus};
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub user_id: Option<i64>,
    pub event: Option<SessionEvent>,
    pub status: Option<SessionStatus>,
}

/// GET /api/logs
///
/// Raw session log rows, newest first.
///
/// ### Query Parameters
/// - `user_id`
/// - `event` (`login` | `logout`)
/// - `status` (`active` | `completed` | `terminated`)
/// - `page`, `per_page`
pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<LogQuery>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let filter = LogFilter {
        user_id: query.user_id,
        event: query.event,
        status: query.status,
    };
    match SessionLogModel::list(
        app_state.db(),
        &filter,
        pagination.page(),
        pagination.per_page(),
    )
    .await
    {
        Ok((items, total)) => ok(
            StatusCode::OK,
            Paged::new(items, &pagination, total),
            "Logs retrieved successfully",
        ),
        Err(e) => error_response(e.into()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub user_id: Option<i64>,
}

/// GET /api/logs/sessions
///
/// Login rows paired with their logout, as
/// `{ session_id, user_id, login_at, logout_at, duration_seconds, status }`.
pub async fn list_sessions(
    State(app_state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<SessionQuery>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match SessionLogModel::sessions(
        app_state.db(),
        query.user_id,
        pagination.page(),
        pagination.per_page(),
    )
    .await
    {
        Ok((items, total)) => ok(
            StatusCode::OK,
            Paged::new(items, &pagination, total),
            "Sessions retrieved successfully",
        ),
        Err(e) => error_response(e.into()),
    }
}
