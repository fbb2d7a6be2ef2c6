use super::common::UserResponse;
use crate::response::{error_response, error_with, ok};
use crate::routes::common::{Paged, Pagination};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use db::AppError;
use db::models::user::{Entity as UserEntity, Model as UserModel, Role};
use sea_orm::EntityTrait;
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    /// Partial match on username, display name or email.
    pub query: Option<String>,
    pub role: Option<Role>,
}

/// GET /api/users
///
/// Paginated account list, newest first.
///
/// ### Query Parameters
/// - `page` (default 1), `per_page` (default 20, max 100)
/// - `query`: partial match on username, display name or email
/// - `role`: `admin` | `instructor` | `student`
///
/// ### Responses
/// - `200 OK` with `{ items, page, per_page, total }`
/// - `400 Bad Request` (invalid query parameters)
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filter): Query<UserFilter>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match UserModel::list(
        app_state.db(),
        filter.role,
        filter.query.as_deref(),
        pagination.page(),
        pagination.per_page(),
    )
    .await
    {
        Ok((rows, total)) => {
            let items = rows.into_iter().map(UserResponse::from).collect();
            ok(
                StatusCode::OK,
                Paged::new(items, &pagination, total),
                "Users retrieved successfully",
            )
        }
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(State(app_state): State<AppState>, Path(user_id): Path<i64>) -> Response {
    match UserEntity::find_by_id(user_id).one(app_state.db()).await {
        Ok(Some(user)) => ok(
            StatusCode::OK,
            UserResponse::from(user),
            "User retrieved successfully",
        ),
        Ok(None) => error_response(AppError::not_found("User", user_id)),
        Err(e) => error_response(e.into()),
    }
}
