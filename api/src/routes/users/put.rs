use super::common::{UpdateUserRequest, UserResponse};
use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::user::{Model as UserModel, UserChanges};
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

/// PUT /api/users/{user_id}
///
/// Partial update. Changing the role or the username re-checks that the pair
/// still matches the role's ID format.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request`
/// - `404 Not Found`
/// - `409 Conflict`
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let changes = UserChanges {
        username: req.username,
        display_name: req.display_name,
        email: req.email,
        password: req.password,
        role: req.role,
    };
    match UserModel::update(app_state.db(), user_id, changes).await {
        Ok(user) => ok(
            StatusCode::OK,
            UserResponse::from(user),
            "User updated successfully",
        ),
        Err(e) => error_response(e),
    }
}
