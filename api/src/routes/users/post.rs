use super::common::{CreateUserRequest, UserResponse};
use crate::response::{error_response, error_with, ok};
use axum::{Json, extract::State, http::StatusCode, response::Response};
use db::models::user::Model as UserModel;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

/// POST /api/users
///
/// Creates an account. The username must match the role's ID format
/// (`ADM-0001`, `INS-0001` or `2024-00001`).
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (validation failure or wrong ID format)
/// - `409 Conflict` (username or email already taken)
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match UserModel::create(
        app_state.db(),
        &req.username,
        &req.display_name,
        &req.email,
        &req.password,
        req.role,
    )
    .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, role = %user.role, "user created");
            ok(
                StatusCode::CREATED,
                UserResponse::from(user),
                "User created successfully",
            )
        }
        Err(e) => error_response(e),
    }
}
