use crate::auth::{AuthUser, extractors::RequestClient, generate_jwt};
use crate::response::{ApiResponse, error_response, error_with, ok};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::{
    session_log,
    user::{Model as UserModel, Role},
};
use serde::{Deserialize, Serialize};
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub session_id: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Verifies credentials, opens a session log entry and issues a JWT bound to it.
///
/// ### Request Body
/// ```json
/// { "username": "INS-0001", "password": "password123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ id, username, display_name, email, role, session_id, token, expires_at }`
/// - `400 Bad Request` (missing fields)
/// - `401 Unauthorized` ("Invalid username or password")
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    RequestClient(client): RequestClient,
    Json(req): Json<LoginRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    let db = app_state.db();

    let user = match UserModel::verify_credentials(db, &req.username, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!(username = %req.username, "rejected login");
            return error_with(StatusCode::UNAUTHORIZED, "Invalid username or password");
        }
        Err(e) => return error_response(e.into()),
    };

    let session = match session_log::Model::login(db, user.id, client).await {
        Ok(row) => row,
        Err(e) => return error_response(e),
    };

    let (token, expires_at) = match generate_jwt(user.id, user.role, &session.session_id) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "token encoding failed");
            return error_with(StatusCode::INTERNAL_SERVER_ERROR, "Token encoding failed");
        }
    };

    tracing::info!(user_id = user.id, session_id = %session.session_id, "user logged in");
    ok(
        StatusCode::OK,
        LoginResponse {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            role: user.role,
            session_id: session.session_id,
            token,
            expires_at,
        },
        "Login successful",
    )
}

/// POST /api/auth/logout
///
/// Closes the caller's session. The token's session is preferred; otherwise the most
/// recent active login is closed. With no active login a standalone logout is recorded.
///
/// ### Responses
/// - `200 OK` with the logout log row (`duration_seconds` is null when no login was open)
pub async fn logout(
    State(app_state): State<AppState>,
    user: AuthUser,
    RequestClient(client): RequestClient,
) -> impl IntoResponse {
    match session_log::Model::logout(app_state.db(), user.id(), Some(&user.0.sid), client).await {
        Ok(row) => {
            tracing::info!(user_id = user.id(), session_id = %row.session_id, "user logged out");
            (StatusCode::OK, Json(ApiResponse::success(row, "Logout recorded"))).into_response()
        }
        Err(e) => error_response(e),
    }
}
