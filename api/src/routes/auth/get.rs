use crate::auth::AuthUser;
use crate::response::{error_response, ok};
use axum::{extract::State, http::StatusCode, response::Response};
use db::AppError;
use db::models::{student, user};
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: user::Model,
    /// Student record linked to this account, for student accounts.
    pub student: Option<student::Model>,
    pub session_id: String,
}

/// GET /api/auth/me
///
/// Returns the authenticated account, its linked student record (if any) and the
/// session id carried by the token.
///
/// ### Responses
/// - `200 OK`
/// - `401 Unauthorized`
/// - `404 Not Found` (account deleted since the token was issued)
pub async fn get_me(State(app_state): State<AppState>, user: AuthUser) -> Response {
    let db = app_state.db();

    let account = match user::Entity::find_by_id(user.id()).one(db).await {
        Ok(Some(account)) => account,
        Ok(None) => return error_response(AppError::not_found("User", user.id())),
        Err(e) => return error_response(e.into()),
    };
    let student = match student::Model::find_by_user(db, account.id).await {
        Ok(s) => s,
        Err(e) => return error_response(e.into()),
    };

    ok(
        StatusCode::OK,
        MeResponse {
            user: account,
            student,
            session_id: user.0.sid,
        },
        "User data retrieved successfully",
    )
}
