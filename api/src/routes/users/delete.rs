use crate::auth::AuthUser;
use crate::response::{Empty, error_response, error_with, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::user::Model as UserModel;
use util::state::AppState;

/// DELETE /api/users/{user_id}
///
/// Admins cannot delete their own account.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` (deleting yourself)
/// - `404 Not Found`
pub async fn delete_user(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<i64>,
) -> Response {
    if user.id() == user_id {
        return error_with(StatusCode::FORBIDDEN, "You cannot delete your own account");
    }
    match UserModel::delete_by_id(app_state.db(), user_id).await {
        Ok(()) => {
            tracing::info!(user_id, by = user.id(), "user deleted");
            ok(StatusCode::OK, Empty::default(), "User deleted successfully")
        }
        Err(e) => error_response(e),
    }
}
