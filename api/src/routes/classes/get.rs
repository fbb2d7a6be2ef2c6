use crate::auth::AuthUser;
use crate::response::{error_response, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::class::Model as ClassModel;
use util::state::AppState;

/// GET /api/classes
///
/// Admins see every class, instructors the classes they teach and students the
/// classes they are enrolled in.
pub async fn list_classes(State(app_state): State<AppState>, user: AuthUser) -> Response {
    match ClassModel::list_for_user(app_state.db(), user.id(), user.role()).await {
        Ok(classes) => ok(StatusCode::OK, classes, "Classes retrieved successfully"),
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/classes/{class_id}
///
/// The class with its weekly schedule slots.
pub async fn get_class(State(app_state): State<AppState>, Path(class_id): Path<i64>) -> Response {
    match ClassModel::find_detail(app_state.db(), class_id).await {
        Ok(detail) => ok(StatusCode::OK, detail, "Class retrieved successfully"),
        Err(e) => error_response(e),
    }
}
