use super::common::UpdateClassRequest;
use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::class::{ClassChanges, Model as ClassModel};
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

/// PUT /api/classes/{class_id}
///
/// Partial update; `schedules`, when present, replaces every slot.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request`
/// - `403 Forbidden` (non-admin reassigning the instructor)
/// - `409 Conflict`
pub async fn update_class(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(class_id): Path<i64>,
    Json(req): Json<UpdateClassRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    if req.instructor_id.is_some_and(|id| id != user.id()) && !user.is_admin() {
        return error_with(
            StatusCode::FORBIDDEN,
            "Only an admin can reassign a class",
        );
    }

    let changes = ClassChanges {
        name: req.name,
        subject_code: req.subject_code,
        room: req.room,
        section: req.section,
        instructor_id: req.instructor_id,
        schedules: req.schedules,
    };
    match ClassModel::update(app_state.db(), class_id, changes).await {
        Ok(detail) => ok(StatusCode::OK, detail, "Class updated successfully"),
        Err(e) => error_response(e),
    }
}
