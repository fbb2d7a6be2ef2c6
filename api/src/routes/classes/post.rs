use super::common::CreateClassRequest;
use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use axum::{Json, extract::State, http::StatusCode, response::Response};
use db::models::class::{Model as ClassModel, NewClass};
use db::models::user::Role;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

/// POST /api/classes
///
/// ### Request Body
/// ```json
/// {
///   "name": "Algebra",
///   "subject_code": "MATH101",
///   "room": "B12",
///   "section": "A",
///   "instructor_id": 3,
///   "schedules": [
///     { "days": ["Mon", "Wed"], "start_time": "08:00", "end_time": "09:30", "meridiem": "AM" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the class and its schedules
/// - `400 Bad Request` (validation, unknown weekday, bad time, missing instructor)
/// - `403 Forbidden` (instructor creating a class for someone else)
/// - `409 Conflict` (subject code and section already taken)
pub async fn create_class(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateClassRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let instructor_id = match (user.role(), req.instructor_id) {
        (Role::Instructor, None) => user.id(),
        (Role::Instructor, Some(id)) if id == user.id() => id,
        (Role::Instructor, Some(_)) => {
            return error_with(
                StatusCode::FORBIDDEN,
                "Instructors can only create their own classes",
            );
        }
        (_, Some(id)) => id,
        (_, None) => {
            return error_with(StatusCode::BAD_REQUEST, "instructor_id is required");
        }
    };

    let new = NewClass {
        name: req.name,
        subject_code: req.subject_code,
        room: req.room,
        section: req.section,
        instructor_id,
        schedules: req.schedules,
    };
    match ClassModel::create(app_state.db(), new).await {
        Ok(detail) => {
            tracing::info!(class_id = detail.class.id, instructor_id, "class created");
            ok(StatusCode::CREATED, detail, "Class created successfully")
        }
        Err(e) => error_response(e),
    }
}
