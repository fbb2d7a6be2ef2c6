use crate::response::{Empty, error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::{class_enrollment, student};
use serde::{Deserialize, Serialize};
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[validate(length(min = 1, message = "student_number is required"))]
    pub student_number: String,
    /// Creates the student record when the number is not known yet.
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub student: student::Model,
    pub enrolled_at: String,
}

/// GET /api/classes/{class_id}/students
///
/// Enrolled students ordered by student number, with their attendance counters.
pub async fn list_roster(State(app_state): State<AppState>, Path(class_id): Path<i64>) -> Response {
    match class_enrollment::Model::roster(app_state.db(), class_id).await {
        Ok(roster) => ok(StatusCode::OK, roster, "Roster retrieved successfully"),
        Err(e) => error_response(e.into()),
    }
}

/// POST /api/classes/{class_id}/students
///
/// ### Request Body
/// ```json
/// { "student_number": "2024-00001", "name": "Ada Lovelace" }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (malformed student number)
/// - `404 Not Found` (unknown student number and no `name`)
/// - `409 Conflict` (already enrolled)
pub async fn enroll_student(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(req): Json<EnrollRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match class_enrollment::Model::enroll(
        app_state.db(),
        class_id,
        &req.student_number,
        req.name.as_deref(),
    )
    .await
    {
        Ok((student, enrollment)) => {
            tracing::info!(class_id, student_id = student.id, "student enrolled");
            ok(
                StatusCode::CREATED,
                EnrollResponse {
                    student,
                    enrolled_at: enrollment.enrolled_at.to_rfc3339(),
                },
                "Student enrolled successfully",
            )
        }
        Err(e) => error_response(e),
    }
}

/// DELETE /api/classes/{class_id}/students/{student_id}
///
/// Removes the enrollment and the student's attendance events for this class.
pub async fn remove_student(
    State(app_state): State<AppState>,
    Path((class_id, student_id)): Path<(i64, i64)>,
) -> Response {
    match class_enrollment::Model::remove(app_state.db(), class_id, student_id).await {
        Ok(()) => ok(StatusCode::OK, Empty::default(), "Student removed from class"),
        Err(e) => error_response(e),
    }
}
