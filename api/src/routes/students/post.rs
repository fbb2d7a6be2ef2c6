use crate::response::{error_response, error_with, ok};
use axum::{Json, extract::State, http::StatusCode, response::Response};
use db::models::student::Model as StudentModel;
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, message = "student_number is required"))]
    pub student_number: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// POST /api/students
///
/// ### Request Body
/// ```json
/// { "student_number": "2024-00001", "name": "Ada Lovelace" }
/// ```
///
/// A student account whose username equals `student_number` is linked automatically.
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (number not in `YYYY-NNNNN` form)
/// - `409 Conflict` (number already used)
pub async fn create_student(
    State(app_state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match StudentModel::create(app_state.db(), &req.student_number, &req.name).await {
        Ok(student) => {
            tracing::info!(
                student_id = student.id,
                number = %student.student_number,
                "student created"
            );
            ok(StatusCode::CREATED, student, "Student created successfully")
        }
        Err(e) => error_response(e),
    }
}
