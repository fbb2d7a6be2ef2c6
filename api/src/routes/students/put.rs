use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::student::Model as StudentModel;
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, message = "student_number cannot be empty"))]
    pub student_number: Option<String>,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
}

/// PUT /api/students/{student_id}
///
/// Counters are not editable here; they follow the attendance events.
pub async fn update_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match StudentModel::update(app_state.db(), student_id, req.student_number, req.name).await {
        Ok(student) => ok(StatusCode::OK, student, "Student updated successfully"),
        Err(e) => error_response(e),
    }
}
