use crate::response::{Empty, error_response, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::student::Model as StudentModel;
use util::state::AppState;

/// DELETE /api/students/{student_id}
///
/// Also removes every enrollment and attendance event of the student.
pub async fn delete_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentModel::delete_by_id(app_state.db(), student_id).await {
        Ok(()) => {
            tracing::info!(student_id, "student deleted");
            ok(StatusCode::OK, Empty::default(), "Student deleted successfully")
        }
        Err(e) => error_response(e),
    }
}
