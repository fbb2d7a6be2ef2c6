use crate::response::{Empty, error_response, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::class::Model as ClassModel;
use util::state::AppState;

/// DELETE /api/classes/{class_id}
///
/// Removes the class together with its schedules, enrollments, attendance events and
/// reports. Student counters are decremented for every removed event.
pub async fn delete_class(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
) -> Response {
    match ClassModel::delete_by_id(app_state.db(), class_id).await {
        Ok(()) => {
            tracing::info!(class_id, "class deleted");
            ok(StatusCode::OK, Empty::default(), "Class deleted successfully")
        }
        Err(e) => error_response(e),
    }
}
