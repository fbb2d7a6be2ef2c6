use crate::response::{error_response, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::attendance_event::Model as EventModel;
use util::state::AppState;

/// DELETE /api/classes/{class_id}/attendance/{event_id}
///
/// Returns the student's counters after the event is taken back out.
pub async fn delete_event(
    State(app_state): State<AppState>,
    Path((class_id, event_id)): Path<(i64, i64)>,
) -> Response {
    match EventModel::delete_in_class(app_state.db(), class_id, event_id).await {
        Ok(counters) => ok(StatusCode::OK, counters, "Attendance event deleted"),
        Err(e) => error_response(e),
    }
}
