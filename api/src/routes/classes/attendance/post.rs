use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use db::models::attendance_event::{
    AttendanceStatus, BulkEntry, Method, Model as EventModel, RecordInput,
};
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordRequest {
    pub student_id: i64,
    pub status: AttendanceStatus,
    /// Defaults to now; its UTC date decides which day the mark belongs to.
    pub recorded_at: Option<DateTime<Utc>>,
    pub method: Option<Method>,
    #[validate(length(min = 1, max = 128))]
    pub device_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// POST /api/classes/{class_id}/attendance
///
/// Records or replaces the student's mark for the day.
///
/// ### Request Body
/// ```json
/// { "student_id": 4, "status": "late", "method": "manual" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ event, tally, counters }`
/// - `400 Bad Request` (bad status, coordinates out of range, only one coordinate)
/// - `404 Not Found` (student not enrolled in the class)
pub async fn record_attendance(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(req): Json<RecordRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let input = RecordInput {
        class_id,
        student_id: req.student_id,
        status: req.status,
        method: req.method.unwrap_or(Method::Manual),
        recorded_at: req.recorded_at.unwrap_or_else(Utc::now),
        device_id: req.device_id,
        latitude: req.latitude,
        longitude: req.longitude,
    };
    match EventModel::record(app_state.db(), input).await {
        Ok(recorded) => {
            tracing::info!(
                class_id,
                student_id = recorded.event.student_id,
                status = %recorded.event.status,
                "attendance recorded"
            );
            ok(StatusCode::OK, recorded, "Attendance recorded")
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkRequest {
    pub recorded_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 500, message = "entries must hold 1-500 items"))]
    pub entries: Vec<BulkEntry>,
}

/// POST /api/classes/{class_id}/attendance/bulk
///
/// Applies each entry on its own. The response lists one outcome per entry, in order;
/// failed entries carry an `error` and do not affect the others.
pub async fn record_bulk(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Json(req): Json<BulkRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let recorded_at = req.recorded_at.unwrap_or_else(Utc::now);
    let outcomes =
        EventModel::record_bulk(app_state.db(), class_id, recorded_at, req.entries).await;
    let failed = outcomes.iter().filter(|o| !o.ok).count();
    tracing::info!(class_id, total = outcomes.len(), failed, "bulk attendance recorded");

    ok(StatusCode::OK, outcomes, "Bulk attendance processed")
}
