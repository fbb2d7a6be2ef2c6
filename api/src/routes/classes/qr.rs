use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use db::AppError;
use db::models::{
    attendance_event::{AttendanceStatus, Method, Model as EventModel, RecordInput},
    class::{self, Model as ClassModel},
    student,
};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::{config, state::AppState};

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub class_id: i64,
    pub code: String,
    /// What the QR image encodes: `rollcall:{class_id}:{code}`.
    pub payload: String,
    pub rotation_seconds: i64,
    pub expires_at: DateTime<Utc>,
}

/// GET /api/classes/{class_id}/qr
///
/// The code for the current rotation window. Clients should refetch at `expires_at`.
pub async fn get_qr(State(app_state): State<AppState>, Path(class_id): Path<i64>) -> Response {
    let class = match class::Entity::find_by_id(class_id).one(app_state.db()).await {
        Ok(Some(c)) => c,
        Ok(None) => return error_response(AppError::not_found("Class", class_id)),
        Err(e) => return error_response(e.into()),
    };

    let now = Utc::now();
    let rotation = config::qr_rotation_seconds().max(1);
    let window = ClassModel::window(now, rotation);
    let expires_at = DateTime::from_timestamp((window + 1) * rotation, 0).unwrap_or(now);

    ok(
        StatusCode::OK,
        QrResponse {
            class_id,
            code: class.code_for_window(window),
            payload: class.qr_payload(now, rotation),
            rotation_seconds: rotation,
            expires_at,
        },
        "QR code generated",
    )
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    /// Scanned code, bare or as the full QR payload.
    pub code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub device_id: Option<String>,
}

/// POST /api/classes/{class_id}/check-in
///
/// Student self check-in, marking the caller present for today.
///
/// - With `code`: verified against the class's rotating code (method `scan`).
/// - Otherwise `latitude` and `longitude` are required (method `location`).
///
/// ### Responses
/// - `200 OK` with `{ event, tally, counters }`
/// - `400 Bad Request` (invalid or expired code, missing coordinates)
/// - `404 Not Found` (no student record for the account, or not enrolled)
pub async fn check_in(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(class_id): Path<i64>,
    Json(req): Json<CheckInRequest>,
) -> Response {
    let db = app_state.db();

    let student = match student::Model::find_by_user(db, user.id()).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return error_response(AppError::not_found("Student record for user", user.id()));
        }
        Err(e) => return error_response(e.into()),
    };
    let class = match class::Entity::find_by_id(class_id).one(db).await {
        Ok(Some(c)) => c,
        Ok(None) => return error_response(AppError::not_found("Class", class_id)),
        Err(e) => return error_response(e.into()),
    };

    let now = Utc::now();
    let method = match (&req.code, req.latitude, req.longitude) {
        (Some(code), _, _) => {
            let valid = class.verify_code(
                code,
                now,
                config::qr_rotation_seconds(),
                config::qr_window_tolerance(),
            );
            if !valid {
                tracing::info!(class_id, student_id = student.id, "rejected check-in code");
                return error_response(AppError::InvalidCode);
            }
            Method::Scan
        }
        (None, Some(_), Some(_)) => Method::Location,
        (None, _, _) => {
            return error_with(
                StatusCode::BAD_REQUEST,
                "Provide a code or both latitude and longitude",
            );
        }
    };

    let input = RecordInput {
        class_id,
        student_id: student.id,
        status: AttendanceStatus::Present,
        method,
        recorded_at: now,
        device_id: req.device_id,
        latitude: req.latitude,
        longitude: req.longitude,
    };
    match EventModel::record(db, input).await {
        Ok(recorded) => {
            tracing::info!(
                class_id,
                student_id = student.id,
                method = %method,
                "student checked in"
            );
            ok(StatusCode::OK, recorded, "Check-in recorded")
        }
        Err(e) => error_response(e),
    }
}
