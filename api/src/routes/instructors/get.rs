use crate::response::{error_response, error_with, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::AppError;
use db::models::{
    device::Model as DeviceModel,
    user::{Entity as UserEntity, Role},
};
use sea_orm::EntityTrait;
use serde::Serialize;
use chrono::{DateTime, Utc};
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct InstructorLocation {
    pub instructor_id: i64,
    pub device_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy_m: Option<f64>,
    pub fix_at: Option<DateTime<Utc>>,
}

/// GET /api/instructors/{user_id}/location
///
/// Newest fix across the instructor's active devices.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` (not an instructor, or no active device has a fix yet)
pub async fn instructor_location(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Response {
    let db = app_state.db();
    match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(u)) if u.role == Role::Instructor => {}
        Ok(_) => return error_response(AppError::not_found("Instructor", user_id)),
        Err(e) => return error_response(e.into()),
    }

    match DeviceModel::latest_location(db, user_id).await {
        Ok(Some(device)) => ok(
            StatusCode::OK,
            InstructorLocation {
                instructor_id: user_id,
                device_id: device.id,
                latitude: device.latitude,
                longitude: device.longitude,
                accuracy_m: device.accuracy_m,
                fix_at: device.fix_at,
            },
            "Location retrieved successfully",
        ),
        Ok(None) => error_with(StatusCode::NOT_FOUND, "No location available for this instructor"),
        Err(e) => error_response(e.into()),
    }
}
