use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::{DateTime, Utc};
use db::models::device::{DeviceChanges, LocationFix, Model as DeviceModel};
use serde::Deserialize;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateDeviceRequest {
    pub label: Option<String>,
    pub platform: Option<String>,
    pub active: Option<bool>,
}

/// PUT /api/devices/{device_id}
pub async fn update_device(
    State(app_state): State<AppState>,
    Path(device_id): Path<i64>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Response {
    let changes = DeviceChanges {
        label: req.label,
        platform: req.platform,
        active: req.active,
    };
    match DeviceModel::update(app_state.db(), device_id, changes).await {
        Ok(device) => ok(StatusCode::OK, device, "Device updated successfully"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    /// Defaults to now.
    pub fix_at: Option<DateTime<Utc>>,
}

/// PUT /api/devices/{device_id}/location
///
/// Stores the device's latest fix. Only the owning instructor may post fixes.
///
/// ### Responses
/// - `200 OK` with the device
/// - `400 Bad Request` (coordinates out of range, negative accuracy)
/// - `403 Forbidden` (not the owner)
pub async fn record_location(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(device_id): Path<i64>,
    Json(req): Json<LocationRequest>,
) -> Response {
    let db = app_state.db();
    let device = match DeviceModel::find(db, device_id).await {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    if device.instructor_id != user.id() {
        return error_with(StatusCode::FORBIDDEN, "You do not own this device");
    }

    let fix = LocationFix {
        latitude: req.latitude,
        longitude: req.longitude,
        accuracy_m: req.accuracy_m,
        fix_at: req.fix_at,
    };
    match DeviceModel::record_fix(db, device_id, fix).await {
        Ok(device) => {
            tracing::debug!(device_id, "location fix stored");
            ok(StatusCode::OK, device, "Location updated")
        }
        Err(e) => error_response(e),
    }
}
