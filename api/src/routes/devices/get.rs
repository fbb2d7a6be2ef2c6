use crate::auth::AuthUser;
use crate::response::{error_response, ok};
use axum::{extract::State, http::StatusCode, response::Response};
use db::models::device::Model as DeviceModel;
use util::state::AppState;

/// GET /api/devices
///
/// The caller's registered devices.
pub async fn list_devices(State(app_state): State<AppState>, user: AuthUser) -> Response {
    match DeviceModel::list_for_instructor(app_state.db(), user.id()).await {
        Ok(devices) => ok(StatusCode::OK, devices, "Devices retrieved successfully"),
        Err(e) => error_response(e.into()),
    }
}
