use crate::response::{Empty, error_response, ok};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use db::models::device::Model as DeviceModel;
use util::state::AppState;

/// DELETE /api/devices/{device_id}
pub async fn delete_device(
    State(app_state): State<AppState>,
    Path(device_id): Path<i64>,
) -> Response {
    match DeviceModel::delete_by_id(app_state.db(), device_id).await {
        Ok(()) => ok(StatusCode::OK, Empty::default(), "Device deleted successfully"),
        Err(e) => error_response(e),
    }
}
