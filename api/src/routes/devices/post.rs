use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use axum::{Json, extract::State, http::StatusCode, response::Response};
use db::models::device::Model as DeviceModel;
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDeviceRequest {
    #[validate(length(min = 1, max = 128, message = "device_identifier must be 1-128 characters"))]
    pub device_identifier: String,
    pub label: Option<String>,
    pub platform: Option<String>,
}

/// POST /api/devices
///
/// Registers a device for the calling instructor. Registering the same identifier again
/// refreshes its metadata and reactivates it.
///
/// ### Request Body
/// ```json
/// { "device_identifier": "pixel-7a-1234", "label": "Office phone", "platform": "android" }
/// ```
pub async fn register_device(
    State(app_state): State<AppState>,
    user: AuthUser,
    Json(req): Json<RegisterDeviceRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match DeviceModel::register(
        app_state.db(),
        user.id(),
        &req.device_identifier,
        req.label,
        req.platform,
    )
    .await
    {
        Ok(device) => {
            tracing::info!(device_id = device.id, instructor_id = user.id(), "device registered");
            ok(StatusCode::OK, device, "Device registered successfully")
        }
        Err(e) => error_response(e),
    }
}
