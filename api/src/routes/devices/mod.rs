//! # Devices Routes Module
//!
//! Instructor devices and their location fixes, mounted at `/devices`.

use crate::auth::guards::{allow_device_owner, allow_instructor};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// - `GET /devices` → `list_devices` (instructor)
/// - `POST /devices` → `register_device` (instructor)
/// - `PUT /devices/{device_id}` → `update_device` (owner or admin)
/// - `DELETE /devices/{device_id}` → `delete_device` (owner or admin)
/// - `PUT /devices/{device_id}/location` → `record_location` (owner)
pub fn devices_routes(app_state: AppState) -> Router<AppState> {
    let owner = || from_fn_with_state(app_state.clone(), allow_device_owner);

    Router::new()
        .route("/", get(get::list_devices).route_layer(from_fn(allow_instructor)))
        .route("/", post(post::register_device).route_layer(from_fn(allow_instructor)))
        .route("/{device_id}", put(put::update_device).route_layer(owner()))
        .route("/{device_id}", delete(delete::delete_device).route_layer(owner()))
        .route(
            "/{device_id}/location",
            put(put::record_location).route_layer(from_fn(allow_instructor)),
        )
}
