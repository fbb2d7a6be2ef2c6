//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Login (public), logout and current account (authenticated)
//! - `/users` → Account management (admin-only)
//! - `/classes` → Classes, rosters, attendance, QR check-in and reports
//! - `/students` → Student records (admin/instructor)
//! - `/me` → The caller's own classes and attendance
//! - `/devices` → Instructor devices and location fixes
//! - `/instructors` → Instructor location lookup
//! - `/logs` → Session logs (admin-only)

use crate::auth::guards::{allow_admin, allow_authenticated, allow_staff};
use crate::routes::{
    auth::auth_routes, classes::classes_routes, devices::devices_routes, health::health_routes,
    instructors::instructors_routes, logs::logs_routes, me::me_routes, students::students_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod auth;
pub mod classes;
pub mod common;
pub mod devices;
pub mod health;
pub mod instructors;
pub mod logs;
pub mod me;
pub mod students;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Guards that need the database (class membership, device ownership) are
/// attached inside the nested groups, which is why they receive the state.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/classes",
            classes_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .nest("/students", students_routes().route_layer(from_fn(allow_staff)))
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/devices", devices_routes(app_state.clone()))
        .nest(
            "/instructors",
            instructors_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest("/logs", logs_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
