//! Routes scoped to the caller's own account, mounted at `/me`.

use crate::auth::guards::allow_student;
use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

pub mod get;

/// - `GET /me/classes` → `my_classes` (any role)
/// - `GET /me/attendance` → `my_attendance` (students)
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(get::my_classes))
        .route(
            "/attendance",
            get(get::my_attendance).route_layer(from_fn(allow_student)),
        )
}
