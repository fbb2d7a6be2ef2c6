//! # Students Routes Module
//!
//! Student records, independent of any class. Nested behind `allow_staff`;
//! changing or deleting a record is admin-only.

use crate::auth::guards::allow_admin;
use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// - `GET /students` → `list_students`
/// - `POST /students` → `create_student`
/// - `GET /students/{student_id}` → `get_student`
/// - `PUT /students/{student_id}` → `update_student` (admin)
/// - `DELETE /students/{student_id}` → `delete_student` (admin)
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_students))
        .route("/", post(post::create_student))
        .route("/{student_id}", get(get::get_student))
        .route(
            "/{student_id}",
            put(put::update_student).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{student_id}",
            delete(delete::delete_student).route_layer(from_fn(allow_admin)),
        )
}
