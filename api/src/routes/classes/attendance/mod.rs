//! Attendance recording for one class, mounted at `/classes/{class_id}/attendance`.
//! The class-staff guard is applied by the parent router.

use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;

/// - `GET /` → `list_attendance`
/// - `POST /` → `record_attendance`
/// - `POST /bulk` → `record_bulk`
/// - `GET /summary` → `day_summary`
/// - `DELETE /{event_id}` → `delete_event`
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_attendance).post(post::record_attendance))
        .route("/bulk", post(post::record_bulk))
        .route("/summary", get(get::day_summary))
        .route("/{event_id}", delete(delete::delete_event))
}
