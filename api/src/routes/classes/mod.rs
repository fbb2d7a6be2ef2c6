//! # Classes Routes Module
//!
//! Routes for `/api/classes`, nested behind `allow_authenticated`.
//!
//! - `get.rs`, `post.rs`, `put.rs`, `delete.rs` — class CRUD
//! - `students.rs` — roster and enrollment
//! - `attendance/` — recording and querying attendance events
//! - `qr.rs` — rotating QR code and student check-in
//! - `reports.rs` — saved day reports

use crate::auth::guards::{allow_class_member, allow_class_staff, allow_staff, allow_student};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod attendance;
pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;
pub mod qr;
pub mod reports;
pub mod students;

/// Builds the `/classes` route group.
///
/// - `GET /classes` → `list_classes` (scoped to the caller)
/// - `POST /classes` → `create_class` (admin/instructor)
/// - `GET /classes/{class_id}` → `get_class` (class member)
/// - `PUT|DELETE /classes/{class_id}` → class staff
/// - `GET|POST /classes/{class_id}/students`, `DELETE .../students/{student_id}` → class staff
/// - `/classes/{class_id}/attendance/...` → class staff
/// - `GET /classes/{class_id}/qr` → class staff
/// - `POST /classes/{class_id}/check-in` → students (enrollment checked by the recorder)
/// - `/classes/{class_id}/reports/...` → class staff
pub fn classes_routes(app_state: AppState) -> Router<AppState> {
    let staff = || from_fn_with_state(app_state.clone(), allow_class_staff);

    Router::new()
        .route("/", get(get::list_classes))
        .route("/", post(post::create_class).route_layer(from_fn(allow_staff)))
        .route(
            "/{class_id}",
            get(get::get_class)
                .route_layer(from_fn_with_state(app_state.clone(), allow_class_member)),
        )
        .route("/{class_id}", put(put::update_class).route_layer(staff()))
        .route("/{class_id}", delete(delete::delete_class).route_layer(staff()))
        .route(
            "/{class_id}/students",
            get(students::list_roster)
                .post(students::enroll_student)
                .route_layer(staff()),
        )
        .route(
            "/{class_id}/students/{student_id}",
            delete(students::remove_student).route_layer(staff()),
        )
        .nest(
            "/{class_id}/attendance",
            attendance::attendance_routes().route_layer(staff()),
        )
        .route("/{class_id}/qr", get(qr::get_qr).route_layer(staff()))
        .route(
            "/{class_id}/check-in",
            post(qr::check_in).route_layer(from_fn(allow_student)),
        )
        .route(
            "/{class_id}/reports",
            get(reports::list_reports)
                .post(reports::create_report)
                .route_layer(staff()),
        )
        .route(
            "/{class_id}/reports/{report_id}",
            get(reports::get_report)
                .delete(reports::delete_report)
                .route_layer(staff()),
        )
}
