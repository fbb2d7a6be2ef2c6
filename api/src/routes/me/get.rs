use crate::auth::AuthUser;
use crate::response::{error_response, error_with, ok};
use crate::routes::common::{Paged, Pagination, optional_day};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::NaiveDate;
use db::AppError;
use db::models::{
    attendance_event::{AttendanceStatus, EventFilter, Model as EventModel},
    class::Model as ClassModel,
    student,
};
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

/// GET /api/me/classes
///
/// Same scoping as `GET /api/classes`.
pub async fn my_classes(State(app_state): State<AppState>, user: AuthUser) -> Response {
    match ClassModel::list_for_user(app_state.db(), user.id(), user.role()).await {
        Ok(classes) => ok(StatusCode::OK, classes, "Classes retrieved successfully"),
        Err(e) => error_response(e.into()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MyAttendanceQuery {
    pub class_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_day")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_day")]
    pub to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

/// GET /api/me/attendance
///
/// The caller's attendance events across classes, newest day first.
///
/// ### Query Parameters
/// - `class_id`, `from`, `to`, `status`, `page`, `per_page`
///
/// ### Responses
/// - `200 OK` with `{ items, page, per_page, total }`
/// - `404 Not Found` (account has no student record)
pub async fn my_attendance(
    State(app_state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
    Query(query): Query<MyAttendanceQuery>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    let db = app_state.db();

    let student = match student::Model::find_by_user(db, user.id()).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return error_response(AppError::not_found("Student record for user", user.id()));
        }
        Err(e) => return error_response(e.into()),
    };

    let filter = EventFilter {
        class_id: query.class_id,
        student_id: Some(student.id),
        from: query.from,
        to: query.to,
        status: query.status,
        ..Default::default()
    };
    match EventModel::query(db, &filter, pagination.page(), pagination.per_page()).await {
        Ok((items, total)) => ok(
            StatusCode::OK,
            Paged::new(items, &pagination, total),
            "Attendance retrieved successfully",
        ),
        Err(e) => error_response(e.into()),
    }
}
