use crate::routes::common::{Paged, Pagination, optional_day};
use crate::response::{error_response, error_with, ok};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{NaiveDate, Utc};
use db::models::{
    attendance_event::{AttendanceStatus, EventFilter, Model as EventModel},
    class_enrollment,
};
use serde::{Deserialize, Serialize};
use util::{dates::day_of, state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct AttendanceQuery {
    #[serde(default, deserialize_with = "optional_day")]
    pub day: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_day")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_day")]
    pub to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub student_id: Option<i64>,
}

/// GET /api/classes/{class_id}/attendance
///
/// ### Query Parameters
/// - `day`, `from`, `to` (`YYYY-MM-DD`)
/// - `status` (`present` | `absent` | `late`)
/// - `student_id`
/// - `page`, `per_page`
///
/// Results are newest day first.
pub async fn list_attendance(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<AttendanceQuery>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return error_with(StatusCode::BAD_REQUEST, "from must not be after to");
        }
    }

    let filter = EventFilter {
        class_id: Some(class_id),
        student_id: query.student_id,
        day: query.day,
        from: query.from,
        to: query.to,
        status: query.status,
    };
    match EventModel::query(
        app_state.db(),
        &filter,
        pagination.page(),
        pagination.per_page(),
    )
    .await
    {
        Ok((items, total)) => ok(
            StatusCode::OK,
            Paged::new(items, &pagination, total),
            "Attendance retrieved successfully",
        ),
        Err(e) => error_response(e.into()),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default, deserialize_with = "optional_day")]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub class_id: i64,
    pub day: NaiveDate,
    pub enrolled: u64,
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub unmarked: u64,
}

/// GET /api/classes/{class_id}/attendance/summary?day=YYYY-MM-DD
///
/// Tally for one day (today, UTC, when omitted). `unmarked` counts enrolled students
/// without an event that day.
pub async fn day_summary(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let db = app_state.db();
    let day = query.day.unwrap_or_else(|| day_of(Utc::now()));

    let tally = match EventModel::day_tally(db, class_id, day).await {
        Ok(t) => t,
        Err(e) => return error_response(e.into()),
    };
    let enrolled = match class_enrollment::Model::roster(db, class_id).await {
        Ok(r) => r.len() as u64,
        Err(e) => return error_response(e.into()),
    };
    let marked = tally.present + tally.absent + tally.late;

    ok(
        StatusCode::OK,
        DaySummary {
            class_id,
            day,
            enrolled,
            present: tally.present,
            absent: tally.absent,
            late: tally.late,
            unmarked: enrolled.saturating_sub(marked),
        },
        "Summary retrieved successfully",
    )
}
