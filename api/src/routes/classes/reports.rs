use crate::auth::AuthUser;
use crate::response::{Empty, error_response, ok};
use crate::routes::common::optional_day;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::{NaiveDate, Utc};
use db::models::report::{Model as ReportModel, ReportEntry};
use serde::Deserialize;
use util::{dates::day_of, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "optional_day")]
    pub day: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateReportRequest {
    #[serde(default, deserialize_with = "optional_day")]
    pub day: Option<NaiveDate>,
    /// Client-edited entries; when omitted the report is built from the roster.
    pub entries: Option<Vec<ReportEntry>>,
}

/// GET /api/classes/{class_id}/reports?day=YYYY-MM-DD
pub async fn list_reports(
    State(app_state): State<AppState>,
    Path(class_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> Response {
    match ReportModel::list_for_class(app_state.db(), class_id, query.day).await {
        Ok(reports) => ok(StatusCode::OK, reports, "Reports retrieved successfully"),
        Err(e) => error_response(e.into()),
    }
}

/// POST /api/classes/{class_id}/reports
///
/// Saves a snapshot of the day's attendance. Students without a mark are listed as
/// `unmarked`.
///
/// ### Request Body
/// ```json
/// { "day": "2025-03-04" }
/// ```
pub async fn create_report(
    State(app_state): State<AppState>,
    user: AuthUser,
    Path(class_id): Path<i64>,
    Json(req): Json<CreateReportRequest>,
) -> Response {
    let day = req.day.unwrap_or_else(|| day_of(Utc::now()));
    match ReportModel::save(app_state.db(), class_id, day, user.id(), req.entries).await {
        Ok(report) => {
            tracing::info!(class_id, report_id = report.id, %day, "report saved");
            ok(StatusCode::CREATED, report, "Report saved successfully")
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/classes/{class_id}/reports/{report_id}
pub async fn get_report(
    State(app_state): State<AppState>,
    Path((class_id, report_id)): Path<(i64, i64)>,
) -> Response {
    match ReportModel::find_in_class(app_state.db(), class_id, report_id).await {
        Ok(report) => ok(StatusCode::OK, report, "Report retrieved successfully"),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/classes/{class_id}/reports/{report_id}
pub async fn delete_report(
    State(app_state): State<AppState>,
    Path((class_id, report_id)): Path<(i64, i64)>,
) -> Response {
    match ReportModel::delete_in_class(app_state.db(), class_id, report_id).await {
        Ok(()) => ok(StatusCode::OK, Empty::default(), "Report deleted successfully"),
        Err(e) => error_response(e),
    }
}
