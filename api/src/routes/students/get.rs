use crate::response::{error_response, error_with, ok};
use crate::routes::common::{Paged, Pagination};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use db::AppError;
use db::models::student::{Entity as StudentEntity, Model as StudentModel};
use sea_orm::EntityTrait;
use serde::Deserialize;
use util::{state::AppState, validation::format_validation_errors};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct StudentFilter {
    /// Partial match on student number or name.
    pub query: Option<String>,
}

/// GET /api/students
///
/// Paginated, ordered by student number.
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filter): Query<StudentFilter>,
) -> Response {
    if let Err(e) = pagination.validate() {
        return error_with(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match StudentModel::list(
        app_state.db(),
        filter.query.as_deref(),
        pagination.page(),
        pagination.per_page(),
    )
    .await
    {
        Ok((items, total)) => ok(
            StatusCode::OK,
            Paged::new(items, &pagination, total),
            "Students retrieved successfully",
        ),
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/students/{student_id}
pub async fn get_student(
    State(app_state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentEntity::find_by_id(student_id).one(app_state.db()).await {
        Ok(Some(student)) => ok(StatusCode::OK, student, "Student retrieved successfully"),
        Ok(None) => error_response(AppError::not_found("Student", student_id)),
        Err(e) => error_response(e.into()),
    }
}
