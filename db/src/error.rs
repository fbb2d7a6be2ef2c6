//! Error type returned by every domain operation on the models.
//!
//! Handlers translate these into HTTP status codes; see `api::response`.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Requested row does not exist.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Student exists but has no enrollment in the class.
    #[error("Student {student_id} is not enrolled in class {class_id}")]
    NotEnrolled { class_id: i64, student_id: i64 },

    /// Unique constraint or duplicate-pair violation.
    #[error("{0}")]
    Conflict(String),

    /// Caller supplied malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// QR check-in code did not match any accepted window.
    #[error("Invalid or expired check-in code")]
    InvalidCode,

    #[error("{0}")]
    Forbidden(String),

    /// Server-side failure outside the database, such as password hashing.
    #[error("{0}")]
    Internal(String),

    /// Anything raised by the driver; the text is surfaced to the client.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Converts a driver error, mapping unique violations to `Conflict` with `message`.
    pub fn from_db_with_conflict(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_owned()),
            _ => AppError::Database(err),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(what) => AppError::NotFound {
                resource: "Record",
                id: what,
            },
            other => match other.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(format!(
                    "Duplicate entry violates a unique constraint: {detail}"
                )),
                _ => AppError::Database(other),
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
