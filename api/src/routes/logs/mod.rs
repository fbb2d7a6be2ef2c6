//! Session log administration, mounted at `/logs` behind `allow_admin`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod delete;
pub mod get;

/// - `GET /logs` → `list_logs`
/// - `DELETE /logs` → `clear_logs`
/// - `GET /logs/sessions` → `list_sessions`
pub fn logs_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_logs).delete(delete::clear_logs))
        .route("/sessions", get(get::list_sessions))
}
