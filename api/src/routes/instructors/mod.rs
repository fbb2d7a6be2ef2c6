use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

/// - `GET /instructors/{user_id}/location` → `instructor_location`
pub fn instructors_routes() -> Router<AppState> {
    Router::new().route("/{user_id}/location", get(get::instructor_location))
}
