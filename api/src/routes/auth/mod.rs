//! # auth Routes Module
//!
//! Routes for the `/auth` endpoint group.
//!
//! - `post.rs` — login and logout
//! - `get.rs` — current account

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use get::get_me;
use post::{login, logout};
use util::state::AppState;

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login` (public)
/// - `POST /auth/logout` → `logout` (authenticated)
/// - `GET /auth/me` → `get_me` (authenticated)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(from_fn(allow_authenticated)),
        )
        .route("/me", get(get_me).route_layer(from_fn(allow_authenticated)))
}
