#![allow(clippy::unwrap_used)]

use api::{
    auth::{generate_jwt, guards::validate_known_ids},
    routes::routes,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::from_fn_with_state,
};
use db::{models::user::Model as UserModel, test_utils::setup_test_db};
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// Router wired like `main`, minus request logging, on a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let router = Router::new().nest(
        "/api",
        routes(app_state.clone()).layer(from_fn_with_state(app_state.clone(), validate_known_ids)),
    );
    (router, app_state)
}

pub fn bearer_for(user: &UserModel) -> String {
    let (token, _) = generate_jwt(user.id, user.role, "test-session").unwrap();
    format!("Bearer {token}")
}

/// Sends one request and returns the status with the parsed body
/// (`Value::Null` when the body is not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    as_user: Option<&UserModel>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let auth = as_user.map(bearer_for);
    send_with_auth(app, method, uri, auth.as_deref(), body).await
}

pub async fn send_with_auth(
    app: &Router,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(auth) = authorization {
        req = req.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
