use crate::auth::claims::AuthUser;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::TypedHeader;
use headers::{Origin, UserAgent};
use std::{net::SocketAddr, time::Instant};

/// Access log for every non-preflight request.
///
/// Records the caller (account id, role and session when a valid token is present),
/// the client address, origin and user agent, then the response status and latency
/// once the handler has run.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let caller = AuthUser::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthUser(claims)| claims);
    let origin = TypedHeader::<Origin>::from_request_parts(&mut parts, &())
        .await
        .map(|TypedHeader(o)| o.to_string())
        .unwrap_or_else(|_| "-".into());
    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .map(|TypedHeader(ua)| ua.to_string())
        .unwrap_or_else(|_| "-".into());

    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    let started = Instant::now();
    let response = next.run(Request::from_parts(parts, body)).await;

    tracing::info!(
        %method,
        %path,
        ip = %addr.ip(),
        user = caller.as_ref().map(|c| c.sub).unwrap_or(0),
        role = caller.as_ref().map(|c| c.role.to_string()).unwrap_or_else(|| "-".into()),
        session = caller.as_ref().map(|c| c.sid.as_str()).unwrap_or("-"),
        %origin,
        %user_agent,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}
