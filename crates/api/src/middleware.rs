use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use carbonledger_core::SessionId;

use crate::context::SessionContext;

/// Header carrying the caller's session identity (a UUID).
pub const SESSION_HEADER: &str = "x-session-id";

/// Attach a [`SessionContext`] to the request, or reject it.
pub async fn session_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let session_id = extract_session_id(req.headers())?;

    req.extensions_mut()
        .insert(SessionContext::new(session_id));

    Ok(next.run(req).await)
}

fn extract_session_id(headers: &HeaderMap) -> Result<SessionId, StatusCode> {
    let header = headers
        .get(SESSION_HEADER)
        .ok_or(StatusCode::BAD_REQUEST)?;

    let header = header.to_str().map_err(|_| StatusCode::BAD_REQUEST)?;

    header.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)
}
