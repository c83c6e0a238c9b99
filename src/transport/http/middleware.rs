//! Request logging. Every request is recorded before it reaches a handler.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

pub async fn log_request(request: Request, next: Next) -> Response {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let method = request.method().clone();
    let uri = request.uri().clone();
    info!(%timestamp, %method, %uri, "request");

    let started = Instant::now();
    let response = next.run(request).await;
    info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response"
    );
    response
}
