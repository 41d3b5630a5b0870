use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;

/// Run each request inside a span and log its outcome.
pub async fn trace_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = tracing::info_span!("request", %method, %path);

    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            latency_ms,
            "request completed"
        );
    });
    response
}
