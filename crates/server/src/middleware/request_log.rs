//! # Request Logging Middleware
//!
//! Assigns every request an id, logs one line when the response is ready,
//! and echoes the id in the `X-Request-ID` response header.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use logging::{log_api_request, request_id::REQUEST_ID_HEADER, RequestId};

use super::security_headers::insert_header;

/// Request logging middleware
///
/// A well-formed incoming `X-Request-ID` is kept, otherwise a fresh one is
/// generated. The id is also stored in the request extensions for handlers.
pub async fn request_log_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_header_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let start = Instant::now();
    let mut response = next.run(request).await;

    log_api_request!(
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis(),
        &request_id
    );
    insert_header(
        response.headers_mut(),
        REQUEST_ID_HEADER,
        request_id.as_str(),
    );

    response
}
