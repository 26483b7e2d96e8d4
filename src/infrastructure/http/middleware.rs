//! HTTP Middleware
//!
//! 4xx / 5xx 响应日志

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 错误响应日志中间件
///
/// 4xx 记 warn，5xx 记 error，附带耗时；错误原因由 ApiError::into_response() 记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}
