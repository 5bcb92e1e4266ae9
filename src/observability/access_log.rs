//! Access logging.
//!
//! One line per completed request:
//! `[<request id>] <method> <path> <status> <duration>`.
//!
//! The line is written once the response head is final, which may be before
//! its body has finished streaming to the client.

use std::fmt;
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;

/// Log target for access lines.
pub const ACCESS_LOG_TARGET: &str = "access_log";

/// A completed request, rendered once and dropped.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub request_id: String,
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub duration: Duration,
}

impl AccessLogEntry {
    pub fn emit(&self) {
        tracing::info!(
            target: ACCESS_LOG_TARGET,
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            status = self.status.as_u16(),
            duration_us = self.duration.as_micros() as u64,
            "{}",
            self
        );
    }
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {} {:?}",
            self.request_id,
            self.method,
            self.path,
            self.status.as_u16(),
            self.duration
        )
    }
}

/// Time the rest of the pipeline and log its outcome. The response passes
/// through untouched.
pub async fn access_log_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id(request.extensions()).to_owned();
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let start = Instant::now();
    let response = next.run(request).await;

    AccessLogEntry {
        request_id,
        method,
        path,
        status: response.status(),
        duration: start.elapsed(),
    }
    .emit();

    response
}
