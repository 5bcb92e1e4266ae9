//! Request correlation.
//!
//! # Responsibilities
//! - Generate a short request ID for every inbound request
//! - Store it in the request extensions under its own type
//! - Echo it back in the `X-Request-ID` response header
//! - Hand it to handlers explicitly through an extractor
//!
//! # Design Decisions
//! - Request ID added as early as possible so every layer can log it
//! - IDs are 5 hex characters of a UUID v4: collisions are tolerated since
//!   they only correlate log lines
//! - An incoming `X-Request-ID` is ignored; each request gets a fresh ID
//! - Lookups never fail; a request without an ID reads as `"missing ID"`

use std::convert::Infallible;
use std::fmt;

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, Extensions, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the request ID on responses (and on agent calls).
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Returned by lookups when no ID was attached.
pub const MISSING_ID: &str = "missing ID";

const ID_LEN: usize = 5;

/// Correlation identifier for one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh ID.
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up the request ID stored in `extensions`, or [`MISSING_ID`].
pub fn request_id(extensions: &Extensions) -> &str {
    extensions
        .get::<RequestId>()
        .map(RequestId::as_str)
        .unwrap_or(MISSING_ID)
}

/// Handlers receive the ID as an ordinary argument. Never rejects: a
/// request that bypassed the middleware gets [`MISSING_ID`].
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(MISSING_ID.to_string())))
    }
}

/// Attach a new [`RequestId`] to the request and its response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = RequestId::generate();
    let header = HeaderValue::from_str(id.as_str()).ok();
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;

    if let Some(value) = header {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
