//! Error responses.
//!
//! # Responsibilities
//! - Map every handler failure to a status code
//! - Render failures as `{"error": "<message>"}`
//!
//! # Design Decisions
//! - Malformed bodies and rule violations are client errors (400)
//! - Agent failures are server errors (500) and expose the transport
//!   error text verbatim
//! - No partial responses: a failure replaces the whole body

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::agent::{AgentError, AgentReply};

/// Hint appended to every structural failure.
pub const MALFORMED_HINT: &str = "Query under 3 words";

/// Successful answer envelope.
#[derive(Debug, Serialize)]
pub struct AnswerEnvelope {
    pub agent_response: AgentReply,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures of the question pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body did not deserialize into a question.
    #[error("{0} Query under 3 words")]
    MalformedInput(String),

    /// Question failed a validation rule.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Agent could not be reached or answered unreadably.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::MalformedInput(rejection.body_text())
    }
}

impl ApiError {
    /// Structural failure from any decoding error.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        ApiError::MalformedInput(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Agent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %error, "Question failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %error, "Question rejected");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Question;
    use validator::Validate;

    #[test]
    fn malformed_input_appends_hint() {
        let err = ApiError::MalformedInput("expected value at line 1 column 1".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "expected value at line 1 column 1 Query under 3 words"
        );
    }

    #[test]
    fn decode_error_becomes_malformed_input() {
        let decode = serde_json::from_slice::<Question>(b"not-json").unwrap_err();
        let err = ApiError::malformed(&decode);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), format!("{} Query under 3 words", decode));
    }

    #[test]
    fn validation_failure_is_bad_request_without_hint() {
        let err: ApiError = Question::new("hi").validate().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(!err.to_string().contains(MALFORMED_HINT));
    }

    #[test]
    fn encode_failure_is_server_error() {
        let encode = serde_json::from_str::<u8>("x").unwrap_err();
        let err: ApiError = AgentError::Encode(encode).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn renders_error_body() {
        let response = ApiError::MalformedInput("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "error": "bad Query under 3 words" }));
    }
}
