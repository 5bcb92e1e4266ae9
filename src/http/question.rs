//! `POST /question`: validate a question and relay it to the agent.
//!
//! ```text
//! body ──serde──▶ Question ──validator──▶ valid ──agent──▶ 200 {"agent_response": ..}
//!   │                │                                │
//!   ▼                ▼                                ▼
//! 400 (+hint)       400                              500
//! ```

use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use validator::Validate;

use crate::http::request::RequestId;
use crate::http::response::{AnswerEnvelope, ApiError};
use crate::http::server::AppState;
use crate::question::Question;

pub async fn ask_question(
    State(state): State<AppState>,
    request_id: RequestId,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnswerEnvelope>, ApiError> {
    // Decoded whatever the declared content type.
    let question: Question = serde_json::from_slice(&body?).map_err(ApiError::malformed)?;

    question.validate()?;

    tracing::debug!(
        request_id = %request_id,
        words = question.word_count(),
        "Question accepted"
    );

    let reply = state.agent.ask(&question, &request_id).await?;

    Ok(Json(AnswerEnvelope {
        agent_response: reply,
    }))
}
