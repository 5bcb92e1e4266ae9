//! HTTP client for the downstream agent service.

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::AgentConfig;
use crate::http::request::{RequestId, X_REQUEST_ID};
use crate::question::Question;

/// Errors that can occur while talking to the agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configured agent URL did not parse.
    #[error("invalid agent url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client could not be constructed.
    #[error("failed to build agent client: {}", describe(.0))]
    Client(reqwest::Error),

    /// Validated question could not be re-encoded.
    #[error("failed to encode question: {0}")]
    Encode(#[from] serde_json::Error),

    /// Request never produced a response (refused, DNS, timeout, ...).
    #[error("{}", describe(.0))]
    Transport(reqwest::Error),

    /// Response head arrived but the body could not be read.
    #[error("{}", describe(.0))]
    Body(reqwest::Error),
}

/// Render an error together with its source chain, e.g.
/// `error sending request for url (...): client error (Connect): tcp connect error: Connection refused`.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// What the agent answered, relayed to the caller under `agent_response`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReply {
    /// Status code returned by the agent.
    pub status: u16,
    /// Response body: parsed JSON, or a JSON string when the body is not JSON.
    pub body: Value,
}

impl AgentReply {
    /// Consume an agent response. The response (and its connection) is
    /// released when this returns, whichever branch is taken.
    async fn read(response: reqwest::Response) -> Result<Self, AgentError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(AgentError::Body)?;
        let body = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };
        Ok(Self { status, body })
    }
}

/// Client for the configured agent endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    url: Url,
}

impl AgentClient {
    /// Build a client from configuration.
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let url = Url::parse(&config.url)?;

        // The agent is a fixed, usually local endpoint.
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(AgentError::Client)?;

        Ok(Self { http, url })
    }

    /// The agent endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Forward a validated question and wait for the agent's answer.
    pub async fn ask(&self, question: &Question, request_id: &RequestId) -> Result<AgentReply, AgentError> {
        let body = serde_json::to_vec(question)?;

        tracing::debug!(url = %self.url, bytes = body.len(), "Forwarding question to agent");

        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(X_REQUEST_ID, request_id.as_str())
            .body(body)
            .send()
            .await
            .map_err(AgentError::Transport)?;

        let reply = AgentReply::read(response).await?;

        tracing::debug!(status = reply.status, "Agent responded");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let config = AgentConfig {
            url: "not a url".into(),
            timeout_secs: None,
        };
        assert!(matches!(AgentClient::new(&config), Err(AgentError::Url(_))));
    }

    #[test]
    fn keeps_configured_url() {
        let client = AgentClient::new(&AgentConfig::default()).unwrap();
        assert_eq!(client.url().as_str(), "http://127.0.0.1:8000/query_agent");
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AgentClient::new(&AgentConfig {
            url: format!("http://{}/query_agent", addr),
            timeout_secs: Some(5),
        })
        .unwrap();

        let err = client
            .ask(&Question::new("what is rust"), &RequestId::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Transport(_)));
        assert!(err.to_string().contains("error sending request"), "{err}");
    }
}
