//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use question_gateway::config::GatewayConfig;
use question_gateway::http::HttpServer;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One call received by the mock agent.
#[derive(Debug, Clone)]
pub struct ReceivedCall {
    pub body: Value,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
}

type Calls = Arc<Mutex<Vec<ReceivedCall>>>;

/// How the mock agent answers.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// 200 with `{"answer": "you asked: <query>"}`.
    Echo,
    /// The given status with a `text/plain` body.
    Text(u16, &'static str),
}

#[derive(Clone)]
struct AgentState {
    calls: Calls,
    reply: Reply,
}

/// A mock agent on an ephemeral port that records every call.
pub struct MockAgent {
    pub url: String,
    calls: Calls,
}

impl MockAgent {
    pub fn calls(&self) -> Vec<ReceivedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn answer(State(state): State<AgentState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let query = body["query"].as_str().unwrap_or_default().to_owned();

    state.calls.lock().unwrap().push(ReceivedCall {
        body,
        content_type: header(CONTENT_TYPE.as_str()),
        request_id: header("x-request-id"),
    });

    match state.reply {
        Reply::Echo => (StatusCode::OK, Json(json!({ "answer": format!("you asked: {}", query) }))).into_response(),
        Reply::Text(status, text) => (
            StatusCode::from_u16(status).unwrap(),
            [(CONTENT_TYPE, "text/plain")],
            text,
        )
            .into_response(),
    }
}

/// Start a mock agent answering `POST /query_agent` with [`Reply::Echo`].
pub async fn start_mock_agent() -> MockAgent {
    start_mock_agent_with(Reply::Echo).await
}

/// Start a mock agent answering `POST /query_agent` with `reply`.
pub async fn start_mock_agent_with(reply: Reply) -> MockAgent {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls: Calls = Arc::default();

    let app = Router::new()
        .route("/query_agent", post(answer))
        .with_state(AgentState {
            calls: calls.clone(),
            reply,
        });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockAgent {
        url: format!("http://{}/query_agent", addr),
        calls,
    }
}

/// A URL on which nothing is listening.
pub fn unreachable_agent_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/query_agent", addr)
}

/// Gateway configuration pointing at `agent_url`.
pub fn gateway_config(agent_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.agent.url = agent_url.to_string();
    config.agent.timeout_secs = Some(10);
    config
}

/// A running gateway. Dropping it stops the server.
pub struct Gateway {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(agent_url: &str) -> Gateway {
    let server = HttpServer::new(gateway_config(agent_url)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = server
            .run_with_shutdown(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    Gateway { addr, _shutdown: tx }
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Log sink for `tracing_subscriber::fmt().with_writer(..)`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
