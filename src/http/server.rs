//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the question route
//! - Wire up middleware (request ID, tracing span, access log, panic recovery)
//! - Bind server to listener
//! - Shut down gracefully on signal

use std::any::Any;
use std::future::Future;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::agent::{AgentClient, AgentError};
use crate::config::GatewayConfig;
use crate::http::question::ask_question;
use crate::http::request::{request_id, request_id_middleware};
use crate::http::response::ErrorBody;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::access_log::access_log_middleware;

/// The one route this gateway serves.
pub const QUESTION_PATH: &str = "/question";

/// Application state injected into handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub agent: AgentClient,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, AgentError> {
        let agent = AgentClient::new(&config.agent)?;
        let router = Self::build_router(AppState { agent });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        with_middleware(
            Router::new()
                .route(QUESTION_PATH, post(ask_question))
                .fallback(not_found)
                .with_state(state),
        )
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or SIGTERM.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_with_shutdown(listener, shutdown_signal()).await
    }

    /// Run the server until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            agent_url = %self.config.agent.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wrap routes in the request pipeline.
///
/// Outermost first: request ID → request span → access log → panic
/// recovery → handler. A panicking handler still answers 500 with an
/// `X-Request-ID` header and an access line.
fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(access_log_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                request_id = %request_id(request.extensions()),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(middleware::from_fn(request_id_middleware))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("only POST {} is served", QUESTION_PATH),
        }),
    )
}
