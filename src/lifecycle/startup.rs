//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the HTTP server (and its agent client) from validated config
//! - Bind the listener and begin accepting traffic
//! - Serve until a shutdown signal arrives

use thiserror::Error;
use tokio::net::TcpListener;

use crate::agent::AgentError;
use crate::config::GatewayConfig;
use crate::http::HttpServer;

/// Fatal startup or serving failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("agent client: {0}")]
    Agent(#[from] AgentError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start the gateway and block until it has shut down.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        agent_url = %config.agent.url,
        agent_timeout_secs = ?config.agent.timeout_secs,
        "Configuration loaded"
    );

    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener).await?;
    Ok(())
}
