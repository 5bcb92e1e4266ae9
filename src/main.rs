//! Question gateway (v1)
//!
//! Accepts questions on `POST /question`, validates them and relays them to
//! a downstream agent service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                 QUESTION GATEWAY                 │
//!                     │                                                  │
//!   Client Request    │  ┌──────────┐   ┌────────────┐   ┌───────────┐   │
//!   ──────────────────┼─▶│ request  │──▶│ access log │──▶│ question  │   │
//!                     │  │ id layer │   │   layer    │   │  handler  │   │
//!                     │  └──────────┘   └────────────┘   └─────┬─────┘   │
//!                     │                                        │         │
//!                     │                                        ▼         │
//!   Client Response   │                                  ┌───────────┐   │
//!   ◀─────────────────┼──────────────────────────────────│   agent   │◀──┼── Agent
//!                     │                                  │  client   │   │   Service
//!                     │                                  └───────────┘   │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use question_gateway::config::{load_config, validation::validate_config, ConfigError, GatewayConfig};
use question_gateway::lifecycle;
use question_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "question-gateway")]
#[command(about = "Validates questions and relays them to the agent service", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `agent.url`.
    #[arg(long)]
    agent_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    }
    .with_overrides(cli.bind, cli.agent_url);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!("question-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
