//! Downstream agent integration.
//!
//! # Responsibilities
//! - Own the pooled HTTP client used for every agent call
//! - Encode the validated question and POST it to the configured URL
//! - Turn the agent's response into a relayable reply
//!
//! # Design Decisions
//! - No retries: every failure is terminal for the request
//! - The agent response is consumed inside `ask`, so its connection is
//!   released on every exit path
//! - No timeout unless configured

pub mod client;

pub use client::{AgentClient, AgentError, AgentReply};
