//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → access_log.rs (one line per completed request)
//!     → per-request span carrying the request ID (server.rs)
//!     → handler/agent events (tracing macros)
//!
//! Consumers:
//!     → logging.rs subscriber → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every event through the request span
//! - Access lines go to their own `access_log` target so they can be
//!   filtered independently

pub mod access_log;
pub mod logging;
