//! Inbound question payload and its validation rules.
//!
//! # Data Flow
//! ```text
//! request body
//!     → serde (structural: `query` present and a string)
//!     → validator (semantic: more than two words)
//!     → Question (forwarded to the agent unchanged)
//! ```

pub mod types;

pub use types::{check_req_length, Question, MIN_QUERY_WORDS};
