//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (attach request ID, echo X-Request-ID)
//!     → observability::access_log (time and log the exchange)
//!     → question.rs (validate, forward to agent)
//!     → response.rs (error mapping)
//!     → Send to client
//! ```

pub mod question;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, RequestId, MISSING_ID, X_REQUEST_ID};
pub use response::{AnswerEnvelope, ApiError, ErrorBody};
pub use server::{AppState, HttpServer, QUESTION_PATH};
