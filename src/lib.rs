//! Question gateway library.

pub mod agent;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod question;

pub use config::GatewayConfig;
pub use http::HttpServer;
