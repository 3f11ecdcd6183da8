//! Order Client - HTTP submission of finalized dish orders
//!
//! Sends one [`shared::Order`] per call to the dish endpoint and returns the
//! decoded JSON reply. Single attempt, no retry.

pub mod config;
pub mod error;
pub mod http;
pub mod submitter;

pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use submitter::OrderSubmitter;

// Re-export shared types for convenience
pub use shared::Order;
