//! Data models
//!
//! Shared between the order client and the order form.

pub mod order;

// Re-exports
pub use order::*;
