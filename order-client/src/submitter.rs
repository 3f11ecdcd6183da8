//! Order submission seam

use crate::ClientResult;
use async_trait::async_trait;
use shared::Order;

/// Sends a finalized order to the remote service
///
/// One attempt per call. Implementations must not retry and must not keep
/// state between calls.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    /// Submit an order and return the decoded response body
    async fn submit(&self, order: &Order) -> ClientResult<serde_json::Value>;
}

