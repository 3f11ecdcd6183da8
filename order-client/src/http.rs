//! HTTP client for the dish endpoint

use crate::{ClientConfig, ClientError, ClientResult, OrderSubmitter};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::Order;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// HTTP client posting JSON orders to a fixed endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    timeout: u64,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    /// Make a POST request with JSON body and decode the JSON reply
    pub async fn post<T, B>(&self, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.handle_response(response).await
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Http(error)
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl OrderSubmitter for HttpClient {
    #[instrument(skip(self, order), fields(endpoint = %self.endpoint, dish_type = %order.dish_type()))]
    async fn submit(&self, order: &Order) -> ClientResult<serde_json::Value> {
        info!("Sending order");

        match self.post::<serde_json::Value, _>(order).await {
            Ok(reply) => {
                info!("Order accepted");
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                Err(e)
            }
        }
    }
}
