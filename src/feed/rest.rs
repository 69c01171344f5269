use std::time::Duration;

use crate::error::AppError;

use super::types::{decode_payload, Payload};

/// Read-only client for the OHLCV endpoint.
pub struct MarketDataClient {
    http: reqwest::Client,
    endpoint: String,
}

impl MarketDataClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and classify the body. Transport errors, non-2xx
    /// statuses and undecodable bodies are returned as errors.
    pub async fn fetch(&self) -> Result<Payload, AppError> {
        let resp = self.http.get(&self.endpoint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await?;
        decode_payload(&body)
    }
}
