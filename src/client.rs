use anyhow::{bail, Result};
use serde::Deserialize;

use crate::receipt::{BlockQuery, TransactionReceipt};

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

/// HTTP client of the receipt lookup endpoint.
#[derive(Clone)]
pub struct InsightsClient {
    http: reqwest::Client,
    url: String,
}

impl InsightsClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Issues exactly one request, without retries.
    pub async fn search(&self, query: &BlockQuery) -> Result<Vec<TransactionReceipt>> {
        let response = self.http.post(&self.url).json(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.to_string(),
            };
            bail!("{message}");
        }

        Ok(response.json().await?)
    }
}
