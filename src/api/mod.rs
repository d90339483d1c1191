mod error;
mod query;
mod types;

pub use error::ApiError;
pub use query::*;
pub use types::*;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Explorer REST client with retry logic for rate-limited endpoints
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    max_retries: u32,
    base_delay: Duration,
}

impl ExplorerClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ApiError> {
        let url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: url,
            api_key,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        })
    }

    pub fn with_retry_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issue one account-module request and decode its `result`
    pub async fn get<T: DeserializeOwned>(&self, query: &AccountQuery) -> Result<T, ApiError> {
        self.with_retry(|| self.get_once(query)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, query: &AccountQuery) -> Result<T, ApiError> {
        let params = query.params(self.api_key.as_deref());
        tracing::debug!(
            action = query.action.as_str(),
            url = %self.base_url,
            "explorer request"
        );

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: ApiResponse<Value> = response.json().await?;
        decode_result(query.action, envelope)
    }

    async fn with_retry<T, F, Fut>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay * 2_u32.pow(attempt);
                    tracing::warn!(attempt = attempt + 1, error = %e, ?delay, "retrying explorer request");
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, attempts = attempt + 1, "explorer request failed");
                    return Err(e);
                }
            }
        }
    }
}

/// Unwrap the explorer envelope.
///
/// `status == "0"` with a string `result` is an error report. With an array
/// `result` it is an empty listing ("No transactions found") and decodes
/// normally.
pub fn decode_result<T: DeserializeOwned>(
    action: Action,
    envelope: ApiResponse<Value>,
) -> Result<T, ApiError> {
    if envelope.status != "1" {
        match &envelope.result {
            Value::String(result) => {
                return Err(ApiError::Explorer {
                    message: envelope.message,
                    result: result.clone(),
                });
            }
            Value::Null => {
                return Err(ApiError::Explorer {
                    message: envelope.message,
                    result: String::new(),
                });
            }
            _ => {}
        }
    }

    serde_json::from_value(envelope.result).map_err(|source| ApiError::Decode {
        action: action.as_str(),
        source,
    })
}
