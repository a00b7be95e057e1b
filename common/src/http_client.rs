use crate::errors::AppError;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("umbrella/", env!("CARGO_PKG_VERSION"));

/// HTTP client where every call carries its own timeout.
///
/// There is no retry loop: a failed call is reported once and the user
/// re-triggers the lookup.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue a GET and wait at most `timeout` for the response headers.
    ///
    /// Elapsed waits become `TimeoutError`; everything else the transport
    /// reports becomes `NetworkError`.
    pub async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Response, AppError> {
        tokio::time::timeout(timeout, self.client.get(url).timeout(timeout).send())
            .await
            .map_err(|_| timed_out(url, timeout))?
            .map_err(|e| {
                if e.is_timeout() {
                    timed_out(url, timeout)
                } else {
                    AppError::NetworkError(e)
                }
            })
    }

    /// Fetch JSON from URL, bounded by `timeout` end to end
    #[instrument(skip(self), fields(url = %url, timeout_ms = timeout.as_millis() as u64))]
    pub async fn get_json<T>(&self, url: &str, timeout: Duration) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        tokio::time::timeout(timeout, self.fetch_json(url, timeout))
            .await
            .map_err(|_| timed_out(url, timeout))?
    }

    async fn fetch_json<T>(&self, url: &str, timeout: Duration) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.fetch_with_timeout(url, timeout).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(
                status.as_u16(),
                format!("HTTP error: {}", status),
            ));
        }

        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                timed_out(url, timeout)
            } else {
                AppError::NetworkError(e)
            }
        })?;
        let json: T = serde_json::from_str(&text).map_err(AppError::ParseError)?;

        debug!(url = %url, "Request successful");
        Ok(json)
    }
}

fn timed_out(url: &str, timeout: Duration) -> AppError {
    AppError::timeout(format!(
        "Request to {} timed out after {}ms",
        url,
        timeout.as_millis()
    ))
}
