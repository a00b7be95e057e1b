use crate::cache::{CacheStore, city_key, search_key};
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::Location;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Candidates requested per autocomplete search.
pub const SUGGESTION_COUNT: usize = 10;

/// Shortest prefix worth a search request.
pub const MIN_PREFIX_CHARS: usize = 2;

/// Message shown when an explicit lookup fails for any reason but a timeout.
pub const RESOLVE_FAILED: &str = "Unable to find city. Please try again.";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Location>>,
}

/// Client for the Open-Meteo geocoding search endpoint
pub struct GeocoderClient {
    http_client: HttpClient,
    cache: Arc<CacheStore>,
    base_url: String,
    resolve_timeout: Duration,
    suggest_timeout: Duration,
}

impl GeocoderClient {
    pub fn new(
        http_client: HttpClient,
        cache: Arc<CacheStore>,
        base_url: String,
        resolve_timeout: Duration,
        suggest_timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            cache,
            base_url,
            resolve_timeout,
            suggest_timeout,
        }
    }

    /// Best single match for `name`, or `None` when the provider has nothing.
    ///
    /// Timeouts surface as `TimeoutError`; any other failure as `Unavailable`.
    #[instrument(skip(self), fields(name = %name))]
    pub async fn resolve(&self, name: &str) -> Result<Option<Location>, AppError> {
        let key = city_key(name);
        if let Some(cached) = self.cache.locations.get(&key).await {
            info!(name = %name, "Cache hit");
            return Ok(cached.into_iter().next());
        }

        info!(name = %name, "Resolving city via geocoding API");
        let results = self
            .search(name, 1, self.resolve_timeout)
            .await
            .map_err(|e| match e {
                AppError::TimeoutError(_) => e,
                other => {
                    warn!(name = %name, error = %other, "Geocoding failed");
                    AppError::unavailable(RESOLVE_FAILED)
                }
            })?;
        self.cache.locations.set(key, results.clone()).await;

        Ok(results.into_iter().next())
    }

    /// Up to [`SUGGESTION_COUNT`] raw candidates for autocomplete.
    ///
    /// Prefixes shorter than [`MIN_PREFIX_CHARS`] are not searched.
    #[instrument(skip(self), fields(prefix = %prefix))]
    pub async fn suggest(&self, prefix: &str) -> Result<Vec<Location>, AppError> {
        let prefix = prefix.trim();
        if prefix.chars().count() < MIN_PREFIX_CHARS {
            debug!(prefix = %prefix, "Prefix too short, skipping search");
            return Ok(Vec::new());
        }

        let key = search_key(prefix);
        if let Some(cached) = self.cache.locations.get(&key).await {
            debug!(prefix = %prefix, count = cached.len(), "Cache hit");
            return Ok(cached);
        }

        let results = self
            .search(prefix, SUGGESTION_COUNT, self.suggest_timeout)
            .await
            .map_err(|e| match e {
                AppError::TimeoutError(_) => e,
                other => AppError::unavailable(format!("Geocoding failed: {}", other)),
            })?;
        self.cache.locations.set(key, results.clone()).await;

        Ok(results)
    }

    async fn search(
        &self,
        name: &str,
        count: usize,
        timeout: Duration,
    ) -> Result<Vec<Location>, AppError> {
        let url = format!(
            "{}?name={}&count={}&language=en&format=json",
            self.base_url,
            urlencoding::encode(name.trim()),
            count
        );

        let response: GeocodingResponse = self.http_client.get_json(&url, timeout).await?;

        Ok(response.results.unwrap_or_default())
    }
}
