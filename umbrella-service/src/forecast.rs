use crate::cache::{CacheStore, weather_key};
use common::errors::AppError;
use common::http_client::HttpClient;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<DailyForecast>,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
}

/// Client for the Open-Meteo forecast endpoint
pub struct OpenMeteoClient {
    http_client: HttpClient,
    cache: Arc<CacheStore>,
    base_url: String,
    timeout: Duration,
}

impl OpenMeteoClient {
    pub fn new(
        http_client: HttpClient,
        cache: Arc<CacheStore>,
        base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            cache,
            base_url,
            timeout,
        }
    }

    /// Today's maximum precipitation probability at a coordinate, 0..=100.
    ///
    /// Every failure (timeout, status, payload) is reported as `Unavailable`.
    #[instrument(skip(self))]
    pub async fn forecast_today(&self, latitude: f64, longitude: f64) -> Result<i32, AppError> {
        let key = weather_key(latitude, longitude);
        if let Some(cached) = self.cache.weather.get(&key).await {
            info!(key = %key, "Cache hit");
            return Ok(cached);
        }

        info!(key = %key, "Fetching forecast from API");

        let url = format!(
            "{}?latitude={}&longitude={}&daily=precipitation_probability_max&forecast_days=1&timezone=auto",
            self.base_url, latitude, longitude
        );

        let response: OpenMeteoResponse = self
            .http_client
            .get_json(&url, self.timeout)
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "Forecast request failed");
                AppError::unavailable(format!("Weather data not available: {}", e))
            })?;

        let percentage = todays_max(response)?;
        self.cache.weather.set(key, percentage).await;

        Ok(percentage)
    }
}

fn todays_max(response: OpenMeteoResponse) -> Result<i32, AppError> {
    let value = response
        .daily
        .and_then(|daily| daily.precipitation_probability_max.into_iter().next())
        .flatten()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            AppError::unavailable("Weather data not available: missing daily precipitation probability")
        })?;

    Ok(value.round().clamp(0.0, 100.0) as i32)
}
