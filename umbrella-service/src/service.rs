use crate::cache::CacheStore;
use crate::config::{Config, RequestTimeouts};
use crate::forecast::OpenMeteoClient;
use crate::geocoder::GeocoderClient;
use crate::suggest::filter_suggestions;
use crate::verdict::{self, DEFAULT_PLACE};
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::{CityVerdict, Location, Verdict};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// Orders the explicit lookups issued from one input box.
///
/// Tickets are only compared within a session, so lookups made by other
/// users of the same service never mark each other superseded.
#[derive(Debug, Default)]
pub struct LookupSession {
    latest: AtomicU64,
}

impl LookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// Entry points consumed by the rendering layer.
pub struct RainService {
    geocoder: GeocoderClient,
    weather: OpenMeteoClient,
}

impl RainService {
    pub fn new(geocoder: GeocoderClient, weather: OpenMeteoClient) -> Self {
        Self { geocoder, weather }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let cache = Arc::new(CacheStore::with_ttls(
            std::time::Duration::from_secs(config.weather_cache_ttl_seconds),
            std::time::Duration::from_secs(config.location_cache_ttl_seconds),
        ));
        Self::with_endpoints(
            cache,
            config.geocoding_url.clone(),
            config.open_meteo_url.clone(),
            config.timeouts,
        )
    }

    /// Wire both clients against the given endpoints and a shared cache.
    pub fn with_endpoints(
        cache: Arc<CacheStore>,
        geocoding_url: String,
        forecast_url: String,
        timeouts: RequestTimeouts,
    ) -> Result<Self, AppError> {
        let http_client = HttpClient::new()?;
        let geocoder = GeocoderClient::new(
            http_client.clone(),
            cache.clone(),
            geocoding_url,
            timeouts.resolve,
            timeouts.suggest,
        );
        let weather = OpenMeteoClient::new(http_client, cache, forecast_url, timeouts.forecast);
        Ok(Self::new(geocoder, weather))
    }

    /// Resolve a typed city name to its best match.
    #[instrument(skip(self))]
    pub async fn resolve_city(&self, name: &str) -> Result<Location, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter a city name"));
        }

        match self.geocoder.resolve(name).await {
            Ok(Some(location)) => Ok(location),
            Ok(None) => {
                info!(name = %name, "City not found");
                Err(AppError::not_found(
                    "City not found. Please try another city name.",
                ))
            }
            Err(e) => {
                warn!(name = %name, error = %e, timeout = e.is_timeout(), "City lookup failed");
                Err(e)
            }
        }
    }

    /// Ranked suggestions for a partial city name.
    ///
    /// Never fails: any error just yields an empty list.
    #[instrument(skip(self))]
    pub async fn suggest_cities(&self, prefix: &str) -> Vec<Location> {
        match self.geocoder.suggest(prefix).await {
            Ok(candidates) => filter_suggestions(candidates, prefix),
            Err(e) if e.is_timeout() => {
                debug!(prefix = %prefix, error = %e, "Suggestion search timed out");
                Vec::new()
            }
            Err(e) => {
                warn!(prefix = %prefix, error = %e, "Suggestion search failed");
                Vec::new()
            }
        }
    }

    /// Verdict for today's rain at a coordinate.
    pub async fn forecast_for(
        &self,
        latitude: f64,
        longitude: f64,
        place: Option<&str>,
    ) -> Result<Verdict, AppError> {
        let percentage = self.weather.forecast_today(latitude, longitude).await?;
        Ok(verdict::classify_for(
            percentage,
            place.unwrap_or(DEFAULT_PLACE),
        ))
    }

    /// Resolve a city, then fetch its verdict.
    ///
    /// Geocoding errors propagate; a failed forecast becomes the ERROR card.
    pub async fn check_city(
        &self,
        session: &LookupSession,
        name: &str,
    ) -> Result<CityVerdict, AppError> {
        let ticket = session.begin();
        let location = self.resolve_city(name).await?;
        Ok(self.finish_lookup(session, ticket, location).await)
    }

    /// Fetch the verdict for an already chosen location (e.g. a suggestion).
    pub async fn check_location(
        &self,
        session: &LookupSession,
        location: Location,
    ) -> CityVerdict {
        let ticket = session.begin();
        self.finish_lookup(session, ticket, location).await
    }

    async fn finish_lookup(
        &self,
        session: &LookupSession,
        ticket: u64,
        location: Location,
    ) -> CityVerdict {
        let verdict = match self
            .forecast_for(location.latitude, location.longitude, Some(&location.name))
            .await
        {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(city = %location.name, error = %e, "Forecast unavailable");
                verdict::unavailable()
            }
        };

        let superseded = !session.is_latest(ticket);
        if superseded {
            debug!(city = %location.name, ticket, "Lookup superseded by a newer one");
        }

        CityVerdict {
            title: verdict::title(&verdict),
            location,
            verdict,
            superseded,
        }
    }
}
