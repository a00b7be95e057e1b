use std::env;
use std::time::Duration;

/// Per-call bounds for the three provider requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub resolve: Duration,
    pub suggest: Duration,
    pub forecast: Duration,
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self {
            resolve: Duration::from_secs(5),
            suggest: Duration::from_secs(3),
            forecast: Duration::from_secs(8),
        }
    }
}

pub struct Config {
    pub port: u16,
    pub open_meteo_url: String,
    pub geocoding_url: String,
    pub weather_cache_ttl_seconds: u64,
    pub location_cache_ttl_seconds: u64,
    pub timeouts: RequestTimeouts,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            open_meteo_url: env::var("OPEN_METEO_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string()),
            geocoding_url: env::var("GEOCODING_URL").unwrap_or_else(|_| {
                "https://geocoding-api.open-meteo.com/v1/search".to_string()
            }),
            weather_cache_ttl_seconds: env::var("WEATHER_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600), // 10 minutes
            location_cache_ttl_seconds: env::var("LOCATION_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            timeouts: RequestTimeouts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_match_call_kinds() {
        let t = RequestTimeouts::default();
        assert_eq!(t.resolve, Duration::from_secs(5));
        assert_eq!(t.suggest, Duration::from_secs(3));
        assert_eq!(t.forecast, Duration::from_secs(8));
    }
}
