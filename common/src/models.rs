use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A geocoded place, as returned by the Open-Meteo geocoding search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub feature_code: Option<String>,
}

/// Answer to "will it rain today?"
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictKind {
    Yes,
    Maybe,
    No,
    /// Forecast could not be fetched
    Error,
}

/// Animation category used by the renderer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Rain,
    Clouds,
    Sun,
}

/// Verdict card for one day at one place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub answer: String,
    pub class: String,
    pub icon: String,
    pub category: WeatherCategory,
    pub percentage: Option<i32>,
    pub details: String,
}

/// Result of an explicit "check this city" lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct CityVerdict {
    pub location: Location,
    /// Page title, e.g. "YES - Umbrella?"
    pub title: String,
    pub verdict: Verdict,
    /// A newer lookup started before this one finished; the UI should drop it.
    pub superseded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_deserializes_provider_result() {
        let loc: Location = serde_json::from_value(json!({
            "id": 2988507,
            "name": "Paris",
            "latitude": 48.85341,
            "longitude": 2.3488,
            "feature_code": "PPLC",
            "country": "France",
            "admin1": "Île-de-France",
            "population": 2138551
        }))
        .expect("location");

        assert_eq!(loc.name, "Paris");
        assert_eq!(loc.country.as_deref(), Some("France"));
        assert_eq!(loc.feature_code.as_deref(), Some("PPLC"));
    }

    #[test]
    fn location_tolerates_missing_optional_fields() {
        let loc: Location = serde_json::from_value(json!({
            "name": "Nowhere",
            "latitude": 0.0,
            "longitude": 0.0
        }))
        .expect("location");

        assert!(loc.country.is_none());
        assert!(loc.feature_code.is_none());
    }

    #[test]
    fn verdict_kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(VerdictKind::Maybe).expect("json"),
            json!("MAYBE")
        );
        assert_eq!(
            serde_json::to_value(WeatherCategory::Clouds).expect("json"),
            json!("clouds")
        );
    }
}
