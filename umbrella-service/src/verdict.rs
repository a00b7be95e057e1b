use common::models::{Verdict, VerdictKind, WeatherCategory};

/// Place label used when the coordinates came from geolocation.
pub const DEFAULT_PLACE: &str = "your location";

/// Classify a precipitation percentage for [`DEFAULT_PLACE`].
pub fn classify(percentage: i32) -> Verdict {
    classify_for(percentage, DEFAULT_PLACE)
}

/// Map a precipitation percentage to a verdict card.
///
/// Thresholds are strict: 50 is MAYBE and 20 is NO. Anything not above 20,
/// negative values included, lands in the NO bucket.
pub fn classify_for(percentage: i32, place: &str) -> Verdict {
    if percentage > 50 {
        Verdict {
            kind: VerdictKind::Yes,
            answer: "YES".to_string(),
            class: "yes".to_string(),
            icon: "cloud-rain".to_string(),
            category: WeatherCategory::Rain,
            percentage: Some(percentage),
            details: format!(
                "High chance of rain ({percentage}%) today in {place}. Don't forget your umbrella!"
            ),
        }
    } else if percentage > 20 {
        Verdict {
            kind: VerdictKind::Maybe,
            answer: "MAYBE".to_string(),
            class: "maybe".to_string(),
            icon: "cloud-sun".to_string(),
            category: WeatherCategory::Clouds,
            percentage: Some(percentage),
            details: format!(
                "{percentage}% chance of rain today in {place}. You might need an umbrella."
            ),
        }
    } else {
        Verdict {
            kind: VerdictKind::No,
            answer: "NO".to_string(),
            class: "no".to_string(),
            icon: "sun".to_string(),
            category: WeatherCategory::Sun,
            percentage: Some(percentage),
            details: format!(
                "Low chance of rain ({percentage}%) today in {place}. Enjoy your day!"
            ),
        }
    }
}

/// Card shown when the forecast could not be fetched.
pub fn unavailable() -> Verdict {
    Verdict {
        kind: VerdictKind::Error,
        answer: "ERROR".to_string(),
        class: "maybe".to_string(),
        icon: "exclamation-triangle".to_string(),
        category: WeatherCategory::Clouds,
        percentage: None,
        details: "Could not fetch weather data. Please try again later.".to_string(),
    }
}

/// Page title for a verdict, e.g. "YES - Umbrella?".
pub fn title(verdict: &Verdict) -> String {
    format!("{} - Umbrella?", verdict.answer)
}
