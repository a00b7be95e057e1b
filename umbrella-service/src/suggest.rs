//! Narrow raw geocoding candidates down to the short list shown while typing.

use common::models::Location;

/// Upper bound on suggestions handed to the renderer.
pub const MAX_SUGGESTIONS: usize = 5;

/// Country and territory level feature codes; these pollute city search.
const COUNTRY_LEVEL_CODES: &[&str] = &["PCLI", "PCLD", "PCL", "PCLS", "TERR"];

/// Populated places, administrative seats and lower-order divisions.
const CITY_LEVEL_CODES: &[&str] = &[
    "PPL", "PPLA", "PPLA2", "PPLA3", "PPLA4", "PPLC", "ADM2", "ADM3", "ADM4",
];

/// Queries spelling one of these are treated as a country being typed.
const COUNTRY_NAMES: &[&str] = &[
    "australia", "canada", "germany", "france", "italy", "spain", "japan", "brazil", "india",
    "china",
];

/// Filter and truncate candidates for `query`, keeping provider order.
///
/// An empty result means the suggestion list should be hidden.
pub fn filter_suggestions(candidates: Vec<Location>, query: &str) -> Vec<Location> {
    let query = query.trim().to_lowercase();
    let country_query = is_country_query(&query);

    candidates
        .into_iter()
        .filter(|c| !has_code(c, COUNTRY_LEVEL_CODES))
        .filter(|c| !country_query || !is_foreign_namesake(c, &query))
        .filter(|c| has_code(c, CITY_LEVEL_CODES))
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn is_country_query(query: &str) -> bool {
    query.chars().count() > 5 && COUNTRY_NAMES.contains(&query)
}

/// A place named like the typed country but located somewhere else.
fn is_foreign_namesake(candidate: &Location, query: &str) -> bool {
    let name_matches = candidate.name.to_lowercase() == query;
    let country_matches = candidate
        .country
        .as_deref()
        .is_some_and(|country| country.to_lowercase() == query);
    name_matches && !country_matches
}

fn has_code(candidate: &Location, codes: &[&str]) -> bool {
    candidate
        .feature_code
        .as_deref()
        .is_some_and(|code| codes.contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, country: &str, code: &str) -> Location {
        Location {
            name: name.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            country: Some(country.to_string()),
            admin1: None,
            feature_code: Some(code.to_string()),
        }
    }

    #[test]
    fn drops_country_level_entities() {
        let candidates = vec![
            place("France", "France", "PCLI"),
            place("Paris", "France", "PPLA"),
        ];
        let out = filter_suggestions(candidates, "fr");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Paris");
    }

    #[test]
    fn drops_every_country_level_code() {
        let candidates = COUNTRY_LEVEL_CODES
            .iter()
            .map(|code| place("Somewhere", "Somewhere", code))
            .collect();
        assert!(filter_suggestions(candidates, "some").is_empty());
    }

    #[test]
    fn country_query_drops_foreign_namesakes() {
        let candidates = vec![
            place("Australia", "Australia", "PPL"),
            place("Australia", "South Africa", "PPL"),
        ];
        let out = filter_suggestions(candidates, "australia");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country.as_deref(), Some("Australia"));
    }

    #[test]
    fn country_query_is_case_insensitive() {
        let candidates = vec![
            place("Canada", "Canada", "PPL"),
            place("Canada", "Mexico", "PPL"),
        ];
        let out = filter_suggestions(candidates, "  CANADA ");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country.as_deref(), Some("Canada"));
    }

    #[test]
    fn country_query_keeps_differently_named_places() {
        let candidates = vec![
            place("Canandaigua", "United States", "PPL"),
            place("Canada", "United States", "PPL"),
        ];
        let out = filter_suggestions(candidates, "canada");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Canandaigua");
    }

    #[test]
    fn short_country_names_do_not_trigger_disambiguation() {
        // "italy" and "spain" are only five characters
        let candidates = vec![
            place("Italy", "United States", "PPL"),
            place("Spain", "Philippines", "PPL"),
        ];
        assert_eq!(filter_suggestions(candidates.clone(), "italy").len(), 2);
        assert_eq!(filter_suggestions(candidates, "spain").len(), 2);
    }

    #[test]
    fn ordinary_city_query_keeps_all_countries() {
        let candidates = vec![
            place("Richmond", "United States", "PPLA"),
            place("Richmond", "Canada", "PPL"),
            place("Richmond", "United Kingdom", "PPL"),
            place("Richmond", "Australia", "PPL"),
        ];
        let out = filter_suggestions(candidates, "Richmond");
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn keeps_only_city_and_lower_admin_codes() {
        let candidates = vec![
            place("Capital", "X", "PPLC"),
            place("Seat", "X", "PPLA3"),
            place("County", "X", "ADM2"),
            place("Province", "X", "ADM1"),
            place("River", "X", "STM"),
            place("Ruin", "X", "PPLQ"),
        ];
        let names: Vec<_> = filter_suggestions(candidates, "x")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Capital", "Seat", "County"]);
    }

    #[test]
    fn missing_feature_code_is_dropped() {
        let mut unknown = place("Mystery", "X", "PPL");
        unknown.feature_code = None;
        assert!(filter_suggestions(vec![unknown], "mys").is_empty());
    }

    #[test]
    fn truncates_to_five_in_provider_order() {
        let candidates: Vec<_> = (0..10)
            .map(|i| place(&format!("Town{i}"), "X", "PPL"))
            .collect();
        let out = filter_suggestions(candidates, "town");
        assert_eq!(out.len(), MAX_SUGGESTIONS);
        let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Town0", "Town1", "Town2", "Town3", "Town4"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_suggestions(Vec::new(), "anything").is_empty());
    }
}
