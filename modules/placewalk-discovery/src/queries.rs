//! Candidate-query construction for article resolution.
//!
//! Pure functions: given the same place name, coordinate, geocoding result,
//! and config, the ordered query list is always identical.

use placewalk_common::{Coordinate, DiscoveryConfig, LocationContext};

/// The ordered search queries for one place, plus whether the name was
/// lexically ambiguous and therefore subject to relevance filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub queries: Vec<String>,
    pub needs_context: bool,
}

/// Build the ordered candidate queries for a place name.
///
/// Precedence:
/// 1. Landmark override table — pattern + bounding-box match yields the
///    rule's literal queries and bypasses everything else.
/// 2. Generic name (contains a configured generic noun) with known
///    area/city — combinations of name + area + city, most specific first.
///    No bare-name fallback: a bare generic noun would only ever hit the
///    wrong article.
/// 3. Anything else — "name, area", "name, city" (when distinct), then the
///    bare name as the final fallback.
pub fn build_queries(
    place_name: &str,
    location: Option<Coordinate>,
    ctx: &LocationContext,
    config: &DiscoveryConfig,
) -> QueryPlan {
    let name_lower = place_name.to_lowercase();
    let needs_context = config
        .generic_terms
        .iter()
        .any(|term| name_lower.contains(&term.to_lowercase()));

    for rule in &config.overrides {
        if rule.matches(&name_lower, location) {
            return QueryPlan {
                queries: rule.queries.clone(),
                needs_context,
            };
        }
    }

    let area = ctx.area.as_deref();
    let city = ctx.city.as_deref();

    let mut queries = Vec::new();
    if needs_context && !ctx.is_empty() {
        if let (Some(area), Some(city)) = (area, city) {
            queries.push(format!("{place_name} {area} {city}"));
        }
        if let Some(area) = area {
            queries.push(format!("{place_name} {area}"));
        }
        if let Some(city) = city {
            queries.push(format!("{place_name} {city}"));
        }
    } else {
        if let Some(area) = area {
            queries.push(format!("{place_name}, {area}"));
        }
        if let Some(city) = city {
            if Some(city) != area {
                queries.push(format!("{place_name}, {city}"));
            }
        }
        queries.push(place_name.to_string());
    }

    QueryPlan {
        queries,
        needs_context,
    }
}

/// True when the opening window of an article reads like a biology page
/// rather than a place. Only applied to `needs_context` queries.
pub fn is_off_topic(text: &str, config: &DiscoveryConfig) -> bool {
    let window: String = text
        .chars()
        .take(config.relevance_window)
        .collect::<String>()
        .to_lowercase();
    config
        .biology_terms
        .iter()
        .any(|term| window.contains(&term.to_lowercase()))
}

/// Truncate an article body to the configured extract limit.
pub fn truncate_extract(text: &str, config: &DiscoveryConfig) -> String {
    if text.chars().count() <= config.extract_limit {
        text.to_string()
    } else {
        text.chars().take(config.extract_limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    fn ctx(area: Option<&str>, city: Option<&str>) -> LocationContext {
        LocationContext {
            area: area.map(String::from),
            city: city.map(String::from),
        }
    }

    /// Trafalgar Square center, inside the lions override bbox.
    const TRAFALGAR: Coordinate = Coordinate {
        lat: 51.5080,
        lon: -0.1281,
    };

    #[test]
    fn landmark_override_bypasses_everything() {
        let plan = build_queries(
            "Lion",
            Some(TRAFALGAR),
            &ctx(Some("Charing Cross"), Some("London")),
            &config(),
        );
        assert_eq!(
            plan.queries,
            vec!["Trafalgar Square Lions", "Landseer Lions"]
        );
        assert!(plan.needs_context);
    }

    #[test]
    fn override_needs_both_pattern_and_bbox() {
        // Lion name, but far from the square: normal generic handling.
        let far = Coordinate::new(53.4808, -2.2426);
        let plan = build_queries("Lion", Some(far), &ctx(None, Some("Manchester")), &config());
        assert_eq!(plan.queries, vec!["Lion Manchester"]);

        // In the bbox, but not a lion: normal handling too.
        let plan = build_queries("Nelson's Column", Some(TRAFALGAR), &ctx(None, None), &config());
        assert_eq!(plan.queries, vec!["Nelson's Column"]);
    }

    #[test]
    fn override_requires_a_coordinate() {
        let plan = build_queries("Lion", None, &ctx(None, None), &config());
        assert_eq!(plan.queries, vec!["Lion"]);
    }

    #[test]
    fn generic_name_with_area_and_city() {
        let plan = build_queries(
            "Oak Street Church",
            None,
            &ctx(Some("Soho"), Some("London")),
            &config(),
        );
        assert!(plan.needs_context);
        assert_eq!(
            plan.queries,
            vec![
                "Oak Street Church Soho London",
                "Oak Street Church Soho",
                "Oak Street Church London",
            ]
        );
    }

    #[test]
    fn generic_name_with_only_one_context_part() {
        let plan = build_queries("Memorial Fountain", None, &ctx(Some("Soho"), None), &config());
        assert_eq!(plan.queries, vec!["Memorial Fountain Soho"]);

        let plan = build_queries("Memorial Fountain", None, &ctx(None, Some("London")), &config());
        assert_eq!(plan.queries, vec!["Memorial Fountain London"]);
    }

    #[test]
    fn generic_name_without_context_falls_back_to_bare_name() {
        let plan = build_queries("Old Stone Bridge", None, &ctx(None, None), &config());
        assert!(plan.needs_context);
        assert_eq!(plan.queries, vec!["Old Stone Bridge"]);
    }

    #[test]
    fn specific_name_gets_comma_context_then_bare_fallback() {
        let plan = build_queries(
            "The Salisbury",
            None,
            &ctx(Some("Covent Garden"), Some("London")),
            &config(),
        );
        assert!(!plan.needs_context);
        assert_eq!(
            plan.queries,
            vec![
                "The Salisbury, Covent Garden",
                "The Salisbury, London",
                "The Salisbury",
            ]
        );
    }

    #[test]
    fn specific_name_skips_city_equal_to_area() {
        let plan = build_queries(
            "The Salisbury",
            None,
            &ctx(Some("London"), Some("London")),
            &config(),
        );
        assert_eq!(plan.queries, vec!["The Salisbury, London", "The Salisbury"]);
    }

    #[test]
    fn query_construction_is_deterministic() {
        let c = config();
        let context = ctx(Some("Soho"), Some("London"));
        let a = build_queries("Golden Lion", Some(TRAFALGAR), &context, &c);
        let b = build_queries("Golden Lion", Some(TRAFALGAR), &context, &c);
        assert_eq!(a, b);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let plan = build_queries("GRAND STATUE", None, &ctx(None, Some("York")), &config());
        assert!(plan.needs_context);

        let plan = build_queries("LION", Some(TRAFALGAR), &ctx(None, None), &config());
        assert_eq!(
            plan.queries,
            vec!["Trafalgar Square Lions", "Landseer Lions"]
        );
    }

    #[test]
    fn off_topic_detects_biology_in_window() {
        let c = config();
        assert!(is_off_topic("The lion is a large cat of the genus Panthera.", &c));
        assert!(!is_off_topic(
            "The bronze lions at the base of Nelson's Column were sculpted by Landseer.",
            &c
        ));
    }

    #[test]
    fn off_topic_ignores_terms_past_the_window() {
        let c = config();
        let mut text = "a".repeat(c.relevance_window);
        text.push_str(" species genus biology");
        assert!(!is_off_topic(&text, &c));
    }

    #[test]
    fn truncate_caps_at_limit() {
        let c = config();
        let long = "x".repeat(c.extract_limit + 500);
        assert_eq!(truncate_extract(&long, &c).chars().count(), c.extract_limit);

        let short = "short extract";
        assert_eq!(truncate_extract(short, &c), short);
    }
}
