//! Nearby-place discovery: one feature query, then filtering, dedup,
//! classification, and distance ranking.

use std::collections::HashSet;

use anyhow::Result;
use tracing::warn;

use placewalk_common::{
    haversine_m, Coordinate, DiscoveryConfig, PlaceCandidate, PlaceKind, PlacewalkError,
};

use crate::traits::{FeatureSource, RawFeature};

// ---------------------------------------------------------------------------
// Pure candidate filtering
// ---------------------------------------------------------------------------

/// Classify a feature by its tag keys, highest priority first.
pub fn classify(tags: &std::collections::HashMap<String, String>) -> PlaceKind {
    if tags.contains_key("memorial") || tags.contains_key("man_made") {
        PlaceKind::Memorial
    } else if tags.contains_key("amenity") {
        PlaceKind::Amenity
    } else if tags.contains_key("tourism") {
        PlaceKind::Tourism
    } else if tags.contains_key("leisure") {
        PlaceKind::Leisure
    } else if tags.contains_key("historic") {
        PlaceKind::Historic
    } else if tags.contains_key("building") {
        PlaceKind::Building
    } else {
        PlaceKind::Unclassified
    }
}

/// Case-insensitive substring match against the commercial-chain list.
pub fn is_excluded(name: &str, config: &DiscoveryConfig) -> bool {
    let name_lower = name.to_lowercase();
    config
        .exclude_terms
        .iter()
        .any(|term| name_lower.contains(&term.to_lowercase()))
}

/// Turn raw features into deduplicated, classified, distance-sorted
/// candidates. Features without a name or coordinate are dropped, as are
/// commercial chains and repeated names.
pub fn collect_candidates(
    features: Vec<RawFeature>,
    center: Coordinate,
    config: &DiscoveryConfig,
) -> Vec<PlaceCandidate> {
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for feature in features {
        let Some(name) = feature.name().map(String::from) else {
            continue;
        };
        if seen_names.contains(&name) || is_excluded(&name, config) {
            continue;
        }
        let Some(location) = feature.location else {
            continue;
        };

        seen_names.insert(name.clone());
        let kind = classify(&feature.tags);
        candidates.push(PlaceCandidate {
            name,
            location,
            distance_m: haversine_m(center, location),
            tags: feature.tags,
            kind,
            article_title: None,
        });
    }

    candidates.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    candidates
}

// ---------------------------------------------------------------------------
// PlaceDiscovery
// ---------------------------------------------------------------------------

pub struct PlaceDiscovery<F: FeatureSource> {
    source: F,
    config: DiscoveryConfig,
}

impl<F: FeatureSource> PlaceDiscovery<F> {
    pub fn new(source: F, config: DiscoveryConfig) -> Self {
        Self { source, config }
    }

    /// Discover named notable places within `radius_m` of the center,
    /// sorted ascending by distance.
    ///
    /// Errors only on invalid input. A failed or malformed feature query
    /// degrades to an empty result.
    pub async fn discover(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<PlaceCandidate>> {
        if !center.is_valid() {
            return Err(PlacewalkError::InvalidCoordinate {
                lat: center.lat,
                lon: center.lon,
            }
            .into());
        }
        if radius_m == 0 {
            return Err(PlacewalkError::InvalidRadius(radius_m).into());
        }

        let features = match self.source.features_around(center, radius_m).await {
            Ok(features) => features,
            Err(e) => {
                warn!(error = %e, %center, "Feature query failed, returning no candidates");
                return Ok(Vec::new());
            }
        };

        let candidates = collect_candidates(features, center, &self.config);
        tracing::debug!(count = candidates.len(), %center, radius_m, "Discovery complete");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{feature, feature_at_no_coords, CENTER};

    fn config() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    #[test]
    fn classification_priority_order() {
        let mut tags = std::collections::HashMap::new();
        tags.insert("tourism".to_string(), "attraction".to_string());
        tags.insert("memorial".to_string(), "statue".to_string());
        assert_eq!(classify(&tags), PlaceKind::Memorial);

        let mut tags = std::collections::HashMap::new();
        tags.insert("building".to_string(), "church".to_string());
        tags.insert("amenity".to_string(), "place_of_worship".to_string());
        assert_eq!(classify(&tags), PlaceKind::Amenity);

        let mut tags = std::collections::HashMap::new();
        tags.insert("historic".to_string(), "yes".to_string());
        tags.insert("building".to_string(), "museum".to_string());
        assert_eq!(classify(&tags), PlaceKind::Historic);

        assert_eq!(classify(&std::collections::HashMap::new()), PlaceKind::Unclassified);
    }

    #[test]
    fn man_made_counts_as_memorial() {
        let mut tags = std::collections::HashMap::new();
        tags.insert("man_made".to_string(), "monument".to_string());
        assert_eq!(classify(&tags), PlaceKind::Memorial);
    }

    #[test]
    fn commercial_chains_are_excluded() {
        let c = config();
        assert!(is_excluded("Starbucks Coffee", &c));
        assert!(is_excluded("PREMIER INN London", &c));
        assert!(!is_excluded("St Martin-in-the-Fields", &c));
    }

    #[test]
    fn duplicate_names_are_dropped() {
        let features = vec![
            feature("The Old Mill", 51.509, -0.128, "historic", "mill"),
            feature("The Old Mill", 51.510, -0.130, "tourism", "attraction"),
        ];
        let out = collect_candidates(features, CENTER, &config());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, PlaceKind::Historic);
    }

    #[test]
    fn nameless_and_coordless_features_are_dropped() {
        let mut nameless = feature("x", 51.509, -0.128, "historic", "yes");
        nameless.tags.remove("name");

        let features = vec![nameless, feature_at_no_coords("Ghost Hall", "historic", "yes")];
        let out = collect_candidates(features, CENTER, &config());
        assert!(out.is_empty());
    }

    #[test]
    fn candidates_sorted_by_distance() {
        let features = vec![
            feature("Far Church", 51.5200, -0.1200, "building", "church"),
            feature("Near Statue", 51.5135, -0.1341, "memorial", "statue"),
            feature("Mid Park", 51.5160, -0.1300, "leisure", "park"),
        ];
        let out = collect_candidates(features, CENTER, &config());
        let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Near Statue", "Mid Park", "Far Church"]);
        assert!(out.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[tokio::test]
    async fn invalid_input_rejected_before_any_query() {
        let discovery = PlaceDiscovery::new(crate::testing::MockFeatureSource::failing(), config());
        assert!(discovery
            .discover(Coordinate::new(95.0, 0.0), 1000)
            .await
            .is_err());
        assert!(discovery.discover(CENTER, 0).await.is_err());
    }

    #[tokio::test]
    async fn feature_query_failure_degrades_to_empty() {
        let discovery = PlaceDiscovery::new(crate::testing::MockFeatureSource::failing(), config());
        let out = discovery.discover(CENTER, 1000).await.unwrap();
        assert!(out.is_empty());
    }
}
