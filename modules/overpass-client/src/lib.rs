pub mod error;
pub mod types;

pub use error::{OverpassError, Result};
pub use types::{Centroid, OverpassElement, OverpassResponse};

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Category filters for notable places, applied per element type. Ways and
/// relations carry fewer filters than nodes (memorial plaques and man_made
/// monuments are mapped as nodes in practice).
const NODE_FILTERS: &[&str] = &[
    r#"["name"]["historic"]"#,
    r#"["name"]["tourism"]"#,
    r#"["name"]["amenity"~"place_of_worship|theatre|arts_centre|library|community_centre"]"#,
    r#"["name"]["leisure"~"park|garden"]"#,
    r#"["name"]["building"~"church|theatre|museum"]"#,
    r#"["name"]["memorial"]"#,
    r#"["name"]["man_made"~"monument|memorial"]"#,
];

const WAY_FILTERS: &[&str] = &[
    r#"["name"]["historic"]"#,
    r#"["name"]["tourism"]"#,
    r#"["name"]["amenity"~"place_of_worship|theatre|arts_centre|library|community_centre"]"#,
    r#"["name"]["leisure"~"park|garden"]"#,
    r#"["name"]["building"~"church|theatre|museum"]"#,
    r#"["name"]["memorial"]"#,
];

const RELATION_FILTERS: &[&str] = &[
    r#"["name"]["historic"]"#,
    r#"["name"]["tourism"]"#,
    r#"["name"]["amenity"~"place_of_worship|theatre|arts_centre|library|community_centre"]"#,
    r#"["name"]["leisure"~"park|garden"]"#,
];

pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Query named features of the notable-place categories within
    /// `radius_m` meters of a coordinate.
    pub async fn named_features_around(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<Vec<OverpassElement>> {
        let query = build_query(lat, lon, radius_m);
        tracing::debug!(lat, lon, radius_m, "Overpass around-query");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OverpassResponse = resp.json().await?;
        tracing::debug!(count = parsed.elements.len(), "Overpass elements received");
        Ok(parsed.elements)
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn build_query(lat: f64, lon: f64, radius_m: u32) -> String {
    let mut statements = String::new();
    for (element, filters) in [
        ("node", NODE_FILTERS),
        ("way", WAY_FILTERS),
        ("relation", RELATION_FILTERS),
    ] {
        for filter in filters {
            statements.push_str(&format!(
                "  {element}{filter}(around:{radius_m},{lat},{lon});\n"
            ));
        }
    }
    format!("[out:json];\n(\n{statements});\nout center;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_covers_all_element_types() {
        let q = build_query(51.5080, -0.1281, 1000);
        assert!(q.starts_with("[out:json];"));
        assert!(q.ends_with("out center;"));
        assert!(q.contains(r#"node["name"]["historic"](around:1000,51.508,-0.1281);"#));
        assert!(q.contains(r#"way["name"]["memorial"](around:1000,51.508,-0.1281);"#));
        assert!(q.contains(r#"relation["name"]["tourism"](around:1000,51.508,-0.1281);"#));
        assert!(q.contains(r#"man_made"#));
    }

    #[test]
    fn element_coordinates_prefer_own_position() {
        let el: OverpassElement = serde_json::from_str(
            r#"{"id": 1, "type": "node", "lat": 51.5, "lon": -0.1,
                "center": {"lat": 50.0, "lon": 0.0}, "tags": {"name": "X"}}"#,
        )
        .unwrap();
        assert_eq!(el.coordinates(), Some((51.5, -0.1)));
    }

    #[test]
    fn element_falls_back_to_centroid() {
        let el: OverpassElement = serde_json::from_str(
            r#"{"id": 2, "type": "way", "center": {"lat": 50.0, "lon": 0.5},
                "tags": {"name": "Y"}}"#,
        )
        .unwrap();
        assert_eq!(el.coordinates(), Some((50.0, 0.5)));
    }

    #[test]
    fn element_without_position_is_unusable() {
        let el: OverpassElement =
            serde_json::from_str(r#"{"id": 3, "type": "relation", "tags": {}}"#).unwrap();
        assert_eq!(el.coordinates(), None);
        assert_eq!(el.name(), None);
    }
}
