//! TOML-backed tuning configuration with compiled-in defaults.
//!
//! Every list the pipeline filters on (commercial chains, generic nouns,
//! biology rejection terms, landmark overrides) is data here, not code, so
//! it can be adjusted without a redeploy. Secrets stay in env vars.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::types::Coordinate;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub discovery: DiscoveryConfig,
    pub narration: NarrationConfig,
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Search radius around the query center, meters.
    pub radius_m: u32,
    /// How many raw candidates the pipeline will attempt to resolve.
    pub max_raw_candidates: usize,
    /// How many resolved candidates the pipeline returns at most.
    pub max_resolved: usize,
    /// Article extract truncation, characters.
    pub extract_limit: usize,
    /// How much of the article body the relevance filter inspects.
    pub relevance_window: usize,
    /// Commercial chains dropped from discovery (case-insensitive substring).
    pub exclude_terms: Vec<String>,
    /// Generic nouns that mark a place name as ambiguous.
    pub generic_terms: Vec<String>,
    /// Terms that mark an article as a biological false positive.
    pub biology_terms: Vec<String>,
    /// Landmark-specific query overrides, tried before all other logic.
    pub overrides: Vec<OverrideRule>,
}

/// Hard override for a well-known landmark: when the place name contains
/// `pattern` and the coordinate falls inside `bbox`, exactly `queries` are
/// used and all other query construction is bypassed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideRule {
    pub pattern: String,
    pub bbox: BoundingBox,
    pub queries: Vec<String>,
}

impl OverrideRule {
    pub fn matches(&self, name_lower: &str, location: Option<Coordinate>) -> bool {
        let Some(loc) = location else { return false };
        name_lower.contains(&self.pattern.to_lowercase()) && self.bbox.contains(loc)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Strict comparison on all edges, matching the landmark rules this
    /// table was seeded from.
    pub fn contains(&self, c: Coordinate) -> bool {
        self.min_lat < c.lat && c.lat < self.max_lat && self.min_lon < c.lon && c.lon < self.max_lon
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NarrationConfig {
    pub model: String,
    pub voice_id: String,
    pub speech_model: String,
    pub output_format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointsConfig {
    pub overpass: String,
    pub nominatim: String,
    pub wikipedia: String,
    pub openai: String,
    pub elevenlabs: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            radius_m: 1000,
            max_raw_candidates: 20,
            max_resolved: 8,
            extract_limit: 2000,
            relevance_window: 500,
            exclude_terms: strings(&[
                "premier inn",
                "travelodge",
                "holiday inn",
                "ibis",
                "hilton",
                "marriott",
                "tesco",
                "sainsbury",
                "asda",
                "lidl",
                "aldi",
                "co-op",
                "waitrose",
                "mcdonalds",
                "burger king",
                "kfc",
                "subway",
                "starbucks",
                "costa",
                "boots",
                "superdrug",
                "lloyds pharmacy",
                "hsbc",
                "barclays",
                "natwest",
                "santander",
                "halifax",
                "nationwide",
            ]),
            generic_terms: strings(&[
                "lion", "lions", "statue", "monument", "fountain", "cross", "memorial", "church",
                "park", "garden", "square", "bridge",
            ]),
            biology_terms: strings(&[
                "species",
                "genus",
                "animal",
                "mammal",
                "carnivore",
                "biology",
            ]),
            overrides: vec![OverrideRule {
                pattern: "lion".to_string(),
                bbox: BoundingBox {
                    min_lat: 51.507,
                    max_lat: 51.509,
                    min_lon: -0.129,
                    max_lon: -0.127,
                },
                queries: strings(&["Trafalgar Square Lions", "Landseer Lions"]),
            }],
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            speech_model: "eleven_monolingual_v1".to_string(),
            output_format: "mp3_44100_128".to_string(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            overpass: "https://overpass-api.de/api/interpreter".to_string(),
            nominatim: "https://nominatim.openstreetmap.org".to_string(),
            wikipedia: "https://en.wikipedia.org/w/api.php".to_string(),
            openai: "https://api.openai.com/v1".to_string(),
            elevenlabs: "https://api.elevenlabs.io".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Load and parse a TOML config file. Missing sections fall back to the
/// compiled-in defaults.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
