use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Geo types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are within valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between two points in meters.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_M * c
}

// --- Place types ---

/// Coarse classification of a discovered feature, derived from its OSM tag
/// keys. Memorial outranks everything else so that statues and monuments
/// keep their framing even when also tagged as tourism features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    Memorial,
    Amenity,
    Tourism,
    Leisure,
    Historic,
    Building,
    Unclassified,
}

impl std::fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceKind::Memorial => write!(f, "memorial"),
            PlaceKind::Amenity => write!(f, "amenity"),
            PlaceKind::Tourism => write!(f, "tourism"),
            PlaceKind::Leisure => write!(f, "leisure"),
            PlaceKind::Historic => write!(f, "historic"),
            PlaceKind::Building => write!(f, "building"),
            PlaceKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

impl std::str::FromStr for PlaceKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memorial" => Ok(Self::Memorial),
            "amenity" => Ok(Self::Amenity),
            "tourism" => Ok(Self::Tourism),
            "leisure" => Ok(Self::Leisure),
            "historic" => Ok(Self::Historic),
            "building" => Ok(Self::Building),
            "unclassified" => Ok(Self::Unclassified),
            _ => Err(anyhow::anyhow!("Unknown place kind: {}", s)),
        }
    }
}

/// One named feature near the query center. Name is the dedup key within a
/// single discovery run. `article_title` is filled in by the pipeline once
/// an encyclopedia article has been resolved for the place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub location: Coordinate,
    pub distance_m: f64,
    pub tags: HashMap<String, String>,
    pub kind: PlaceKind,
    pub article_title: Option<String>,
}

impl PlaceCandidate {
    pub fn has_article(&self) -> bool {
        self.article_title.is_some()
    }
}

/// A resolved encyclopedia article. Extract is truncated at fetch time;
/// callers own the value, nothing is cached across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    pub title: String,
    pub extract: String,
    pub url: String,
}

/// Administrative context for a coordinate, from reverse geocoding.
/// Transient; used only to build disambiguating search queries and the
/// narrator's visitor-location sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationContext {
    pub area: Option<String>,
    pub city: Option<String>,
}

impl LocationContext {
    pub fn is_empty(&self) -> bool {
        self.area.is_none() && self.city.is_none()
    }
}
