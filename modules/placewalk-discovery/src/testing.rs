// Test mocks for the discovery pipeline.
//
// Three mocks matching the three trait boundaries:
// - MockFeatureSource (FeatureSource) — fixed feature list or hard failure
// - MockGeocoder (ReverseGeocoder) — fixed LocationContext or hard failure
// - MockArticleSource (ArticleSource) — HashMap-based title→article and
//   query→suggestions, builder pattern, records lookup order
//
// Plus helpers for constructing RawFeature and FetchedArticle values.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use placewalk_common::{Coordinate, LocationContext};

use crate::traits::{ArticleSource, FeatureSource, FetchedArticle, RawFeature, ReverseGeocoder};

/// Soho Square, London — a handy test center outside the lions bbox.
pub const CENTER: Coordinate = Coordinate {
    lat: 51.5134,
    lon: -0.1340,
};

/// Trafalgar Square center, inside the lions override bbox.
pub const TRAFALGAR: Coordinate = Coordinate {
    lat: 51.5080,
    lon: -0.1281,
};

/// Build a RawFeature with a name and one extra tag.
pub fn feature(name: &str, lat: f64, lon: f64, key: &str, value: &str) -> RawFeature {
    let mut tags = HashMap::new();
    tags.insert("name".to_string(), name.to_string());
    tags.insert(key.to_string(), value.to_string());
    RawFeature {
        location: Some(Coordinate::new(lat, lon)),
        tags,
    }
}

/// A named feature with no usable coordinate.
pub fn feature_at_no_coords(name: &str, key: &str, value: &str) -> RawFeature {
    let mut f = feature(name, 0.0, 0.0, key, value);
    f.location = None;
    f
}

/// Build a FetchedArticle with a derived URL.
pub fn article(title: &str, text: &str) -> FetchedArticle {
    FetchedArticle {
        title: title.to_string(),
        text: text.to_string(),
        url: format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
    }
}

// ---------------------------------------------------------------------------
// MockFeatureSource
// ---------------------------------------------------------------------------

pub struct MockFeatureSource {
    features: Vec<RawFeature>,
    fail: bool,
}

impl MockFeatureSource {
    pub fn with_features(features: Vec<RawFeature>) -> Self {
        Self {
            features,
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::with_features(Vec::new())
    }

    /// Every query fails, as if the network were down.
    pub fn failing() -> Self {
        Self {
            features: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl FeatureSource for MockFeatureSource {
    async fn features_around(&self, _center: Coordinate, _radius_m: u32) -> Result<Vec<RawFeature>> {
        if self.fail {
            bail!("feature source unavailable");
        }
        Ok(self.features.clone())
    }
}

// ---------------------------------------------------------------------------
// MockGeocoder
// ---------------------------------------------------------------------------

pub struct MockGeocoder {
    ctx: LocationContext,
    fail: bool,
}

impl MockGeocoder {
    pub fn with(area: &str, city: &str) -> Self {
        Self {
            ctx: LocationContext {
                area: Some(area.to_string()),
                city: Some(city.to_string()),
            },
            fail: false,
        }
    }

    pub fn with_city_only(city: &str) -> Self {
        Self {
            ctx: LocationContext {
                area: None,
                city: Some(city.to_string()),
            },
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            ctx: LocationContext::default(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            ctx: LocationContext::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn reverse(&self, _location: Coordinate) -> Result<LocationContext> {
        if self.fail {
            bail!("geocoder unavailable");
        }
        Ok(self.ctx.clone())
    }
}

// ---------------------------------------------------------------------------
// MockArticleSource
// ---------------------------------------------------------------------------

/// HashMap-based article source. Unregistered titles simply do not exist;
/// unregistered queries suggest nothing. Records every direct lookup so
/// tests can assert on query order.
pub struct MockArticleSource {
    pages: HashMap<String, FetchedArticle>,
    suggestions: HashMap<String, Vec<String>>,
    lookups: Mutex<Vec<String>>,
    fail: bool,
}

impl MockArticleSource {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            suggestions: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn on_page(mut self, title: &str, article: FetchedArticle) -> Self {
        self.pages.insert(title.to_string(), article);
        self
    }

    pub fn on_suggest(mut self, query: &str, titles: Vec<String>) -> Self {
        self.suggestions.insert(query.to_string(), titles);
        self
    }

    /// All direct-lookup titles seen so far, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("lookup log poisoned").clone()
    }
}

impl Default for MockArticleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for MockArticleSource {
    async fn by_title(&self, title: &str) -> Result<Option<FetchedArticle>> {
        if self.fail {
            bail!("article source unavailable");
        }
        self.lookups
            .lock()
            .expect("lookup log poisoned")
            .push(title.to_string());
        Ok(self.pages.get(title).cloned())
    }

    async fn suggest(&self, query: &str, _limit: u32) -> Result<Vec<String>> {
        if self.fail {
            bail!("article source unavailable");
        }
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }
}
