// Trait abstractions for the pipeline's three outbound dependencies.
//
// FeatureSource — geographic feature queries (Overpass).
// ReverseGeocoder — coordinate → administrative context (Nominatim).
// ArticleSource — direct title lookup + free-text suggestions (Wikipedia).
//
// These enable deterministic testing with the mocks in `testing`: no
// network, no API keys. `cargo test` in seconds.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use placewalk_common::{Coordinate, LocationContext};

/// A raw named-or-unnamed map feature before candidate filtering.
#[derive(Debug, Clone)]
pub struct RawFeature {
    /// Display coordinate; absent when the source had neither a position
    /// nor a centroid for the feature.
    pub location: Option<Coordinate>,
    pub tags: HashMap<String, String>,
}

impl RawFeature {
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}

/// An article as fetched, before truncation.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// All features of the notable-place categories within `radius_m`
    /// meters of the center.
    async fn features_around(&self, center: Coordinate, radius_m: u32) -> Result<Vec<RawFeature>>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Administrative context for a coordinate.
    async fn reverse(&self, location: Coordinate) -> Result<LocationContext>;
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Exact-title lookup. `Ok(None)` means the article does not exist.
    async fn by_title(&self, title: &str) -> Result<Option<FetchedArticle>>;

    /// Free-text search returning up to `limit` suggested titles.
    async fn suggest(&self, query: &str, limit: u32) -> Result<Vec<String>>;
}

// Also implemented for `Arc<A>` so tests can keep a handle for assertions.
#[async_trait]
impl<A: ArticleSource> ArticleSource for std::sync::Arc<A> {
    async fn by_title(&self, title: &str) -> Result<Option<FetchedArticle>> {
        (**self).by_title(title).await
    }

    async fn suggest(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        (**self).suggest(query, limit).await
    }
}

// ---------------------------------------------------------------------------
// Impls for the concrete clients
// ---------------------------------------------------------------------------

#[async_trait]
impl FeatureSource for overpass_client::OverpassClient {
    async fn features_around(&self, center: Coordinate, radius_m: u32) -> Result<Vec<RawFeature>> {
        let elements = self
            .named_features_around(center.lat, center.lon, radius_m)
            .await?;
        Ok(elements
            .into_iter()
            .map(|el| RawFeature {
                location: el.coordinates().map(|(lat, lon)| Coordinate::new(lat, lon)),
                tags: el.tags,
            })
            .collect())
    }
}

#[async_trait]
impl ReverseGeocoder for nominatim_client::NominatimClient {
    async fn reverse(&self, location: Coordinate) -> Result<LocationContext> {
        let address = self.reverse(location.lat, location.lon).await?;
        Ok(LocationContext {
            area: address.area().map(String::from),
            city: address.city_or_town().map(String::from),
        })
    }
}

#[async_trait]
impl ArticleSource for wikipedia_client::WikipediaClient {
    async fn by_title(&self, title: &str) -> Result<Option<FetchedArticle>> {
        let page = self.page(title).await?;
        Ok(page.map(|p| FetchedArticle {
            title: p.title,
            text: p.extract,
            url: p.url,
        }))
    }

    async fn suggest(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        Ok(self.search(query, limit).await?)
    }
}
