//! Article resolution: location-aware query construction, direct lookup,
//! search fallback, and biological false-positive filtering.

use anyhow::Result;
use tracing::{debug, warn};

use placewalk_common::{
    ArticleResult, Coordinate, DiscoveryConfig, LocationContext, PlacewalkError,
};

use crate::queries::{build_queries, is_off_topic, truncate_extract};
use crate::traits::{ArticleSource, FetchedArticle, ReverseGeocoder};

/// Suggested titles whose name alone gives the game away. Coarser than the
/// body check on purpose: a title mentioning a species is never the statue.
const SUSPECT_TITLE_MARKERS: &[&str] = &["species", "genus", "biology"];

/// How many suggestions to take from the search fallback per query.
const SUGGESTION_LIMIT: u32 = 5;

pub struct ArticleResolver<G: ReverseGeocoder, A: ArticleSource> {
    geocoder: G,
    articles: A,
    config: DiscoveryConfig,
}

impl<G: ReverseGeocoder, A: ArticleSource> ArticleResolver<G, A> {
    pub fn new(geocoder: G, articles: A, config: DiscoveryConfig) -> Self {
        Self {
            geocoder,
            articles,
            config,
        }
    }

    /// Resolve a place name to an article, using the coordinate (when
    /// given) for administrative context. `Ok(None)` means no story is
    /// available; external failures degrade to that, never propagate.
    pub async fn resolve(
        &self,
        place_name: &str,
        context: Option<Coordinate>,
    ) -> Result<Option<ArticleResult>> {
        if place_name.trim().is_empty() {
            return Err(PlacewalkError::EmptyPlaceName.into());
        }

        let ctx = self.location_context(context).await;
        let plan = build_queries(place_name, context, &ctx, &self.config);
        debug!(place_name, queries = ?plan.queries, needs_context = plan.needs_context, "Resolving article");

        for query in &plan.queries {
            match self.articles.by_title(query).await {
                Ok(Some(article)) => {
                    if self.accepts(&article, plan.needs_context) {
                        return Ok(Some(self.to_result(article)));
                    }
                    // Relevant-looking title, biological body: keep trying
                    // the remaining queries.
                }
                Ok(None) => {
                    if let Some(found) = self.search_fallback(query, plan.needs_context).await {
                        return Ok(Some(found));
                    }
                }
                Err(e) => {
                    warn!(query, error = %e, "Direct lookup failed, skipping query");
                }
            }
        }

        debug!(place_name, "No article found");
        Ok(None)
    }

    /// Reverse-geocode the context coordinate. Any failure leaves the
    /// context absent; disambiguation then simply has less to work with.
    async fn location_context(&self, context: Option<Coordinate>) -> LocationContext {
        let Some(location) = context else {
            return LocationContext::default();
        };
        match self.geocoder.reverse(location).await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(%location, error = %e, "Reverse geocoding failed, continuing without context");
                LocationContext::default()
            }
        }
    }

    /// Try the free-text search path for one query: fetch suggestions and
    /// accept the first title that exists and survives relevance checks.
    async fn search_fallback(&self, query: &str, needs_context: bool) -> Option<ArticleResult> {
        let titles = match self.articles.suggest(query, SUGGESTION_LIMIT).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(query, error = %e, "Search fallback failed, skipping query");
                return None;
            }
        };

        for title in titles {
            if needs_context && title_is_suspect(&title) {
                continue;
            }
            match self.articles.by_title(&title).await {
                Ok(Some(article)) if self.accepts(&article, needs_context) => {
                    return Some(self.to_result(article));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(title, error = %e, "Suggested title lookup failed");
                }
            }
        }
        None
    }

    fn accepts(&self, article: &FetchedArticle, needs_context: bool) -> bool {
        !(needs_context && is_off_topic(&article.text, &self.config))
    }

    fn to_result(&self, article: FetchedArticle) -> ArticleResult {
        ArticleResult {
            extract: truncate_extract(&article.text, &self.config),
            title: article.title,
            url: article.url,
        }
    }
}

fn title_is_suspect(title: &str) -> bool {
    let title_lower = title.to_lowercase();
    SUSPECT_TITLE_MARKERS
        .iter()
        .any(|marker| title_lower.contains(marker))
}
