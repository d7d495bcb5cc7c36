//! Orchestration: discovery, then sequential article resolution in
//! distance order, bounded by the raw and resolved caps.

use anyhow::Result;
use tracing::{debug, info, warn};

use placewalk_common::{ArticleResult, Coordinate, DiscoveryConfig, PlaceCandidate};

use crate::discovery::PlaceDiscovery;
use crate::resolver::ArticleResolver;
use crate::traits::{ArticleSource, FeatureSource, ReverseGeocoder};

pub struct DiscoveryPipeline<F, G, A>
where
    F: FeatureSource,
    G: ReverseGeocoder,
    A: ArticleSource,
{
    discovery: PlaceDiscovery<F>,
    resolver: ArticleResolver<G, A>,
    config: DiscoveryConfig,
}

impl<F, G, A> DiscoveryPipeline<F, G, A>
where
    F: FeatureSource,
    G: ReverseGeocoder,
    A: ArticleSource,
{
    pub fn new(features: F, geocoder: G, articles: A, config: DiscoveryConfig) -> Self {
        Self {
            discovery: PlaceDiscovery::new(features, config.clone()),
            resolver: ArticleResolver::new(geocoder, articles, config.clone()),
            config,
        }
    }

    /// Discover nearby places and keep those with a resolvable article,
    /// in distance order. Examines at most `max_raw_candidates` places and
    /// stops once `max_resolved` have an article.
    ///
    /// Resolution is sequential, one outbound call at a time; with a dense
    /// city center this can take up to `max_raw_candidates` round trips.
    /// Callers are responsible for surfacing progress to a user.
    pub async fn discover_with_stories(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<(PlaceCandidate, ArticleResult)>> {
        let candidates = self.discovery.discover(center, radius_m).await?;
        let examined = candidates.len().min(self.config.max_raw_candidates);
        debug!(
            found = candidates.len(),
            examining = examined,
            "Checking candidates for available stories"
        );

        let mut resolved = Vec::new();
        for mut candidate in candidates
            .into_iter()
            .take(self.config.max_raw_candidates)
        {
            if resolved.len() >= self.config.max_resolved {
                break;
            }
            match self
                .resolver
                .resolve(&candidate.name, Some(candidate.location))
                .await
            {
                Ok(Some(article)) => {
                    candidate.article_title = Some(article.title.clone());
                    resolved.push((candidate, article));
                }
                Ok(None) => {}
                Err(e) => {
                    // Candidate names are non-empty by construction, so
                    // this is unexpected; skip the candidate.
                    warn!(name = candidate.name.as_str(), error = %e, "Resolution failed");
                }
            }
        }

        info!(count = resolved.len(), %center, radius_m, "Discovery pipeline complete");
        Ok(resolved)
    }

    /// Manual search path: resolve a free-form place name with no
    /// coordinate context.
    pub async fn lookup(&self, place_name: &str) -> Result<Option<ArticleResult>> {
        self.resolver.resolve(place_name, None).await
    }
}
