pub mod discovery;
pub mod pipeline;
pub mod queries;
pub mod resolver;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use discovery::PlaceDiscovery;
pub use pipeline::DiscoveryPipeline;
pub use queries::QueryPlan;
pub use resolver::ArticleResolver;
pub use traits::{ArticleSource, FeatureSource, FetchedArticle, RawFeature, ReverseGeocoder};
