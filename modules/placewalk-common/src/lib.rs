pub mod config;
pub mod error;
pub mod file_config;
pub mod types;

pub use config::Config;
pub use error::PlacewalkError;
pub use file_config::{
    load_config, BoundingBox, DiscoveryConfig, EndpointsConfig, FileConfig, NarrationConfig,
    OverrideRule,
};
pub use types::*;
