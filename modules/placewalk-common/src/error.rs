//! Input-validation errors surfaced at the pipeline boundary.
//!
//! External-service failures never appear here: they are logged and degrade
//! to empty results inside the pipeline. These errors are the only way a
//! discovery call can fail, and they fire before any outbound request.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacewalkError {
    /// Latitude or longitude outside WGS84 range.
    #[error("invalid coordinate: {lat}, {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Search radius must be positive.
    #[error("invalid radius: {0} m")]
    InvalidRadius(u32),

    /// Place name must be non-empty.
    #[error("empty place name")]
    EmptyPlaceName,
}
