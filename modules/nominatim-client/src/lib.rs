pub mod error;

pub use error::{GeocodeError, Result};

use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim requires a descriptive User-Agent; anonymous clients get 403s.
const USER_AGENT: &str = "placewalk/0.1 (+https://github.com/placewalk/placewalk)";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseAddress {
    pub suburb: Option<String>,
    pub neighbourhood: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
}

impl ReverseAddress {
    /// Most specific known administrative area, in Nominatim's own
    /// preference order.
    pub fn area(&self) -> Option<&str> {
        self.suburb
            .as_deref()
            .or(self.neighbourhood.as_deref())
            .or(self.district.as_deref())
    }

    pub fn city_or_town(&self) -> Option<&str> {
        self.city.as_deref().or(self.town.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: ReverseAddress,
}

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a coordinate to its structured address.
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<ReverseAddress> {
        let url = format!("{}/reverse", self.base_url);
        tracing::debug!(lat, lon, "Nominatim reverse lookup");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("format", "jsonv2".to_string()),
                ("accept-language", "en".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ReverseResponse = resp.json().await?;
        Ok(parsed.address)
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
