pub mod error;
pub mod types;

pub use error::{Result, WikiError};
pub use types::WikiPage;

use std::time::Duration;

use types::{OpenSearchResponse, QueryResponse};

const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const USER_AGENT: &str = "placewalk/0.1 (+https://github.com/placewalk/placewalk)";

pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(api_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_url: api_url.to_string(),
        }
    }

    /// Direct lookup by exact title. Redirects are followed server-side.
    /// Returns `None` when no such page exists.
    pub async fn page(&self, title: &str) -> Result<Option<WikiPage>> {
        tracing::debug!(title, "Wikipedia direct lookup");

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|info"),
                ("inprop", "url"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: QueryResponse = resp.json().await?;
        let entry = parsed
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(|p| !p.missing);

        Ok(entry.map(|p| WikiPage {
            url: p
                .fullurl
                .unwrap_or_else(|| canonical_url(&self.api_url, &p.title)),
            extract: p.extract.unwrap_or_default(),
            title: p.title,
        }))
    }

    /// Free-text opensearch returning up to `limit` suggested titles.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        tracing::debug!(query, limit, "Wikipedia opensearch");

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", &limit.to_string()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OpenSearchResponse = resp.json().await?;
        Ok(parsed.1)
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Fallback article URL for the rare page entry without `fullurl`.
fn canonical_url(api_url: &str, title: &str) -> String {
    let base = api_url.trim_end_matches("/w/api.php");
    format!("{}/wiki/{}", base, title.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::QueryResponse;

    #[test]
    fn missing_page_is_filtered() {
        let parsed: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": [{"title": "Nope", "missing": true}]}}"#,
        )
        .unwrap();
        let entry = parsed
            .query
            .and_then(|q| q.pages.into_iter().next())
            .filter(|p| !p.missing);
        assert!(entry.is_none());
    }

    #[test]
    fn existing_page_parses() {
        let parsed: QueryResponse = serde_json::from_str(
            r#"{"query": {"pages": [{
                "title": "Trafalgar Square",
                "extract": "Trafalgar Square is a public square...",
                "fullurl": "https://en.wikipedia.org/wiki/Trafalgar_Square"
            }]}}"#,
        )
        .unwrap();
        let page = parsed.query.unwrap().pages.into_iter().next().unwrap();
        assert!(!page.missing);
        assert_eq!(page.title, "Trafalgar Square");
    }

    #[test]
    fn opensearch_titles_are_second_element() {
        let parsed: OpenSearchResponse = serde_json::from_str(
            r#"["lion", ["Lion", "Lions of Trafalgar"], ["", ""], ["u1", "u2"]]"#,
        )
        .unwrap();
        assert_eq!(parsed.1, vec!["Lion", "Lions of Trafalgar"]);
    }

    #[test]
    fn canonical_url_fallback() {
        assert_eq!(
            canonical_url("https://en.wikipedia.org/w/api.php", "Hyde Park"),
            "https://en.wikipedia.org/wiki/Hyde_Park"
        );
    }
}
