use serde::Deserialize;

/// A page that exists on the wiki, with its plain-text extract and
/// canonical URL.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiPage {
    pub title: String,
    pub extract: String,
    pub url: String,
}

// --- Wire types (formatversion=2) ---

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryBody {
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageEntry {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    pub extract: Option<String>,
    pub fullurl: Option<String>,
}

/// Opensearch replies with a positional array:
/// `[term, titles, descriptions, urls]`.
#[derive(Debug, Deserialize)]
pub(crate) struct OpenSearchResponse(
    pub String,
    pub Vec<String>,
    pub Vec<String>,
    pub Vec<String>,
);
