use serde::Serialize;

const PAGE_URL_BASE: &str = "https://en.wikipedia.org/?curid=";

/// One search result as received, highlight spans removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    /// Provider HTML fragment. Only `<span>` tokens have been stripped.
    pub snippet: String,
    pub page_id: u64,
}

impl SearchHit {
    pub fn page_url(&self) -> String {
        format!("{PAGE_URL_BASE}{}", self.page_id)
    }
}

/// A search hit with the outcome of its poster lookup attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedResult {
    #[serde(flatten)]
    pub hit: SearchHit,
    pub poster_url: Option<String>,
}

impl ResolvedResult {
    pub fn page_url(&self) -> String {
        self.hit.page_url()
    }
}

/// A file embedded in a page, considered as a poster by the heuristic resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub file_name: String,
}

/// Article text and metadata for the article view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub page_id: Option<u64>,
    pub url: String,
    pub text: String,
    pub categories: Vec<String>,
    pub links: Vec<String>,
    pub images: Vec<String>,
}

impl Article {
    /// Non-empty lines of the extract.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').filter(|p| !p.trim().is_empty())
    }
}
