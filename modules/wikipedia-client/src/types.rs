use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WikipediaError};

// --- Envelope ---

/// Top-level shape of every `action=query` response.
/// Either `query` is present or MediaWiki filled in `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub query: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Unwrap the `query` object, turning MediaWiki error bodies and
/// shape mismatches into typed errors.
pub fn parse_query<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    if let Some(err) = envelope.error {
        return Err(WikipediaError::Remote {
            code: err.code,
            info: err.info,
        });
    }
    envelope
        .query
        .ok_or_else(|| WikipediaError::Parse("response has no query object".to_string()))
}

/// `query.pages` keyed by page id. Missing pages come back under negative ids.
#[derive(Debug, Clone, Deserialize)]
pub struct PagesQuery<P> {
    #[serde(default = "BTreeMap::new")]
    pub pages: BTreeMap<String, P>,
}

// --- list=search ---

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub search: Vec<SearchEntry>,
}

/// A single `list=search` hit. The snippet still carries highlight markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(rename = "pageid")]
    pub page_id: u64,
}

pub fn parse_search(body: &str) -> Result<Vec<SearchEntry>> {
    let query: SearchQuery = parse_query(body)?;
    Ok(query.search)
}

// --- prop=pageimages ---

#[derive(Debug, Clone, Deserialize)]
pub struct PageImagePage {
    pub title: Option<String>,
    pub original: Option<OriginalImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OriginalImage {
    pub source: String,
}

/// The page's original image URL, or `None` when the page has no page image.
pub fn parse_original_image(body: &str, page_id: u64) -> Result<Option<String>> {
    let query: PagesQuery<PageImagePage> = parse_query(body)?;
    let page = query
        .pages
        .get(&page_id.to_string())
        .ok_or_else(|| WikipediaError::MissingPage(page_id.to_string()))?;
    Ok(page.original.as_ref().map(|o| o.source.clone()))
}

// --- prop=images ---

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesPage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub images: Vec<TitleRef>,
    pub missing: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleRef {
    pub title: String,
}

/// The page title plus the file names embedded in it, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImages {
    pub title: String,
    pub files: Vec<String>,
}

pub fn parse_page_images(body: &str, page_id: u64) -> Result<PageImages> {
    let mut query: PagesQuery<ImagesPage> = parse_query(body)?;
    let page = query
        .pages
        .remove(&page_id.to_string())
        .filter(|p| p.missing.is_none())
        .ok_or_else(|| WikipediaError::MissingPage(page_id.to_string()))?;
    Ok(PageImages {
        title: page.title,
        files: page.images.into_iter().map(|i| i.title).collect(),
    })
}

// --- prop=imageinfo ---

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfoPage {
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    pub url: String,
}

/// Direct URL of the first file in the response. File pages that only exist
/// on Commons come back as `missing` but still carry `imageinfo`.
pub fn parse_image_url(body: &str) -> Result<Option<String>> {
    let query: PagesQuery<ImageInfoPage> = parse_query(body)?;
    Ok(query
        .pages
        .into_values()
        .next()
        .and_then(|p| p.imageinfo.into_iter().next())
        .map(|i| i.url))
}

// --- prop=extracts|categories|links|images|info ---

#[derive(Debug, Clone, Deserialize)]
pub struct ArticlePage {
    #[serde(rename = "pageid")]
    pub page_id: Option<u64>,
    pub title: String,
    #[serde(rename = "fullurl")]
    pub full_url: Option<String>,
    pub extract: Option<String>,
    #[serde(default)]
    pub categories: Vec<TitleRef>,
    #[serde(default)]
    pub links: Vec<TitleRef>,
    #[serde(default)]
    pub images: Vec<TitleRef>,
    pub missing: Option<serde_json::Value>,
}

pub fn parse_article(body: &str, title: &str) -> Result<ArticlePage> {
    let query: PagesQuery<ArticlePage> = parse_query(body)?;
    query
        .pages
        .into_values()
        .find(|p| p.missing.is_none())
        .ok_or_else(|| WikipediaError::MissingPage(title.to_string()))
}
