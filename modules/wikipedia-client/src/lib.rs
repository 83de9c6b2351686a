pub mod error;
pub mod types;

pub use error::{Result, WikipediaError};
pub use types::{
    parse_article, parse_image_url, parse_original_image, parse_page_images, parse_search,
    ArticlePage, PageImages, SearchEntry, TitleRef,
};

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    /// Build a client with an overall per-request timeout. Wikimedia rejects
    /// requests without a descriptive user agent, so one is always required.
    pub fn new(api_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue one `action=query` GET and return the raw body of a 2xx response.
    async fn query(&self, params: &[(&str, &str)]) -> Result<String> {
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WikipediaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.text().await?)
    }

    /// Full-text search. `query` is sent verbatim as `srsearch`.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchEntry>> {
        let limit = limit.to_string();
        let body = self
            .query(&[("list", "search"), ("srsearch", query), ("srlimit", limit.as_str())])
            .await?;

        let entries = parse_search(&body)?;
        tracing::debug!(query, count = entries.len(), "Wikipedia search complete");
        Ok(entries)
    }

    /// The page's designated original image, if it has one.
    pub async fn original_image(&self, page_id: u64) -> Result<Option<String>> {
        let id = page_id.to_string();
        let body = self
            .query(&[
                ("prop", "pageimages"),
                ("piprop", "original"),
                ("pageids", id.as_str()),
            ])
            .await?;

        parse_original_image(&body, page_id)
    }

    /// Page title and the file names embedded in the page, unordered by relevance.
    pub async fn page_images(&self, page_id: u64, limit: u32) -> Result<PageImages> {
        let id = page_id.to_string();
        let limit = limit.to_string();
        let body = self
            .query(&[("prop", "images"), ("pageids", id.as_str()), ("imlimit", limit.as_str())])
            .await?;

        let images = parse_page_images(&body, page_id)?;
        tracing::debug!(page_id, count = images.files.len(), "Fetched page image list");
        Ok(images)
    }

    /// Direct URL of a file page such as `File:Avatar (2009 film) poster.jpg`.
    pub async fn image_url(&self, file_name: &str) -> Result<Option<String>> {
        let body = self
            .query(&[
                ("prop", "imageinfo"),
                ("iiprop", "url"),
                ("titles", file_name),
            ])
            .await?;

        parse_image_url(&body)
    }

    /// Plain-text extract plus categories, links, images and canonical URL.
    pub async fn article(&self, title: &str) -> Result<ArticlePage> {
        let body = self
            .query(&[
                ("titles", title),
                ("prop", "extracts|categories|links|images|info"),
                ("explaintext", "1"),
                ("inprop", "url|displaytitle"),
            ])
            .await?;

        parse_article(&body, title)
    }
}
