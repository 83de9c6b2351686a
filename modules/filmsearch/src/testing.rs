// Test mocks for the search and resolution flow.
//
// MockProvider implements all three provider traits from HashMaps:
// - searches: provider query → entries
// - original images: page id → URL (or registered absence)
// - page images: page id → (title, file names)
// - image urls: file name → URL
// - articles: title → page
//
// Unregistered keys return `Err`, like a provider that is down. Every call
// is counted so tests can assert how many requests a flow made.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use wikipedia_client::{ArticlePage, PageImages, SearchEntry, TitleRef, WikipediaError};

use crate::traits::{ArticleProvider, ImageProvider, SearchProvider};

type ProviderResult<T> = std::result::Result<T, WikipediaError>;

fn unavailable(what: &str) -> WikipediaError {
    WikipediaError::Api {
        status: 503,
        message: format!("mock: nothing registered for {what}"),
    }
}

/// Build a search entry the way `list=search` returns one.
pub fn entry(title: &str, snippet: &str, page_id: u64) -> SearchEntry {
    SearchEntry {
        title: title.to_string(),
        snippet: snippet.to_string(),
        page_id,
    }
}

/// Build an article page with the given extract and category titles.
pub fn article_page(title: &str, page_id: u64, extract: &str, categories: &[&str]) -> ArticlePage {
    ArticlePage {
        page_id: Some(page_id),
        title: title.to_string(),
        full_url: Some(format!(
            "https://en.wikipedia.org/wiki/{}",
            title.replace(' ', "_")
        )),
        extract: Some(extract.to_string()),
        categories: categories
            .iter()
            .map(|c| TitleRef {
                title: c.to_string(),
            })
            .collect(),
        links: vec![],
        images: vec![],
        missing: None,
    }
}

#[derive(Default)]
pub struct MockProvider {
    searches: HashMap<String, Vec<SearchEntry>>,
    original_images: HashMap<u64, Option<String>>,
    page_images: HashMap<u64, PageImages>,
    image_urls: HashMap<String, String>,
    articles: HashMap<String, ArticlePage>,
    image_delay: Option<Duration>,

    search_calls: AtomicUsize,
    original_image_calls: AtomicUsize,
    page_images_calls: AtomicUsize,
    image_url_calls: AtomicUsize,
    article_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register results for a provider query, e.g. `"Avatar hastemplate:Infobox_film"`.
    pub fn on_search(mut self, query: &str, entries: Vec<SearchEntry>) -> Self {
        self.searches.insert(query.to_string(), entries);
        self
    }

    pub fn on_original_image(mut self, page_id: u64, url: Option<&str>) -> Self {
        self.original_images.insert(page_id, url.map(String::from));
        self
    }

    pub fn on_page_images(mut self, page_id: u64, title: &str, files: &[&str]) -> Self {
        self.page_images.insert(
            page_id,
            PageImages {
                title: title.to_string(),
                files: files.iter().map(|f| f.to_string()).collect(),
            },
        );
        self
    }

    pub fn on_image_url(mut self, file_name: &str, url: &str) -> Self {
        self.image_urls
            .insert(file_name.to_string(), url.to_string());
        self
    }

    pub fn on_article(mut self, title: &str, page: ArticlePage) -> Self {
        self.articles.insert(title.to_string(), page);
        self
    }

    /// Delay every image provider call, to exercise resolver timeouts.
    pub fn with_image_delay(mut self, delay: Duration) -> Self {
        self.image_delay = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn original_image_calls(&self) -> usize {
        self.original_image_calls.load(Ordering::SeqCst)
    }

    pub fn page_images_calls(&self) -> usize {
        self.page_images_calls.load(Ordering::SeqCst)
    }

    pub fn image_url_calls(&self) -> usize {
        self.image_url_calls.load(Ordering::SeqCst)
    }

    pub fn article_calls(&self) -> usize {
        self.article_calls.load(Ordering::SeqCst)
    }

    /// Total requests of any kind.
    pub fn total_calls(&self) -> usize {
        self.search_calls()
            + self.original_image_calls()
            + self.page_images_calls()
            + self.image_url_calls()
            + self.article_calls()
    }

    async fn image_latency(&self) {
        if let Some(delay) = self.image_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    async fn search(&self, query: &str, _limit: u32) -> ProviderResult<Vec<SearchEntry>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| unavailable(query))
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn original_image(&self, page_id: u64) -> ProviderResult<Option<String>> {
        self.original_image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_latency().await;
        self.original_images
            .get(&page_id)
            .cloned()
            .ok_or_else(|| unavailable(&format!("original image of page {page_id}")))
    }

    async fn page_images(&self, page_id: u64, _limit: u32) -> ProviderResult<PageImages> {
        self.page_images_calls.fetch_add(1, Ordering::SeqCst);
        self.image_latency().await;
        self.page_images
            .get(&page_id)
            .cloned()
            .ok_or_else(|| unavailable(&format!("images of page {page_id}")))
    }

    async fn image_url(&self, file_name: &str) -> ProviderResult<Option<String>> {
        self.image_url_calls.fetch_add(1, Ordering::SeqCst);
        self.image_latency().await;
        self.image_urls
            .get(file_name)
            .cloned()
            .map(Some)
            .ok_or_else(|| unavailable(file_name))
    }
}

#[async_trait]
impl ArticleProvider for MockProvider {
    async fn article(&self, title: &str) -> ProviderResult<ArticlePage> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        self.articles
            .get(title)
            .cloned()
            .ok_or_else(|| WikipediaError::MissingPage(title.to_string()))
    }
}
