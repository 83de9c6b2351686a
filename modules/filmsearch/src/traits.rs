// Provider boundaries. WikipediaClient implements all three; tests swap in
// `testing::MockProvider`.

use async_trait::async_trait;
use wikipedia_client::{ArticlePage, PageImages, SearchEntry, WikipediaClient, WikipediaError};

type ProviderResult<T> = std::result::Result<T, WikipediaError>;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> ProviderResult<Vec<SearchEntry>>;
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn original_image(&self, page_id: u64) -> ProviderResult<Option<String>>;
    async fn page_images(&self, page_id: u64, limit: u32) -> ProviderResult<PageImages>;
    async fn image_url(&self, file_name: &str) -> ProviderResult<Option<String>>;
}

#[async_trait]
pub trait ArticleProvider: Send + Sync {
    async fn article(&self, title: &str) -> ProviderResult<ArticlePage>;
}

#[async_trait]
impl SearchProvider for WikipediaClient {
    async fn search(&self, query: &str, limit: u32) -> ProviderResult<Vec<SearchEntry>> {
        WikipediaClient::search(self, query, limit).await
    }
}

#[async_trait]
impl ImageProvider for WikipediaClient {
    async fn original_image(&self, page_id: u64) -> ProviderResult<Option<String>> {
        WikipediaClient::original_image(self, page_id).await
    }

    async fn page_images(&self, page_id: u64, limit: u32) -> ProviderResult<PageImages> {
        WikipediaClient::page_images(self, page_id, limit).await
    }

    async fn image_url(&self, file_name: &str) -> ProviderResult<Option<String>> {
        WikipediaClient::image_url(self, file_name).await
    }
}

#[async_trait]
impl ArticleProvider for WikipediaClient {
    async fn article(&self, title: &str) -> ProviderResult<ArticlePage> {
        WikipediaClient::article(self, title).await
    }
}
