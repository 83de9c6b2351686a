use tracing::info;
use wikipedia_client::ArticlePage;

use crate::error::{Result, SearchError};
use crate::traits::ArticleProvider;
use crate::types::Article;

pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a page title";

/// Fetch one article's plain text and metadata by exact title.
pub async fn fetch_article(provider: &dyn ArticleProvider, title: &str) -> Result<Article> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SearchError::Validation(EMPTY_TITLE_MESSAGE.to_string()));
    }

    let page = provider.article(title).await?;
    let article = to_article(page);
    info!(
        title = %article.title,
        categories = article.categories.len(),
        links = article.links.len(),
        images = article.images.len(),
        "Fetched article"
    );
    Ok(article)
}

fn to_article(page: ArticlePage) -> Article {
    let url = match (&page.full_url, page.page_id) {
        (Some(url), _) => url.clone(),
        (None, Some(id)) => format!("https://en.wikipedia.org/?curid={id}"),
        (None, None) => String::new(),
    };

    Article {
        url,
        page_id: page.page_id,
        text: page.extract.unwrap_or_default(),
        categories: page.categories.into_iter().map(|c| c.title).collect(),
        links: page.links.into_iter().map(|l| l.title).collect(),
        images: page.images.into_iter().map(|i| i.title).collect(),
        title: page.title,
    }
}
