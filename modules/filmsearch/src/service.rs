use std::sync::Arc;

use wikipedia_client::WikipediaClient;

use crate::article::fetch_article;
use crate::assemble::assemble;
use crate::config::Config;
use crate::error::Result;
use crate::resolver::{build_resolver, PosterResolver};
use crate::search::search;
use crate::traits::{ArticleProvider, SearchProvider};
use crate::types::{Article, ResolvedResult};

/// Search-then-resolve over a set of providers.
pub struct FilmSearch {
    search: Arc<dyn SearchProvider>,
    articles: Arc<dyn ArticleProvider>,
    resolver: Arc<dyn PosterResolver>,
}

impl FilmSearch {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        articles: Arc<dyn ArticleProvider>,
        resolver: Arc<dyn PosterResolver>,
    ) -> Self {
        Self {
            search,
            articles,
            resolver,
        }
    }

    /// Wire every provider to one Wikipedia client built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(WikipediaClient::new(
            &config.api_url,
            &config.user_agent,
            config.http_timeout,
        )?);
        let resolver = build_resolver(config.strategy, client.clone(), &config.resolver);
        Ok(Self::new(client.clone(), client, resolver))
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Search failures end the attempt; poster failures only blank the poster.
    pub async fn run(&self, term: &str) -> Result<Vec<ResolvedResult>> {
        let hits = search(self.search.as_ref(), term).await?;
        Ok(assemble(hits, self.resolver.as_ref()).await)
    }

    pub async fn article(&self, title: &str) -> Result<Article> {
        fetch_article(self.articles.as_ref(), title).await
    }
}
