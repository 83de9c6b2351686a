//! Poster resolution: page id → best-effort poster URL.
//!
//! Two strategies share the [`PosterResolver`] trait:
//! - [`DirectImageResolver`] asks for the page's designated original image.
//!   One round trip.
//! - [`HeuristicResolver`] scans the page's embedded file list with a
//!   [`TitleMatch`] rule, then looks up the chosen file's URL. Zero or one
//!   extra round trip.
//!
//! Every round trip is bounded by a timeout. Callers normally go through
//! [`resolve_or_absent`], which turns any failure into "no poster".

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{ConfigError, ResolutionError};
use crate::traits::ImageProvider;
use crate::types::ImageCandidate;

type Result<T> = std::result::Result<T, ResolutionError>;

pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait PosterResolver: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolve a poster for `page_id`. `title` is the search hit's title.
    async fn resolve(&self, page_id: u64, title: &str) -> Result<Option<String>>;
}

/// Resolve, logging and discarding any failure.
pub async fn resolve_or_absent(
    resolver: &dyn PosterResolver,
    page_id: u64,
    title: &str,
) -> Option<String> {
    match resolver.resolve(page_id, title).await {
        Ok(url) => url,
        Err(e) => {
            warn!(page_id, resolver = resolver.name(), error = %e, "Poster resolution failed");
            None
        }
    }
}

async fn bounded<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, wikipedia_client::WikipediaError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ResolutionError::Timeout(timeout)),
    }
}

// --- Strategy selection ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PosterStrategy {
    #[default]
    Direct,
    Heuristic,
}

impl FromStr for PosterStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(PosterStrategy::Direct),
            "heuristic" => Ok(PosterStrategy::Heuristic),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl std::fmt::Display for PosterStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterStrategy::Direct => write!(f, "direct"),
            PosterStrategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Knobs shared by both strategies.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub timeout: Duration,
    pub title_match: TitleMatch,
    /// `imlimit` for the embedded file list.
    pub image_list_limit: u32,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            title_match: TitleMatch::default(),
            image_list_limit: 10,
        }
    }
}

pub fn build_resolver(
    strategy: PosterStrategy,
    provider: Arc<dyn ImageProvider>,
    settings: &ResolverSettings,
) -> Arc<dyn PosterResolver> {
    match strategy {
        PosterStrategy::Direct => Arc::new(DirectImageResolver::new(provider, settings.timeout)),
        PosterStrategy::Heuristic => Arc::new(HeuristicResolver::new(provider, settings.clone())),
    }
}

// --- Strategy A ---

pub struct DirectImageResolver {
    provider: Arc<dyn ImageProvider>,
    timeout: Duration,
}

impl DirectImageResolver {
    pub fn new(provider: Arc<dyn ImageProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }
}

#[async_trait]
impl PosterResolver for DirectImageResolver {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn resolve(&self, page_id: u64, _title: &str) -> Result<Option<String>> {
        let url = bounded(self.timeout, self.provider.original_image(page_id)).await?;
        debug!(page_id, found = url.is_some(), "Original image lookup complete");
        Ok(url)
    }
}

// --- Strategy B ---

/// Candidate rule for the heuristic resolver: a file is a poster if its name
/// contains `marker`, or contains the first `min_prefix_len` characters of the
/// page title. First match in provider order wins.
///
/// The prefix rule is loose and false-positives on short titles. It is kept
/// as-is pending product review; tune `min_prefix_len` rather than replacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub marker: String,
    pub min_prefix_len: usize,
}

impl Default for TitleMatch {
    fn default() -> Self {
        Self {
            marker: "poster.".to_string(),
            min_prefix_len: 2,
        }
    }
}

impl TitleMatch {
    /// The leading characters of `title` used by the prefix rule. Shorter
    /// titles are used whole; an empty title yields no prefix.
    pub fn title_prefix<'a>(&self, title: &'a str) -> Option<&'a str> {
        if title.is_empty() || self.min_prefix_len == 0 {
            return None;
        }
        let end = title
            .char_indices()
            .nth(self.min_prefix_len)
            .map(|(i, _)| i)
            .unwrap_or(title.len());
        Some(&title[..end])
    }

    pub fn matches(&self, title: &str, file_name: &str) -> bool {
        if file_name.contains(self.marker.as_str()) {
            return true;
        }
        self.title_prefix(title)
            .is_some_and(|prefix| file_name.contains(prefix))
    }

    pub fn select<'a>(
        &self,
        title: &str,
        candidates: &'a [ImageCandidate],
    ) -> Option<&'a ImageCandidate> {
        candidates.iter().find(|c| self.matches(title, &c.file_name))
    }
}

pub struct HeuristicResolver {
    provider: Arc<dyn ImageProvider>,
    settings: ResolverSettings,
}

impl HeuristicResolver {
    pub fn new(provider: Arc<dyn ImageProvider>, settings: ResolverSettings) -> Self {
        Self { provider, settings }
    }
}

#[async_trait]
impl PosterResolver for HeuristicResolver {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn resolve(&self, page_id: u64, title: &str) -> Result<Option<String>> {
        let timeout = self.settings.timeout;
        let listing = bounded(
            timeout,
            self.provider
                .page_images(page_id, self.settings.image_list_limit),
        )
        .await?;

        // Match against the page's own title; the hit title is only a fallback.
        let page_title = if listing.title.is_empty() {
            title
        } else {
            listing.title.as_str()
        };

        let candidates: Vec<ImageCandidate> = listing
            .files
            .into_iter()
            .map(|file_name| ImageCandidate { file_name })
            .collect();

        let Some(chosen) = self.settings.title_match.select(page_title, &candidates) else {
            debug!(page_id, candidates = candidates.len(), "No poster candidate matched");
            return Ok(None);
        };
        debug!(page_id, file = %chosen.file_name, "Poster candidate selected");

        bounded(timeout, self.provider.image_url(&chosen.file_name)).await
    }
}
