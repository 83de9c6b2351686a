use std::str::FromStr;
use std::time::Duration;

use wikipedia_client::DEFAULT_API_URL;

use crate::error::ConfigError;
use crate::resolver::{PosterStrategy, ResolverSettings, TitleMatch};
use crate::templates::SnippetMode;

/// Wikimedia asks clients to identify themselves. Deployments should set
/// FILMSEARCH_USER_AGENT with contact details.
pub const DEFAULT_USER_AGENT: &str = concat!("filmsearch/", env!("CARGO_PKG_VERSION"));

/// Runtime configuration loaded from environment variables.
/// Everything has a default; nothing here is secret.
#[derive(Debug, Clone)]
pub struct Config {
    // Provider
    pub api_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,

    // Poster resolution
    pub strategy: PosterStrategy,
    pub resolver: ResolverSettings,

    // Rendering
    pub snippet_mode: SnippetMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout: Duration::from_secs(10),
            strategy: PosterStrategy::default(),
            resolver: ResolverSettings::default(),
            snippet_mode: SnippetMode::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let resolver = ResolverSettings {
            timeout: match get("RESOLVE_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse_positive("RESOLVE_TIMEOUT_SECS", &v)?),
                None => defaults.resolver.timeout,
            },
            title_match: TitleMatch {
                min_prefix_len: match get("TITLE_PREFIX_LEN") {
                    Some(v) => parse_num("TITLE_PREFIX_LEN", &v)?,
                    None => defaults.resolver.title_match.min_prefix_len,
                },
                ..TitleMatch::default()
            },
            image_list_limit: match get("IMAGE_LIST_LIMIT") {
                Some(v) => parse_positive("IMAGE_LIST_LIMIT", &v)?,
                None => defaults.resolver.image_list_limit,
            },
        };

        Ok(Self {
            api_url: get("WIKIPEDIA_API_URL").unwrap_or(defaults.api_url),
            user_agent: get("FILMSEARCH_USER_AGENT").unwrap_or(defaults.user_agent),
            http_timeout: match get("HTTP_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse_positive("HTTP_TIMEOUT_SECS", &v)?),
                None => defaults.http_timeout,
            },
            strategy: match get("POSTER_STRATEGY") {
                Some(v) => v.parse()?,
                None => defaults.strategy,
            },
            resolver,
            snippet_mode: match get("RENDER_RAW_SNIPPETS") {
                Some(v) if parse_flag("RENDER_RAW_SNIPPETS", &v)? => SnippetMode::Raw,
                _ => defaults.snippet_mode,
            },
        })
    }

    pub fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  WIKIPEDIA_API_URL: {}", self.api_url);
        tracing::info!("  FILMSEARCH_USER_AGENT: {}", self.user_agent);
        tracing::info!("  HTTP_TIMEOUT_SECS: {}", self.http_timeout.as_secs());
        tracing::info!("  POSTER_STRATEGY: {}", self.strategy);
        tracing::info!("  RESOLVE_TIMEOUT_SECS: {}", self.resolver.timeout.as_secs());
        tracing::info!("  TITLE_PREFIX_LEN: {}", self.resolver.title_match.min_prefix_len);
        tracing::info!("  IMAGE_LIST_LIMIT: {}", self.resolver.image_list_limit);
        tracing::info!("  RENDER_RAW_SNIPPETS: {}", self.snippet_mode == SnippetMode::Raw);
    }
}

fn parse_num<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Like [`parse_num`], but zero is rejected.
fn parse_positive<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let n: T = parse_num(key, value)?;
    if n == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(n)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
