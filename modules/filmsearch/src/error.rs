use std::time::Duration;

use thiserror::Error;
use wikipedia_client::WikipediaError;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that end a search or article lookup. These reach the user.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Rejected locally; no request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(#[from] WikipediaError),
}

impl SearchError {
    /// Message shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation(msg) => msg.clone(),
            SearchError::Provider(_) => "Failed to fetch films. Please try again.".to_string(),
        }
    }
}

/// Poster lookup failures. Never surfaced; downgraded to "no image".
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Image provider error: {0}")]
    Provider(#[from] WikipediaError),

    #[error("Image lookup timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown poster strategy {0:?} (expected \"direct\" or \"heuristic\")")]
    UnknownStrategy(String),
}
