use thiserror::Error;

pub type Result<T> = std::result::Result<T, WikipediaError>;

#[derive(Debug, Error)]
pub enum WikipediaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// MediaWiki reports most failures as HTTP 200 with an `error` object.
    #[error("MediaWiki error {code}: {info}")]
    Remote { code: String, info: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Page not found: {0}")]
    MissingPage(String),
}

impl From<reqwest::Error> for WikipediaError {
    fn from(err: reqwest::Error) -> Self {
        WikipediaError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for WikipediaError {
    fn from(err: serde_json::Error) -> Self {
        WikipediaError::Parse(err.to_string())
    }
}
