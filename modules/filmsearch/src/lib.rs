pub mod article;
pub mod assemble;
pub mod config;
pub mod error;
pub mod resolver;
pub mod search;
pub mod service;
pub mod session;
pub mod snippet;
pub mod templates;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::Config;
pub use error::{ConfigError, ResolutionError, SearchError};
pub use resolver::{PosterResolver, PosterStrategy, ResolverSettings, TitleMatch};
pub use service::FilmSearch;
pub use session::{Applied, Generation, SearchSession, SessionState};
pub use templates::SnippetMode;
pub use types::{Article, ImageCandidate, ResolvedResult, SearchHit};
