use tracing::info;

use crate::error::{Result, SearchError};
use crate::snippet::strip_highlight_spans;
use crate::traits::SearchProvider;
use crate::types::SearchHit;

/// Restricts results to pages that carry the film infobox.
pub const INFOBOX_FILTER: &str = "hastemplate:Infobox_film";

/// Most hits requested from, and accepted from, the provider.
pub const MAX_RESULTS: u32 = 10;

pub const EMPTY_TERM_MESSAGE: &str = "Please enter a search term";

/// Trim `term` and reject it if nothing is left.
pub fn validate_term(term: &str) -> Result<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(SearchError::Validation(EMPTY_TERM_MESSAGE.to_string()));
    }
    Ok(trimmed)
}

/// The provider query for a validated term.
pub fn build_query(term: &str) -> String {
    format!("{term} {INFOBOX_FILTER}")
}

/// Search for film pages. Issues exactly one provider request for a
/// non-blank term and none otherwise.
pub async fn search(provider: &dyn SearchProvider, term: &str) -> Result<Vec<SearchHit>> {
    let term = validate_term(term)?;
    let query = build_query(term);
    info!(term, "Searching films");

    let entries = provider.search(&query, MAX_RESULTS).await?;

    let hits: Vec<SearchHit> = entries
        .into_iter()
        .take(MAX_RESULTS as usize)
        .map(|e| SearchHit {
            snippet: strip_highlight_spans(&e.snippet),
            title: e.title,
            page_id: e.page_id,
        })
        .collect();

    info!(term, count = hits.len(), "Film search complete");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_terms_rejected() {
        for term in ["", "   ", "\t\n"] {
            assert!(matches!(validate_term(term), Err(SearchError::Validation(_))));
        }
    }

    #[test]
    fn term_trimmed() {
        assert_eq!(validate_term("  Avatar ").unwrap(), "Avatar");
    }

    #[test]
    fn query_carries_infobox_filter() {
        assert_eq!(build_query("Avatar"), "Avatar hastemplate:Infobox_film");
    }
}
