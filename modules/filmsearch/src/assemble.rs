use futures::future::join_all;
use tracing::info;

use crate::resolver::{resolve_or_absent, PosterResolver};
use crate::types::{ResolvedResult, SearchHit};

/// Attach a poster outcome to every hit. Lookups run concurrently and all of
/// them settle before this returns; output order matches `hits`.
pub async fn assemble(hits: Vec<SearchHit>, resolver: &dyn PosterResolver) -> Vec<ResolvedResult> {
    if hits.is_empty() {
        return Vec::new();
    }

    let count = hits.len();
    let lookups = hits.into_iter().map(|hit| async move {
        let poster_url = resolve_or_absent(resolver, hit.page_id, &hit.title).await;
        ResolvedResult { hit, poster_url }
    });

    let results = join_all(lookups).await;
    let with_poster = results.iter().filter(|r| r.poster_url.is_some()).count();
    info!(count, with_poster, resolver = resolver.name(), "Assembled results");
    results
}
