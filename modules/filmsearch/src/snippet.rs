use regex::Regex;
use std::sync::LazyLock;

static SPAN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?span[^>]*>").unwrap());

static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").unwrap());

/// Remove the search highlight wrappers (`<span ...>` and `</span>`).
/// Every other tag is left as the provider sent it.
pub fn strip_highlight_spans(snippet: &str) -> String {
    SPAN_TAG_RE.replace_all(snippet, "").into_owned()
}

/// Make a provider snippet safe to embed in HTML: drop every tag and escape
/// any stray angle brackets. Entities the provider already encoded are kept.
pub fn sanitize_snippet(snippet: &str) -> String {
    ANY_TAG_RE
        .replace_all(snippet, "")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
