use crate::session::{SearchSession, SessionState};
use crate::snippet::sanitize_snippet;
use crate::types::{Article, ResolvedResult};

/// How provider snippet HTML reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetMode {
    /// Tags removed, stray brackets escaped.
    #[default]
    Sanitized,
    /// Provider HTML embedded as-is. Opt-in only: the provider controls this markup.
    Raw,
}

/// Categories listed before collapsing into "+N more".
const CATEGORY_PREVIEW: usize = 10;

/// Render the search page for the session's current state.
pub fn render_page(session: &SearchSession, mode: SnippetMode) -> String {
    let loading = session.is_loading();
    let term = session.term().unwrap_or("");

    let (disabled, label) = if loading {
        (" disabled", "Searching...")
    } else {
        ("", "Search")
    };

    let form = format!(
        r#"<form class="search-form" method="get">
    <input type="text" name="q" value="{term}" placeholder="Enter a film title..."{disabled}>
    <button type="submit"{disabled}>{label}</button>
</form>"#,
        term = html_escape(term),
    );

    let body = match session.state() {
        SessionState::Idle | SessionState::Searching { .. } => String::new(),
        SessionState::Failed { message, .. } => {
            format!(r#"<div class="error-banner">{}</div>"#, html_escape(message))
        }
        SessionState::Success { results, .. } => render_results(results, mode),
    };

    let content = format!(r#"<div class="container"><h2>Search</h2>{form}{body}</div>"#);
    build_page("Search", &content)
}

/// Render the result list. An empty list renders nothing.
pub fn render_results(results: &[ResolvedResult], mode: SnippetMode) -> String {
    let mut cards = String::new();

    for result in results {
        let title = html_escape(&result.hit.title);

        let image = match &result.poster_url {
            Some(url) => format!(
                r#"<img src="{src}" alt="Poster for {title}" height="300" onerror="this.parentElement.classList.add('image-missing');this.remove();"><div class="placeholder">No image</div>"#,
                src = html_escape(url),
            ),
            None => r#"<div class="placeholder">No image</div>"#.to_string(),
        };
        let image_class = if result.poster_url.is_some() {
            "image"
        } else {
            "image image-missing"
        };

        let snippet = match mode {
            SnippetMode::Sanitized => sanitize_snippet(&result.hit.snippet),
            SnippetMode::Raw => result.hit.snippet.clone(),
        };

        cards.push_str(&format!(
            r#"<div class="content-pair">
    <div class="{image_class}">{image}</div>
    <div class="content">
        <h3>{title}</h3>
        <p>{snippet}</p>
        <a href="{href}" target="_blank" rel="noopener noreferrer">Read more</a>
    </div>
</div>"#,
            href = html_escape(&result.page_url()),
        ));
    }

    if cards.is_empty() {
        return cards;
    }
    format!(r#"<div class="results">{cards}</div>"#)
}

/// Render one article: stats, text and a category preview.
pub fn render_article(article: &Article) -> String {
    let paragraphs: String = article
        .paragraphs()
        .map(|p| format!("<p>{}</p>", html_escape(p)))
        .collect();

    let mut categories: String = article
        .categories
        .iter()
        .take(CATEGORY_PREVIEW)
        .map(|c| {
            let name = c.strip_prefix("Category:").unwrap_or(c);
            format!(r#"<span class="tag">{}</span>"#, html_escape(name))
        })
        .collect();
    if article.categories.len() > CATEGORY_PREVIEW {
        categories.push_str(&format!(
            r#"<span class="more">+{} more</span>"#,
            article.categories.len() - CATEGORY_PREVIEW
        ));
    }

    let content = format!(
        r#"<div class="container">
    <h2>{title}</h2>
    <div class="stats">
        <h3>Quick Stats</h3>
        <p>Categories: {n_categories}</p>
        <p>Links: {n_links}</p>
        <p>Images: {n_images}</p>
        <a href="{url}" target="_blank" rel="noopener noreferrer">View on Wikipedia</a>
    </div>
    <h3>Content</h3>
    <div class="article-text">{paragraphs}</div>
    <h3>Categories</h3>
    <div class="tags">{categories}</div>
</div>"#,
        title = html_escape(&article.title),
        n_categories = article.categories.len(),
        n_links = article.links.len(),
        n_images = article.images.len(),
        url = html_escape(&article.url),
    );

    build_page(&article.title, &content)
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Film Search</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.container{{max-width:960px;margin:0 auto;padding:24px;}}
.container h2{{margin-bottom:16px;}}
.search-form{{display:flex;gap:8px;margin-bottom:16px;}}
.search-form input{{flex:1;padding:8px;border:1px solid #ccc;border-radius:4px;}}
.search-form button{{padding:8px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;}}
.search-form button[disabled]{{background:#999;}}
.error-banner{{background:#fdecea;border:1px solid #f5c2c0;color:#b71c1c;padding:12px;border-radius:4px;margin-bottom:16px;}}
.content-pair{{display:flex;gap:16px;background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.image{{min-width:200px;min-height:300px;display:flex;align-items:center;justify-content:center;}}
.image .placeholder{{display:none;color:#999;font-size:13px;}}
.image-missing{{background:#eee;}}
.image-missing .placeholder{{display:block;}}
.content h3{{margin-bottom:8px;}}
.content p{{color:#555;font-size:14px;margin-bottom:8px;}}
.content a{{color:#0066cc;font-size:13px;}}
.stats{{background:#f5f5f5;padding:16px;border-radius:4px;margin-bottom:16px;}}
.article-text{{max-height:24rem;overflow-y:auto;margin-bottom:16px;}}
.article-text p{{margin-bottom:12px;}}
.tags{{display:flex;gap:6px;flex-wrap:wrap;}}
.tag{{background:#f0f0f0;padding:2px 8px;border-radius:10px;font-size:12px;color:#555;}}
.more{{color:#888;font-size:12px;}}
</style>
</head>
<body>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchHit;

    fn result(snippet: &str, poster_url: Option<&str>) -> ResolvedResult {
        ResolvedResult {
            hit: SearchHit {
                title: "Avatar (2009 film)".to_string(),
                snippet: snippet.to_string(),
                page_id: 123,
            },
            poster_url: poster_url.map(String::from),
        }
    }

    #[test]
    fn idle_page_has_enabled_form() {
        let html = render_page(&SearchSession::new(), SnippetMode::Sanitized);
        assert!(html.contains(r#"<button type="submit">Search</button>"#));
        assert!(!html.contains(r#"class="error-banner""#));
    }

    #[test]
    fn loading_page_disables_resubmission() {
        let mut session = SearchSession::new();
        session.begin("Avatar");
        let html = render_page(&session, SnippetMode::Sanitized);
        assert!(html.contains("Searching..."));
        assert!(html.contains(r#"<button type="submit" disabled>"#));
        assert!(html.contains(r#"value="Avatar""#));
    }

    #[test]
    fn failure_shows_banner() {
        let mut session = SearchSession::new();
        session.begin("");
        let html = render_page(&session, SnippetMode::Sanitized);
        assert!(html.contains(r#"<div class="error-banner">Please enter a search term</div>"#));
    }

    #[test]
    fn failed_search_keeps_term_in_box() {
        let mut session = SearchSession::new();
        let generation = session.begin("Avatar").unwrap();
        session.complete(
            generation,
            Err(crate::error::SearchError::Provider(
                wikipedia_client::WikipediaError::Network("timed out".to_string()),
            )),
        );
        let html = render_page(&session, SnippetMode::Sanitized);
        assert!(html.contains(r#"value="Avatar""#));
        assert!(html.contains("Failed to fetch films. Please try again."));
        assert!(html.contains(r#"<button type="submit">Search</button>"#));
    }

    #[test]
    fn empty_success_renders_no_results_and_no_banner() {
        let mut session = SearchSession::new();
        let generation = session.begin("Zzzzznotamovie").unwrap();
        session.complete(generation, Ok(vec![]));
        let html = render_page(&session, SnippetMode::Sanitized);
        assert!(!html.contains(r#"class="content-pair""#));
        assert!(!html.contains(r#"class="error-banner""#));
    }

    #[test]
    fn result_card_links_to_page_and_shows_poster() {
        let html = render_results(
            &[result("epic", Some("https://upload.wikimedia.org/Avatar.jpg"))],
            SnippetMode::Sanitized,
        );
        assert!(html.contains(r#"src="https://upload.wikimedia.org/Avatar.jpg""#));
        assert!(html.contains(r#"alt="Poster for Avatar (2009 film)""#));
        assert!(html.contains(r#"href="https://en.wikipedia.org/?curid=123""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn missing_poster_renders_placeholder() {
        let html = render_results(&[result("epic", None)], SnippetMode::Sanitized);
        assert!(html.contains("image image-missing"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn sanitized_mode_strips_provider_markup() {
        let html = render_results(
            &[result("<b>epic</b><script>alert(1)</script>", None)],
            SnippetMode::Sanitized,
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>epicalert(1)</p>"));
    }

    #[test]
    fn raw_mode_keeps_provider_markup() {
        let html = render_results(&[result("<b>epic</b> film", None)], SnippetMode::Raw);
        assert!(html.contains("<p><b>epic</b> film</p>"));
    }

    #[test]
    fn title_is_escaped() {
        let mut r = result("", None);
        r.hit.title = "<i>Tom & Jerry</i>".to_string();
        let html = render_results(&[r], SnippetMode::Sanitized);
        assert!(html.contains("<h3>&lt;i&gt;Tom &amp; Jerry&lt;/i&gt;</h3>"));
    }

    #[test]
    fn article_categories_collapse_after_ten() {
        let article = Article {
            title: "Avatar (2009 film)".to_string(),
            page_id: Some(123),
            url: "https://en.wikipedia.org/wiki/Avatar_(2009_film)".to_string(),
            text: "Avatar is a film.\n\nDirected by James Cameron.".to_string(),
            categories: (1..=12).map(|i| format!("Category:Cat {i}")).collect(),
            links: vec!["James Cameron".to_string()],
            images: vec![],
        };

        let html = render_article(&article);

        assert!(html.contains("<p>Categories: 12</p>"));
        assert!(html.contains("<p>Links: 1</p>"));
        assert!(html.contains(r#"<span class="tag">Cat 10</span>"#));
        assert!(!html.contains("Cat 11<"));
        assert!(html.contains("+2 more"));
        assert!(html.contains("<p>Directed by James Cameron.</p>"));
    }
}
