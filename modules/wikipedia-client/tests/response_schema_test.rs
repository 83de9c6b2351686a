//! Response schema tests: hand-written MediaWiki JSON → typed parse functions.
//!
//! No network. Bodies mirror what `action=query&format=json` returns.

use wikipedia_client::{
    parse_article, parse_image_url, parse_original_image, parse_page_images, parse_search,
    WikipediaError,
};

// ---------------------------------------------------------------------------
// list=search
// ---------------------------------------------------------------------------

#[test]
fn search_hits_keep_provider_order() {
    let body = r#"{
        "batchcomplete": "",
        "query": {
            "searchinfo": { "totalhits": 2 },
            "search": [
                { "ns": 0, "title": "Avatar (2009 film)", "pageid": 123,
                  "snippet": "<span class=\"searchmatch\">Avatar</span> is a 2009 film" },
                { "ns": 0, "title": "Avatar: The Way of Water", "pageid": 456,
                  "snippet": "sequel to <span class=\"searchmatch\">Avatar</span>" }
            ]
        }
    }"#;

    let hits = parse_search(body).unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Avatar (2009 film)");
    assert_eq!(hits[0].page_id, 123);
    assert_eq!(hits[1].page_id, 456);
    assert!(hits[0].snippet.contains("searchmatch"), "client does not touch snippets");
}

#[test]
fn empty_search_is_not_an_error() {
    let body = r#"{ "query": { "searchinfo": { "totalhits": 0 }, "search": [] } }"#;
    assert!(parse_search(body).unwrap().is_empty());
}

#[test]
fn search_without_query_object_is_parse_error() {
    let body = r#"{ "batchcomplete": "" }"#;
    assert!(matches!(parse_search(body), Err(WikipediaError::Parse(_))));
}

#[test]
fn search_with_wrong_shape_is_parse_error() {
    let body = r#"{ "query": { "search": [ { "title": "No page id" } ] } }"#;
    assert!(matches!(parse_search(body), Err(WikipediaError::Parse(_))));
}

#[test]
fn non_json_body_is_parse_error() {
    assert!(matches!(
        parse_search("<html>Bad gateway</html>"),
        Err(WikipediaError::Parse(_))
    ));
}

#[test]
fn mediawiki_error_object_is_remote_error() {
    let body = r#"{ "error": { "code": "badvalue", "info": "Unrecognized value for parameter \"list\"" } }"#;

    match parse_search(body) {
        Err(WikipediaError::Remote { code, info }) => {
            assert_eq!(code, "badvalue");
            assert!(info.contains("list"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// prop=pageimages
// ---------------------------------------------------------------------------

#[test]
fn original_image_source_extracted() {
    let body = r#"{ "query": { "pages": { "123": {
        "pageid": 123, "ns": 0, "title": "Avatar (2009 film)",
        "original": { "source": "https://upload.wikimedia.org/Avatar.jpg", "width": 220, "height": 326 },
        "pageimage": "Avatar.jpg"
    } } } }"#;

    assert_eq!(
        parse_original_image(body, 123).unwrap().as_deref(),
        Some("https://upload.wikimedia.org/Avatar.jpg")
    );
}

#[test]
fn page_without_original_image_is_none() {
    let body = r#"{ "query": { "pages": { "77": { "pageid": 77, "ns": 0, "title": "Obscure film" } } } }"#;
    assert_eq!(parse_original_image(body, 77).unwrap(), None);
}

#[test]
fn original_image_for_other_page_id_is_missing() {
    let body = r#"{ "query": { "pages": { "77": { "pageid": 77, "title": "Obscure film" } } } }"#;
    assert!(matches!(
        parse_original_image(body, 78),
        Err(WikipediaError::MissingPage(id)) if id == "78"
    ));
}

// ---------------------------------------------------------------------------
// prop=images
// ---------------------------------------------------------------------------

#[test]
fn page_images_keep_title_and_file_order() {
    let body = r#"{ "continue": { "imcontinue": "123|Foo.svg" }, "query": { "pages": { "123": {
        "pageid": 123, "ns": 0, "title": "Avatar (2009 film)",
        "images": [
            { "ns": 6, "title": "File:Avatar (2009 film) poster.jpg" },
            { "ns": 6, "title": "File:Commons-logo.svg" }
        ]
    } } } }"#;

    let images = parse_page_images(body, 123).unwrap();

    assert_eq!(images.title, "Avatar (2009 film)");
    assert_eq!(
        images.files,
        vec![
            "File:Avatar (2009 film) poster.jpg".to_string(),
            "File:Commons-logo.svg".to_string()
        ]
    );
}

#[test]
fn page_with_no_images_has_empty_list() {
    let body = r#"{ "query": { "pages": { "9": { "pageid": 9, "title": "Stub" } } } }"#;
    assert!(parse_page_images(body, 9).unwrap().files.is_empty());
}

#[test]
fn missing_page_images_is_missing_page() {
    let body = r#"{ "query": { "pages": { "5": { "pageid": 5, "missing": "" } } } }"#;
    assert!(matches!(
        parse_page_images(body, 5),
        Err(WikipediaError::MissingPage(_))
    ));
}

// ---------------------------------------------------------------------------
// prop=imageinfo
// ---------------------------------------------------------------------------

#[test]
fn commons_file_url_extracted_from_missing_page() {
    let body = r#"{ "query": { "pages": { "-1": {
        "ns": 6, "title": "File:Avatar (2009 film) poster.jpg", "missing": "", "known": "",
        "imagerepository": "shared",
        "imageinfo": [ { "url": "https://upload.wikimedia.org/wikipedia/en/d/d6/Avatar.jpg",
                         "descriptionurl": "https://en.wikipedia.org/wiki/File:Avatar.jpg" } ]
    } } } }"#;

    assert_eq!(
        parse_image_url(body).unwrap().as_deref(),
        Some("https://upload.wikimedia.org/wikipedia/en/d/d6/Avatar.jpg")
    );
}

#[test]
fn file_without_imageinfo_is_none() {
    let body = r#"{ "query": { "pages": { "-1": { "ns": 6, "title": "File:Gone.jpg", "missing": "" } } } }"#;
    assert_eq!(parse_image_url(body).unwrap(), None);
}

// ---------------------------------------------------------------------------
// article
// ---------------------------------------------------------------------------

#[test]
fn article_fields_extracted() {
    let body = r#"{ "query": { "pages": { "123": {
        "pageid": 123, "ns": 0, "title": "Avatar (2009 film)",
        "extract": "Avatar is a 2009 epic science fiction film.\n\nIt was directed by James Cameron.",
        "categories": [ { "ns": 14, "title": "Category:2009 films" } ],
        "links": [ { "ns": 0, "title": "James Cameron" }, { "ns": 0, "title": "Pandora" } ],
        "images": [ { "ns": 6, "title": "File:Avatar-Teaser-Poster.jpg" } ],
        "fullurl": "https://en.wikipedia.org/wiki/Avatar_(2009_film)"
    } } } }"#;

    let page = parse_article(body, "Avatar (2009 film)").unwrap();

    assert_eq!(page.page_id, Some(123));
    assert_eq!(page.full_url.as_deref(), Some("https://en.wikipedia.org/wiki/Avatar_(2009_film)"));
    assert_eq!(page.categories.len(), 1);
    assert_eq!(page.links.len(), 2);
    assert_eq!(page.images[0].title, "File:Avatar-Teaser-Poster.jpg");
}

#[test]
fn missing_article_is_missing_page() {
    let body = r#"{ "query": { "pages": { "-1": { "ns": 0, "title": "Zzzzznotamovie", "missing": "" } } } }"#;
    assert!(matches!(
        parse_article(body, "Zzzzznotamovie"),
        Err(WikipediaError::MissingPage(t)) if t == "Zzzzznotamovie"
    ));
}
