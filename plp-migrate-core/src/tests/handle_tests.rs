use super::*;

#[test]
fn extracts_last_segment_without_html_suffix() {
    let handle = extract_handle("https://example.com/diamonds-engagement-rings/tacori.html").unwrap();
    assert_eq!(handle, "tacori");
}

#[test]
fn any_segment_before_html_suffix_is_the_handle() {
    for seg in ["watches", "gucci-jewelry", "roberto-coin", "a", "x.y"] {
        let url = format!("https://jrdunn.com/brands/{seg}.html");
        assert_eq!(extract_handle(&url).unwrap().as_str(), seg);
    }
}

#[test]
fn preserves_casing() {
    let handle = extract_handle("https://example.com/Brands/Marco-Bicego.html").unwrap();
    assert_eq!(handle, "Marco-Bicego");
}

#[test]
fn ignores_trailing_slash() {
    let handle = extract_handle("https://example.com/watches/breitling/").unwrap();
    assert_eq!(handle, "breitling");
}

#[test]
fn ignores_query_and_fragment() {
    let handle = extract_handle("https://example.com/jewelry/messika.html?p=2#top").unwrap();
    assert_eq!(handle, "messika");
}

#[test]
fn accepts_bare_paths() {
    assert_eq!(extract_handle("/jewelry/mikimoto.html").unwrap(), "mikimoto");
    assert_eq!(extract_handle("jewelry/john-hardy.html").unwrap(), "john-hardy");
}

#[test]
fn protocol_relative_url_drops_authority() {
    assert_eq!(extract_handle("//example.com/diamond.html").unwrap(), "diamond");
    assert!(extract_handle("//example.com").is_err());
}

#[test]
fn backslash_separators_follow_browser_parsing() {
    let handle = extract_handle("https://example.com\\diamonds\\tacori.html").unwrap();
    assert_eq!(handle, "tacori");
}

#[test]
fn embedded_tabs_and_newlines_are_removed() {
    assert_eq!(extract_handle("https://example.com/diamonds/ta\tcori.html").unwrap(), "tacori");
    assert_eq!(extract_handle("https://example.com/rin\ngs.html").unwrap(), "rings");
}

#[test]
fn unparseable_url_is_malformed() {
    for url in ["https://", "http://exa mple.com/rings.html"] {
        match extract_handle(url).unwrap_err() {
            RecordError::MalformedUrl { url: u, reason } => {
                assert_eq!(u, url);
                assert_ne!(reason, "no path segments");
            }
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
    }
}

#[test]
fn non_hierarchical_url_has_no_path_segments() {
    assert!(extract_handle("mailto:sales@example.com").is_err());
}

#[test]
fn only_one_suffix_is_stripped() {
    assert_eq!(extract_handle("https://example.com/odd.html.html").unwrap(), "odd.html");
}

#[test]
fn segment_without_suffix_is_kept_whole() {
    assert_eq!(extract_handle("https://example.com/sale/clearance").unwrap(), "clearance");
}

#[test]
fn custom_suffix() {
    let extractor = HandleExtractor::with_suffix(".htm");
    assert_eq!(extractor.extract("https://example.com/a/pearls.htm").unwrap(), "pearls");
    assert_eq!(extractor.extract("https://example.com/a/pearls.html").unwrap(), "pearls.html");
}

#[test]
fn empty_suffix_strips_nothing() {
    let extractor = HandleExtractor::with_suffix("");
    assert_eq!(extractor.extract("https://example.com/a/pearls.html").unwrap(), "pearls.html");
}

#[test]
fn empty_url_is_malformed() {
    let err = extract_handle("   ").unwrap_err();
    assert!(matches!(err, RecordError::MalformedUrl { .. }));
}

#[test]
fn host_only_url_is_malformed() {
    for url in ["https://example.com", "https://example.com/", "https://example.com/?q=1"] {
        let err = extract_handle(url).unwrap_err();
        match err {
            RecordError::MalformedUrl { url: u, reason } => {
                assert_eq!(u, url);
                assert_eq!(reason, "no path segments");
            }
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
    }
}

#[test]
fn suffix_only_segment_is_malformed() {
    assert!(extract_handle("https://example.com/brands/.html").is_err());
}

#[test]
fn handle_borrows_as_str_for_map_lookups() {
    let mut map = std::collections::HashMap::new();
    map.insert(Handle::new("tacori"), 1);
    assert_eq!(map.get("tacori"), Some(&1));
}
