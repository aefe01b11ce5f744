use super::*;

fn tacori() -> SourceRecord {
    SourceRecord::new(
        "https://example.com/diamonds-engagement-rings/tacori.html",
        "Tacori",
        "Fine jewelry.",
    )
}

#[test]
fn renders_full_template() {
    let source = tacori()
        .with_subheading("Engagement Rings")
        .with_extra("Shop the collection.");

    let html = render_body_html(&source, &RenderOptions::default());

    assert_eq!(
        html,
        concat!(
            r#"<div class="collection-description">"#,
            "<h1>Tacori</h1>",
            "<h2>Engagement Rings</h2>",
            "<p>Fine jewelry.</p>",
            r#"<div class="content-under-listing">Shop the collection.</div>"#,
            "</div>",
        )
    );
}

#[test]
fn omits_subheading_when_absent() {
    let source = tacori().with_subheading("");
    let html = render_body_html(&source, &RenderOptions::default());

    assert!(!html.contains("<h2>"));
    assert_eq!(
        html,
        r#"<div class="collection-description"><h1>Tacori</h1><p>Fine jewelry.</p></div>"#
    );
}

#[test]
fn blank_subheading_set_directly_is_absent() {
    let mut source = tacori();
    source.subheading = Some("   ".to_string());
    assert!(!render_body_html(&source, &RenderOptions::default()).contains("<h2>"));
}

#[test]
fn omits_title_when_empty() {
    let source = SourceRecord::new("https://example.com/x.html", "", "Text.");
    let rendered = render(&source, &RenderOptions::default());

    assert_eq!(rendered.title, None);
    assert_eq!(
        rendered.body_html.as_deref(),
        Some(r#"<div class="collection-description"><p>Text.</p></div>"#)
    );
}

#[test]
fn body_only_rendered_with_description() {
    let source = SourceRecord::new("https://example.com/x.html", "Title", "")
        .with_subheading("Sub");
    let rendered = render(&source, &RenderOptions::default());

    assert_eq!(rendered.title.as_deref(), Some("Title"));
    assert_eq!(rendered.body_html, None);
    assert_eq!(rendered.subheading.as_deref(), Some("Sub"));
}

#[test]
fn empty_source_renders_nothing() {
    let source = SourceRecord::new("https://example.com/x.html", "", "");
    assert!(render(&source, &RenderOptions::default()).is_empty());
}

#[test]
fn title_and_subheading_are_escaped() {
    let source = SourceRecord::new("u", "Rings & <Bands>", "Body.")
        .with_subheading(r#"Say "I do""#);
    let html = render_body_html(&source, &RenderOptions::default());

    assert!(html.contains("<h1>Rings &amp; &lt;Bands&gt;</h1>"));
    assert!(html.contains("<h2>Say &quot;I do&quot;</h2>"));
}

#[test]
fn subheading_metafield_is_plain_text() {
    let source = tacori().with_subheading("Rings & Bands");
    let rendered = render(&source, &RenderOptions::default());
    assert_eq!(rendered.subheading.as_deref(), Some("Rings & Bands"));
}

#[test]
fn auto_passes_html_description_through() {
    let source = SourceRecord::new("u", "T", "<strong>Bold</strong> & bright");
    let html = render_body_html(&source, &RenderOptions::default());
    assert!(html.contains("<p><strong>Bold</strong> & bright</p>"));
}

#[test]
fn auto_escapes_plain_description() {
    let source = SourceRecord::new("u", "T", "Size < 7 & up");
    let html = render_body_html(&source, &RenderOptions::default());
    assert!(html.contains("<p>Size &lt; 7 &amp; up</p>"));
}

#[test]
fn text_format_escapes_markup() {
    let source = SourceRecord::new("u", "T", "<em>Hi</em>");
    let options = RenderOptions::new().description_format(ContentFormat::Text);
    let html = render_body_html(&source, &options);
    assert!(html.contains("<p>&lt;em&gt;Hi&lt;/em&gt;</p>"));
}

#[test]
fn html_format_passes_everything_through() {
    let source = SourceRecord::new("u", "T", "1 < 2").with_extra("<ul><li>a</li></ul>");
    let options = RenderOptions::new().description_format(ContentFormat::Html);
    let html = render_body_html(&source, &options);
    assert!(html.contains("<p>1 < 2</p>"));
    assert!(html.contains(r#"<div class="content-under-listing"><ul><li>a</li></ul></div>"#));
}

#[test]
fn escaping_does_not_double_escape() {
    assert_eq!(escape_html("Tom &amp; Jerry"), "Tom &amp; Jerry");
    assert_eq!(escape_html("it&#39;s"), "it&#39;s");
    assert_eq!(escape_html("it&#x27;s"), "it&#x27;s");
    assert_eq!(escape_html("AT&T"), "AT&amp;T");
    assert_eq!(escape_html("a & b; c"), "a &amp; b; c");
    assert_eq!(escape_html("it's"), "it&#x27;s");
}

#[test]
fn escaping_is_idempotent() {
    for s in ["<a href=\"x\">", "Q&A", "50% off & more", "&&;", "é & ü"] {
        let once = escape_html(s);
        assert_eq!(escape_html(&once), once, "input: {s}");
    }
}

#[test]
fn rendering_is_deterministic() {
    let source = tacori().with_subheading("Rings").with_extra("More");
    let options = RenderOptions::default();
    assert_eq!(render(&source, &options), render(&source, &options));
}

#[test]
fn html_detection() {
    assert!(looks_like_html("<p>x</p>"));
    assert!(looks_like_html("line<br/>"));
    assert!(looks_like_html("<!-- note -->"));
    assert!(!looks_like_html("a < b and c > d"));
    assert!(!looks_like_html("<"));
    assert!(!looks_like_html("plain text"));
}

#[test]
fn parse_content_format() {
    assert_eq!("HTML".parse::<ContentFormat>().unwrap(), ContentFormat::Html);
    assert_eq!("plain".parse::<ContentFormat>().unwrap(), ContentFormat::Text);
    assert!("markdown".parse::<ContentFormat>().is_err());
}
