//! Collection description rendering.
//!
//! Produces the single-line body HTML
//! `<div class="collection-description"><h1>…</h1><h2>…</h2><p>…</p><div class="content-under-listing">…</div></div>`,
//! omitting each inner element whose source field is empty.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::record::{SourceRecord, TargetField};

/// How the rich description and extra fields are interpolated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Pass through when the text contains markup, escape otherwise.
    #[default]
    Auto,
    /// Always pass through verbatim.
    Html,
    /// Always escape.
    Text,
}

impl ContentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Html => "html",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed into a `ContentFormat`.
#[derive(Debug, Clone)]
pub struct ContentFormatParseError(pub String);

impl std::fmt::Display for ContentFormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown content format: '{}' (expected auto, html or text)",
            self.0
        )
    }
}

impl std::error::Error for ContentFormatParseError {}

impl std::str::FromStr for ContentFormat {
    type Err = ContentFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "html" => Ok(Self::Html),
            "text" | "plain" => Ok(Self::Text),
            _ => Err(ContentFormatParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub description_format: ContentFormat,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description_format(mut self, format: ContentFormat) -> Self {
        self.description_format = format;
        self
    }
}

/// Values to write into a matched target row. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedContent {
    pub title: Option<String>,
    pub body_html: Option<String>,
    /// Plain text for the subheading metafield (not escaped)
    pub subheading: Option<String>,
}

impl RenderedContent {
    pub fn get(&self, field: TargetField) -> Option<&str> {
        match field {
            TargetField::Title => self.title.as_deref(),
            TargetField::BodyHtml => self.body_html.as_deref(),
            TargetField::Subheading => self.subheading.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body_html.is_none() && self.subheading.is_none()
    }
}

/// Render the target field values for one source record.
///
/// The title is set only when non-empty, the body only when the description
/// is non-empty, and the subheading only when present.
pub fn render(source: &SourceRecord, options: &RenderOptions) -> RenderedContent {
    RenderedContent {
        title: non_blank(&source.title).map(str::to_string),
        body_html: non_blank(&source.description).map(|_| render_body_html(source, options)),
        subheading: source.subheading().map(str::to_string),
    }
}

/// Build the collection description HTML for `source`.
pub fn render_body_html(source: &SourceRecord, options: &RenderOptions) -> String {
    let mut html = String::from(r#"<div class="collection-description">"#);

    if let Some(title) = non_blank(&source.title) {
        html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
    }
    if let Some(subheading) = source.subheading() {
        html.push_str(&format!("<h2>{}</h2>", escape_html(subheading)));
    }
    if let Some(description) = non_blank(&source.description) {
        html.push_str(&format!(
            "<p>{}</p>",
            format_rich(description, options.description_format)
        ));
    }
    if let Some(extra) = source.extra() {
        html.push_str(&format!(
            r#"<div class="content-under-listing">{}</div>"#,
            format_rich(extra, options.description_format)
        ));
    }

    html.push_str("</div>");
    html
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

fn format_rich(text: &str, format: ContentFormat) -> Cow<'_, str> {
    match format {
        ContentFormat::Html => Cow::Borrowed(text),
        ContentFormat::Text => Cow::Owned(escape_html(text)),
        ContentFormat::Auto if looks_like_html(text) => Cow::Borrowed(text),
        ContentFormat::Auto => Cow::Owned(escape_html(text)),
    }
}

/// Escape text for HTML without double-escaping.
///
/// An `&` that already starts a character reference (`&amp;`, `&#39;`,
/// `&#x27;`) is kept as-is, so `escape_html(escape_html(s)) == escape_html(s)`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' if starts_with_char_ref(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `s` (starting at an `&`) begins a named or numeric character reference.
fn starts_with_char_ref(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let body = &s[1..end];
    if body.is_empty() || body.len() > 32 {
        return false;
    }

    if let Some(num) = body.strip_prefix('#') {
        match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        body.starts_with(|c: char| c.is_ascii_alphabetic())
            && body.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// Heuristic: does `text` contain something that looks like a tag?
///
/// True when a `<` is directly followed by a letter, `/` or `!` and a `>`
/// appears later on.
pub fn looks_like_html(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'<'
            && bytes
                .get(i + 1)
                .is_some_and(|&n| n.is_ascii_alphabetic() || n == b'/' || n == b'!')
            && bytes[i + 1..].contains(&b'>')
    })
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
