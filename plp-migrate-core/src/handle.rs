//! Handle derivation from storefront URLs.
//!
//! A handle is the last non-empty path segment of a URL with a known suffix
//! removed: `https://example.com/diamonds-engagement-rings/tacori.html`
//! becomes `tacori`. Casing is preserved.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::RecordError;

/// Suffix stripped from the final path segment unless configured otherwise.
pub const DEFAULT_URL_SUFFIX: &str = ".html";

/// Short identifier used as the join key between source and target rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Handle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Handle {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Handle {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derives handles from URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleExtractor {
    suffix: String,
}

impl Default for HandleExtractor {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_URL_SUFFIX.to_string(),
        }
    }
}

impl HandleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different suffix (e.g. `.htm`). An empty suffix strips nothing.
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Derive the handle for `url`.
    ///
    /// The URL is parsed with WHATWG rules, so query, fragment, backslash
    /// separators and embedded tabs or newlines are handled the way a browser
    /// handles them. Scheme-less input is resolved as a path. Fails when the
    /// URL is blank or unparseable, has no path segments, or its last segment
    /// is nothing but the suffix.
    pub fn extract(&self, url: &str) -> Result<Handle, RecordError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(RecordError::malformed_url(url, "empty URL"));
        }

        let parsed = parse_url(trimmed).map_err(|e| RecordError::malformed_url(url, e.to_string()))?;
        let segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .ok_or_else(|| RecordError::malformed_url(url, "no path segments"))?;

        let handle = if self.suffix.is_empty() {
            segment
        } else {
            segment.strip_suffix(self.suffix.as_str()).unwrap_or(segment)
        };

        if handle.is_empty() {
            return Err(RecordError::malformed_url(
                url,
                format!("last path segment is only the '{}' suffix", self.suffix),
            ));
        }

        Ok(Handle::new(handle))
    }
}

/// Derive a handle using the default `.html` suffix.
pub fn extract_handle(url: &str) -> Result<Handle, RecordError> {
    HandleExtractor::default().extract(url)
}

/// Base that scheme-less and protocol-relative input is joined onto.
const RELATIVE_BASE: &str = "http://localhost/";

fn parse_url(url: &str) -> Result<Url, url::ParseError> {
    match Url::parse(url) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)?.join(url),
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/handle_tests.rs"]
mod tests;
