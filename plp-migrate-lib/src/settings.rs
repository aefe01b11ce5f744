//! Migration settings (column names, matching and rendering options).
//!
//! Settings live in `~/.config/plp-migrate/settings.toml` unless a path is
//! given explicitly. Every key is optional; missing keys fall back to the
//! standard export layout.

use std::path::{Path, PathBuf};

use plp_migrate_core::{CollisionPolicy, ContentFormat, HandleExtractor, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::error::MigrateError;

/// Environment variable that overrides `report.base_url`.
pub const BASE_URL_ENV: &str = "PLP_MIGRATE_BASE_URL";

/// Canonical path to the settings file: `~/.config/plp-migrate/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("plp-migrate").join("settings.toml")
}

/// A column reference: a cleaned header name or a zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    /// Resolve against a list of cleaned header names.
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        match self {
            Self::Index(i) => (*i < headers.len()).then_some(*i),
            Self::Name(name) => headers.iter().position(|h| h == name),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "column #{}", i),
            Self::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Column names in the source content CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub url: String,
    pub title: String,
    pub description: String,
    pub subheading: String,
    pub extra: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            url: "URL".into(),
            title: "Title".into(),
            description: "Description".into(),
            subheading: "Sub-heading".into(),
            extra: "Content under product listing".into(),
        }
    }
}

/// Column references in the target export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetColumnRefs {
    pub handle: ColumnRef,
    pub title: ColumnRef,
    pub body_html: ColumnRef,
    pub subheading: ColumnRef,
}

impl Default for TargetColumnRefs {
    fn default() -> Self {
        Self {
            handle: "Handle".into(),
            title: "Title".into(),
            body_html: "Body HTML".into(),
            subheading: "Metafield: custom.collection_subheading [single_line_text_field]".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    /// Suffix stripped from the last URL path segment.
    pub url_suffix: String,
    pub collision_policy: CollisionPolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            url_suffix: plp_migrate_core::DEFAULT_URL_SUFFIX.into(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub description_format: ContentFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Storefront base URL used to build collection links.
    pub base_url: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            base_url: "https://your-store.myshopify.com".into(),
        }
    }
}

/// The full settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceColumns,
    pub target: TargetColumnRefs,
    pub matching: MatchingSettings,
    pub render: RenderSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Load settings, then apply environment overrides.
    ///
    /// With `path` set, the file must exist. Without it, the default
    /// location is used if present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, MigrateError> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = settings_path();
                if default_path.is_file() {
                    log::debug!("Loading settings from {}", default_path.display());
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env();
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, MigrateError> {
        if !path.exists() {
            return Err(MigrateError::file_not_found(path));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
            .map_err(|e| MigrateError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, MigrateError> {
        toml::from_str(contents).map_err(|e| MigrateError::config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, MigrateError> {
        toml::to_string_pretty(self).map_err(|e| MigrateError::config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.apply_base_url_override(&base_url);
        }
    }

    fn apply_base_url_override(&mut self, base_url: &str) {
        let base_url = base_url.trim();
        if !base_url.is_empty() {
            self.report.base_url = base_url.to_string();
        }
    }

    pub fn extractor(&self) -> HandleExtractor {
        HandleExtractor::with_suffix(self.matching.url_suffix.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().description_format(self.render.description_format)
    }
}

/// Write the default settings file to `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn write_default_settings(path: &Path, force: bool) -> Result<(), MigrateError> {
    if path.exists() && !force {
        return Err(MigrateError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let serialized = Settings::default().to_toml_string()?;
    crate::csv_io::write_atomic(path, serialized.as_bytes())
}
