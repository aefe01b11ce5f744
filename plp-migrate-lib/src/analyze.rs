//! Coverage analysis: what a migration actually changed.
//!
//! Compares the original target export with the updated file row by row
//! and checks the updated values against freshly rendered content.

use std::collections::HashSet;
use std::path::Path;

use plp_migrate_core::{
    ContentIndex, FieldChange, SourceRecord, TargetField, TargetTable, compare_fields,
    find_discrepancies, render,
};
use serde::Serialize;

use crate::csv_io::{read_source_records, read_target_table};
use crate::error::MigrateError;
use crate::migrate::{MigrateOptions, UnmatchedContent};
use crate::settings::Settings;
use crate::urls::collection_url;

/// Whether a collection was changed by the migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollectionStatus {
    Updated { changes: Vec<FieldChange> },
    NotUpdated { has_content: bool },
}

/// One target row in the coverage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
    pub row: usize,
    pub handle: String,
    /// Title in the updated file
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub status: CollectionStatus,
}

impl CollectionEntry {
    pub fn is_updated(&self) -> bool {
        matches!(self.status, CollectionStatus::Updated { .. })
    }
}

/// A row whose updated values differ from what the renderer produces now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub row: usize,
    pub handle: String,
    /// `before` is the value in the updated file, `after` the expected one
    pub fields: Vec<FieldChange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoverageStats {
    pub total_targets: usize,
    pub content_indexed: usize,
    pub updated: usize,
    pub not_updated: usize,
    pub content_without_match: usize,
    pub discrepancies: usize,
}

impl CoverageStats {
    /// Updated rows as a percentage of all target rows.
    pub fn update_rate(&self) -> Option<f64> {
        if self.total_targets == 0 {
            None
        } else {
            Some(self.updated as f64 / self.total_targets as f64 * 100.0)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageReport {
    pub stats: CoverageStats,
    pub collections: Vec<CollectionEntry>,
    pub unmatched_content: Vec<UnmatchedContent>,
    pub discrepancies: Vec<Discrepancy>,
}

impl CoverageReport {
    pub fn updated(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.collections.iter().filter(|c| c.is_updated())
    }

    pub fn not_updated(&self) -> impl Iterator<Item = &CollectionEntry> {
        self.collections.iter().filter(|c| !c.is_updated())
    }
}

/// Compare `original` and `updated` against the content in `sources`.
///
/// The two tables must have the same number of rows and the same handle at
/// every position.
pub fn analyze_coverage(
    sources: &[SourceRecord],
    original: &TargetTable,
    updated: &TargetTable,
    options: &MigrateOptions,
    base_url: &str,
) -> Result<CoverageReport, MigrateError> {
    if original.len() != updated.len() {
        return Err(MigrateError::schema_mismatch(format!(
            "original export has {} rows, updated file has {}",
            original.len(),
            updated.len()
        )));
    }
    for ((row, before), (_, after)) in original.handles().zip(updated.handles()) {
        if before != after {
            return Err(MigrateError::schema_mismatch(format!(
                "row {} handle differs: '{}' in original, '{}' in updated file",
                row + 1,
                before,
                after
            )));
        }
    }

    let index = ContentIndex::build(sources, &options.extractor, options.policy);
    let mut report = CoverageReport::default();

    for (row, handle) in updated.handles() {
        let changes = compare_fields(original, updated, row);
        let source = index.get(handle);

        let status = if changes.is_empty() {
            CollectionStatus::NotUpdated {
                has_content: source.is_some(),
            }
        } else {
            CollectionStatus::Updated { changes }
        };

        if let Some(source) = source {
            let expected = render(&sources[source], &options.render);
            let fields = find_discrepancies(updated, row, &expected);
            if !fields.is_empty() {
                log::debug!("{}: {} field(s) differ from rendered content", handle, fields.len());
                report.discrepancies.push(Discrepancy {
                    row,
                    handle: handle.to_string(),
                    fields,
                });
            }
        }

        report.collections.push(CollectionEntry {
            row,
            handle: handle.to_string(),
            title: updated.field(row, TargetField::Title).to_string(),
            url: collection_url(base_url, handle),
            status,
        });
    }

    let target_handles: HashSet<&str> = updated.handles().map(|(_, h)| h).collect();
    report.unmatched_content = index
        .entries()
        .filter(|(handle, _)| !target_handles.contains(handle.as_str()))
        .map(|(handle, source)| UnmatchedContent {
            handle: handle.to_string(),
            url: sources[source].url.clone(),
            title: sources[source].title.clone(),
        })
        .collect();

    let updated_count = report.updated().count();
    report.stats = CoverageStats {
        total_targets: updated.len(),
        content_indexed: index.len(),
        updated: updated_count,
        not_updated: updated.len() - updated_count,
        content_without_match: report.unmatched_content.len(),
        discrepancies: report.discrepancies.len(),
    };

    Ok(report)
}

/// Load the three files and run [`analyze_coverage`].
pub fn analyze_files(
    source: &Path,
    original: &Path,
    updated: &Path,
    settings: &Settings,
    options: &MigrateOptions,
) -> Result<CoverageReport, MigrateError> {
    let sources = read_source_records(source, &settings.source)?;
    let original = read_target_table(original, &settings.target)?;
    let updated = read_target_table(updated, &settings.target)?;
    analyze_coverage(&sources, &original, &updated, options, &settings.report.base_url)
}
