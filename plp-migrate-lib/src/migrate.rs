//! The migration pipeline: load, match, render, apply, write.

use std::collections::HashMap;
use std::path::Path;

use plp_migrate_core::{
    CaseMismatch, Collision, CollisionPolicy, ContentIndex, FieldChange, HandleExtractor, MalformedSource,
    MatchStats, RenderOptions, RenderedContent, SourceRecord, TargetTable, apply_content, render,
};
use serde::Serialize;

use crate::csv_io::{read_source_records, read_target_table, write_target_table};
use crate::error::MigrateError;
use crate::progress::MigrateProgress;
use crate::settings::Settings;

/// Per-run options, usually built from [`Settings`] and then adjusted by
/// command-line flags.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub extractor: HandleExtractor,
    pub policy: CollisionPolicy,
    pub render: RenderOptions,
    /// Abort on the first malformed source URL instead of skipping it
    pub strict: bool,
}

impl MigrateOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            extractor: settings.extractor(),
            policy: settings.matching.collision_policy,
            render: settings.render_options(),
            strict: false,
        }
    }
}

/// A target row that received content.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatedTarget {
    /// Zero-based data row in the target table
    pub row: usize,
    pub handle: String,
    pub source_url: String,
    /// Empty when the row already held the rendered content
    pub changes: Vec<FieldChange>,
}

/// A source record whose handle matched no target row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedContent {
    pub handle: String,
    pub url: String,
    pub title: String,
}

/// Everything one migration run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationSummary {
    pub stats: MatchStats,
    /// Matched rows where at least one field changed
    pub rows_changed: usize,
    pub updated: Vec<UpdatedTarget>,
    pub unmatched_content: Vec<UnmatchedContent>,
    pub collisions: Vec<Collision>,
    pub malformed: Vec<MalformedSource>,
    /// Unmatched content whose handle differs from a target only by case
    pub case_mismatches: Vec<CaseMismatch>,
}

impl MigrationSummary {
    pub fn match_rate(&self) -> Option<f64> {
        self.stats.match_rate()
    }
}

/// Apply `sources` to `table` in memory.
///
/// Each matched source is rendered once and written into every target row
/// sharing its handle. In strict mode the first malformed source URL is
/// returned as an error before the table is touched.
pub fn migrate_table(
    sources: &[SourceRecord],
    table: &mut TargetTable,
    options: &MigrateOptions,
    progress: &dyn MigrateProgress,
) -> Result<MigrationSummary, MigrateError> {
    let index = ContentIndex::build(sources, &options.extractor, options.policy);

    if options.strict {
        if let Some(bad) = index.malformed().first() {
            return Err(bad.to_error().into());
        }
    }

    for bad in index.malformed() {
        log::warn!(
            "Skipping source row {}: malformed URL '{}' ({})",
            bad.index + 1,
            bad.url,
            bad.reason
        );
    }
    for collision in index.collisions() {
        log::warn!(
            "Duplicate handle '{}': keeping source row {}, discarding row {}",
            collision.handle,
            collision.kept + 1,
            collision.discarded + 1
        );
    }

    let set = index.match_table(table);
    let total = set.pairs.len();

    for near in &set.case_mismatches {
        log::warn!(
            "Handle '{}' from source row {} matches collection '{}' (row {}) only when ignoring case",
            near.source_handle,
            near.source + 1,
            near.target_handle,
            near.target + 1
        );
    }

    let mut rendered: HashMap<usize, RenderedContent> = HashMap::new();
    let mut updated = Vec::with_capacity(total);
    let mut rows_changed = 0;

    for (i, pair) in set.pairs.iter().enumerate() {
        let source = &sources[pair.source];
        let content = rendered
            .entry(pair.source)
            .or_insert_with(|| render(source, &options.render));

        let changes = apply_content(table, pair.target, content);
        let handle = table.handle(pair.target).to_string();

        if changes.is_empty() {
            log::debug!("{}: already up to date", handle);
        } else {
            rows_changed += 1;
            for change in &changes {
                log::debug!("{}: {}", handle, change.describe());
            }
        }

        progress.on_record(i + 1, total, &handle);
        updated.push(UpdatedTarget {
            row: pair.target,
            handle,
            source_url: source.url.clone(),
            changes,
        });
    }

    let unmatched_content = index
        .entries()
        .filter(|(_, source)| set.unmatched_sources.contains(source))
        .map(|(handle, source)| UnmatchedContent {
            handle: handle.to_string(),
            url: sources[source].url.clone(),
            title: sources[source].title.clone(),
        })
        .collect();

    Ok(MigrationSummary {
        stats: set.stats(sources.len(), &index, table.len()),
        rows_changed,
        updated,
        unmatched_content,
        collisions: index.collisions().to_vec(),
        malformed: index.malformed().to_vec(),
        case_mismatches: set.case_mismatches,
    })
}

/// Run a full migration from files.
///
/// With `output` set, the updated table is written there atomically once
/// everything else has succeeded; with `None` nothing is written.
pub fn run_migration(
    source: &Path,
    target: &Path,
    output: Option<&Path>,
    settings: &Settings,
    options: &MigrateOptions,
    progress: &dyn MigrateProgress,
) -> Result<MigrationSummary, MigrateError> {
    if let Some(out) = output {
        if same_file(out, target) {
            return Err(MigrateError::config(format!(
                "output path {} is the target export; choose a different file",
                out.display()
            )));
        }
    }

    progress.on_phase("Loading source content...");
    let sources = read_source_records(source, &settings.source)?;
    log::debug!("Loaded {} source records from {}", sources.len(), source.display());

    progress.on_phase("Loading target collections...");
    let mut table = read_target_table(target, &settings.target)?;
    log::debug!("Loaded {} target rows from {}", table.len(), target.display());

    progress.on_phase("Matching and rendering content...");
    let summary = migrate_table(&sources, &mut table, options, progress)?;

    match output {
        Some(out) => {
            progress.on_phase(&format!("Writing {}...", out.display()));
            write_target_table(&table, out)?;
            progress.on_complete(&format!(
                "Updated {} of {} collections",
                summary.stats.targets_matched, summary.stats.targets_loaded
            ));
        }
        None => progress.on_complete("Dry run: no output written"),
    }

    Ok(summary)
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
