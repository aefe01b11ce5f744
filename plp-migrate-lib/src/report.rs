//! Text and JSON reports for migration and coverage runs.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::analyze::{CollectionStatus, CoverageReport};
use crate::csv_io::write_atomic;
use crate::error::MigrateError;
use crate::migrate::MigrationSummary;

fn write_header<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "=== {} ===", title)?;
    writeln!(
        out,
        "Date: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out)
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r),
        None => "n/a".to_string(),
    }
}

/// Write the coverage report as plain text.
///
/// `limit` caps the number of entries printed per section.
pub fn write_coverage_report<W: Write>(
    out: &mut W,
    report: &CoverageReport,
    limit: Option<usize>,
) -> std::io::Result<()> {
    let limit = limit.unwrap_or(usize::MAX);
    let stats = &report.stats;

    write_header(out, "PLP Coverage Report")?;
    writeln!(out, "--- Summary ---")?;
    writeln!(out, "Total collections: {}", stats.total_targets)?;
    writeln!(out, "Content entries: {}", stats.content_indexed)?;
    writeln!(
        out,
        "Updated: {} ({})",
        stats.updated,
        format_rate(stats.update_rate())
    )?;
    writeln!(out, "Not updated: {}", stats.not_updated)?;
    writeln!(out, "Content without matching collection: {}", stats.content_without_match)?;
    writeln!(out, "Discrepancies: {}", stats.discrepancies)?;
    writeln!(out)?;

    writeln!(out, "--- Updated Collections ---")?;
    for entry in report.updated().take(limit) {
        writeln!(out, "[UPDATED] {} ({})", entry.handle, entry.url)?;
        if let CollectionStatus::Updated { changes } = &entry.status {
            for change in changes {
                writeln!(out, "     {}", change.describe())?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "--- Collections Not Updated ---")?;
    for entry in report.not_updated().take(limit) {
        let note = match entry.status {
            CollectionStatus::NotUpdated { has_content: true } => " (content available)",
            _ => "",
        };
        writeln!(out, "[NOT UPDATED] {}{} ({})", entry.handle, note, entry.url)?;
    }
    writeln!(out)?;

    writeln!(out, "--- Content Without Matching Collection ---")?;
    for item in report.unmatched_content.iter().take(limit) {
        writeln!(out, "[NO MATCH] {} -> \"{}\" ({})", item.handle, item.title, item.url)?;
    }
    writeln!(out)?;

    writeln!(out, "--- Discrepancies ---")?;
    for d in report.discrepancies.iter().take(limit) {
        writeln!(out, "[MISMATCH] {}", d.handle)?;
        for field in &d.fields {
            writeln!(out, "     {}: differs from rendered content", field.field)?;
        }
    }

    Ok(())
}

/// Write the migration summary as plain text.
pub fn write_migration_report<W: Write>(out: &mut W, summary: &MigrationSummary) -> std::io::Result<()> {
    let stats = &summary.stats;

    write_header(out, "PLP Migration Report")?;
    writeln!(out, "--- Summary ---")?;
    writeln!(out, "Source records: {}", stats.sources_loaded)?;
    writeln!(out, "Handles indexed: {}", stats.handles_indexed)?;
    writeln!(out, "Target collections: {}", stats.targets_loaded)?;
    writeln!(
        out,
        "Collections updated: {} ({} changed)",
        stats.targets_matched, summary.rows_changed
    )?;
    writeln!(out, "Collections without content: {}", stats.targets_unmatched)?;
    writeln!(out, "Content without collection: {}", stats.sources_unmatched)?;
    writeln!(out, "Duplicate handles: {}", stats.collisions)?;
    writeln!(out, "Malformed URLs: {}", stats.malformed)?;
    writeln!(out, "Case-only handle mismatches: {}", stats.case_mismatches)?;
    writeln!(out, "Match rate: {}", format_rate(stats.match_rate()))?;
    writeln!(out)?;

    writeln!(out, "--- Details ---")?;
    writeln!(out)?;
    for item in &summary.updated {
        if item.changes.is_empty() {
            writeln!(out, "[UNCHANGED] {} <- {}", item.handle, item.source_url)?;
        } else {
            writeln!(out, "[UPDATED] {} <- {}", item.handle, item.source_url)?;
            for change in &item.changes {
                writeln!(out, "     {}", change.describe())?;
            }
        }
    }
    for collision in &summary.collisions {
        writeln!(
            out,
            "[DUPLICATE] {}: kept source row {}, discarded row {}",
            collision.handle,
            collision.kept + 1,
            collision.discarded + 1
        )?;
    }
    for bad in &summary.malformed {
        writeln!(
            out,
            "[MALFORMED] source row {}: '{}' ({})",
            bad.index + 1,
            bad.url,
            bad.reason
        )?;
    }
    for near in &summary.case_mismatches {
        writeln!(
            out,
            "[CASE] {} (source row {}) ~ {} (target row {})",
            near.source_handle,
            near.source + 1,
            near.target_handle,
            near.target + 1
        )?;
    }
    for item in &summary.unmatched_content {
        writeln!(out, "[NO MATCH] {} -> \"{}\" ({})", item.handle, item.title, item.url)?;
    }

    Ok(())
}

/// Save the coverage report as text to `path`.
pub fn save_coverage_report(path: &Path, report: &CoverageReport, limit: Option<usize>) -> Result<(), MigrateError> {
    let mut buf = Vec::new();
    write_coverage_report(&mut buf, report, limit)?;
    write_atomic(path, &buf)
}

/// Save the migration summary as text to `path`.
pub fn save_migration_report(path: &Path, summary: &MigrationSummary) -> Result<(), MigrateError> {
    let mut buf = Vec::new();
    write_migration_report(&mut buf, summary)?;
    write_atomic(path, &buf)
}

/// Pretty-printed JSON for any report type.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, MigrateError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Save any report type as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), MigrateError> {
    let json = to_json(value)?;
    write_atomic(path, json.as_bytes())
}
