//! File-level operations for PLP content migration.
//!
//! Reads the content and collections CSV exports, runs the match/render/apply
//! pipeline from `plp-migrate-core`, writes the updated export atomically, and
//! provides the read-only follow-up tools: coverage analysis, collection URL
//! listing, and spot checks.

pub mod analyze;
pub mod check;
pub mod csv_io;
pub mod error;
pub mod migrate;
pub mod progress;
pub mod report;
pub mod settings;
pub mod urls;

pub use analyze::{
    CollectionEntry, CollectionStatus, CoverageReport, CoverageStats, Discrepancy, analyze_coverage,
    analyze_files,
};
pub use check::{CheckOutcome, CheckResult, Expectation, ExpectationParseError, check_expectations};
pub use csv_io::{
    clean_header, parse_source_records, parse_target_table, read_source_records,
    read_target_table, target_table_to_csv, write_atomic, write_target_table,
};
pub use error::MigrateError;
pub use migrate::{
    MigrateOptions, MigrationSummary, UnmatchedContent, UpdatedTarget, migrate_table,
    run_migration,
};
pub use progress::{MigrateProgress, SilentProgress};
pub use report::{
    save_coverage_report, save_json, save_migration_report, to_json, write_coverage_report,
    write_migration_report,
};
pub use settings::{
    BASE_URL_ENV, ColumnRef, MatchingSettings, RenderSettings, ReportSettings, Settings,
    SourceColumns, TargetColumnRefs, settings_path, write_default_settings,
};
pub use urls::{CollectionLink, collection_links, collection_url, save_link_list, write_link_list};

// Core types used across the public API
pub use plp_migrate_core::{
    CaseMismatch, CollisionPolicy, ContentFormat, FieldChange, Handle, HandleExtractor, MatchStats,
    RenderOptions, SourceRecord, TargetField, TargetTable,
};
