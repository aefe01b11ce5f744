mod common;

use common::{TARGET_HEADER, standard_source, standard_target, write_csv};
use plp_migrate_lib::csv_io::read_target_table;
use plp_migrate_lib::{
    CollisionPolicy, MigrateError, MigrateOptions, Settings, SilentProgress, TargetField,
    run_migration, write_migration_report,
};

fn default_options() -> MigrateOptions {
    MigrateOptions::from_settings(&Settings::default())
}

#[test]
fn migrates_matching_rows_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let output = dir.path().join("out").join("updated.csv");
    let settings = Settings::default();

    let summary = run_migration(
        &source,
        &target,
        Some(&output),
        &settings,
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    assert_eq!(summary.stats.sources_loaded, 3);
    assert_eq!(summary.stats.handles_indexed, 3);
    assert_eq!(summary.stats.targets_loaded, 4);
    assert_eq!(summary.stats.targets_matched, 3);
    assert_eq!(summary.stats.targets_unmatched, 1);
    assert_eq!(summary.stats.sources_unmatched, 1);
    assert_eq!(summary.rows_changed, 3);
    assert_eq!(summary.match_rate(), Some(100.0));
    assert_eq!(summary.unmatched_content.len(), 1);
    assert_eq!(summary.unmatched_content[0].handle, "unused");

    let table = read_target_table(&output, &settings.target).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.field(0, TargetField::Title), "Tacori");
    assert_eq!(
        table.field(0, TargetField::BodyHtml),
        r#"<div class="collection-description"><h1>Tacori</h1><p>Fine jewelry.</p></div>"#
    );
    // An absent subheading leaves the existing value alone
    assert_eq!(table.field(0, TargetField::Subheading), "");
    assert_eq!(table.field(1, TargetField::Subheading), "Timepieces");
}

#[test]
fn duplicate_target_handles_receive_same_content() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let output = dir.path().join("updated.csv");
    let settings = Settings::default();

    run_migration(
        &source,
        &target,
        Some(&output),
        &settings,
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    let table = read_target_table(&output, &settings.target).unwrap();
    let expected = concat!(
        r#"<div class="collection-description"><h1>Watches</h1><h2>Timepieces</h2>"#,
        r#"<p><b>Swiss</b> made</p><div class="content-under-listing">Free shipping</div></div>"#
    );
    assert_eq!(table.field(1, TargetField::BodyHtml), expected);
    assert_eq!(table.field(3, TargetField::BodyHtml), expected);
    assert_eq!(table.field(3, TargetField::Title), "Watches");
}

#[test]
fn untouched_columns_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let output = dir.path().join("updated.csv");
    let settings = Settings::default();

    run_migration(
        &source,
        &target,
        Some(&output),
        &settings,
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    let before = read_target_table(&target, &settings.target).unwrap();
    let after = read_target_table(&output, &settings.target).unwrap();
    assert_eq!(before.headers(), after.headers());
    for row in 0..before.len() {
        let b = before.record(row).unwrap();
        let a = after.record(row).unwrap();
        assert_eq!(b.len(), a.len());
        for col in [0, 1, 4] {
            assert_eq!(b.field(col), a.field(col), "row {row} column {col}");
        }
    }
    // Unmatched row is byte-identical, including the quoted comma
    assert_eq!(before.record(2), after.record(2));
}

#[test]
fn rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let settings = Settings::default();

    run_migration(&source, &target, Some(&first), &settings, &default_options(), &SilentProgress).unwrap();
    let summary =
        run_migration(&source, &first, Some(&second), &settings, &default_options(), &SilentProgress).unwrap();

    assert_eq!(summary.rows_changed, 0);
    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let before: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();

    let summary = run_migration(
        &source,
        &target,
        None,
        &Settings::default(),
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    assert_eq!(summary.stats.targets_matched, 3);
    let after: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(before.len(), after.len());
}

#[test]
fn zero_matches_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = write_csv(
        dir.path(),
        "collections.csv",
        &[TARGET_HEADER, "necklaces,MERGE,Necklaces,,manual,"],
    );
    let output = dir.path().join("updated.csv");

    let summary = run_migration(
        &source,
        &target,
        Some(&output),
        &Settings::default(),
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    assert_eq!(summary.stats.targets_matched, 0);
    assert_eq!(summary.match_rate(), Some(0.0));
    assert!(output.exists());
}

#[test]
fn collision_policy_selects_kept_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_csv(
        dir.path(),
        "content.csv",
        &[
            common::SOURCE_HEADER,
            "https://example.com/a/rings.html,First Rings,First,,",
            "https://example.com/b/rings.html,Second Rings,Second,,",
        ],
    );
    let target = write_csv(
        dir.path(),
        "collections.csv",
        &[TARGET_HEADER, "rings,MERGE,Rings,,manual,"],
    );
    let settings = Settings::default();

    for (policy, expected) in [
        (CollisionPolicy::LastWins, "Second Rings"),
        (CollisionPolicy::FirstWins, "First Rings"),
    ] {
        let output = dir.path().join(format!("{policy}.csv"));
        let options = MigrateOptions {
            policy,
            ..default_options()
        };
        let summary =
            run_migration(&source, &target, Some(&output), &settings, &options, &SilentProgress).unwrap();

        assert_eq!(summary.collisions.len(), 1);
        let table = read_target_table(&output, &settings.target).unwrap();
        assert_eq!(table.field(0, TargetField::Title), expected);
    }
}

#[test]
fn strict_mode_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_csv(
        dir.path(),
        "content.csv",
        &[
            common::SOURCE_HEADER,
            "https://example.com/rings.html,Rings,Nice,,",
            "https://example.com/,Broken,Bad url,,",
        ],
    );
    let target = standard_target(dir.path());
    let output = dir.path().join("updated.csv");

    let lenient =
        run_migration(&source, &target, None, &Settings::default(), &default_options(), &SilentProgress)
            .unwrap();
    assert_eq!(lenient.malformed.len(), 1);
    assert_eq!(lenient.malformed[0].index, 1);

    let options = MigrateOptions {
        strict: true,
        ..default_options()
    };
    let err = run_migration(
        &source,
        &target,
        Some(&output),
        &Settings::default(),
        &options,
        &SilentProgress,
    )
    .unwrap_err();

    assert!(matches!(err, MigrateError::MalformedUrl { .. }), "{err}");
    assert!(!output.exists());
}

#[test]
fn missing_input_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let target = standard_target(dir.path());

    let err = run_migration(
        &dir.path().join("missing.csv"),
        &target,
        None,
        &Settings::default(),
        &default_options(),
        &SilentProgress,
    )
    .unwrap_err();

    assert!(matches!(err, MigrateError::FileNotFound { .. }));
}

#[test]
fn output_must_differ_from_target() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let original = std::fs::read(&target).unwrap();

    let err = run_migration(
        &source,
        &target,
        Some(&target),
        &Settings::default(),
        &default_options(),
        &SilentProgress,
    )
    .unwrap_err();

    assert!(matches!(err, MigrateError::Config(_)));
    assert_eq!(std::fs::read(&target).unwrap(), original);
}

#[test]
fn atomic_write_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = standard_source(dir.path());
    let target = standard_target(dir.path());
    let output = dir.path().join("updated.csv");

    run_migration(
        &source,
        &target,
        Some(&output),
        &Settings::default(),
        &default_options(),
        &SilentProgress,
    )
    .unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn case_only_handle_differences_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_csv(
        dir.path(),
        "content.csv",
        &[
            common::SOURCE_HEADER,
            "https://example.com/rings/Tacori.html,Tacori,Fine jewelry.,,",
        ],
    );
    let target = standard_target(dir.path());

    let summary =
        run_migration(&source, &target, None, &Settings::default(), &default_options(), &SilentProgress)
            .unwrap();

    assert_eq!(summary.stats.targets_matched, 0);
    assert_eq!(summary.unmatched_content[0].handle, "Tacori");
    assert_eq!(summary.stats.case_mismatches, 1);
    assert_eq!(summary.case_mismatches[0].target_handle, "tacori");
    assert_eq!(summary.case_mismatches[0].target, 0);

    let mut report = Vec::new();
    write_migration_report(&mut report, &summary).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("Case-only handle mismatches: 1"));
    assert!(report.contains("[CASE] Tacori (source row 1) ~ tacori (target row 1)"));
}
