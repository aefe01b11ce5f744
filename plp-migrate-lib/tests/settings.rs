use plp_migrate_lib::settings::{Settings, write_default_settings};
use plp_migrate_lib::{CollisionPolicy, ContentFormat, MigrateError};

#[test]
fn explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
    assert!(matches!(err, MigrateError::FileNotFound { .. }));
}

#[test]
fn init_writes_loadable_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plp-migrate").join("settings.toml");

    write_default_settings(&path, false).unwrap();
    let loaded = Settings::from_file(&path).unwrap();
    assert_eq!(loaded, Settings::default());

    let err = write_default_settings(&path, false).unwrap_err();
    assert!(matches!(err, MigrateError::Config(_)));
    write_default_settings(&path, true).unwrap();
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[source]
url = "Page URL"

[matching]
url_suffix = ".htm"
collision_policy = "first-wins"

[render]
description_format = "text"
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.source.url, "Page URL");
    assert_eq!(settings.source.title, "Title");
    assert_eq!(settings.matching.collision_policy, CollisionPolicy::FirstWins);
    assert_eq!(settings.render.description_format, ContentFormat::Text);
    assert_eq!(
        settings.extractor().extract("https://x.com/a/rings.htm").unwrap().as_str(),
        "rings"
    );
}
