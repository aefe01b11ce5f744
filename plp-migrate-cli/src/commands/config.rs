use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use plp_migrate_lib::{BASE_URL_ENV, Settings, settings_path, write_default_settings};

use crate::CliError;

fn resolve_path(config: Option<&Path>) -> PathBuf {
    config.map(Path::to_path_buf).unwrap_or_else(settings_path)
}

/// Show the effective settings and their source.
pub(crate) fn run_config_show(config: Option<&Path>) -> Result<(), CliError> {
    let path = resolve_path(config);
    let settings = Settings::load(config)?;

    log::info!(
        "{}",
        "PLP Migrate Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if std::env::var(BASE_URL_ENV).is_ok() {
        log::info!(
            "  Base URL from {}",
            BASE_URL_ENV.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    log::info!("");

    for line in settings.to_toml_string()?.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(config: Option<&Path>) {
    println!("{}", resolve_path(config).display());
}

/// Write a settings file with default values.
pub(crate) fn run_config_init(config: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = resolve_path(config);
    write_default_settings(&path, force)?;
    log::info!(
        "{} Settings written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
