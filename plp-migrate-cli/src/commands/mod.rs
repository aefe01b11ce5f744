pub(crate) mod analyze;
pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod migrate;
pub(crate) mod urls;

use plp_migrate_lib::{HandleExtractor, MigrateOptions, Settings};

use crate::cli_types::MatchingArgs;

/// Options from settings with any command-line overrides applied.
pub(crate) fn migrate_options(settings: &Settings, matching: MatchingArgs) -> MigrateOptions {
    let mut options = MigrateOptions::from_settings(settings);
    if let Some(policy) = matching.policy {
        options.policy = policy;
    }
    if let Some(suffix) = matching.suffix {
        options.extractor = HandleExtractor::with_suffix(suffix);
    }
    if let Some(format) = matching.description_format {
        options.render = options.render.description_format(format);
    }
    options
}

/// Format a percentage, or "n/a" when it is undefined.
pub(crate) fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r),
        None => "n/a".to_string(),
    }
}
