use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use plp_migrate_lib::report::save_migration_report;
use plp_migrate_lib::{Settings, run_migration};

use super::{format_rate, migrate_options};
use crate::CliError;
use crate::cli_types::MigrateArgs;
use crate::progress::CliMigrateProgress;

/// Run the migrate command.
pub(crate) fn run_migrate(
    args: MigrateArgs,
    settings: &Settings,
    quiet: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let mut options = migrate_options(settings, args.matching);
    options.strict = args.strict;

    let output = if args.dry_run {
        None
    } else {
        Some(
            args.output
                .as_deref()
                .ok_or_else(|| CliError::config("--output is required unless --dry-run is set"))?,
        )
    };

    log::info!(
        "{}",
        "PLP Content Migration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Source: {}", args.source.display());
    log::info!("  Target: {}", args.target.display());
    match output {
        Some(path) => log::info!("  Output: {}", path.display()),
        None => log::info!(
            "  Output: {}",
            "(dry run)".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
    log::debug!(
        "Collision policy: {}, suffix: '{}', description format: {}",
        options.policy,
        options.extractor.suffix(),
        options.render.description_format,
    );
    log::info!("");

    let progress = CliMigrateProgress::new(quiet, verbose);
    let summary = run_migration(
        &args.source,
        &args.target,
        output,
        settings,
        &options,
        &progress,
    )?;
    let stats = &summary.stats;

    log::info!("");
    log::info!("{}", "Summary".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Source records:       {}", stats.sources_loaded);
    log::info!("  Handles indexed:      {}", stats.handles_indexed);
    log::info!("  Target collections:   {}", stats.targets_loaded);
    log::info!(
        "  {} Collections updated: {} ({} changed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.targets_matched,
        summary.rows_changed,
    );
    log::info!("  Without new content:  {}", stats.targets_unmatched);
    log::info!("  Unused content:       {}", stats.sources_unmatched);
    if stats.collisions > 0 {
        log::info!(
            "  {} Duplicate handles:  {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.collisions,
        );
    }
    if stats.malformed > 0 {
        log::info!(
            "  {} Malformed URLs:     {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.malformed,
        );
    }
    if stats.case_mismatches > 0 {
        log::info!(
            "  {} Case-only matches:  {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.case_mismatches,
        );
    }
    log::info!(
        "  Match rate:           {}",
        format_rate(summary.match_rate()).if_supports_color(Stdout, |t| t.cyan()),
    );

    if !summary.unmatched_content.is_empty() {
        log::info!("");
        log::info!(
            "{}",
            "Content without a matching collection:".if_supports_color(Stdout, |t| t.bold()),
        );
        for item in &summary.unmatched_content {
            log::info!(
                "  {} {} ({})",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                item.handle,
                item.url.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    if let Some(path) = &args.report {
        save_migration_report(path, &summary)?;
        log::info!("");
        log::info!("Report saved to {}", path.display());
    }

    Ok(())
}
