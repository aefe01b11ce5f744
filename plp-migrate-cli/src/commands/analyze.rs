use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use plp_migrate_lib::report::{save_coverage_report, save_json, to_json};
use plp_migrate_lib::{CollectionStatus, CoverageReport, Settings, analyze_files};

use super::{format_rate, migrate_options};
use crate::CliError;
use crate::cli_types::AnalyzeArgs;

const DEFAULT_LIMIT: usize = 10;

/// Run the analyze command.
pub(crate) fn run_analyze(args: AnalyzeArgs, settings: &Settings) -> Result<(), CliError> {
    let mut settings = settings.clone();
    if let Some(base_url) = args.base_url {
        settings.report.base_url = base_url;
    }
    let options = migrate_options(&settings, args.matching);

    let report = analyze_files(
        &args.source,
        &args.original,
        &args.updated,
        &settings,
        &options,
    )?;

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print_report(&report, args.limit.unwrap_or(DEFAULT_LIMIT));
    }

    if let Some(path) = &args.save_report {
        if args.json {
            save_json(path, &report)?;
        } else {
            save_coverage_report(path, &report, None)?;
        }
        log::info!("Report saved to {}", path.display());
    }

    Ok(())
}

fn print_report(report: &CoverageReport, limit: usize) {
    let stats = &report.stats;

    log::info!(
        "{}",
        "PLP Coverage".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Total collections:  {}", stats.total_targets);
    log::info!("  Content entries:    {}", stats.content_indexed);
    log::info!(
        "  {} Updated:          {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.updated,
        format_rate(stats.update_rate()),
    );
    log::info!("  Not updated:        {}", stats.not_updated);
    log::info!("  Unmatched content:  {}", stats.content_without_match);
    if stats.discrepancies > 0 {
        log::info!(
            "  {} Discrepancies:    {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.discrepancies,
        );
    }

    log::info!("");
    log::info!("{}", "Updated collections:".if_supports_color(Stdout, |t| t.bold()));
    for entry in report.updated().take(limit) {
        log::info!(
            "  {} {}",
            entry.handle.if_supports_color(Stdout, |t| t.cyan()),
            entry.url.if_supports_color(Stdout, |t| t.dimmed()),
        );
        if let CollectionStatus::Updated { changes } = &entry.status {
            for change in changes {
                log::info!("      {}", change.describe());
            }
        }
    }
    print_more(stats.updated, limit);

    log::info!("");
    log::info!("{}", "Not updated:".if_supports_color(Stdout, |t| t.bold()));
    for entry in report.not_updated().take(limit) {
        let note = match entry.status {
            CollectionStatus::NotUpdated { has_content: true } => " (content available)",
            _ => "",
        };
        log::info!(
            "  {} {}{}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            entry.handle,
            note.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    print_more(stats.not_updated, limit);

    if !report.unmatched_content.is_empty() {
        log::info!("");
        log::info!(
            "{}",
            "Content without a matching collection:".if_supports_color(Stdout, |t| t.bold()),
        );
        for item in report.unmatched_content.iter().take(limit) {
            log::info!("  {} \"{}\"", item.handle, item.title);
        }
        print_more(report.unmatched_content.len(), limit);
    }

    if !report.discrepancies.is_empty() {
        log::info!("");
        log::info!("{}", "Discrepancies:".if_supports_color(Stdout, |t| t.bold()));
        for d in report.discrepancies.iter().take(limit) {
            let fields: Vec<_> = d.fields.iter().map(|f| f.field.label()).collect();
            log::warn!("{}: {} differ from rendered content", d.handle, fields.join(", "));
        }
        print_more(report.discrepancies.len(), limit);
    }
}

fn print_more(total: usize, shown: usize) {
    if total > shown {
        log::info!(
            "  {}",
            format!("... and {} more", total - shown).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
