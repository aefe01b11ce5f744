use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use plp_migrate_lib::csv_io::read_target_table;
use plp_migrate_lib::{CheckOutcome, Settings, check_expectations};

use crate::CliError;
use crate::cli_types::CheckArgs;

/// Run the check command. Fails if any expectation is not met.
pub(crate) fn run_check(args: CheckArgs, settings: &Settings) -> Result<(), CliError> {
    let base_url = args
        .base_url
        .as_deref()
        .unwrap_or(&settings.report.base_url);

    let table = read_target_table(&args.updated, &settings.target)?;
    let results = check_expectations(&table, &args.expectations, base_url);

    for result in &results {
        let expectation = &result.expectation;
        match &result.outcome {
            CheckOutcome::Passed {
                title_matches,
                has_body,
                has_subheading,
                body_preview,
            } => {
                log::info!(
                    "{} {} ({})",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    expectation.handle.if_supports_color(Stdout, |t| t.bold()),
                    result.url.if_supports_color(Stdout, |t| t.dimmed()),
                );
                log::info!(
                    "    title matches: {}, body: {}, subheading: {}",
                    yes_no(*title_matches),
                    yes_no(*has_body),
                    yes_no(*has_subheading),
                );
                if !body_preview.is_empty() {
                    log::info!("    {}", body_preview.if_supports_color(Stdout, |t| t.dimmed()));
                }
            }
            CheckOutcome::NoContent { actual_title } => {
                log::info!(
                    "{} {}: no content (title is \"{}\", expected \"{}\")",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    expectation.handle.if_supports_color(Stdout, |t| t.bold()),
                    actual_title,
                    expectation.title,
                );
            }
            CheckOutcome::NotFound => {
                log::info!(
                    "{} {}: not found",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    expectation.handle.if_supports_color(Stdout, |t| t.bold()),
                );
            }
        }
    }

    let failed = results.iter().filter(|r| !r.passed()).count();
    log::info!("");
    log::info!("{} of {} checks passed", results.len() - failed, results.len());

    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
