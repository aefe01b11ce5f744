use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use plp_migrate_lib::csv_io::read_target_table;
use plp_migrate_lib::urls::save_link_list;
use plp_migrate_lib::{Settings, collection_links};

use crate::CliError;
use crate::cli_types::UrlsArgs;

/// Run the urls command.
pub(crate) fn run_urls(args: UrlsArgs, settings: &Settings) -> Result<(), CliError> {
    let base_url = args
        .base_url
        .as_deref()
        .unwrap_or(&settings.report.base_url);

    let table = read_target_table(&args.target, &settings.target)?;
    let mut links = collection_links(&table, base_url, !args.all);
    let available = links.len();
    if let Some(limit) = args.limit {
        links.truncate(limit);
    }

    log::info!(
        "{}",
        format!("Collection URLs ({} of {})", links.len(), available)
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for (i, link) in links.iter().enumerate() {
        let label = if link.title.is_empty() {
            &link.handle
        } else {
            &link.title
        };
        log::info!(
            "  {:>3}. {} {}",
            i + 1,
            label,
            link.url.if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    if let Some(path) = &args.save {
        save_link_list(path, &links)?;
        log::info!("");
        log::info!(
            "{} Saved {} URLs to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            links.len(),
            path.display(),
        );
    }

    Ok(())
}
