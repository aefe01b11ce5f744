//! plp-migrate CLI
//!
//! Command-line interface for migrating product listing page content into a
//! collections export.

mod cli_types;
mod commands;
mod error;
mod logger;
mod progress;

use clap::Parser;

use plp_migrate_lib::Settings;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Migrate(args) => {
            let settings = Settings::load(config)?;
            commands::migrate::run_migrate(args, &settings, cli.quiet, cli.verbose)
        }
        Commands::Analyze(args) => {
            let settings = Settings::load(config)?;
            commands::analyze::run_analyze(args, &settings)
        }
        Commands::Urls(args) => {
            let settings = Settings::load(config)?;
            commands::urls::run_urls(args, &settings)
        }
        Commands::Check(args) => {
            let settings = Settings::load(config)?;
            commands::check::run_check(args, &settings)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(config),
            ConfigAction::Path => {
                commands::config::run_config_path(config);
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(config, force),
        },
    }
}
