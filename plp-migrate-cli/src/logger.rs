//! Logger setup: `log` records go to stdout, and optionally to a log file.
//!
//! Info records are printed as plain messages so commands can use
//! `log::info!` for normal output. Warnings and errors get a colored prefix.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Writes every record to stdout and, with ANSI codes stripped, to a file.
struct TeeWriter {
    stdout: io::Stdout,
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn level_filter(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger.
///
/// `--verbose` wins over `--quiet`. `RUST_LOG`, when set, replaces the
/// level chosen by the flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let file = match logfile {
        Some(path) => Some(File::create(path).map_err(|e| {
            CliError::logger(format!("cannot create log file {}: {}", path.display(), e))
        })?),
        None => None,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_filter(quiet, verbose));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder
        .format(move |buf, record| {
            if verbose {
                write!(
                    buf,
                    "{} ",
                    chrono::Local::now()
                        .format("%H:%M:%S%.3f")
                        .if_supports_color(Stdout, |t| t.dimmed())
                )?;
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                Level::Info => writeln!(buf, "{}", record.args()),
                Level::Debug | Level::Trace => writeln!(
                    buf,
                    "{}",
                    record.args().if_supports_color(Stdout, |t| t.dimmed())
                ),
            }
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter {
            stdout: io::stdout(),
            file,
        })))
        .try_init()
        .map_err(|e| CliError::logger(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(level_filter(true, true), LevelFilter::Debug);
        assert_eq!(level_filter(true, false), LevelFilter::Warn);
        assert_eq!(level_filter(false, false), LevelFilter::Info);
    }

    #[test]
    fn tee_strips_ansi_for_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut tee = TeeWriter {
            stdout: io::stdout(),
            file: Some(File::create(&path).unwrap()),
        };

        tee.write_all(b"\x1b[33mwarning:\x1b[0m careful\n").unwrap();
        tee.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "warning: careful\n");
    }
}
