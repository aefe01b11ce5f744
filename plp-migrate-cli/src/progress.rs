//! Terminal progress for the migrate command.

use std::cell::OnceCell;

use indicatif::{ProgressBar, ProgressStyle};
use plp_migrate_lib::MigrateProgress;

/// Shows a progress bar while matched rows are updated.
///
/// The bar is hidden under `--quiet`, and under `--verbose` where per-row
/// debug output would interleave with it.
pub(crate) struct CliMigrateProgress {
    hidden: bool,
    bar: OnceCell<ProgressBar>,
}

impl CliMigrateProgress {
    pub(crate) fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            hidden: quiet || verbose,
            bar: OnceCell::new(),
        }
    }

    fn bar(&self, total: usize) -> &ProgressBar {
        self.bar.get_or_init(|| {
            if self.hidden {
                return ProgressBar::hidden();
            }
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .expect("static pattern")
                    .progress_chars("=> "),
            );
            pb
        })
    }
}

impl MigrateProgress for CliMigrateProgress {
    fn on_phase(&self, message: &str) {
        if let Some(pb) = self.bar.get() {
            pb.finish_and_clear();
        }
        log::info!("{}", message);
    }

    fn on_record(&self, current: usize, total: usize, handle: &str) {
        let pb = self.bar(total);
        pb.set_position(current as u64);
        pb.set_message(handle.to_string());
    }

    fn on_complete(&self, message: &str) {
        if let Some(pb) = self.bar.get() {
            pb.finish_and_clear();
        }
        log::info!("{}", message);
    }
}
