//! Migration progress reporting.

/// Trait for receiving migration progress updates.
pub trait MigrateProgress {
    /// Called when a phase starts (e.g., "Loading source content").
    fn on_phase(&self, message: &str);

    /// Called after each matched target row is updated.
    fn on_record(&self, current: usize, total: usize, handle: &str);

    /// Called when the migration is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl MigrateProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_record(&self, _current: usize, _total: usize, _handle: &str) {}
    fn on_complete(&self, _message: &str) {}
}
