/// Trait for reporting pipeline progress.
///
/// CLI implements with indicatif; tests use [`SilentReporter`].
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _files_found: usize, _duration_secs: f64) {}
    fn on_relocate_start(&self) {}
    fn on_relocate_progress(&self, _files_processed: usize, _total_files: usize) {}
    fn on_relocate_complete(&self, _files_moved: usize, _files_skipped: usize, _duration_secs: f64) {
    }
    fn on_rescan_complete(&self, _files_found: usize, _duration_secs: f64) {}
    fn on_detect_start(&self) {}
    fn on_detect_progress(&self, _files_hashed: usize, _total_files: usize) {}
    fn on_detect_complete(&self, _total_groups: usize, _duration_secs: f64) {}
    fn on_purge_start(&self) {}
    fn on_purge_complete(&self, _files_removed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
