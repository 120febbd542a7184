use indicatif::{ProgressBar, ProgressStyle};
use shutter_sort_core::ProgressReporter;
use std::sync::Mutex;

/// CLI progress reporter using indicatif progress bars.
///
/// - Scan phase: spinner (unknown total files upfront)
/// - Relocate phase: progress bar (total known from the scan)
/// - Detect phase: progress bar over files hashed
/// - Purge phase: spinner
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }

    fn spinner(&self, message: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn counted_bar(&self, verb: &str) {
        // Length is set on the first progress callback.
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template(&format!(
                "  {{spinner:.cyan}} {verb} [{{bar:30.cyan/dim}}] {{pos}}/{{len}} files ({{eta}} remaining)",
            ))
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn advance(&self, position: usize, total: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            if pb.length() != Some(total as u64) {
                pb.set_length(total as u64);
            }
            pb.set_position(position as u64);
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        self.spinner("Scanning for photos...");
    }

    fn on_scan_complete(&self, files_found: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} photos in {:.2}s",
            files_found, duration_secs
        );
    }

    fn on_relocate_start(&self) {
        self.counted_bar("Relocating");
    }

    fn on_relocate_progress(&self, files_processed: usize, total_files: usize) {
        self.advance(files_processed, total_files);
    }

    fn on_relocate_complete(&self, files_moved: usize, files_skipped: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Relocation complete: {} moved, {} skipped in {:.2}s",
            files_moved, files_skipped, duration_secs
        );
    }

    fn on_rescan_complete(&self, files_found: usize, duration_secs: f64) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Rescan complete: {} sorted photos in {:.2}s",
            files_found, duration_secs
        );
    }

    fn on_detect_start(&self) {
        self.counted_bar("Hashing");
    }

    fn on_detect_progress(&self, files_hashed: usize, total_files: usize) {
        self.advance(files_hashed, total_files);
    }

    fn on_detect_complete(&self, total_groups: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Detection complete: {} duplicate groups in {:.2}s",
            total_groups, duration_secs
        );
    }

    fn on_purge_start(&self) {
        self.spinner("Purging duplicate copies...");
    }

    fn on_purge_complete(&self, files_removed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Purge complete: {} copies removed in {:.2}s",
            files_removed, duration_secs
        );
    }
}
