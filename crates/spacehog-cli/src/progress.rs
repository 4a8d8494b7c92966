use indicatif::{ProgressBar, ProgressStyle};
use spacehog_core::format::format_size;
use spacehog_core::{ProgressReporter, ProgressUpdate, ScanState, ScanSummary};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// CLI progress reporter: a single spinner with live file/byte counters.
/// Record snapshots are not rendered live; the table is printed once the
/// terminal summary arrives.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, root: &Path) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("Scanning {}...", root.display()));
        pb.enable_steady_tick(Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn on_scan_progress(&self, update: &ProgressUpdate) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_message(format!(
                "Scanning... {} files found, {}",
                update.files_scanned,
                format_size(update.total_bytes)
            ));
        }
    }

    fn on_scan_complete(&self, summary: &ScanSummary) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }

        let secs = summary.duration().num_milliseconds() as f64 / 1000.0;
        let label = match summary.state {
            ScanState::Failed => "\x1b[31m✗\x1b[0m Scan failed",
            _ => "\x1b[32m✓\x1b[0m Scan complete",
        };
        eprintln!(
            "  {}: {} files, {} in {:.2}s",
            label,
            summary.files_scanned,
            format_size(summary.total_bytes),
            secs
        );
    }
}
