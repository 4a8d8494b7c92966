use crate::model::{ProgressUpdate, ScanSummary};
use std::path::Path;

/// Trait for reporting scan progress.
///
/// The CLI implements this with an indicatif spinner; other frontends can
/// bridge it to whatever event system they use. Progress events arrive in
/// non-decreasing `files_scanned` order, and nothing is delivered after
/// `on_scan_complete`. All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self, _root: &Path) {}
    fn on_scan_progress(&self, _update: &ProgressUpdate) {}
    fn on_scan_complete(&self, _summary: &ScanSummary) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
