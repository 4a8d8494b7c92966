use crate::model::DeletionResult;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Attempt to remove every path in `paths`, in order.
///
/// Destructive and irreversible — callers are expected to obtain explicit
/// confirmation before invoking this; the service itself never prompts.
/// Individual failures (permission denied, already vanished) never abort
/// the batch: each path gets its own [`DeletionResult`] with a classified
/// reason. The scan result store is not touched here; callers reconcile
/// their own view from the returned results.
///
/// Safe to run regardless of scan state. Deleting under a live scan simply
/// surfaces as a later "vanished" scan error from the walker.
pub fn delete_files(paths: &[PathBuf]) -> Vec<DeletionResult> {
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("deleted {}", path.display());
                results.push(DeletionResult::ok(path.clone()));
            }
            Err(err) => {
                warn!("failed to delete {}: {}", path.display(), err);
                results.push(DeletionResult::failed(path, &err));
            }
        }
    }

    let failed = results.iter().filter(|r| !r.succeeded).count();
    info!(
        "Deletion batch finished: {} succeeded, {} failed",
        results.len() - failed,
        failed
    );
    results
}
