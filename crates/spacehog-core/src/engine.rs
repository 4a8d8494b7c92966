use crate::config::AppConfig;
use crate::error::Error;
use crate::format::{format_size, ParseSizeError};
use crate::model::{FileRecord, ProgressUpdate, ScanState, ScanSummary};
use crate::progress::ProgressReporter;
use crate::scanner::{self, WalkStatus};
use crate::store::ResultStore;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Batching policy and walk filters for one engine.
///
/// Re-sorting on every discovery would be O(n log n) per file; instead the
/// store is re-sorted (and a progress event emitted) every
/// `sort_batch_size` records or every `progress_interval`, whichever fires
/// first.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub sort_batch_size: usize,
    pub progress_interval: Duration,
    pub ignore_patterns: Vec<String>,
    pub min_size_bytes: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            sort_batch_size: 500,
            progress_interval: Duration::from_millis(500),
            ignore_patterns: Vec::new(),
            min_size_bytes: 0,
        }
    }
}

impl ScanOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self, ParseSizeError> {
        Ok(Self {
            sort_batch_size: config.sort_batch_size.max(1),
            progress_interval: Duration::from_millis(config.progress_interval_ms),
            ignore_patterns: config.ignore_patterns.clone(),
            min_size_bytes: config.min_size_bytes()?,
        })
    }
}

/// Orchestrates scan sessions: owns the cancellation token and the state
/// machine, runs the walker/sampler pipeline on a background thread, and
/// applies the batching policy. At most one session runs at a time; a
/// second `start` while one is active fails with [`Error::SessionBusy`].
pub struct ScanEngine {
    options: ScanOptions,
    current: Mutex<Arc<SessionShared>>,
}

struct SessionShared {
    state: Mutex<ScanState>,
    cancel: AtomicBool,
    store: Mutex<ResultStore>,
}

impl SessionShared {
    fn new(state: ScanState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            cancel: AtomicBool::new(false),
            store: Mutex::new(ResultStore::new()),
        })
    }
}

impl ScanEngine {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            current: Mutex::new(SessionShared::new(ScanState::Idle)),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScanOptions::default())
    }

    /// State of the most recent session.
    pub fn state(&self) -> ScanState {
        *self.current.lock().unwrap().state.lock().unwrap()
    }

    /// Start scanning `root` on a background thread.
    ///
    /// Fails with [`Error::InvalidRoot`] if `root` is not an existing
    /// directory and with [`Error::SessionBusy`] if a session is already
    /// active; the running session is left untouched in that case.
    pub fn start(
        &self,
        root: impl Into<PathBuf>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Result<ScanHandle, Error> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::InvalidRoot(root));
        }

        // Every session gets its own shared block: a handle retained from
        // a finished session keeps pointing at that session's state and
        // results and can never stop or observe a later one.
        let shared = {
            let mut current = self.current.lock().unwrap();
            if matches!(
                *current.state.lock().unwrap(),
                ScanState::Running | ScanState::Stopping
            ) {
                return Err(Error::SessionBusy);
            }
            let fresh = SessionShared::new(ScanState::Running);
            *current = Arc::clone(&fresh);
            fresh
        };

        let options = self.options.clone();
        let thread_root = root.clone();
        let thread_shared = Arc::clone(&shared);
        let join =
            thread::spawn(move || run_scan(thread_shared, options, thread_root, reporter));

        Ok(ScanHandle { shared, join })
    }

    /// Convenience wrapper: start and block until the terminal summary.
    pub fn scan_blocking(
        &self,
        root: impl Into<PathBuf>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Result<ScanSummary, Error> {
        Ok(self.start(root, reporter)?.wait())
    }
}

/// Handle to one scan session. Dropping it does not stop the scan; call
/// [`ScanHandle::stop`] or block on [`ScanHandle::wait`].
pub struct ScanHandle {
    shared: Arc<SessionShared>,
    join: thread::JoinHandle<ScanSummary>,
}

impl ScanHandle {
    /// Request cooperative cancellation. Safe to call any number of times
    /// and a no-op once the session has reached a terminal state; stopping
    /// is a normal termination, not an error. The handle only ever affects
    /// its own session, never one started later on the same engine.
    pub fn stop(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if *state == ScanState::Running {
            *state = ScanState::Stopping;
        }
        if *state == ScanState::Stopping {
            self.shared.cancel.store(true, Ordering::Relaxed);
        }
    }

    pub fn state(&self) -> ScanState {
        *self.shared.state.lock().unwrap()
    }

    /// Sorted copy of everything accumulated so far. Never observes a
    /// mid-sort set: a dirty store is sorted before anything is exposed.
    pub fn snapshot(&self) -> (Vec<FileRecord>, Vec<crate::model::ScanError>) {
        self.shared.store.lock().unwrap().snapshot()
    }

    /// Block until the background walk finishes and return the summary.
    pub fn wait(self) -> ScanSummary {
        self.join.join().expect("scan thread panicked")
    }
}

fn run_scan(
    shared: Arc<SessionShared>,
    options: ScanOptions,
    root: PathBuf,
    reporter: Arc<dyn ProgressReporter>,
) -> ScanSummary {
    let started_at = Utc::now();
    let walk_start = Instant::now();
    info!("Scanning {}", root.display());
    reporter.on_scan_start(&root);

    let ignore = scanner::compile_ignore_patterns(&options.ignore_patterns);

    let mut files_scanned: u64 = 0;
    let mut since_sort: usize = 0;
    let mut last_emit = Instant::now();

    let walk_result = {
        let mut on_file = |entry: fs::DirEntry| match scanner::sample(&entry) {
            Ok(Some(size)) if size >= options.min_size_bytes => {
                let path = entry.path();
                files_scanned += 1;
                since_sort += 1;

                let mut store = shared.store.lock().unwrap();
                store.append(FileRecord {
                    path: path.clone(),
                    size_bytes: size,
                });

                if since_sort >= options.sort_batch_size
                    || last_emit.elapsed() >= options.progress_interval
                {
                    store.sort();
                    let update = ProgressUpdate {
                        files_scanned,
                        total_bytes: store.total_bytes(),
                        error_count: store.error_count() as u64,
                        current_path: path,
                    };
                    // Release the store before calling out, so reporters
                    // may take snapshots.
                    drop(store);
                    reporter.on_scan_progress(&update);
                    since_sort = 0;
                    last_emit = Instant::now();
                }
            }
            Ok(_) => {} // non-regular entry or below the size floor
            Err(scan_error) => {
                debug!("sample failed: {}", scan_error);
                shared.store.lock().unwrap().push_error(scan_error);
            }
        };

        let mut on_error = |scan_error: crate::model::ScanError| {
            debug!("walk error: {}", scan_error);
            shared.store.lock().unwrap().push_error(scan_error);
        };

        let should_stop = || shared.cancel.load(Ordering::Relaxed);

        scanner::walk(&root, &ignore, &mut on_file, &mut on_error, &should_stop)
    };

    let (terminal_state, status) = match walk_result {
        Ok(status) => (ScanState::Completed, status),
        Err(err) => {
            error!("Scan failed: cannot read {}: {}", root.display(), err);
            let scan_error = crate::model::ScanError::from_io(&root, &err);
            shared.store.lock().unwrap().push_error(scan_error);
            (ScanState::Failed, WalkStatus::Completed)
        }
    };

    // Final sort pass; the snapshot also becomes the terminal record set.
    let (records, errors) = shared.store.lock().unwrap().snapshot();
    let total_bytes = records.iter().map(|r| r.size_bytes).sum();

    // Terminal state is published before the completion callback so that
    // stop() observed afterwards is a no-op.
    *shared.state.lock().unwrap() = terminal_state;

    let summary = ScanSummary {
        root,
        state: terminal_state,
        records,
        errors,
        files_scanned,
        total_bytes,
        started_at,
        ended_at: Utc::now(),
    };

    debug!(
        "walk finished in {:.2}s ({:?})",
        walk_start.elapsed().as_secs_f64(),
        status
    );
    info!(
        "Scan {}: {} files, {} total, {} errors",
        match (terminal_state, status) {
            (ScanState::Failed, _) => "failed",
            (_, WalkStatus::Stopped) => "stopped",
            _ => "complete",
        },
        summary.files_scanned,
        format_size(summary.total_bytes),
        summary.errors.len(),
    );

    reporter.on_scan_complete(&summary);
    summary
}
