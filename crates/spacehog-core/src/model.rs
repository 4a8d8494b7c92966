use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

/// A discovered regular file: its path and the size observed at sampling
/// time. Immutable once created; the file itself may vanish afterwards
/// (TOCTOU races surface as deletion-time errors, not scan bugs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    PermissionDenied,
    NotFound,
    Other,
}

impl ScanErrorKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "not-found",
            Self::Other => "other",
        }
    }
}

/// A per-path failure during traversal, sampling, or deletion. Accumulated
/// as data, never raised across the scan boundary.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub path: PathBuf,
    pub kind: ScanErrorKind,
    pub message: String,
}

impl ScanError {
    pub fn from_io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self {
            path: path.into(),
            kind: ScanErrorKind::from_io(err),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.path.display(),
            self.kind.as_str(),
            self.message
        )
    }
}

/// Lifecycle of a scan session. Stopping is a normal path to Completed;
/// Failed is reserved for root-level failures only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Running,
    Stopping,
    Completed,
    Failed,
}

/// Lightweight counters sent while a scan is running. Record snapshots are
/// pulled from the handle instead of being pushed with every update.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub files_scanned: u64,
    pub total_bytes: u64,
    pub error_count: u64,
    pub current_path: PathBuf,
}

/// Terminal report for one scan session.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub root: PathBuf,
    pub state: ScanState,
    /// Sorted descending by size; ties keep discovery order.
    pub records: Vec<FileRecord>,
    pub errors: Vec<ScanError>,
    pub files_scanned: u64,
    pub total_bytes: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl ScanSummary {
    pub fn duration(&self) -> chrono::Duration {
        self.ended_at - self.started_at
    }
}

/// Outcome of one attempted deletion.
#[derive(Debug, Clone)]
pub struct DeletionResult {
    pub path: PathBuf,
    pub succeeded: bool,
    pub error: Option<ScanError>,
}

impl DeletionResult {
    pub fn ok(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            succeeded: true,
            error: None,
        }
    }

    pub fn failed(path: &Path, err: &io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            succeeded: false,
            error: Some(ScanError::from_io(path, err)),
        }
    }
}
