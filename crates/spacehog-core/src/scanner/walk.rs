use crate::model::ScanError;
use glob::Pattern;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error};

/// How a traversal ended: either every reachable entry was visited, or the
/// stop flag was observed and the walk returned early with partial results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Completed,
    Stopped,
}

/// Compile glob strings, dropping invalid patterns with a logged error.
pub fn compile_ignore_patterns(globs: &[String]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                error!("Invalid glob pattern '{}': {}", glob, err);
                None
            }
        })
        .collect()
}

/// Recursively visit every entry reachable from `root`.
///
/// `on_file` receives each non-directory entry (the sampler decides what
/// counts as a regular file). `on_error` receives one [`ScanError`] per
/// unreadable directory or entry, and the walk continues with siblings.
/// `should_stop` is polled before each directory descent and before each
/// entry, so cancellation latency stays bounded by a single filesystem op.
///
/// Directory recursion is gated on `DirEntry::file_type()`, which never
/// follows symlinks; a link pointing back into an ancestor is therefore
/// never descended into.
///
/// The root itself being unreadable is the one fatal condition and comes
/// back as `Err`; every failure below the root is recorded and skipped.
pub fn walk<F, E, S>(
    root: &Path,
    ignore: &[Pattern],
    on_file: &mut F,
    on_error: &mut E,
    should_stop: &S,
) -> io::Result<WalkStatus>
where
    F: FnMut(fs::DirEntry),
    E: FnMut(ScanError),
    S: Fn() -> bool,
{
    let entries = fs::read_dir(root)?;
    Ok(walk_entries(
        root,
        entries,
        ignore,
        on_file,
        on_error,
        should_stop,
    ))
}

fn walk_entries<F, E, S>(
    dir: &Path,
    entries: fs::ReadDir,
    ignore: &[Pattern],
    on_file: &mut F,
    on_error: &mut E,
    should_stop: &S,
) -> WalkStatus
where
    F: FnMut(fs::DirEntry),
    E: FnMut(ScanError),
    S: Fn() -> bool,
{
    for entry_result in entries {
        if should_stop() {
            return WalkStatus::Stopped;
        }

        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                on_error(ScanError::from_io(dir, &err));
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                on_error(ScanError::from_io(entry.path(), &err));
                continue;
            }
        };

        if file_type.is_dir() {
            if visit_dir(&entry.path(), ignore, on_file, on_error, should_stop)
                == WalkStatus::Stopped
            {
                return WalkStatus::Stopped;
            }
        } else {
            if ignore.iter().any(|p| p.matches_path(&entry.path())) {
                continue;
            }
            on_file(entry);
        }
    }
    WalkStatus::Completed
}

fn visit_dir<F, E, S>(
    dir: &Path,
    ignore: &[Pattern],
    on_file: &mut F,
    on_error: &mut E,
    should_stop: &S,
) -> WalkStatus
where
    F: FnMut(fs::DirEntry),
    E: FnMut(ScanError),
    S: Fn() -> bool,
{
    if should_stop() {
        return WalkStatus::Stopped;
    }

    if ignore.iter().any(|p| p.matches_path(dir)) {
        debug!("ignoring {}", dir.display());
        return WalkStatus::Completed;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // Exactly one error per unreadable directory; siblings go on.
            debug!("skipping unreadable directory {}: {}", dir.display(), err);
            on_error(ScanError::from_io(dir, &err));
            return WalkStatus::Completed;
        }
    };

    walk_entries(dir, entries, ignore, on_file, on_error, should_stop)
}
