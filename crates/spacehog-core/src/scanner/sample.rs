use crate::model::ScanError;
use std::fs;

/// Size of the entry, metadata only — no content is read.
///
/// Policy: symlinks and other non-regular entries (sockets, fifos, device
/// nodes) yield `Ok(None)` and are skipped silently, matching the "files"
/// semantics of the result set. A broken link therefore produces neither a
/// record nor an error. Stat failures — permission denied, or the file
/// vanishing between discovery and stat — come back classified as
/// [`ScanError`], never as a fatal condition.
pub fn sample(entry: &fs::DirEntry) -> Result<Option<u64>, ScanError> {
    let file_type = entry
        .file_type()
        .map_err(|err| ScanError::from_io(entry.path(), &err))?;

    if !file_type.is_file() {
        return Ok(None);
    }

    entry
        .metadata()
        .map(|meta| Some(meta.len()))
        .map_err(|err| ScanError::from_io(entry.path(), &err))
}
