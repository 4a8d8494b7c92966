use crate::model::{FileRecord, ScanError};

/// Growing collection of scan results. Append is O(1); sorting is explicit
/// and invoked by the engine's batching policy, never implicitly on append.
///
/// The sort is stable and keyed on size descending, so records of equal
/// size keep their discovery order — results are deterministic across runs
/// on an unchanged tree. `snapshot` sorts a dirty store before exposing
/// anything, so observers never see an unsorted or mid-sort set.
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<FileRecord>,
    errors: Vec<ScanError>,
    total_bytes: u64,
    dirty: bool,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: FileRecord) {
        self.total_bytes += record.size_bytes;
        self.records.push(record);
        self.dirty = true;
    }

    pub fn push_error(&mut self, error: ScanError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Re-sort if any record arrived since the last sort.
    pub fn sort(&mut self) {
        if self.dirty {
            self.records
                .sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
            self.dirty = false;
        }
    }

    /// Sorted copies of the current records and errors.
    pub fn snapshot(&mut self) -> (Vec<FileRecord>, Vec<ScanError>) {
        self.sort();
        (self.records.clone(), self.errors.clone())
    }

    /// Consume the store, yielding sorted records and errors.
    pub fn into_parts(mut self) -> (Vec<FileRecord>, Vec<ScanError>) {
        self.sort();
        (self.records, self.errors)
    }
}
