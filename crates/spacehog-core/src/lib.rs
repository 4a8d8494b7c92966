pub mod config;
pub mod deleter;
pub mod engine;
pub mod error;
pub mod format;
pub mod model;
pub mod progress;
pub mod scanner;
pub mod store;

pub use config::AppConfig;
pub use engine::{ScanEngine, ScanHandle, ScanOptions};
pub use error::Error;
pub use model::{
    DeletionResult, FileRecord, ProgressUpdate, ScanError, ScanErrorKind, ScanState, ScanSummary,
};
pub use progress::{ProgressReporter, SilentReporter};
