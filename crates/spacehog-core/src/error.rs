use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid root '{0}': path does not exist or is not a directory")]
    InvalidRoot(PathBuf),

    #[error("a scan session is already running")]
    SessionBusy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
