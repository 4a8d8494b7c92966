use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Tracing goes to stderr (pretty, ANSI) and to a non-blocking log file.
/// The returned guard must stay alive for the file writer to flush.
pub fn init_logger() -> impl Drop {
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = env::var("SPACEHOG_LOG_DIR").unwrap_or_else(|_| ".".to_string());
    let file_appender = tracing_appender::rolling::never(log_dir, "spacehog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    guard
}
