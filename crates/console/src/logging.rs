//! Logging setup for the console binary.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Setup logging to a session log file, with warnings mirrored to stderr.
///
/// The command log itself is printed by the REPL; tracing output goes to
/// the file so it never interleaves with the operator prompt.
pub fn setup_logging() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "console.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Keep the file writer alive for the process lifetime.
    std::mem::forget(guard);

    tracing::info!("Logging initialized: {}/console.log", log_dir.display());
    Ok(())
}

/// Log directory: `AURA_LOG_DIR`, or `./logs` next to the binary.
fn log_directory() -> PathBuf {
    std::env::var_os("AURA_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"))
}
