use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HATCH_LOG";

/// `<cache_dir>/hatch`, where `hatch.log` lives.
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("hatch"))
}

/// Install a file-backed subscriber. The terminal belongs to the browser,
/// so nothing is ever logged to stdout or stderr.
///
/// Returns the writer guard; logs are flushed when it drops. `None` means
/// logging is off (no cache directory, or it could not be created).
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("warning: logging disabled, cannot create {}: {e}", dir.display());
        return None;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let appender = tracing_appender::rolling::never(&dir, "hatch.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();

    installed.is_ok().then_some(guard)
}
