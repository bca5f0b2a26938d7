//! File-based tracing setup. The terminal belongs to the UI, so nothing is
//! ever written to stdout or stderr while a session is on screen.

use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

pub const LOG_ENV: &str = "TYPESPEED_LOG";

/// Pick the filter directive: command line, then environment, then config.
pub fn resolve_filter(cli: Option<&str>, env: Option<&str>, config: &str) -> String {
    [cli, env]
        .into_iter()
        .flatten()
        .find(|f| !f.trim().is_empty())
        .unwrap_or(config)
        .to_string()
}

pub fn parse_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|source| AppError::LogFilter {
        filter: filter.to_string(),
        source,
    })
}

/// Install the global subscriber writing to `log_path`.
///
/// Returns the writer guard, which must stay alive for buffered lines to be
/// flushed. `None` means a subscriber was already installed.
pub fn init(log_path: &Path, filter: &str) -> Result<Option<WorkerGuard>> {
    let filter = parse_filter(filter)?;

    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "typespeed.log".into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if !installed {
        return Ok(None);
    }

    install_panic_hook();
    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(Some(guard))
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
