//! Tracing subscriber setup for the strata tools.
//!
//! Console output is human-readable with uptime stamps. When enabled in the
//! config, a JSON copy of every event goes to `strata.log` in the log
//! directory. `RUST_LOG` takes precedence over the configured level.

use std::path::{Path, PathBuf};

use strata_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log inside the log directory.
pub const LOG_FILE: &str = "strata.log";

const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Call once, at startup.
///
/// Returns the path of the JSON log file if file logging was set up.
pub fn init_logging(config: Option<&Config>) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(config) = config
        && config.logging.file_logging
        && let Some((path, log_file)) = open_log_file(config.logging.log_dir.as_deref())
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return Some(path);
    }

    subscriber.init();
    None
}

/// Filter directive from the config, or `info` when unset.
fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.logging.level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// The JSON log directory: the configured one, else `./logs`.
fn open_log_file(log_dir: Option<&Path>) -> Option<(PathBuf, std::fs::File)> {
    let dir = log_dir.unwrap_or(Path::new("logs"));
    std::fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = std::fs::File::create(&path).ok()?;
    Some((path, file))
}

/// An `EnvFilter` with the default directive.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
