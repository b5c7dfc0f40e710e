//! Settings for the strata tools, persisted as `config.ron`.
//!
//! Missing fields fall back to their defaults, so config files written by
//! older builds keep loading. Command-line flags override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CodecConfig, Config, LoggingConfig, ResampleConfig};
pub use error::ConfigError;
