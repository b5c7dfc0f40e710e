//! Command-line overrides shared by the strata binaries.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global flags. Values given here override `config.ron`.
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Resample worker threads (0 = one per CPU).
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(threads) = args.threads {
            self.resample.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CliArgs,
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            threads: Some(4),
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.resample.threads, 4);
        // Non-overridden fields retain defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let harness =
            Harness::try_parse_from(["strata", "--log-level", "debug", "--config", "/tmp/s"])
                .unwrap();
        assert_eq!(harness.args.log_level.as_deref(), Some("debug"));
        assert_eq!(harness.args.config, Some(PathBuf::from("/tmp/s")));
        assert_eq!(harness.args.threads, None);
    }
}
