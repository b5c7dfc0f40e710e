//! `strata`: inspect, rescale and snapshot world files.
//!
//! Run `strata info world.woen` to print a summary, or
//! `strata rescale world.woen --width 1024 --height 512 --output big.woen`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strata_config::{CliArgs, Config};

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "World raster stack tools")]
struct Cli {
    #[command(flatten)]
    global: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metadata and layer summary of a world file.
    Info {
        file: PathBuf,
    },
    /// Resample every layer of a world to a new size.
    Rescale {
        file: PathBuf,
        #[arg(long)]
        width: usize,
        #[arg(long)]
        height: usize,
        /// Output world file.
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Dump a world file as a RON snapshot.
    Snapshot {
        file: PathBuf,
        /// Output snapshot file.
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // An explicit --config wins; otherwise the per-user directory, if any.
    let config_dir = cli.global.config.clone().or_else(|| Config::default_dir().ok());

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&cli.global);
    if config.logging.log_dir.is_none() {
        config.logging.log_dir = config_dir.map(|dir| dir.join("logs"));
    }

    strata_log::init_logging(Some(&config));

    let result = match cli.command {
        Command::Info { file } => commands::info(&file),
        Command::Rescale {
            file,
            width,
            height,
            output,
        } => commands::rescale(&file, width, height, &output, &config),
        Command::Snapshot { file, output } => commands::snapshot(&file, &output),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
