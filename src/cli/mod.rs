//! Command-line interface for tabdeck.
//!
//! This module handles CLI argument parsing and dispatch. The subcommand
//! procedures live in the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabdeck_config::Config;

/// tabdeck - Inspect and maintain saved editor tab sessions
#[derive(Parser, Debug)]
#[command(name = "tabdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tabs of a saved session (default command)
    Inspect {
        /// Session file (defaults to the configured session file)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Validate a saved session against the store invariants
    Check {
        /// Session file (defaults to the configured session file)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Measure a file against a content delimiter
    Measure {
        /// File to measure
        path: PathBuf,

        /// Unit to count in: characters, bytes or lines
        #[arg(long, value_name = "UNITS")]
        units: Option<String>,

        /// Maximum size (defaults to the configured tab delimiter)
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Print the content cut down to the limit
        #[arg(long)]
        truncate: bool,
    },

    /// Print the effective configuration
    Config {
        /// Print only the configuration file path
        #[arg(long)]
        path: bool,
    },
}

/// Process CLI arguments, run the chosen subcommand and return the exit code
pub fn process_cli() -> i32 {
    let cli = Cli::parse();

    let config_result = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config_result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tabdeck: error: {e:#}");
            return 1;
        }
    };

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config.
    crate::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()), config.log_level);
    log::info!("Starting tabdeck {}", crate::VERSION);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let command = cli.command.unwrap_or(Commands::Inspect { file: None });
    let mut out = std::io::stdout().lock();

    let result = match command {
        Commands::Inspect { file } => {
            let path = file.unwrap_or_else(|| config.session_path());
            commands::inspect(&mut out, &path)
        }
        Commands::Check { file } => {
            let path = file.unwrap_or_else(|| config.session_path());
            commands::check(&mut out, &config, &path)
        }
        Commands::Measure {
            path,
            units,
            limit,
            truncate,
        } => commands::measure(
            &mut out,
            &config,
            &path,
            units.as_deref(),
            limit,
            truncate,
        ),
        Commands::Config { path } => commands::show_config(&mut out, &config, &config_path, path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("tabdeck: error: {e:#}");
            1
        }
    }
}
