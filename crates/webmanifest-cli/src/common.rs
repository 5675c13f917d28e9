//! Common types and utilities shared across commands

use crate::errors::CliError;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webmanifest_config::PluginOptions;
use webmanifest_logger as logger;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Options file (default: $WEBMANIFEST_CONFIG or webmanifest.toml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Write the log to this file instead of the cache directory")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Options file to read
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(PluginOptions::default_path)
    }

    /// Load plugin options
    ///
    /// An explicitly named file must exist; the default location may be absent.
    pub fn load_options(&self) -> Result<PluginOptions, CliError> {
        let path = self.config_path();
        logger::debug(&format!("Loading options from {}", path.display()));
        let options = if self.config.is_some() {
            PluginOptions::load(&path)?
        } else {
            PluginOptions::load_or_default(&path)?
        };
        Ok(options)
    }
}

/// Route library `tracing` events to stderr
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logger::verbosity_to_filter().into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
