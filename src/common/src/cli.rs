//! CLI bootstrap shared by the sweeper binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use crate::config::Configuration;

/// Initialize logging based on verbosity flags. `RUST_LOG` wins when set.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parse CLI arguments with the sweeper exit-code contract: help and
/// version exit 0, any argument error prints the usage message and
/// exits 1.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

/// Load configuration with an optional file override from the CLI.
pub fn load_config(path: Option<&PathBuf>) -> Result<Configuration> {
    let loaded = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            Configuration::load_from_path(path)
        }
        None => Configuration::load(),
    };

    loaded
        .map_err(|e| anyhow::Error::new(*e))
        .context("Failed to load configuration")
}
