// Command handlers module
pub mod config;
pub mod monitor;
pub mod read;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::Config;

/// Load the saved configuration and apply the one-off overrides passed on
/// the command line (`--host`, `--path`, `--interval`, `--timeout`).
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, matches);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(host) = matches.get_one::<String>("host") {
        config.host = host.clone();
    }
    if let Some(path) = matches.get_one::<String>("path") {
        config.data_path = path.clone();
    }
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.period_ms = *interval;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.request_timeout_ms = *timeout;
    }
}
