//! One-shot reading: fetch `/pm` once and print the four gauge values.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::power_monitor::{read_once, HttpSource, PollEvent, CHANNELS};
use crate::ui::format_extras;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::resolve_config(matches)?;
    let source = HttpSource::from_config(&config)?;

    let reading = match read_once(&source)? {
        PollEvent::Reading(reading) => reading,
        PollEvent::Error(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", source.url()))
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string(&reading)?);
        return Ok(());
    }

    println!("{}", format!("Power monitor at {}", source.url()).white().bold());
    for channel in CHANNELS.iter() {
        println!(
            "  {:<16} {:>10} {}",
            channel.title.dimmed(),
            channel.formatted(&reading).cyan().bold(),
            channel.unit
        );
    }

    if !reading.extras.is_empty() {
        println!("  {}", format_extras(&reading.extras).dimmed());
    }

    Ok(())
}
