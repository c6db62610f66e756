use crate::core::config::{Config, CONFIG_KEYS};
use crate::core::power_monitor::CHANNELS;
use crate::ui::prompts;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", sub_matches)) => reset(sub_matches),
        Some(("path", _)) => {
            println!("{}", Config::get_config_path()?.display());
            Ok(())
        }
        _ => {
            println!("Use 'pmview config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "pmview configuration".white().bold());
    println!("  {:<20} {}", "host".dimmed(), config.host.cyan());
    println!("  {:<20} {}", "data_path".dimmed(), config.data_path.cyan());
    match config.source_url() {
        Ok(url) => println!("  {:<20} {}", "source".dimmed(), url.as_str().cyan().bold()),
        Err(e) => println!("  {:<20} {}", "source".dimmed(), e.to_string().red()),
    }
    println!("  {:<20} {}ms", "period_ms".dimmed(), config.period_ms);
    println!(
        "  {:<20} {}ms",
        "request_timeout_ms".dimmed(),
        config.request_timeout_ms
    );
    println!("  {:<20} {}", "reset_on_error".dimmed(), config.reset_on_error);

    for (channel, max) in CHANNELS.iter().zip(config.channel_max) {
        println!(
            "  {:<20} {} {}",
            format!("max.{}", channel.mount).dimmed(),
            max,
            channel.unit
        );
    }

    let b = &config.banding;
    println!(
        "  {:<20} {} boxes ({} red, {} yellow), gap {}",
        "gauge".dimmed(),
        b.box_count,
        b.box_count_red,
        b.box_count_yellow,
        b.box_gap_fraction
    );

    Ok(())
}

fn set(matches: &clap::ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    if let Err(e) = config.set_value(key, value) {
        prompts::error(&e.to_string());
        prompts::dimmed(&format!("Valid keys: {}", CONFIG_KEYS.join(", ")));
        return Err(e.into());
    }
    config.save()?;

    println!("{} {} = {}", "✓".green(), key, value.cyan().bold());
    Ok(())
}

fn reset(matches: &clap::ArgMatches) -> Result<()> {
    if !matches.get_flag("yes") && !prompts::confirm("Reset configuration to defaults? [y/N]")? {
        prompts::info("Cancelled.");
        return Ok(());
    }

    Config::default().save()?;
    prompts::success("✓ Configuration reset to defaults");
    Ok(())
}
