//! Monitor command handler.
//!
//! Live gauge dashboard in a TUI, or one JSON line per reading for scripting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::ArgMatches;
use serde_json::json;

use crate::core::power_monitor::{HttpSource, PollEvent, PollRuntime, PowerMonitor};
use crate::core::Config;
use crate::ui::monitor_tui::run_monitor_app;

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::resolve_config(matches)?;

    // Bare `pmview` has no --json flag
    let json = matches
        .try_get_one::<bool>("json")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);

    if json {
        return run_json_output(config);
    }

    run_monitor_app(config).context("Failed to run power monitor")
}

/// Run in JSON output mode (for scripting). Stops on Ctrl-C.
fn run_json_output(config: Config) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let source = HttpSource::from_config(&config)?;
    let mut monitor = PowerMonitor::new(&config);
    let mut runtime = PollRuntime::start(Duration::from_millis(config.period_ms), source)?;

    while running.load(Ordering::SeqCst) {
        let Some(event) = runtime.next_timeout(Duration::from_millis(200)) else {
            continue;
        };

        let is_reading = matches!(event, PollEvent::Reading(_));
        monitor.handle(event);

        if is_reading {
            println!("{}", snapshot_json(&monitor));
        }
    }

    runtime.shutdown();
    Ok(())
}

/// Displayed values keyed by mount point, plus extras of the last reading.
pub fn snapshot_json(monitor: &PowerMonitor) -> serde_json::Value {
    let values: serde_json::Map<String, serde_json::Value> = monitor
        .channels()
        .iter()
        .map(|c| (c.descriptor.mount.to_string(), json!(c.label.text())))
        .collect();

    json!({
        "timestamp": Utc::now().to_rfc3339(),
        "values": values,
        "extras": monitor.stats().last_extras,
    })
}
