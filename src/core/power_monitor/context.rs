//! Display state owned by the single consumer of poll events.

use chrono::{DateTime, Utc};

use super::display::{self, GaugeChannel};
use super::gauge::{GaugeWidget, Label, SegmentGauge, TextLabel};
use super::poller::PollEvent;
use super::reading::{Reading, ReadingExtras};
use crate::core::config::Config;
use crate::error::PmError;

/// Counters and last-known details for the status line.
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    pub readings: u64,
    pub errors: u64,
    pub last_reading_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub last_extras: ReadingExtras,
}

/// The four gauges plus what happened to them so far.
///
/// Errors leave the gauges frozen on the last good reading unless
/// `reset_on_error` is set.
#[derive(Debug, Clone)]
pub struct PowerMonitor<W = SegmentGauge, L = TextLabel> {
    channels: [GaugeChannel<W, L>; 4],
    reset_on_error: bool,
    stats: PollStats,
}

impl PowerMonitor {
    pub fn new(config: &Config) -> Self {
        Self::with_channels(
            GaugeChannel::standard(config.banding, config.channel_max),
            config.reset_on_error,
        )
    }
}

impl<W: GaugeWidget, L: Label> PowerMonitor<W, L> {
    pub fn with_channels(channels: [GaugeChannel<W, L>; 4], reset_on_error: bool) -> Self {
        Self {
            channels,
            reset_on_error,
            stats: PollStats::default(),
        }
    }

    pub fn handle(&mut self, event: PollEvent) {
        match event {
            PollEvent::Reading(reading) => self.apply(&reading),
            PollEvent::Error(e) => self.record_error(&e),
        }
    }

    pub fn apply(&mut self, reading: &Reading) {
        display::apply(reading, &mut self.channels);

        self.stats.readings += 1;
        self.stats.last_reading_at = Some(Utc::now());
        self.stats.last_error = None;
        self.stats.last_extras = reading.extras.clone();

        log::debug!(
            "Reading applied: {} VA, {} W, {:.2} A, {:.1} V",
            reading.apparent_power,
            reading.real_power,
            reading.current_rms,
            reading.voltage_rms
        );
    }

    pub fn record_error(&mut self, error: &PmError) {
        if error.is_tick_error() {
            log::warn!("Poll failed: {}", error);
        } else {
            log::error!("Poll failed: {}", error);
        }

        self.stats.errors += 1;
        self.stats.last_error = Some(error.to_string());

        if self.reset_on_error {
            display::reset(&mut self.channels);
        }
    }

    pub fn reset(&mut self) {
        display::reset(&mut self.channels);
    }

    pub fn channels(&self) -> &[GaugeChannel<W, L>; 4] {
        &self.channels
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }
}
