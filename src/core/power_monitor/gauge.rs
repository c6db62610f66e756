//! Segmented VU-meter style gauge state.
//!
//! The gauge only stores the last written value (`data-val`) and knows how
//! many of its boxes are lit; drawing is left to the terminal renderer.

use serde::{Deserialize, Serialize};

use crate::error::{PmError, Result};

/// Segment layout of a gauge. Red boxes sit at the top, yellow below them,
/// the remaining boxes are green.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeBanding {
    pub box_count_red: u16,
    pub box_count_yellow: u16,
    pub box_count: u16,
    /// Fraction of a box width left empty between two boxes.
    pub box_gap_fraction: f64,
}

impl Default for GaugeBanding {
    fn default() -> Self {
        Self {
            box_count_red: 3,
            box_count_yellow: 5,
            box_count: 17,
            box_gap_fraction: 0.3,
        }
    }
}

impl GaugeBanding {
    pub fn validate(&self) -> Result<()> {
        if self.box_count == 0 {
            return Err(PmError::config("gauge box count must be positive"));
        }
        if self.box_count_red as u32 + self.box_count_yellow as u32 > self.box_count as u32 {
            return Err(PmError::config(format!(
                "red ({}) + yellow ({}) boxes exceed the box count ({})",
                self.box_count_red, self.box_count_yellow, self.box_count
            )));
        }
        if !(0.0..1.0).contains(&self.box_gap_fraction) {
            return Err(PmError::config(format!(
                "box gap fraction must be in [0, 1), got {}",
                self.box_gap_fraction
            )));
        }
        Ok(())
    }

    /// Band of the box at `index`, counted from the bottom (0).
    pub fn band_of(&self, index: u16) -> Band {
        let green = self
            .box_count
            .saturating_sub(self.box_count_red.saturating_add(self.box_count_yellow));
        if index < green {
            Band::Green
        } else if index < green.saturating_add(self.box_count_yellow) {
            Band::Yellow
        } else {
            Band::Red
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Yellow,
    Red,
}

/// Configuration handed to a gauge at creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeConfig {
    pub banding: GaugeBanding,
    pub max: f64,
}

/// Anything that accepts a value write.
pub trait GaugeWidget {
    fn write_value(&mut self, value: &str);
}

/// Anything that displays a text label.
pub trait Label {
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone)]
pub struct SegmentGauge {
    config: GaugeConfig,
    value: String,
}

impl SegmentGauge {
    pub fn new(config: GaugeConfig) -> Self {
        Self {
            config,
            value: "0".to_string(),
        }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Last written value, verbatim.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Numeric interpretation of the stored value; unparsable text reads as 0.
    pub fn numeric(&self) -> f64 {
        self.value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Fill ratio in `[0, 1]`. Values past `max` show a full gauge.
    pub fn ratio(&self) -> f64 {
        if self.config.max <= 0.0 {
            return 0.0;
        }
        (self.numeric() / self.config.max).clamp(0.0, 1.0)
    }

    pub fn lit_boxes(&self) -> u16 {
        let count = self.config.banding.box_count;
        ((self.ratio() * count as f64).round() as u16).min(count)
    }

    /// Every box from bottom to top with its band and lit state.
    pub fn boxes(&self) -> Vec<(Band, bool)> {
        let lit = self.lit_boxes();
        (0..self.config.banding.box_count)
            .map(|i| (self.config.banding.band_of(i), i < lit))
            .collect()
    }
}

impl GaugeWidget for SegmentGauge {
    fn write_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
    }
}

#[derive(Debug, Clone)]
pub struct TextLabel {
    text: String,
}

impl TextLabel {
    pub fn new() -> Self {
        Self {
            text: "0".to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for TextLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl Label for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}
