//! The four fixed gauge channels and how each one reads and formats a value.

use serde::{Deserialize, Serialize};

use super::reading::Reading;

/// Identifies one of the monitored quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    ApparentPower,
    RealPower,
    CurrentRms,
    VoltageRms,
}

/// Static description of a channel: where it is mounted, how its value is
/// pulled out of a [`Reading`] and how it is printed.
#[derive(Debug, Clone, Copy)]
pub struct ChannelDescriptor {
    pub kind: ChannelKind,
    /// Mount point name (`p_va`, `p_w`, `i_rms`, `v_rms`).
    pub mount: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    /// Gauge maximum used when the configuration does not override it.
    pub default_max: f64,
    pub extract: fn(&Reading) -> f64,
    pub format: fn(&Reading) -> String,
}

/// Display order of the gauges. Adding a channel is a change to this list.
pub static CHANNELS: [ChannelDescriptor; 4] = [
    ChannelDescriptor {
        kind: ChannelKind::ApparentPower,
        mount: "p_va",
        title: "Apparent power",
        unit: "VA",
        default_max: 3500.0,
        extract: apparent_power,
        format: format_apparent_power,
    },
    ChannelDescriptor {
        kind: ChannelKind::RealPower,
        mount: "p_w",
        title: "Real power",
        unit: "W",
        default_max: 3500.0,
        extract: real_power,
        format: format_real_power,
    },
    ChannelDescriptor {
        kind: ChannelKind::CurrentRms,
        mount: "i_rms",
        title: "Current RMS",
        unit: "A",
        default_max: 14.0,
        extract: current_rms,
        format: format_current_rms,
    },
    ChannelDescriptor {
        kind: ChannelKind::VoltageRms,
        mount: "v_rms",
        title: "Voltage RMS",
        unit: "V",
        default_max: 400.0,
        extract: voltage_rms,
        format: format_voltage_rms,
    },
];

fn apparent_power(r: &Reading) -> f64 {
    r.apparent_power as f64
}

fn real_power(r: &Reading) -> f64 {
    r.real_power as f64
}

fn current_rms(r: &Reading) -> f64 {
    r.current_rms
}

fn voltage_rms(r: &Reading) -> f64 {
    r.voltage_rms
}

fn format_apparent_power(r: &Reading) -> String {
    r.apparent_power.to_string()
}

fn format_real_power(r: &Reading) -> String {
    r.real_power.to_string()
}

fn format_current_rms(r: &Reading) -> String {
    to_fixed(r.current_rms, 2)
}

fn format_voltage_rms(r: &Reading) -> String {
    to_fixed(r.voltage_rms, 1)
}

/// Enough fraction digits to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed-point text of `value` with `digits` decimals. Rounds the exact
/// decimal value of the double, ties away from zero.
fn to_fixed(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            int_len += 1;
        }
    }

    let (int_digits, frac_digits) = kept.split_at(int_len);
    let mut text = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        text.push('-');
    }
    text.extend(int_digits.iter().map(|d| *d as char));
    if digits > 0 {
        text.push('.');
        text.extend(frac_digits.iter().map(|d| *d as char));
    }
    text
}

/// Default maxima, in channel order.
pub fn default_maxima() -> [f64; 4] {
    CHANNELS.map(|c| c.default_max)
}

impl ChannelDescriptor {
    pub fn value(&self, reading: &Reading) -> f64 {
        (self.extract)(reading)
    }

    pub fn formatted(&self, reading: &Reading) -> String {
        (self.format)(reading)
    }
}
