//! Power-monitor readings and the `/pm` payload parser.
//!
//! The payload served by the control unit looks like
//! `{"p": {"va": 1200, "w": 950}, "i": {"rms": 5.234}, "v": {"rms": 231.7}}`.
//! The four primary quantities are mandatory; anything else the firmware adds
//! (`p.var`, `p.pf`, peak-to-peak values) is picked up when present.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PmError, Result};

/// One complete snapshot of the four monitored quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Apparent power, VA.
    pub apparent_power: i64,
    /// Real power, W.
    pub real_power: i64,
    /// Current RMS, A.
    pub current_rms: f64,
    /// Voltage RMS, V.
    pub voltage_rms: f64,
    pub extras: ReadingExtras,
}

/// Optional secondary quantities. Never required for a valid reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadingExtras {
    pub reactive_power: Option<f64>,
    pub power_factor: Option<f64>,
    pub current_pp: Option<f64>,
    pub voltage_pp: Option<f64>,
}

impl ReadingExtras {
    pub fn is_empty(&self) -> bool {
        self.reactive_power.is_none()
            && self.power_factor.is_none()
            && self.current_pp.is_none()
            && self.voltage_pp.is_none()
    }
}

impl Reading {
    pub fn new(apparent_power: i64, real_power: i64, current_rms: f64, voltage_rms: f64) -> Self {
        Self {
            apparent_power,
            real_power,
            current_rms,
            voltage_rms,
            extras: ReadingExtras::default(),
        }
    }

    /// Parse a raw response body.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| PmError::parse(format!("invalid JSON payload: {}", e)))?;
        Self::from_payload(&value)
    }

    /// Build a reading from an already decoded payload.
    ///
    /// Either every primary field parses or the whole payload is rejected.
    /// Power values are truncated toward zero; out-of-range values are kept as is.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let root = payload
            .as_object()
            .ok_or_else(|| PmError::parse("payload is not a JSON object"))?;

        let p = section(root, "p")?;
        let i = section(root, "i")?;
        let v = section(root, "v")?;

        let apparent_power = required_number(p, "p", "va")?.trunc() as i64;
        let real_power = required_number(p, "p", "w")?.trunc() as i64;
        let current_rms = required_number(i, "i", "rms")?;
        let voltage_rms = required_number(v, "v", "rms")?;

        let extras = ReadingExtras {
            reactive_power: optional_number(p, "var"),
            power_factor: optional_number(p, "pf"),
            current_pp: optional_number(i, "pp"),
            voltage_pp: optional_number(v, "pp"),
        };

        Ok(Self {
            apparent_power,
            real_power,
            current_rms,
            voltage_rms,
            extras,
        })
    }
}

fn section<'a>(root: &'a Map<String, Value>, name: &str) -> Result<&'a Map<String, Value>> {
    match root.get(name) {
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(PmError::parse(format!("`{}` is not an object", name))),
        None => Err(PmError::parse(format!("missing `{}` object", name))),
    }
}

fn required_number(map: &Map<String, Value>, section: &str, field: &str) -> Result<f64> {
    let value = map
        .get(field)
        .ok_or_else(|| PmError::parse(format!("missing `{}.{}`", section, field)))?;

    as_number(value).ok_or_else(|| {
        PmError::parse(format!(
            "`{}.{}` is not numeric: {}",
            section, field, value
        ))
    })
}

fn optional_number(map: &Map<String, Value>, field: &str) -> Option<f64> {
    map.get(field).and_then(as_number)
}

/// Numbers and numeric strings are accepted; NaN and infinities are not.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
