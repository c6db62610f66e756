use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::core::power_monitor::{default_maxima, GaugeBanding};
use crate::error::PmError;

pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_DATA_PATH: &str = "/pm";
pub const DEFAULT_PERIOD_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Keys accepted by `pmview config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "host",
    "data_path",
    "period_ms",
    "request_timeout_ms",
    "reset_on_error",
    "max.p_va",
    "max.p_w",
    "max.i_rms",
    "max.v_rms",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the power-monitor device.
    pub host: String,
    /// Path of the readings endpoint, joined onto `host`.
    pub data_path: String,
    pub period_ms: u64,
    pub request_timeout_ms: u64,
    /// Gauge maxima: apparent power, real power, current RMS, voltage RMS.
    pub channel_max: [f64; 4],
    pub banding: GaugeBanding,
    /// Zero the gauges on a failed tick instead of keeping the last values.
    pub reset_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            period_ms: DEFAULT_PERIOD_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            channel_max: default_maxima(),
            banding: GaugeBanding::default(),
            reset_on_error: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Missing, empty or unreadable-as-JSON files yield the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!(
                "Ignoring corrupted config file {:?} ({}), using defaults",
                config_path,
                e
            );
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("pmview").join("config.json"))
    }

    /// Full URL of the readings endpoint.
    pub fn source_url(&self) -> crate::Result<Url> {
        let base = Url::parse(&self.host)
            .map_err(|e| PmError::config(format!("invalid host '{}': {}", self.host, e)))?;

        base.join(&self.data_path).map_err(|e| {
            PmError::config(format!("invalid data path '{}': {}", self.data_path, e))
        })
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.host.trim().is_empty() {
            return Err(PmError::config("host must not be empty"));
        }
        self.source_url()?;

        if self.period_ms == 0 {
            return Err(PmError::config("period_ms must be greater than 0"));
        }
        if self.request_timeout_ms == 0 {
            return Err(PmError::config("request_timeout_ms must be greater than 0"));
        }

        for (max, key) in self.channel_max.iter().zip(&CONFIG_KEYS[5..]) {
            if !max.is_finite() || *max <= 0.0 {
                return Err(PmError::config(format!("{} must be positive, got {}", key, max)));
            }
        }

        self.banding.validate()
    }

    /// Set a single value by key, as used by `pmview config set`.
    pub fn set_value(&mut self, key: &str, value: &str) -> crate::Result<()> {
        let invalid = |e: String| PmError::config(format!("invalid value for {}: {}", key, e));

        match key {
            "host" => self.host = value.to_string(),
            "data_path" => self.data_path = value.to_string(),
            "period_ms" => {
                self.period_ms = value.parse::<u64>().map_err(|e| invalid(e.to_string()))?
            }
            "request_timeout_ms" => {
                self.request_timeout_ms = value
                    .parse::<u64>()
                    .map_err(|e| invalid(e.to_string()))?
            }
            "reset_on_error" => {
                self.reset_on_error = value.parse::<bool>().map_err(|e| invalid(e.to_string()))?
            }
            _ => {
                let index = CONFIG_KEYS[5..]
                    .iter()
                    .position(|k| *k == key)
                    .ok_or_else(|| {
                        PmError::config(format!(
                            "unknown key '{}' (expected one of: {})",
                            key,
                            CONFIG_KEYS.join(", ")
                        ))
                    })?;
                self.channel_max[index] = value.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
            }
        }

        self.validate()
    }
}
