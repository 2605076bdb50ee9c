//! TOML-based runner configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level runner configuration parsed from TOML.
///
/// All fields have defaults matching the baseline preset. Load from TOML
/// with [`RunConfig::from_toml_file`] or use [`RunConfig::baseline`] for
/// the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Playback timing parameters.
    #[serde(default)]
    pub run: RunSection,
    /// Synthetic power feed parameters.
    #[serde(default)]
    pub feed: FeedSection,
}

/// Playback timing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSection {
    /// Number of samples to play back (must be > 0).
    pub steps: usize,
    /// Simulated seconds between samples (must be > 0).
    pub interval_secs: u64,
    /// Master random seed for feed noise.
    pub seed: u64,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            steps: 288,
            interval_secs: 300,
            seed: 42,
        }
    }
}

/// Synthetic power feed parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedSection {
    /// Peak PV generation (W).
    pub pv_peak_w: f64,
    /// Flat household base load (W).
    pub base_load_w: f64,
    /// Charge power drawn by the tracked load (W).
    pub charge_power_w: f64,
    /// Maximum battery charge/discharge power (W).
    pub battery_limit_w: f64,
    /// Gaussian noise standard deviation applied to PV output (W).
    pub noise_std_w: f64,
    /// Sunrise, in hours since midnight.
    pub sunrise_hr: f64,
    /// Sunset, in hours since midnight (must be > sunrise, <= 24).
    pub sunset_hr: f64,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            pv_peak_w: 6000.0,
            base_load_w: 350.0,
            charge_power_w: 7400.0,
            battery_limit_w: 2500.0,
            noise_std_w: 40.0,
            sunrise_hr: 6.0,
            sunset_hr: 18.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"run.steps"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl RunConfig {
    /// Returns the baseline preset: a day of 5-minute samples with a mid-size
    /// PV array and home battery.
    pub fn baseline() -> Self {
        Self {
            run: RunSection::default(),
            feed: FeedSection::default(),
        }
    }

    /// Returns the sunny preset: oversized PV, long daylight window.
    pub fn sunny() -> Self {
        Self {
            run: RunSection::default(),
            feed: FeedSection {
                pv_peak_w: 12_000.0,
                battery_limit_w: 5000.0,
                sunrise_hr: 5.0,
                sunset_hr: 21.0,
                ..FeedSection::default()
            },
        }
    }

    /// Returns the grid-only preset: no on-site generation or storage.
    pub fn grid_only() -> Self {
        Self {
            run: RunSection::default(),
            feed: FeedSection {
                pv_peak_w: 0.0,
                battery_limit_w: 0.0,
                noise_std_w: 0.0,
                ..FeedSection::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "sunny", "grid_only"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "sunny" => Ok(Self::sunny()),
            "grid_only" => Ok(Self::grid_only()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let r = &self.run;

        if r.steps == 0 {
            errors.push(ConfigError {
                field: "run.steps".into(),
                message: "must be > 0".into(),
            });
        }
        if r.interval_secs == 0 {
            errors.push(ConfigError {
                field: "run.interval_secs".into(),
                message: "must be > 0".into(),
            });
        }

        let f = &self.feed;
        if f.pv_peak_w < 0.0 {
            errors.push(ConfigError {
                field: "feed.pv_peak_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.base_load_w < 0.0 {
            errors.push(ConfigError {
                field: "feed.base_load_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.charge_power_w < 0.0 {
            errors.push(ConfigError {
                field: "feed.charge_power_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.battery_limit_w < 0.0 {
            errors.push(ConfigError {
                field: "feed.battery_limit_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.noise_std_w < 0.0 {
            errors.push(ConfigError {
                field: "feed.noise_std_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.sunrise_hr >= f.sunset_hr {
            errors.push(ConfigError {
                field: "feed.sunrise_hr".into(),
                message: "must be < feed.sunset_hr".into(),
            });
        }
        if f.sunset_hr > 24.0 {
            errors.push(ConfigError {
                field: "feed.sunset_hr".into(),
                message: "must be <= 24".into(),
            });
        }

        errors
    }
}
