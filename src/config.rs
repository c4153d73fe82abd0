use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::history::buffer::DEFAULT_CAPACITY;
use crate::reading::{GlucoseUnit, UnitSource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_units")]
    pub units: GlucoseUnit,
}

/// Band edges for the trend classifier, in mg/dL per minute.
///
/// A rate inside `(-flat, flat]` is flat, `(flat, forty_five]` a 45° rise,
/// `(forty_five, single]` a single arrow and anything up to `max_rate` a
/// double arrow. Falling rates mirror the rising ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_flat")]
    pub flat: f64,
    #[serde(default = "default_forty_five")]
    pub forty_five: f64,
    #[serde(default = "default_single")]
    pub single: f64,
    #[serde(default = "default_max_rate")]
    pub max_rate: f64,
    #[serde(default = "default_min_elapsed_minutes")]
    pub min_elapsed_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_units() -> GlucoseUnit { GlucoseUnit::MgDl }
fn default_flat() -> f64 { 1.0 }
fn default_forty_five() -> f64 { 2.0 }
fn default_single() -> f64 { 3.5 }
fn default_max_rate() -> f64 { 40.0 }
fn default_min_elapsed_minutes() -> f64 { 1.0 }
fn default_capacity() -> usize { DEFAULT_CAPACITY }

/// A year of 5 minute readings.
pub const MAX_HISTORY_CAPACITY: usize = 105_120;

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { units: default_units() }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            flat: default_flat(),
            forty_five: default_forty_five(),
            single: default_single(),
            max_rate: default_max_rate(),
            min_elapsed_minutes: default_min_elapsed_minutes(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            trend: TrendConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl TrendConfig {
    /// Checks that the bands are positive and strictly increasing.
    pub fn validate(&self) -> Result<()> {
        if !(self.flat > 0.0
            && self.flat < self.forty_five
            && self.forty_five < self.single
            && self.single < self.max_rate)
        {
            return Err(Error::Config(format!(
                "trend bands must satisfy 0 < flat < forty_five < single < max_rate (got {}, {}, {}, {})",
                self.flat, self.forty_five, self.single, self.max_rate
            )));
        }
        if !(self.min_elapsed_minutes > 0.0) {
            return Err(Error::Config(format!(
                "min_elapsed_minutes must be positive (got {})",
                self.min_elapsed_minutes
            )));
        }
        Ok(())
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 || self.capacity > MAX_HISTORY_CAPACITY {
            return Err(Error::Config(format!(
                "history capacity must be between 1 and {} (got {})",
                MAX_HISTORY_CAPACITY, self.capacity
            )));
        }
        Ok(())
    }
}

impl UnitSource for Config {
    fn units(&self) -> GlucoseUnit {
        self.display.units
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.trend.validate()?;
        config.history.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config/glucose-trend/config.toml"))
    }
}
