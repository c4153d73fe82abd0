use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::units::{GlucoseUnit, UnitSource};
use crate::trends::{DirectionSymbol, TrendClassifier};

/// A bare (value, time) pair as delivered by the sensor feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucoseSample {
    /// mg/dL
    pub value: f64,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

impl GlucoseSample {
    pub fn new(value: f64, timestamp: i64) -> Self {
        Self { value, timestamp }
    }
}

/// Milliseconds since the Unix epoch. Built from a raw integer or a calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub i64);

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Timestamp(date.timestamp_millis())
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let millis = |d: Duration| i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
        match time.duration_since(UNIX_EPOCH) {
            Ok(d) => Timestamp(millis(d)),
            Err(e) => Timestamp(-millis(e.duration())),
        }
    }
}

/// Provides the (current, previous) pair a direction is computed from.
pub trait GlucoseStatusSource {
    fn sample_pair(&self) -> (Option<GlucoseSample>, Option<GlucoseSample>);

    /// Newest sample strictly older than `timestamp`.
    fn sample_before(&self, timestamp: i64) -> Option<GlucoseSample> {
        match self.sample_pair() {
            (Some(current), _) if current.timestamp < timestamp => Some(current),
            (_, Some(previous)) if previous.timestamp < timestamp => Some(previous),
            _ => None,
        }
    }
}

/// A single blood glucose reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// mg/dL
    pub value: f64,
    /// Unix time in milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub direction: DirectionSymbol,
    /// Unfiltered sensor value
    #[serde(default)]
    pub raw: f64,
    #[serde(default = "default_valid")]
    pub is_valid: bool,
}

fn default_valid() -> bool { true }

impl Default for Reading {
    fn default() -> Self {
        Self {
            value: 0.0,
            timestamp: 0,
            direction: DirectionSymbol::Unknown,
            raw: 0.0,
            is_valid: true,
        }
    }
}

/// Two readings are the same record when value and time match; the trend
/// annotation, raw value and validity do not take part.
impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.value == other.value
    }
}

impl Reading {
    pub fn new(value: f64, timestamp: i64) -> Self {
        Self::default().with_value(value).with_timestamp(timestamp)
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = timestamp.into().0;
        self
    }

    pub fn with_direction(mut self, direction: DirectionSymbol) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_raw(mut self, raw: f64) -> Self {
        self.raw = raw;
        self
    }

    pub fn sample(&self) -> GlucoseSample {
        GlucoseSample::new(self.value, self.timestamp)
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn value_to_units(&self, units: GlucoseUnit) -> f64 {
        units.convert(self.value)
    }

    pub fn value_to_units_string(&self, units: GlucoseUnit) -> String {
        units.format(self.value)
    }

    pub fn display_value(&self, source: &impl UnitSource) -> String {
        self.value_to_units_string(source.units())
    }

    pub fn direction_to_symbol(&self) -> &'static str {
        self.direction.glyph()
    }

    pub fn is_equal(&self, other: &Reading) -> bool {
        self == other
    }

    /// Same record time but a corrected value.
    pub fn is_data_changing(&self, other: &Reading) -> bool {
        self.timestamp == other.timestamp && self.value != other.value
    }

    pub fn copy_from(&mut self, other: &Reading) {
        self.value = other.value;
        self.timestamp = other.timestamp;
        self.direction = other.direction;
        self.raw = other.raw;
        self.is_valid = other.is_valid;
    }

    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }

    /// Direction of this reading relative to the newest older sample in `status`.
    pub fn calculate_direction(
        &self,
        status: &impl GlucoseStatusSource,
        classifier: &TrendClassifier,
    ) -> DirectionSymbol {
        classifier.classify(Some(self.sample()), status.sample_before(self.timestamp))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.to_string());
        write!(
            f,
            "{} {} {}",
            date,
            GlucoseUnit::MgDl.format(self.value),
            self.direction_to_symbol()
        )
    }
}
