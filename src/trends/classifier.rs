use super::types::DirectionSymbol;
use crate::config::TrendConfig;
use crate::error::Result;
use crate::reading::GlucoseSample;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Classifies the slope between two glucose samples into a `DirectionSymbol`.
#[derive(Debug, Clone)]
pub struct TrendClassifier {
    config: TrendConfig,
}

impl TrendClassifier {
    pub fn new(config: TrendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Best effort: a missing sample, an empty value or a non-increasing
    /// timestamp all give `Unknown`.
    pub fn classify(
        &self,
        current: Option<GlucoseSample>,
        previous: Option<GlucoseSample>,
    ) -> DirectionSymbol {
        match (current, previous) {
            (Some(current), Some(previous)) => self.classify_pair(&current, &previous),
            _ => {
                log::trace!("No sample pair available, direction unknown");
                DirectionSymbol::Unknown
            }
        }
    }

    pub fn classify_pair(&self, current: &GlucoseSample, previous: &GlucoseSample) -> DirectionSymbol {
        match self.rate_per_minute(current, previous) {
            Some(rate) => {
                let direction = self.direction_for_rate(rate);
                log::trace!(
                    "{} -> {} mg/dl: {:.2} mg/dl/min, {}",
                    previous.value, current.value, rate, direction
                );
                direction
            }
            None => DirectionSymbol::Unknown,
        }
    }

    /// Change in mg/dL per minute from `previous` to `current`.
    pub fn rate_per_minute(&self, current: &GlucoseSample, previous: &GlucoseSample) -> Option<f64> {
        // A zero value means the sensor produced nothing usable
        if current.value <= 0.0 || previous.value <= 0.0 {
            return None;
        }

        let elapsed_ms = current.timestamp - previous.timestamp;
        if elapsed_ms <= 0 {
            return None;
        }

        let delta_minutes = (elapsed_ms as f64 / MILLIS_PER_MINUTE).max(self.config.min_elapsed_minutes);
        Some((current.value - previous.value) / delta_minutes)
    }

    pub fn direction_for_rate(&self, rate: f64) -> DirectionSymbol {
        let c = &self.config;

        if !rate.is_finite() || rate.abs() > c.max_rate {
            DirectionSymbol::Unknown
        } else if rate <= -c.single {
            DirectionSymbol::DoubleDown
        } else if rate <= -c.forty_five {
            DirectionSymbol::SingleDown
        } else if rate <= -c.flat {
            DirectionSymbol::FortyFiveDown
        } else if rate <= c.flat {
            DirectionSymbol::Flat
        } else if rate <= c.forty_five {
            DirectionSymbol::FortyFiveUp
        } else if rate <= c.single {
            DirectionSymbol::SingleUp
        } else {
            DirectionSymbol::DoubleUp
        }
    }
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self { config: TrendConfig::default() }
    }
}
