use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::Error;

/// mg/dL per mmol/L.
pub const MMOLL_TO_MGDL: f64 = 18.0;

/// Display unit for glucose concentration. Values are always stored in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlucoseUnit {
    #[serde(rename = "mgdl")]
    MgDl,
    #[serde(rename = "mmol")]
    MmolL,
}

impl GlucoseUnit {
    /// Converts a stored mg/dL value into this unit. No rounding.
    pub fn convert(self, value: f64) -> f64 {
        match self {
            GlucoseUnit::MgDl => value,
            GlucoseUnit::MmolL => value / MMOLL_TO_MGDL,
        }
    }

    /// Formats a stored mg/dL value for display in this unit.
    pub fn format(self, value: f64) -> String {
        match self {
            GlucoseUnit::MgDl => format!("{:.0}", value),
            GlucoseUnit::MmolL => format!("{:.1}", value / MMOLL_TO_MGDL),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GlucoseUnit::MgDl => "mg/dl",
            GlucoseUnit::MmolL => "mmol",
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GlucoseUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mgdl" | "mg/dl" => Ok(GlucoseUnit::MgDl),
            "mmol" | "mmol/l" => Ok(GlucoseUnit::MmolL),
            other => Err(Error::Parse(format!("Unknown glucose unit: {}", other))),
        }
    }
}

/// Supplies the unit the user wants values displayed in.
pub trait UnitSource {
    fn units(&self) -> GlucoseUnit;
}

impl UnitSource for GlucoseUnit {
    fn units(&self) -> GlucoseUnit {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        assert!((GlucoseUnit::MgDl.convert(18.0) - 18.0).abs() < 0.01);
        assert!((GlucoseUnit::MmolL.convert(18.0) - 1.0).abs() < 0.01);
        assert!((GlucoseUnit::MmolL.convert(81.0) - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_format() {
        assert_eq!(GlucoseUnit::MgDl.format(81.4), "81");
        assert_eq!(GlucoseUnit::MmolL.format(81.0), "4.5");
        assert_eq!(GlucoseUnit::MmolL.format(100.0), "5.6");
    }

    #[test]
    fn test_parse() {
        assert_eq!("mgdl".parse::<GlucoseUnit>().unwrap(), GlucoseUnit::MgDl);
        assert_eq!("mmol/L".parse::<GlucoseUnit>().unwrap(), GlucoseUnit::MmolL);
        assert!("kg".parse::<GlucoseUnit>().is_err());
    }
}
