pub mod types;
pub mod units;

pub use types::{GlucoseSample, GlucoseStatusSource, Reading, Timestamp};
pub use units::{GlucoseUnit, UnitSource, MMOLL_TO_MGDL};
