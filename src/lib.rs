pub mod config;
pub mod error;
pub mod history;
pub mod reading;
pub mod trends;

pub use config::Config;
pub use error::{Error, Result};
pub use history::ReadingHistory;
pub use reading::{GlucoseSample, GlucoseStatusSource, GlucoseUnit, Reading, UnitSource};
pub use trends::{DirectionSymbol, TrendClassifier};
