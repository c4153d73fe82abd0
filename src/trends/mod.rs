pub mod classifier;
pub mod types;

pub use classifier::TrendClassifier;
pub use types::DirectionSymbol;
