pub mod buffer;
pub mod export;
pub mod import;
pub mod replay;

pub use buffer::ReadingHistory;
pub use export::{export_to_csv, export_to_json};
pub use import::{import_from_csv, parse_csv};
pub use replay::replay;
