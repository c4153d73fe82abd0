use crate::history::buffer::ReadingHistory;
use crate::error::{Error, Result};
use crate::reading::Reading;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn export_to_csv(history: &ReadingHistory, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "timestamp,value,direction")?;

    for reading in history.iter() {
        writeln!(file, "{},{:.2},{}", reading.timestamp, reading.value, reading.direction)?;
    }

    Ok(())
}

pub fn export_to_json(history: &ReadingHistory, path: &Path) -> Result<()> {
    let readings: Vec<&Reading> = history.iter().collect();

    let json_str = serde_json::to_string_pretty(&readings)
        .map_err(|e| Error::Export(format!("Failed to serialize JSON: {}", e)))?;

    let mut file = File::create(path)?;
    file.write_all(json_str.as_bytes())?;

    Ok(())
}
