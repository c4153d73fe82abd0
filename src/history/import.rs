use crate::error::{Error, Result};
use crate::reading::Reading;
use std::fs;
use std::path::Path;

pub fn import_from_csv(path: &Path) -> Result<Vec<Reading>> {
    let content = fs::read_to_string(path)?;
    parse_csv(&content)
}

/// Parses `timestamp,value` rows. A header line and blank lines are skipped;
/// any extra columns are ignored.
pub fn parse_csv(content: &str) -> Result<Vec<Reading>> {
    let mut readings = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || (line_no == 0 && line.starts_with("timestamp")) {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let timestamp = fields
            .next()
            .and_then(|f| f.parse::<i64>().ok())
            .ok_or_else(|| Error::Parse(format!("line {}: bad timestamp in '{}'", line_no + 1, line)))?;
        let value = fields
            .next()
            .and_then(|f| f.parse::<f64>().ok())
            .ok_or_else(|| Error::Parse(format!("line {}: bad value in '{}'", line_no + 1, line)))?;

        readings.push(Reading::new(value, timestamp));
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let readings = parse_csv("timestamp,value\n0,100\n300000, 104.5\n\n").unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].timestamp, 300_000);
        assert_eq!(readings[1].value, 104.5);
    }

    #[test]
    fn test_exported_csv_reads_back() {
        let readings = parse_csv("timestamp,value,direction\n0,100.00,??\n").unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn test_bad_rows() {
        assert!(matches!(parse_csv("abc,100"), Err(Error::Parse(_))));
        assert!(matches!(parse_csv("0"), Err(Error::Parse(_))));
    }
}
