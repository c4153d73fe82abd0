use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::reading::{GlucoseSample, GlucoseStatusSource, Reading};

/// 24h of 5 minute readings.
pub const DEFAULT_CAPACITY: usize = 288;

/// Bounded, time-ordered reading history. Oldest readings fall off the front.
pub struct ReadingHistory {
    data: VecDeque<Reading>,
    capacity: usize,
}

impl ReadingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Appends a reading. A reading with the latest timestamp replaces it;
    /// an older one is rejected.
    pub fn push(&mut self, reading: Reading) -> Result<()> {
        if let Some(latest) = self.data.back_mut() {
            if reading.timestamp < latest.timestamp {
                return Err(Error::OutOfOrder {
                    timestamp: reading.timestamp,
                    latest: latest.timestamp,
                });
            }
            if reading.timestamp == latest.timestamp {
                if reading.is_data_changing(latest) {
                    log::debug!(
                        "Reading at {} changed from {} to {}",
                        reading.timestamp, latest.value, reading.value
                    );
                }
                latest.copy_from(&reading);
                return Ok(());
            }
        }

        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(reading);
        Ok(())
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.data.back()
    }

    pub fn latest_mut(&mut self) -> Option<&mut Reading> {
        self.data.back_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Default for ReadingHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl GlucoseStatusSource for ReadingHistory {
    fn sample_pair(&self) -> (Option<GlucoseSample>, Option<GlucoseSample>) {
        let mut valid = self.data.iter().rev().filter(|r| r.is_valid);

        let current = match valid.next() {
            Some(r) => r,
            None => return (None, None),
        };
        let previous = valid.find(|r| r.timestamp < current.timestamp);

        (Some(current.sample()), previous.map(Reading::sample))
    }

    fn sample_before(&self, timestamp: i64) -> Option<GlucoseSample> {
        self.data
            .iter()
            .rev()
            .find(|r| r.is_valid && r.timestamp < timestamp)
            .map(Reading::sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::{DirectionSymbol, TrendClassifier};

    const FIVE_MINUTES: i64 = 5 * 60_000;

    #[test]
    fn test_capacity() {
        let mut history = ReadingHistory::new(3);
        for i in 0..5 {
            history.push(Reading::new(100.0 + i as f64, i * FIVE_MINUTES)).unwrap();
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().next().unwrap().timestamp, 2 * FIVE_MINUTES);
        assert_eq!(history.latest().unwrap().value, 104.0);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut history = ReadingHistory::new(usize::MAX);
        history.push(Reading::new(100.0, 0)).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut history = ReadingHistory::new(10);
        history.push(Reading::new(100.0, FIVE_MINUTES)).unwrap();

        let err = history.push(Reading::new(90.0, 0)).unwrap_err();
        assert!(matches!(err, Error::OutOfOrder { timestamp: 0, latest: FIVE_MINUTES }));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_same_timestamp_replaces() {
        let mut history = ReadingHistory::new(10);
        history.push(Reading::new(100.0, FIVE_MINUTES)).unwrap();
        history.push(Reading::new(104.0, FIVE_MINUTES)).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().value, 104.0);
    }

    #[test]
    fn test_sample_pair() {
        let mut history = ReadingHistory::new(10);
        assert_eq!(history.sample_pair(), (None, None));

        history.push(Reading::new(100.0, 0)).unwrap();
        let (current, previous) = history.sample_pair();
        assert_eq!(current.unwrap().value, 100.0);
        assert!(previous.is_none());

        history.push(Reading::new(112.0, FIVE_MINUTES)).unwrap();
        let (current, previous) = history.sample_pair();
        assert_eq!(current.unwrap().value, 112.0);
        assert_eq!(previous.unwrap().value, 100.0);
    }

    #[test]
    fn test_sample_pair_skips_invalid() {
        let mut spike = Reading::new(300.0, FIVE_MINUTES);
        spike.invalidate();

        let mut history = ReadingHistory::new(10);
        history.push(Reading::new(100.0, 0)).unwrap();
        history.push(spike).unwrap();
        history.push(Reading::new(103.0, 2 * FIVE_MINUTES)).unwrap();

        let (current, previous) = history.sample_pair();
        assert_eq!(current.unwrap().value, 103.0);
        assert_eq!(previous.unwrap().timestamp, 0);

        history.latest_mut().unwrap().invalidate();
        let (current, previous) = history.sample_pair();
        assert_eq!(current.unwrap().value, 100.0);
        assert!(previous.is_none());
    }

    #[test]
    fn test_direction_from_history() {
        let mut history = ReadingHistory::new(10);
        history.push(Reading::new(100.0, 0)).unwrap();
        history.push(Reading::new(115.0, FIVE_MINUTES)).unwrap();

        let classifier = TrendClassifier::default();
        let latest = history.latest().unwrap().clone();
        // 15 mg/dl over 5 minutes
        assert_eq!(latest.calculate_direction(&history, &classifier), DirectionSymbol::SingleUp);

        // an incoming reading not yet pushed compares against the latest one
        let next = Reading::new(104.0, 2 * FIVE_MINUTES);
        assert_eq!(next.calculate_direction(&history, &classifier), DirectionSymbol::SingleDown);
    }
}
