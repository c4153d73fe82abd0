use crate::history::buffer::ReadingHistory;
use crate::reading::{GlucoseStatusSource, Reading};
use crate::trends::TrendClassifier;

/// Feeds readings into `history` in order, annotating each accepted reading
/// with its trend direction. Out-of-order readings are skipped and counted.
pub fn replay<I>(history: &mut ReadingHistory, readings: I, classifier: &TrendClassifier) -> usize
where
    I: IntoIterator<Item = Reading>,
{
    let mut skipped = 0;

    for reading in readings {
        if let Err(e) = history.push(reading) {
            log::warn!("Skipping reading: {}", e);
            skipped += 1;
            continue;
        }

        let (current, previous) = history.sample_pair();
        let direction = classifier.classify(current, previous);
        if let Some(latest) = history.latest_mut() {
            latest.direction = direction;
        }
    }

    skipped
}
