// Sample buffer - fixed-capacity FIFO history feeding the rolling charts
use crate::domain::snapshot::TelemetrySnapshot;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct SampleBuffer {
    capacity: usize,
    samples: VecDeque<TelemetrySnapshot>,
}

impl SampleBuffer {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, snapshot: TelemetrySnapshot) {
        self.samples.push_back(snapshot);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Owned copy of the history, oldest first.
    pub fn snapshot(&self) -> Vec<TelemetrySnapshot> {
        self.samples.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::FieldValue;
    use crate::domain::telemetry_domain::TelemetryDomain;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn sample(seq: i64) -> TelemetrySnapshot {
        let mut fields = BTreeMap::new();
        fields.insert("seq".to_string(), FieldValue::Number(seq as f64));
        TelemetrySnapshot::new(
            TelemetryDomain::Sensors,
            Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap(),
            fields,
        )
    }

    fn seqs(samples: &[TelemetrySnapshot]) -> Vec<i64> {
        samples
            .iter()
            .map(|s| s.number("seq").unwrap() as i64)
            .collect()
    }

    #[test]
    fn test_length_and_contents_for_any_push_count() {
        for capacity in [1usize, 10, 15, 20] {
            for pushes in 0..=45i64 {
                let mut buffer = SampleBuffer::new(capacity);
                for seq in 0..pushes {
                    buffer.push(sample(seq));
                }

                let expected_len = (pushes as usize).min(capacity);
                assert_eq!(buffer.len(), expected_len);

                let expected: Vec<i64> = (pushes - expected_len as i64..pushes).collect();
                assert_eq!(seqs(&buffer.snapshot()), expected);
            }
        }
    }

    #[test]
    fn test_overflow_evicts_exactly_the_oldest() {
        let mut buffer = SampleBuffer::new(3);
        for seq in 0..3 {
            buffer.push(sample(seq));
        }
        buffer.push(sample(3));

        assert_eq!(seqs(&buffer.snapshot()), vec![1, 2, 3]);
    }

    #[test]
    fn test_snapshot_is_detached_from_storage() {
        let mut buffer = SampleBuffer::new(5);
        buffer.push(sample(1));

        let mut copy = buffer.snapshot();
        copy.clear();
        copy.push(sample(99));

        assert_eq!(seqs(&buffer.snapshot()), vec![1]);
    }

    #[test]
    fn test_clear_and_zero_capacity() {
        let mut buffer = SampleBuffer::new(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.push(sample(1));
        buffer.push(sample(2));
        assert_eq!(seqs(&buffer.snapshot()), vec![2]);

        buffer.clear();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.snapshot().is_empty());
    }
}
