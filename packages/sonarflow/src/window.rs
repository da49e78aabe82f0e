//! Overlapping sum-of-three increase counting.
//!
//! Three fixed buffers are opened on the first three readings, so their start
//! offsets are staggered by one. Every reading goes to every open buffer; a
//! buffer that reaches three readings yields its sum and empties itself, which
//! keeps its offset relative to the others. The result is the classic rolling
//! window of width three with stride one.

use crate::counter::IncreaseCounter;
use crate::error::{FlowError, Result};

/// Readings per window
pub const WINDOW_SIZE: usize = 3;

/// Windows open at the same time
pub const WINDOW_COUNT: usize = 3;

/// One accumulation buffer: how many readings it holds and their sum. Sums
/// are 128-bit so three full-range readings always fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowBuffer {
    len: usize,
    sum: u128,
}

impl WindowBuffer {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sum(&self) -> u128 {
        self.sum
    }

    /// Append a reading. Returns the window sum when this reading fills the
    /// buffer, after which the buffer is empty again.
    pub fn push(&mut self, value: u64) -> Result<Option<u128>> {
        if self.len >= WINDOW_SIZE {
            return Err(FlowError::BufferOverflow);
        }

        self.len += 1;
        self.sum += u128::from(value);

        if self.len == WINDOW_SIZE {
            let sum = self.sum;
            *self = Self::default();
            Ok(Some(sum))
        } else {
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowAggregator {
    buffers: [WindowBuffer; WINDOW_COUNT],
    open: usize,
    // Slot that completes on the next full window
    next_to_complete: usize,
    last_completed_sum: Option<u128>,
    increase_count: u64,
}

impl WindowAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers opened so far (0..=3).
    pub fn open_windows(&self) -> usize {
        self.open
    }

    pub fn buffers(&self) -> &[WindowBuffer] {
        &self.buffers[..self.open]
    }

    pub fn last_completed_sum(&self) -> Option<u128> {
        self.last_completed_sum
    }

    fn complete(&mut self, slot: usize, sum: u128) {
        debug_assert_eq!(slot, self.next_to_complete);
        self.next_to_complete = (slot + 1) % WINDOW_COUNT;

        if self.last_completed_sum.is_some_and(|last| sum > last) {
            self.increase_count += 1;
        }
        self.last_completed_sum = Some(sum);
    }
}

impl IncreaseCounter for WindowAggregator {
    fn observe(&mut self, value: u64) -> Result<()> {
        if self.open < WINDOW_COUNT {
            self.open += 1;
        }

        for slot in 0..self.open {
            if let Some(sum) = self.buffers[slot].push(value)? {
                self.complete(slot, sum);
            }
        }
        Ok(())
    }

    fn count(&self) -> u64 {
        self.increase_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u64; 10] = [199, 200, 208, 210, 200, 207, 240, 269, 260, 263];

    #[test]
    fn test_sample_readings() {
        let mut agg = WindowAggregator::new();
        agg.observe_all(SAMPLE).unwrap();
        assert_eq!(agg.count(), 5);
        assert_eq!(agg.last_completed_sum(), Some(792));
    }

    #[test]
    fn test_windows_open_one_per_reading() {
        let mut agg = WindowAggregator::new();
        assert_eq!(agg.open_windows(), 0);

        agg.observe(1).unwrap();
        assert_eq!(agg.open_windows(), 1);
        assert_eq!(agg.buffers()[0].len(), 1);

        agg.observe(2).unwrap();
        assert_eq!(agg.open_windows(), 2);
        assert_eq!(
            agg.buffers().iter().map(WindowBuffer::len).collect::<Vec<_>>(),
            vec![2, 1]
        );
        assert_eq!(agg.last_completed_sum(), None);

        agg.observe(3).unwrap();
        assert_eq!(agg.open_windows(), 3);
        assert!(agg.buffers()[0].is_empty());
        assert_eq!(agg.buffers()[1].sum(), 5);
        assert_eq!(agg.buffers()[2].sum(), 3);
        assert_eq!(agg.last_completed_sum(), Some(6));
        assert_eq!(agg.count(), 0);

        agg.observe(4).unwrap();
        assert_eq!(agg.open_windows(), 3);
        assert_eq!(agg.last_completed_sum(), Some(9));
        assert_eq!(agg.count(), 1);
    }

    #[test]
    fn test_first_window_is_never_counted() {
        let mut agg = WindowAggregator::new();
        agg.observe_all([100, 200, 300]).unwrap();
        assert_eq!(agg.count(), 0);
    }

    #[test]
    fn test_equal_sums_do_not_count() {
        let mut agg = WindowAggregator::new();
        agg.observe_all([5, 1, 2, 5, 1, 2]).unwrap();
        assert_eq!(agg.count(), 0);
    }

    #[test]
    fn test_short_input() {
        let mut agg = WindowAggregator::new();
        agg.observe_all([7, 8]).unwrap();
        assert_eq!(agg.count(), 0);
        assert_eq!(agg.last_completed_sum(), None);
    }

    #[test]
    fn test_full_range_readings() {
        let mut agg = WindowAggregator::new();
        agg.observe_all([u64::MAX, u64::MAX, 1, u64::MAX]).unwrap();
        let max = u128::from(u64::MAX);
        assert_eq!(agg.last_completed_sum(), Some(2 * max + 1));
        // max + max + 1 -> max + 1 + max is not an increase
        assert_eq!(agg.count(), 0);

        agg.observe(2).unwrap();
        assert_eq!(agg.last_completed_sum(), Some(max + 3));
        assert_eq!(agg.count(), 0);
    }

    #[test]
    fn test_buffer_resets_on_full() {
        let mut buffer = WindowBuffer::default();
        assert_eq!(buffer.push(1).unwrap(), None);
        assert_eq!(buffer.push(2).unwrap(), None);
        assert_eq!(buffer.push(3).unwrap(), Some(6));
        assert!(buffer.is_empty());
        assert_eq!(buffer.sum(), 0);
    }

    #[test]
    fn test_buffer_overflow_is_reported() {
        let mut buffer = WindowBuffer {
            len: WINDOW_SIZE,
            sum: 9,
        };
        assert!(matches!(buffer.push(1), Err(FlowError::BufferOverflow)));
    }
}
