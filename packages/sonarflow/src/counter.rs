use crate::error::Result;

/// Folds a sequence of readings into a count of increases.
pub trait IncreaseCounter {
    /// Feed the next reading.
    fn observe(&mut self, value: u64) -> Result<()>;

    /// Feed several readings in order.
    fn observe_all<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = u64>,
        Self: Sized,
    {
        for value in values {
            self.observe(value)?;
        }
        Ok(())
    }

    /// Increases counted so far.
    fn count(&self) -> u64;
}

/// Counts readings strictly greater than the one before.
///
/// The first reading is never counted; there is nothing to compare it to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningComparisonCounter {
    previous: Option<u64>,
    increase_count: u64,
}

impl RunningComparisonCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<u64> {
        self.previous
    }
}

impl IncreaseCounter for RunningComparisonCounter {
    fn observe(&mut self, value: u64) -> Result<()> {
        if self.previous.is_some_and(|previous| value > previous) {
            self.increase_count += 1;
        }
        self.previous = Some(value);
        Ok(())
    }

    fn count(&self) -> u64 {
        self.increase_count
    }
}
