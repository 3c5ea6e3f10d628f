use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide monotonically increasing count, shared by cloning.
///
/// Used for the scrape iteration count reported in worker logs and for the
/// number of completed producer cycles.
#[derive(Debug, Clone, Default)]
pub struct IterationCounter {
    value: Arc<AtomicU64>,
}

impl IterationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the value held before the increment.
    pub fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed)
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let counter = IterationCounter::new();
        let other = counter.clone();
        assert_eq!(counter.increment(), 0);
        assert_eq!(other.increment(), 1);
        assert_eq!(counter.get(), 2);
    }
}
