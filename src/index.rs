use crate::sync::{AtomicUsize, Ordering};
use crossbeam_utils::CachePadded;

/// Ring position written by one end and read by both.
///
/// Lives on its own cache line so that the producer and consumer counters never share one.
pub struct SharedIndex {
    value: CachePadded<AtomicUsize>,
}

impl SharedIndex {
    pub fn new(value: usize) -> Self {
        Self {
            value: CachePadded::new(AtomicUsize::new(value)),
        }
    }

    /// Load that synchronizes with the opposite end's [`Self::set`].
    #[inline]
    pub fn get(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }

    /// Load of the index by its only writer.
    #[inline]
    pub fn get_relaxed(&self) -> usize {
        self.value.load(Ordering::Relaxed)
    }

    /// Publishes a new position together with every slot write that precedes it.
    #[inline]
    pub fn set(&self, value: usize) {
        self.value.store(value, Ordering::Release);
    }

    #[inline]
    pub fn get_mut(&mut self) -> usize {
        *self.value.get_mut()
    }
}
