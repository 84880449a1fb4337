use crate::{
    rb::{RbRef, SpscRb},
    traits::observer::delegate_observer,
};
use core::fmt;

/// Write end of a ring buffer.
///
/// Only one producer of a particular ring buffer may exist at a time.
pub struct Producer<R: RbRef> {
    rb: R,
    /// Last observed consumer index.
    head_cache: usize,
}

impl<R: RbRef> Producer<R> {
    /// Takes the write end of the ring buffer.
    ///
    /// *Panics if producer of this ring buffer already exists.*
    pub fn new(rb: R) -> Self {
        assert!(!rb.rb().hold_tail(true), "ring buffer producer already exists");
        let head_cache = rb.rb().head().get();
        Self { rb, head_cache }
    }

    /// Underlying ring buffer.
    #[inline]
    pub fn rb(&self) -> &SpscRb<R::Item> {
        self.rb.rb()
    }

    /// Returns the index of the vacant slot to write into, or `None` if the ring buffer is full.
    #[inline]
    fn reserve(&mut self) -> Option<usize> {
        let rb = self.rb.rb();
        let tail = rb.tail().get_relaxed();
        let next = (tail + 1) & rb.mask();
        if next == self.head_cache {
            self.head_cache = rb.head().get();
            if next == self.head_cache {
                return None;
            }
        }
        Some(tail)
    }

    /// Writes the item into the reserved slot and makes it visible to the consumer.
    ///
    /// # Safety
    ///
    /// `tail` must be returned by [`Self::reserve`] and no other item may be written since.
    #[inline]
    unsafe fn commit(&mut self, tail: usize, item: R::Item) {
        let rb = self.rb.rb();
        rb.slots().write(tail, item);
        rb.tail().set((tail + 1) & rb.mask());
    }

    /// Appends an item to the ring buffer.
    ///
    /// If buffer is full returns an `Err` containing the item that hasn't been appended.
    pub fn try_enqueue(&mut self, item: R::Item) -> Result<(), R::Item> {
        match self.reserve() {
            Some(tail) => {
                unsafe { self.commit(tail, item) };
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Appends an item to the ring buffer.
    ///
    /// Returns `false` if the buffer is full, the item is dropped in that case.
    /// Use [`Self::try_enqueue`] to get it back.
    #[inline]
    pub fn enqueue(&mut self, item: R::Item) -> bool {
        self.try_enqueue(item).is_ok()
    }

    /// Appends items from an iterator until the ring buffer is full or the iterator ends.
    ///
    /// Items are taken from the iterator only when there is room for them.
    ///
    /// Returns count of items appended.
    pub fn enqueue_iter<I: Iterator<Item = R::Item>>(&mut self, mut iter: I) -> usize {
        let mut count = 0;
        while let Some(tail) = self.reserve() {
            match iter.next() {
                Some(item) => unsafe { self.commit(tail, item) },
                None => break,
            }
            count += 1;
        }
        count
    }
}

impl<R: RbRef> Drop for Producer<R> {
    fn drop(&mut self) {
        self.rb.rb().hold_tail(false);
    }
}

impl<R: RbRef> fmt::Debug for Producer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").field("head_cache", &self.head_cache).finish_non_exhaustive()
    }
}

delegate_observer!(Producer);
