use crate::{
    rb::{RbRef, SpscRb},
    traits::{observer::delegate_observer, Observer},
};
use core::fmt;

/// Read end of a ring buffer.
///
/// Only one consumer of a particular ring buffer may exist at a time.
pub struct Consumer<R: RbRef> {
    rb: R,
    /// Last observed producer index.
    tail_cache: usize,
}

impl<R: RbRef> Consumer<R> {
    /// Takes the read end of the ring buffer.
    ///
    /// *Panics if consumer of this ring buffer already exists.*
    pub fn new(rb: R) -> Self {
        assert!(!rb.rb().hold_head(true), "ring buffer consumer already exists");
        let tail_cache = rb.rb().tail().get();
        Self { rb, tail_cache }
    }

    /// Underlying ring buffer.
    #[inline]
    pub fn rb(&self) -> &SpscRb<R::Item> {
        self.rb.rb()
    }

    /// Returns the index of the oldest item, or `None` if the ring buffer is empty.
    #[inline]
    fn occupied(&mut self) -> Option<usize> {
        let rb = self.rb.rb();
        let head = rb.head().get_relaxed();
        if head == self.tail_cache {
            self.tail_cache = rb.tail().get();
            if head == self.tail_cache {
                return None;
            }
        }
        Some(head)
    }

    /// Drops the item at `head` and hands the slot back to the producer.
    ///
    /// # Safety
    ///
    /// `head` must be the current read index and the ring buffer must not be empty.
    #[inline]
    unsafe fn remove(&mut self, head: usize) {
        let rb = self.rb.rb();
        rb.slots().drop_in_place(head);
        rb.head().set((head + 1) & rb.mask());
    }

    /// Returns a reference to the oldest item without removing it.
    ///
    /// Returns `None` if the ring buffer is empty.
    pub fn front(&mut self) -> Option<&R::Item> {
        let head = self.occupied()?;
        Some(unsafe { self.rb.rb().slots().get(head) })
    }

    /// Removes the oldest item and drops it.
    ///
    /// Does nothing if the ring buffer is empty.
    pub fn pop(&mut self) {
        if let Some(head) = self.occupied() {
            unsafe { self.remove(head) };
        }
    }

    /// Removes the oldest item and drops it without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The last call to [`Self::front`] must have returned `Some` and no item must be removed since.
    pub unsafe fn pop_unchecked(&mut self) {
        let head = self.rb.rb().head().get_relaxed();
        self.remove(head);
    }

    /// Removes the oldest item from the ring buffer and returns it.
    ///
    /// Returns `None` if the ring buffer is empty.
    pub fn dequeue(&mut self) -> Option<R::Item> {
        let head = self.occupied()?;
        let rb = self.rb.rb();
        let item = unsafe { rb.slots().read(head) };
        rb.head().set((head + 1) & rb.mask());
        Some(item)
    }

    /// Removes and drops items present in the ring buffer at the moment of call.
    ///
    /// Returns the number of items removed.
    pub fn clear(&mut self) -> usize {
        let count = self.size();
        for _ in 0..count {
            self.pop();
        }
        count
    }

    /// Returns an iterator that removes items one by one from the ring buffer.
    ///
    /// Iterator ends as soon as the ring buffer is empty, it may be resumed later.
    pub fn pop_iter(&mut self) -> PopIter<'_, R> {
        PopIter { cons: self }
    }
}

impl<R: RbRef> Drop for Consumer<R> {
    fn drop(&mut self) {
        self.rb.rb().hold_head(false);
    }
}

impl<R: RbRef> fmt::Debug for Consumer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer").field("tail_cache", &self.tail_cache).finish_non_exhaustive()
    }
}

delegate_observer!(Consumer);

/// An iterator that removes items from the ring buffer.
pub struct PopIter<'a, R: RbRef> {
    cons: &'a mut Consumer<R>,
}

impl<R: RbRef> Iterator for PopIter<'_, R> {
    type Item = R::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cons.dequeue()
    }
}
