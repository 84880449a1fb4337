/// Ring buffer observer.
///
/// Can observe ring buffer state but cannot access its data.
/// Every call takes a fresh snapshot of the shared indices, private caches of the producer and consumer are never consulted.
pub trait Observer {
    type Item: Sized;

    /// Maximal number of items the ring buffer can hold.
    ///
    /// It is one less than the number of slots and is constant during the whole ring buffer lifetime.
    fn capacity(&self) -> usize;

    /// Index of the oldest item in the ring buffer.
    ///
    /// Index value is in range `0..=capacity`.
    fn read_index(&self) -> usize;
    /// Index of the next vacant slot in the ring buffer.
    ///
    /// Index value is in range `0..=capacity`.
    fn write_index(&self) -> usize;

    /// The number of items stored in the buffer.
    ///
    /// *Actual number may be greater or less than returned value due to concurring activity of producer or consumer respectively.*
    #[inline]
    fn size(&self) -> usize {
        let read = self.read_index();
        let write = self.write_index();
        // Slot count is a power of two, so capacity is also the index mask.
        write.wrapping_sub(read) & self.capacity()
    }

    /// Checks if the ring buffer is empty.
    ///
    /// *The result may become irrelevant at any time because of concurring producer activity.*
    #[inline]
    fn is_empty(&self) -> bool {
        self.read_index() == self.write_index()
    }

    /// Checks if the ring buffer is full.
    ///
    /// *The result may become irrelevant at any time because of concurring consumer activity.*
    #[inline]
    fn is_full(&self) -> bool {
        self.size() == self.capacity()
    }
}

/// Implements [`Observer`] for a ring buffer handle by forwarding to the ring buffer.
macro_rules! delegate_observer {
    ($type:ident) => {
        impl<R: $crate::rb::RbRef> $crate::traits::Observer for $type<R> {
            type Item = R::Item;

            #[inline]
            fn capacity(&self) -> usize {
                $crate::traits::Observer::capacity(self.rb())
            }

            #[inline]
            fn read_index(&self) -> usize {
                $crate::traits::Observer::read_index(self.rb())
            }
            #[inline]
            fn write_index(&self) -> usize {
                $crate::traits::Observer::write_index(self.rb())
            }
        }
    };
}

pub(crate) use delegate_observer;
