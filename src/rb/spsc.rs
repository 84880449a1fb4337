use crate::{
    backing::AllocOptions,
    error::{Error, Result},
    index::SharedIndex,
    storage::Slots,
    sync::{Arc, AtomicBool, Ordering},
    traits::{Observer, Split, SplitRef},
    wrap::{Consumer, Producer},
};
use core::mem;

/// Bounded single-producer single-consumer ring buffer.
///
/// Holds `capacity` slots of which `capacity - 1` are usable: one slot is always left vacant
/// so that `head == tail` means empty and `tail + 1 == head` means full.
///
/// Items are accessed through a [`Producer`] and a [`Consumer`] obtained by [`Split::split`] or [`SplitRef::split_ref`].
/// There can be at most one of each at a time.
///
/// Note that there is no explicit requirement of `T: Send`. Instead ring buffer will work just fine even with `T: !Send`
/// until you try to send its producer or consumer to another thread.
#[cfg_attr(
    feature = "std",
    doc = r##"
```
use std::thread;
use hugering::{traits::*, AllocOptions, SpscRb};

let rb = SpscRb::<i32>::new(256, AllocOptions::default()).unwrap();
let (mut prod, mut cons) = rb.split();
thread::spawn(move || {
    assert!(prod.enqueue(123));
})
.join()
.unwrap();
thread::spawn(move || {
    assert_eq!(cons.dequeue(), Some(123));
})
.join()
.unwrap();
```
"##
)]
pub struct SpscRb<T> {
    slots: Slots<T>,
    head: SharedIndex,
    tail: SharedIndex,
    head_held: AtomicBool,
    tail_held: AtomicBool,
}

unsafe impl<T: Send> Send for SpscRb<T> {}
unsafe impl<T: Send> Sync for SpscRb<T> {}

impl<T> SpscRb<T> {
    /// Creates a ring buffer with `capacity` slots, `capacity - 1` of them usable.
    ///
    /// Fails if `capacity` is zero or not a power of two, or if backing memory cannot be acquired.
    pub fn new(capacity: usize, options: AllocOptions) -> Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: Slots::new(capacity, &options)?,
            head: SharedIndex::new(0),
            tail: SharedIndex::new(0),
            head_held: AtomicBool::new(false),
            tail_held: AtomicBool::new(false),
        })
    }

    /// Same as [`Self::new`] with default [`AllocOptions`].
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, AllocOptions::default())
    }

    /// Whether backing memory came from a huge-page mapping.
    pub fn used_huge_pages(&self) -> bool {
        self.slots.used_huge_pages()
    }

    #[inline]
    pub(crate) fn mask(&self) -> usize {
        self.slots.len() - 1
    }
    #[inline]
    pub(crate) fn slots(&self) -> &Slots<T> {
        &self.slots
    }
    #[inline]
    pub(crate) fn head(&self) -> &SharedIndex {
        &self.head
    }
    #[inline]
    pub(crate) fn tail(&self) -> &SharedIndex {
        &self.tail
    }

    /// Marks the consumer end as taken or released, returning the previous state.
    ///
    /// Taking the end synchronizes with its release, so a new consumer sees every index store of the previous one,
    /// even if they live on different threads.
    pub(crate) fn hold_head(&self, flag: bool) -> bool {
        self.head_held.swap(flag, Ordering::AcqRel)
    }
    /// Marks the producer end as taken or released, returning the previous state.
    ///
    /// Same synchronization as [`Self::hold_head`].
    pub(crate) fn hold_tail(&self, flag: bool) -> bool {
        self.tail_held.swap(flag, Ordering::AcqRel)
    }
}

impl<T> Observer for SpscRb<T> {
    type Item = T;

    #[inline]
    fn capacity(&self) -> usize {
        self.mask()
    }

    #[inline]
    fn read_index(&self) -> usize {
        self.head.get()
    }
    #[inline]
    fn write_index(&self) -> usize {
        self.tail.get()
    }
}

impl<T> Drop for SpscRb<T> {
    fn drop(&mut self) {
        if !mem::needs_drop::<T>() {
            return;
        }
        let mask = self.mask();
        let tail = self.tail.get_mut();
        let mut head = self.head.get_mut();
        while head != tail {
            unsafe { self.slots.drop_in_place(head) };
            head = (head + 1) & mask;
        }
    }
}

impl<T> Split for SpscRb<T> {
    type Prod = Producer<Arc<Self>>;
    type Cons = Consumer<Arc<Self>>;

    fn split(self) -> (Self::Prod, Self::Cons) {
        let rc = Arc::new(self);
        (Producer::new(rc.clone()), Consumer::new(rc))
    }
}

impl<T> SplitRef for SpscRb<T> {
    type RefProd<'a> = Producer<&'a Self> where Self: 'a;
    type RefCons<'a> = Consumer<&'a Self> where Self: 'a;

    fn split_ref(&mut self) -> (Self::RefProd<'_>, Self::RefCons<'_>) {
        let this: &Self = self;
        (Producer::new(this), Consumer::new(this))
    }
}
