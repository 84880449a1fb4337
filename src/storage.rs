use crate::{
    backing::{AllocOptions, BackingStore},
    error::{Error, Result},
};
use core::{
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr::{self, NonNull},
};

/// Cache line size assumed for padding.
pub const CACHE_LINE: usize = 64;

/// Ring slots carved out of a [`BackingStore`].
///
/// The store holds `len + 2 * PADDING` slots. Only the middle `len` of them are ever addressed,
/// the outer ones keep the active range off cache lines shared with foreign memory.
///
/// Slots do not track whether they are initialized, that is up to the owner.
pub struct Slots<T> {
    store: BackingStore,
    base: NonNull<T>,
    len: usize,
    phantom: PhantomData<T>,
}

impl<T> Slots<T> {
    /// Number of guard slots at each end.
    pub const PADDING: usize = match size_of::<T>() {
        0 => 0,
        size => (CACHE_LINE - 1) / size + 1,
    };

    pub fn new(len: usize, options: &AllocOptions) -> Result<Self> {
        let options = options.clone().with_min_align(align_of::<T>());
        if size_of::<T>() == 0 {
            return Ok(Self {
                store: BackingStore::allocate(0, &options)?,
                base: NonNull::dangling(),
                len,
                phantom: PhantomData,
            });
        }
        let bytes = Self::PADDING
            .checked_mul(2)
            .and_then(|pad| pad.checked_add(len))
            .and_then(|count| count.checked_mul(size_of::<T>()))
            .ok_or(Error::CapacityOverflow)?;
        let store = BackingStore::allocate(bytes, &options)?;
        // Store is at least `bytes` long and aligned for `T`.
        let base = unsafe { NonNull::new_unchecked(store.as_ptr().cast::<T>().add(Self::PADDING)) };
        Ok(Self {
            store,
            base,
            len,
            phantom: PhantomData,
        })
    }

    /// Number of addressable slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn used_huge_pages(&self) -> bool {
        self.store.used_huge_pages()
    }

    #[inline]
    fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index < self.len);
        unsafe { self.base.as_ptr().add(index) }
    }

    /// # Safety
    ///
    /// Slot must be uninitialized and not accessed by anyone else.
    #[inline]
    pub unsafe fn write(&self, index: usize, value: T) {
        ptr::write(self.slot(index), value);
    }

    /// # Safety
    ///
    /// Slot must be initialized and must not be written until the returned reference is gone.
    #[inline]
    pub unsafe fn get(&self, index: usize) -> &T {
        &*self.slot(index)
    }

    /// Moves the value out. The slot is uninitialized afterwards.
    ///
    /// # Safety
    ///
    /// Slot must be initialized and not accessed by anyone else.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> T {
        ptr::read(self.slot(index))
    }

    /// Drops the value in place. The slot is uninitialized afterwards.
    ///
    /// # Safety
    ///
    /// Same as for [`Self::read`].
    #[inline]
    pub unsafe fn drop_in_place(&self, index: usize) {
        ptr::drop_in_place(self.slot(index));
    }
}
