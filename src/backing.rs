//! Backing memory for ring buffer slots.
//!
//! Memory is taken from an anonymous mapping advised for transparent huge pages when possible,
//! otherwise from the global allocator. The strategy that succeeded is recorded in the returned [`BackingStore`]
//! and the matching release runs once, when the store is dropped.

use crate::error::{Error, Result};
use alloc::alloc::{alloc, alloc_zeroed, dealloc, Layout};
use core::ptr::{self, NonNull};
use log::trace;
#[cfg(unix)]
use log::debug;

/// Size that mapped regions are rounded up to.
pub const HUGE_PAGE_SIZE: usize = 2 * 1024 * 1024;

/// How the backing memory should be acquired.
///
/// Defaults: 64-byte alignment, try huge pages, prefault and lock the pages, no NUMA preference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocOptions {
    align: usize,
    huge_pages: bool,
    prefault: bool,
    lock_pages: bool,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    numa_node: Option<u32>,
}

impl Default for AllocOptions {
    fn default() -> Self {
        Self {
            align: 64,
            huge_pages: true,
            prefault: true,
            lock_pages: true,
            numa_node: None,
        }
    }
}

impl AllocOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimal alignment of the region start. Must be a power of two.
    pub fn align(mut self, align: usize) -> Self {
        self.align = align;
        self
    }
    /// Try an anonymous huge-page-advised mapping before falling back to the heap.
    pub fn huge_pages(mut self, enable: bool) -> Self {
        self.huge_pages = enable;
        self
    }
    /// Fault every page in up front, after huge page and NUMA advice are applied.
    /// Heap memory is zero-filled instead.
    pub fn prefault(mut self, enable: bool) -> Self {
        self.prefault = enable;
        self
    }
    /// Lock mapped pages in RAM.
    pub fn lock_pages(mut self, enable: bool) -> Self {
        self.lock_pages = enable;
        self
    }
    /// Preferred NUMA node for mapped pages. Best effort, only honored on Linux.
    pub fn numa_node(mut self, node: Option<u32>) -> Self {
        self.numa_node = node;
        self
    }

    /// Raises alignment to at least `min`, leaving an invalid alignment as is so that it is still reported.
    pub(crate) fn with_min_align(mut self, min: usize) -> Self {
        if self.align.is_power_of_two() {
            self.align = self.align.max(min);
        }
        self
    }
}

enum Strategy {
    /// Nothing was allocated, the pointer is dangling.
    Empty,
    Heap(Layout),
    #[cfg(unix)]
    Mapped,
}

/// Exclusively owned raw memory region.
///
/// Contents are uninitialized unless the region was prefaulted.
pub struct BackingStore {
    ptr: NonNull<u8>,
    len: usize,
    strategy: Strategy,
}

unsafe impl Send for BackingStore {}
unsafe impl Sync for BackingStore {}

impl BackingStore {
    /// Acquires at least `size` bytes aligned to `options.align`.
    ///
    /// Zero `size` yields a dangling, properly aligned region that owns no memory.
    pub fn allocate(size: usize, options: &AllocOptions) -> Result<Self> {
        if !options.align.is_power_of_two() {
            return Err(Error::InvalidAlignment(options.align));
        }
        if size == 0 {
            return Ok(Self {
                ptr: dangling(options.align),
                len: 0,
                strategy: Strategy::Empty,
            });
        }
        #[cfg(unix)]
        if options.huge_pages {
            match Self::map(size, options) {
                Some(store) => return Ok(store),
                None => debug!("huge page mapping of {} bytes failed, falling back to heap", size),
            }
        }
        Self::alloc_heap(size, options)
    }

    fn alloc_heap(size: usize, options: &AllocOptions) -> Result<Self> {
        let layout = Layout::from_size_align(size, options.align).map_err(|_| Error::CapacityOverflow)?;
        let raw = unsafe {
            if options.prefault {
                alloc_zeroed(layout)
            } else {
                alloc(layout)
            }
        };
        let ptr = NonNull::new(raw).ok_or(Error::Alloc {
            size,
            align: options.align,
        })?;
        trace!("allocated {} bytes on heap at {:p}", size, ptr);
        Ok(Self {
            ptr,
            len: size,
            strategy: Strategy::Heap(layout),
        })
    }

    #[cfg(unix)]
    fn map(size: usize, options: &AllocOptions) -> Option<Self> {
        let len = size.checked_next_multiple_of(HUGE_PAGE_SIZE)?;
        let raw = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if raw == libc::MAP_FAILED {
            debug!("mmap of {} bytes failed: {}", len, os::last_error());
            return None;
        }
        // Dropping `store` from here on unmaps the region.
        let store = Self {
            ptr: NonNull::new(raw.cast())?,
            len,
            strategy: Strategy::Mapped,
        };
        if store.ptr.as_ptr() as usize % options.align != 0 {
            debug!("mapping at {:p} is not aligned to {}", store.ptr, options.align);
            return None;
        }

        #[cfg(target_os = "linux")]
        {
            os::advise(raw, len, libc::MADV_HUGEPAGE, "MADV_HUGEPAGE");
            if let Some(node) = options.numa_node {
                os::bind_node(raw, len, node);
            }
        }
        if options.prefault {
            os::touch(raw, len);
        }
        if options.lock_pages && unsafe { libc::mlock(raw, len) } != 0 {
            trace!("mlock of {} bytes ignored: {}", len, os::last_error());
        }
        trace!("mapped {} bytes at {:p}", len, store.ptr);
        Some(store)
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Size of the owned region, which may exceed the requested size.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether memory came from the huge-page mapping rather than the heap.
    #[inline]
    pub fn used_huge_pages(&self) -> bool {
        match self.strategy {
            #[cfg(unix)]
            Strategy::Mapped => true,
            Strategy::Empty | Strategy::Heap(_) => false,
        }
    }
}

impl Drop for BackingStore {
    fn drop(&mut self) {
        match self.strategy {
            Strategy::Empty => (),
            Strategy::Heap(layout) => unsafe { dealloc(self.ptr.as_ptr(), layout) },
            #[cfg(unix)]
            Strategy::Mapped => {
                if unsafe { libc::munmap(self.ptr.as_ptr().cast(), self.len) } != 0 {
                    debug!("munmap of {} bytes at {:p} failed: {}", self.len, self.ptr, os::last_error());
                }
            }
        }
    }
}

fn dangling(align: usize) -> NonNull<u8> {
    // `align` is a non-zero power of two.
    unsafe { NonNull::new_unchecked(ptr::null_mut::<u8>().wrapping_add(align)) }
}

#[cfg(unix)]
mod os {
    use core::fmt;
    use log::trace;

    #[cfg(feature = "std")]
    pub fn last_error() -> impl fmt::Display {
        std::io::Error::last_os_error()
    }
    #[cfg(not(feature = "std"))]
    pub fn last_error() -> impl fmt::Display {
        "os error"
    }

    #[cfg(target_os = "linux")]
    pub fn advise(addr: *mut libc::c_void, len: usize, advice: libc::c_int, name: &str) {
        if unsafe { libc::madvise(addr, len, advice) } != 0 {
            trace!("madvise({}) ignored: {}", name, last_error());
        }
    }

    /// Writes one byte per page so that the kernel backs the whole range before first use.
    pub fn touch(addr: *mut libc::c_void, len: usize) {
        // Smallest page size among supported targets, larger pages are touched more than once.
        const STEP: usize = 4096;
        let base = addr.cast::<u8>();
        for offset in (0..len).step_by(STEP) {
            unsafe { base.add(offset).write_volatile(0) };
        }
    }

    #[cfg(target_os = "linux")]
    pub fn bind_node(addr: *mut libc::c_void, len: usize, node: u32) {
        const MPOL_PREFERRED: libc::c_long = 1;
        const BITS: u32 = libc::c_ulong::BITS;

        if node >= BITS {
            trace!("NUMA node {} is out of supported range, ignored", node);
            return;
        }
        let mask: libc::c_ulong = 1 << node;
        // The kernel reads `maxnode - 1` bits of the mask.
        let maxnode = (BITS + 1) as libc::c_ulong;
        let res = unsafe {
            libc::syscall(
                libc::SYS_mbind,
                addr,
                len,
                MPOL_PREFERRED,
                &mask as *const libc::c_ulong,
                maxnode,
                0 as libc::c_uint,
            )
        };
        if res != 0 {
            trace!("mbind to NUMA node {} ignored: {}", node, last_error());
        }
    }
}
