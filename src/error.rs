use thiserror::Error;

/// Ring buffer construction error.
///
/// Full and empty conditions are not errors: [`Producer::try_enqueue`](`crate::Producer::try_enqueue`) hands the item back
/// and [`Consumer::dequeue`](`crate::Consumer::dequeue`) returns `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Capacity is zero or not a power of two.
    #[error("capacity must be a non-zero power of two, got {0}")]
    InvalidCapacity(usize),
    /// Requested alignment is not a power of two.
    #[error("alignment must be a power of two, got {0}")]
    InvalidAlignment(usize),
    /// Slot count or byte size does not fit into `isize`.
    #[error("ring buffer size overflows the address space")]
    CapacityOverflow,
    /// Neither the mapping nor the heap strategy could provide memory.
    #[error("failed to allocate {size} bytes aligned to {align}")]
    Alloc { size: usize, align: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
