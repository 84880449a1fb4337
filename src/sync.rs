//! Atomics and `Arc` used by the crate, native or from `portable-atomic`.

#[cfg(not(feature = "portable-atomic"))]
pub use alloc::sync::Arc;
#[cfg(not(feature = "portable-atomic"))]
pub use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(feature = "portable-atomic")]
pub use portable_atomic::{AtomicBool, AtomicUsize, Ordering};
#[cfg(feature = "portable-atomic")]
pub use portable_atomic_util::Arc;
