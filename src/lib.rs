//! Lock-free single-producer single-consumer FIFO queue.
//!
//! The queue is a fixed-size ring of slots living in a cache-padded memory region,
//! which is taken from a huge-page-advised mapping when possible (see [`backing`]).
//! The ring is split into a [`Producer`] and a [`Consumer`] that can be moved to different threads.
//! Neither of them blocks: a full or empty queue is reported immediately and retry policy is up to the caller.
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod alias;
pub mod backing;
mod error;
mod index;
pub mod rb;
pub mod storage;
mod sync;
pub mod traits;
pub mod wrap;

pub use alias::*;
pub use backing::AllocOptions;
pub use error::{Error, Result};
pub use rb::SpscRb;
pub use wrap::{Consumer, Producer};

#[cfg(test)]
mod tests;
