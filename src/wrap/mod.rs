//! Producer and consumer ends of the ring buffer.
//!
//! Each end keeps a private copy of the opposite end's index and only reloads it
//! when the copy suggests that the ring buffer is full (for producer) or empty (for consumer).

mod cons;
mod prod;

pub use cons::{Consumer, PopIter};
pub use prod::Producer;
