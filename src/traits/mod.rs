pub mod observer;
mod split;

pub use observer::Observer;
pub use split::{Split, SplitRef};
