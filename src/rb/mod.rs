mod spsc;
pub mod traits;

pub use spsc::SpscRb;
pub use traits::RbRef;
