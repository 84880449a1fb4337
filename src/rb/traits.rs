use super::SpscRb;
use crate::sync::Arc;

/// Shared reference to a ring buffer held by its producer and consumer.
pub trait RbRef {
    type Item;
    fn rb(&self) -> &SpscRb<Self::Item>;
}

impl<T> RbRef for &SpscRb<T> {
    type Item = T;
    fn rb(&self) -> &SpscRb<T> {
        self
    }
}
impl<T> RbRef for Arc<SpscRb<T>> {
    type Item = T;
    fn rb(&self) -> &SpscRb<T> {
        self
    }
}
