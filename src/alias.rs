use crate::{
    rb::SpscRb,
    sync::Arc,
    wrap::{Consumer, Producer},
};

/// Producer of a ring buffer split by value.
pub type SpscProd<T> = Producer<Arc<SpscRb<T>>>;

/// Consumer of a ring buffer split by value.
pub type SpscCons<T> = Consumer<Arc<SpscRb<T>>>;

/// Producer of a ring buffer split by reference.
pub type SpscRefProd<'a, T> = Producer<&'a SpscRb<T>>;

/// Consumer of a ring buffer split by reference.
pub type SpscRefCons<'a, T> = Consumer<&'a SpscRb<T>>;
