use super::Observer;

/// Consumes the ring buffer and hands out its producer and consumer.
///
/// Both ends share ownership of the ring buffer, which is freed when the last of them is dropped.
pub trait Split {
    /// Producer type.
    type Prod: Observer;
    /// Consumer type.
    type Cons: Observer;

    fn split(self) -> (Self::Prod, Self::Cons);
}

/// Borrows the ring buffer as producer and consumer.
///
/// The ring buffer stays with the caller and can be split again once both ends are dropped.
pub trait SplitRef {
    /// Ref producer type.
    type RefProd<'a>: Observer + 'a
    where
        Self: 'a;
    /// Ref consumer type.
    type RefCons<'a>: Observer + 'a
    where
        Self: 'a;

    fn split_ref(&mut self) -> (Self::RefProd<'_>, Self::RefCons<'_>);
}
