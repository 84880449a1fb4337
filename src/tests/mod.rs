use crate::{AllocOptions, SpscRb as Rb};

mod drop;
mod front;
mod zero_sized;

/// Options that skip the mapping strategy.
fn heap() -> AllocOptions {
    AllocOptions::new().huge_pages(false)
}

/// Mapping strategy without page locking, so that tests do not hit the memlock limit.
fn mapped() -> AllocOptions {
    AllocOptions::new().lock_pages(false)
}
