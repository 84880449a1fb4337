use super::{mapped, Rb};
use crate::traits::*;

#[test]
fn basic() {
    let mut rb = Rb::<()>::new(4, mapped()).unwrap();
    assert!(!rb.used_huge_pages());
    let (mut prod, mut cons) = rb.split_ref();
    assert_eq!(prod.capacity(), 3);

    assert_eq!(prod.size(), 0);
    assert!(prod.is_empty());

    assert!(cons.dequeue().is_none());

    assert!(prod.enqueue(()));
    assert_eq!(prod.size(), 1);

    assert!(prod.enqueue(()));
    assert!(prod.enqueue(()));
    assert_eq!(prod.size(), 3);
    assert!(prod.is_full());

    assert!(!prod.enqueue(()));

    cons.dequeue().unwrap();
    assert_eq!(cons.size(), 2);

    assert!(prod.enqueue(()));
    assert!(prod.is_full());

    assert_eq!(cons.front(), Some(&()));
    cons.pop();
    assert_eq!(cons.clear(), 2);
    assert!(cons.is_empty());
    assert!(cons.dequeue().is_none());
}
