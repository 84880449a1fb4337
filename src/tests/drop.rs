use super::{heap, mapped, Rb};
use crate::traits::*;
use alloc::collections::BTreeSet;
use core::cell::RefCell;

#[derive(Debug)]
struct Dropper<'a> {
    id: i32,
    set: &'a RefCell<BTreeSet<i32>>,
}

impl<'a> Dropper<'a> {
    fn new(set: &'a RefCell<BTreeSet<i32>>, id: i32) -> Self {
        if !set.borrow_mut().insert(id) {
            panic!("value {} already exists", id);
        }
        Self { set, id }
    }
}

impl Drop for Dropper<'_> {
    fn drop(&mut self) {
        if !self.set.borrow_mut().remove(&self.id) {
            panic!("value {} already removed", self.id);
        }
    }
}

#[test]
fn single() {
    let set = RefCell::new(BTreeSet::new());

    let mut rb = Rb::<Dropper>::new(4, heap()).unwrap();

    assert_eq!(set.borrow().len(), 0);

    {
        let (mut prod, mut cons) = rb.split_ref();

        assert!(prod.enqueue(Dropper::new(&set, 1)));
        assert_eq!(set.borrow().len(), 1);
        assert!(prod.enqueue(Dropper::new(&set, 2)));
        assert_eq!(set.borrow().len(), 2);
        assert!(prod.enqueue(Dropper::new(&set, 3)));
        assert_eq!(set.borrow().len(), 3);

        cons.dequeue().unwrap();
        assert_eq!(set.borrow().len(), 2);
        cons.pop();
        assert_eq!(set.borrow().len(), 1);

        assert!(prod.enqueue(Dropper::new(&set, 4)));
        assert_eq!(set.borrow().len(), 2);
    }

    drop(rb);
    assert_eq!(set.borrow().len(), 0);
}

#[test]
fn rejected_item_returned() {
    let set = RefCell::new(BTreeSet::new());

    let mut rb = Rb::<Dropper>::new(2, heap()).unwrap();
    let (mut prod, _) = rb.split_ref();

    assert!(prod.enqueue(Dropper::new(&set, 1)));
    let item = prod.try_enqueue(Dropper::new(&set, 2)).unwrap_err();
    assert_eq!(item.id, 2);
    assert_eq!(set.borrow().len(), 2);

    drop(item);
    assert_eq!(set.borrow().len(), 1);
    assert!(!prod.enqueue(Dropper::new(&set, 3)));
    assert_eq!(set.borrow().len(), 1);
}

#[test]
fn teardown() {
    let set = RefCell::new(BTreeSet::new());

    for count in 0..8 {
        let mut rb = Rb::<Dropper>::new(8, mapped()).unwrap();
        {
            let (mut prod, mut cons) = rb.split_ref();
            // Shift indices so that live items wrap around the end of the ring.
            for id in 0..5 {
                assert!(prod.enqueue(Dropper::new(&set, id)));
                cons.pop();
            }
            for id in 0..count {
                assert!(prod.enqueue(Dropper::new(&set, id)));
            }
        }
        assert_eq!(set.borrow().len(), count as usize);

        drop(rb);
        assert_eq!(set.borrow().len(), 0);
    }
}

#[test]
fn front_does_not_drop() {
    let set = RefCell::new(BTreeSet::new());

    let mut rb = Rb::<Dropper>::new(4, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    assert!(prod.enqueue(Dropper::new(&set, 1)));
    assert!(prod.enqueue(Dropper::new(&set, 2)));

    assert_eq!(cons.front().unwrap().id, 1);
    assert_eq!(cons.front().unwrap().id, 1);
    assert_eq!(set.borrow().len(), 2);

    cons.pop();
    assert_eq!(set.borrow().len(), 1);
    assert_eq!(cons.front().unwrap().id, 2);
}

#[test]
fn clear() {
    let set = RefCell::new(BTreeSet::new());

    let mut rb = Rb::<Dropper>::new(8, heap()).unwrap();
    {
        let (mut prod, mut cons) = rb.split_ref();
        let mut id = 0;

        while !prod.is_full() {
            id += 1;
            assert!(prod.enqueue(Dropper::new(&set, id)));
        }
        assert_eq!(set.borrow().len(), 7);

        cons.pop();
        cons.pop();
        assert_eq!(cons.size(), 5);
        assert_eq!(set.borrow().len(), 5);

        assert_eq!(cons.clear(), 5);
        assert!(cons.is_empty());
        assert_eq!(set.borrow().len(), 0);

        while !prod.is_full() {
            id += 1;
            assert!(prod.enqueue(Dropper::new(&set, id)));
        }
        assert_eq!(set.borrow().len(), 7);
    }

    drop(rb);
    assert_eq!(set.borrow().len(), 0);
}
