use super::{heap, Rb};
use crate::traits::*;
use alloc::{boxed::Box, string::String, vec::Vec};

#[test]
fn front_pop() {
    let mut rb = Rb::<i32>::new(4, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    assert_eq!(cons.front(), None);

    assert!(prod.enqueue(1));
    assert!(prod.enqueue(2));

    assert_eq!(cons.front(), Some(&1));
    assert_eq!(cons.size(), 2);
    cons.pop();
    assert_eq!(cons.front(), Some(&2));
    cons.pop();
    assert_eq!(cons.front(), None);
    assert!(cons.is_empty());
}

#[test]
fn pop_empty() {
    let mut rb = Rb::<i32>::new(4, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    cons.pop();
    assert_eq!(cons.read_index(), 0);

    assert!(prod.enqueue(1));
    cons.pop();
    cons.pop();
    assert_eq!(cons.read_index(), 1);
    assert!(cons.is_empty());
}

#[test]
fn pop_unchecked() {
    let mut rb = Rb::<String>::new(4, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    assert!(prod.enqueue(String::from("first")));
    assert!(prod.enqueue(String::from("second")));

    let mut seen = Vec::new();
    while let Some(s) = cons.front() {
        seen.push(s.clone());
        unsafe { cons.pop_unchecked() };
    }
    assert_eq!(seen, ["first", "second"]);
    assert!(cons.is_empty());
}

#[test]
fn front_sees_new_items() {
    let mut rb = Rb::<i32>::new(4, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    assert_eq!(cons.front(), None);
    assert!(prod.enqueue(7));
    assert_eq!(cons.front(), Some(&7));
    assert_eq!(cons.dequeue(), Some(7));
}

#[derive(Clone, Debug, PartialEq)]
struct Record {
    id: u64,
    name: String,
    payload: [u8; 24],
}

#[test]
fn round_trip_move_only() {
    let mut rb = Rb::<Box<Record>>::new(8, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    let records: Vec<_> = (0..5)
        .map(|i| Record {
            id: i,
            name: alloc::format!("record-{}", i),
            payload: [i as u8; 24],
        })
        .collect();
    for r in &records {
        assert!(prod.enqueue(Box::new(r.clone())));
    }
    for r in &records {
        assert_eq!(*cons.dequeue().unwrap(), *r);
    }
    assert_eq!(cons.dequeue(), None);
}

#[test]
fn round_trip_copy() {
    let mut rb = Rb::<[u32; 5]>::new(8, heap()).unwrap();
    let (mut prod, mut cons) = rb.split_ref();

    for i in 0..20u32 {
        let value = [i, i + 1, i * 2, !i, i.rotate_left(7)];
        assert!(prod.enqueue(value));
        assert_eq!(cons.front(), Some(&value));
        assert_eq!(cons.dequeue(), Some(value));
    }
}
