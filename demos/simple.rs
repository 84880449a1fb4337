use hugering::{traits::*, SpscRb};

fn main() {
    let rb = SpscRb::<i32>::with_capacity(4).unwrap();
    let (mut prod, mut cons) = rb.split();

    assert!(prod.enqueue(0));
    assert!(prod.enqueue(1));
    assert!(prod.enqueue(2));
    assert_eq!(prod.try_enqueue(3), Err(3));

    assert_eq!(cons.dequeue().unwrap(), 0);

    prod.try_enqueue(3).unwrap();

    assert_eq!(cons.front(), Some(&1));
    cons.pop();
    assert_eq!(cons.dequeue().unwrap(), 2);
    assert_eq!(cons.dequeue().unwrap(), 3);
    assert_eq!(cons.dequeue(), None);
}
