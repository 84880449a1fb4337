use hugering::{traits::*, SpscRb};
use std::{thread, time::Duration};

fn main() {
    let rb = SpscRb::<u8>::with_capacity(16).unwrap();
    println!("backed by huge pages: {}", rb.used_huge_pages());
    let (mut prod, mut cons) = rb.split();

    let smsg = "The quick brown fox jumps over the lazy dog";

    let pjh = thread::spawn(move || {
        println!("-> sending message: '{}'", smsg);

        let mut bytes = smsg.bytes().chain([0]).peekable();
        while bytes.peek().is_some() {
            if prod.is_full() {
                println!("-> buffer is full, waiting");
                thread::sleep(Duration::from_millis(1));
            } else {
                let n = prod.enqueue_iter(&mut bytes);
                println!("-> {} bytes sent", n);
            }
        }

        println!("-> message sent");
    });

    let cjh = thread::spawn(move || {
        println!("<- receiving message");

        let mut bytes = Vec::<u8>::new();
        loop {
            if cons.is_empty() {
                if bytes.ends_with(&[0]) {
                    break;
                } else {
                    println!("<- buffer is empty, waiting");
                    thread::sleep(Duration::from_millis(1));
                }
            } else {
                let n = bytes.len();
                bytes.extend(cons.pop_iter());
                println!("<- {} bytes received", bytes.len() - n);
            }
        }

        assert_eq!(bytes.pop().unwrap(), 0);
        let msg = String::from_utf8(bytes).unwrap();
        println!("<- message received: '{}'", msg);

        msg
    });

    pjh.join().unwrap();
    let rmsg = cjh.join().unwrap();

    assert_eq!(smsg, rmsg);
}
