//! This simple `Observable` emits values and completes. Its producer returns
//! no teardown (`UnsubscribeLogic::Nil`), so there is nothing to release when
//! the subscription ends.
//!
//! Delivery is synchronous, so the current thread is blocked until the
//! observable completes its emissions.
//!
//! To run this example, execute `cargo run --example basic_observable`.

use rivulet::subscribe::{Subscriber, UnsubscribeLogic};
use rivulet::{Observable, Observer, Subscribeable};

fn main() {
    // Create a custom observable that emits values from 1 to 10.
    let mut emit_10_observable = Observable::new(|mut subscriber| {
        for i in 1..=10 {
            // Emit the value to the subscriber.
            subscriber.next(i);
        }

        // Signal completion to the subscriber.
        subscriber.complete();

        // Nothing to tear down for this producer.
        UnsubscribeLogic::Nil
    });

    // Create the `Subscriber` with a `next` function, and attach an optional
    // `complete` function. No need for an `error` function in this simple
    // example.
    let mut observer = Subscriber::on_next(|v| println!("Emitted {}", v));
    observer.on_complete(|| println!("Completed"));

    // Observables are cold so if you comment out the line below nothing will
    // be emitted.
    emit_10_observable.subscribe(observer);

    println!("Custom Observable finished emitting")
}
