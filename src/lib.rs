//! `rivulet` is a minimal push-based observable library with synchronous,
//! single-threaded delivery.
//!
//! An [`Observable`] is an inert description of a producer; nothing runs until
//! [`subscribe`] is called with a [`Subscriber`] holding up to three optional
//! callbacks (`next`, `error`, `complete`). The producer then pushes its
//! values synchronously, terminates the stream at most once with `complete`
//! or `error`, and hands back a teardown action that is guaranteed to run
//! exactly once, whether the stream ends on its own or the caller
//! unsubscribes through the returned [`Subscription`].
//!
//! Streams are cold: every subscription runs the producer independently, so
//! two subscribers to the same observable each receive the full sequence with
//! no shared state between them.
//!
//! ```
//! use rivulet::subscribe::Subscriber;
//! use rivulet::{Observable, ObservableExt, Subscribeable, Unsubscribeable};
//!
//! let mut evens = Observable::from_iter(1..=10).filter(|v| v % 2 == 0);
//!
//! let mut observer = Subscriber::on_next(|v| println!("Emitted {}", v));
//! observer.on_complete(|| println!("Completed"));
//!
//! let mut subscription = evens.subscribe(observer);
//!
//! // The whole sequence was already delivered; unsubscribing afterwards is
//! // an idempotent no-op.
//! subscription.unsubscribe();
//! ```
//!
//! [`Observable`]: struct.Observable.html
//! [`Subscriber`]: subscribe/struct.Subscriber.html
//! [`Subscription`]: subscribe/struct.Subscription.html
//! [`subscribe`]: trait.Subscribeable.html#tymethod.subscribe

mod observable;
pub mod observer;
mod subscription;

pub use observable::{Observable, ObservableExt};
pub use observer::Observer;
pub use subscription::subscribe;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};
