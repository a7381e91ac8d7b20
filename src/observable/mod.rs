//! The `observable` module provides the building blocks for creating and
//! subscribing to observables: cold, synchronous sources of values delivered
//! by push to an attached subscriber.

use log::debug;

use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, UnsubscribeLogic, Unsubscribeable,
};

/// The `Observable` struct represents a source of values that can be observed
/// and transformed.
///
/// An `Observable` is an inert description of a stream: it performs no work
/// until subscribed. Subscribing runs the stored producer synchronously, so
/// every emission, and the terminal `complete` or `error` signal, is delivered
/// before `subscribe` returns. Observables are cold: each `subscribe` call
/// runs the producer again, independently, with no state shared between
/// subscriptions.
///
/// # Example: basic synchronous `Observable`
///
/// This simple `Observable` emits values and completes. It returns no teardown
/// (`UnsubscribeLogic::Nil`), so unsubscribing the returned subscription has
/// nothing left to release.
///
/// ```
/// use rivulet::subscribe::{Subscriber, UnsubscribeLogic};
/// use rivulet::{Observable, Observer, Subscribeable};
///
/// // Create a custom observable that emits values from 1 to 10.
/// let mut emit_10_observable = Observable::new(|mut subscriber| {
///     let mut i = 1;
///
///     while i <= 10 {
///         // Emit the value to the subscriber.
///         subscriber.next(i);
///         i += 1;
///     }
///     // Signal completion to the subscriber.
///     subscriber.complete();
///
///     // No teardown needed for this producer.
///     UnsubscribeLogic::Nil
/// });
///
/// // Create the `Subscriber` with a `next` function, and attach an optional
/// // `complete` function. No need for an `error` function here.
/// let mut observer = Subscriber::on_next(|v| println!("Emitted {}", v));
/// observer.on_complete(|| println!("Completed"));
///
/// // Observables are cold: without this call nothing is emitted.
/// emit_10_observable.subscribe(observer);
/// ```
///
/// # Example: `Observable` with error handling
///
/// Failures are ordinary values delivered through the `error` channel, not
/// panics. Wrap errors in an `Rc` before handing them to the observer.
///
/// ```no_run
/// use std::{error::Error, fmt::Display, io, rc::Rc};
///
/// use rivulet::subscribe::*;
/// use rivulet::{Observable, Observer, Subscribeable};
///
/// #[derive(Debug)]
/// struct MyErr(i32);
///
/// impl Display for MyErr {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "number should be less than 100, you entered {}", self.0)
///     }
/// }
///
/// impl Error for MyErr {}
///
/// // Creates an `Observable<i32>` that parses user input and emits or signals errors.
/// pub fn get_less_than_100() -> Observable<i32> {
///     Observable::new(|mut observer| {
///         let mut input = String::new();
///
///         println!("Please enter an integer (less than 100):");
///
///         if let Err(e) = io::stdin().read_line(&mut input) {
///             // Send input error to the observer.
///             observer.error(Rc::new(e));
///             return UnsubscribeLogic::Nil;
///         }
///
///         match input.trim().parse::<i32>() {
///             Err(e) => {
///                 // Send parsing error to the observer.
///                 observer.error(Rc::new(e));
///             }
///             Ok(num) if num > 100 => {
///                 // Send custom error to the observer.
///                 observer.error(Rc::new(MyErr(num)));
///             }
///             Ok(num) => {
///                 // Emit the parsed value to the observer.
///                 observer.next(num);
///             }
///         }
///
///         // Signal completion if there are no errors.
///         // Note: `complete` does not affect the outcome if `error` was called before it.
///         observer.complete();
///
///         UnsubscribeLogic::Nil
///     })
/// }
///
/// let observer = Subscriber::new(
///     |input| println!("You entered: {}", input),
///     |e| eprintln!("{}", e),
///     || println!("User input handled"),
/// );
///
/// let mut observable = get_less_than_100();
///
/// observable.subscribe(observer);
/// ```
pub struct Observable<T> {
    subscribe_fn: Box<dyn FnMut(Subscriber<T>) -> UnsubscribeLogic>,
}

impl<T> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The subscribe function (`sf`) is a closure that defines the behavior of
    /// the `Observable` when subscribed: it receives the `Subscriber`, performs
    /// its emissions against it, and returns the teardown logic to run when the
    /// subscription terminates. The teardown runs exactly once, whether the
    /// stream ends by completion, by error, or by explicit unsubscribe.
    pub fn new(sf: impl FnMut(Subscriber<T>) -> UnsubscribeLogic + 'static) -> Self {
        Observable {
            subscribe_fn: Box::new(sf),
        }
    }

    /// Creates an `Observable` that emits every element of `iter` in order,
    /// then completes.
    ///
    /// Delivery is synchronous and unconditional: the whole sequence, followed
    /// by the `complete` signal, is pushed through before `subscribe` returns.
    /// The source must be `Clone` because each subscription replays the full
    /// sequence independently.
    ///
    /// The teardown of this observable logs at debug level when it runs.
    ///
    /// ```
    /// use rivulet::subscribe::Subscriber;
    /// use rivulet::{Observable, Subscribeable, Unsubscribeable};
    ///
    /// let mut requests = Observable::from_iter(vec!["GET /user", "POST /user"]);
    ///
    /// let observer = Subscriber::new(
    ///     |req| println!("handling {}", req),
    ///     |e| eprintln!("{}", e),
    ///     || println!("complete"),
    /// );
    ///
    /// let mut subscription = requests.subscribe(observer);
    ///
    /// // Emission already finished; this is a no-op besides releasing the handle.
    /// subscription.unsubscribe();
    /// ```
    pub fn from_iter<I>(iter: I) -> Observable<T>
    where
        I: IntoIterator<Item = T> + Clone + 'static,
    {
        Observable::new(move |mut o| {
            for v in iter.clone() {
                o.next(v);
            }
            o.complete();

            UnsubscribeLogic::Logic(Box::new(|| debug!("unsubscribed")))
        })
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, v: Subscriber<Self::ObsType>) -> Subscription {
        let mut observer = v.share();
        let teardown = (self.subscribe_fn)(v);

        // Capture the producer's teardown into the observer. If the producer
        // already terminated the stream while it ran, this runs the teardown
        // on the spot.
        observer.set_teardown(teardown);

        Subscription::new(UnsubscribeLogic::Logic(Box::new(move || {
            observer.unsubscribe();
        })))
    }
}

/// The `ObservableExt` trait provides a set of extension methods that can be
/// applied to observables to transform and manipulate their behavior.
///
/// Every operator subscribes to its source with a wrapping subscriber and
/// forwards to the downstream one, so the termination and teardown guarantees
/// of a single subscription hold across a whole chain: unsubscribing the
/// outermost subscription cascades upstream.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Transforms the items emitted by the observable using a transformation
    /// function.
    ///
    /// The transformation function `f` is applied to each item emitted by the
    /// observable, and the resulting value is emitted by the resulting
    /// observable.
    fn map<U, F>(mut self, f: F) -> Observable<U>
    where
        Self: Sized + 'static,
        F: (FnOnce(T) -> U) + Copy + 'static,
        U: 'static,
    {
        Observable::new(move |o| {
            let mut o_e = o.share();
            let mut o_c = o.share();
            let mut o_n = o;

            let u = Subscriber::new(
                move |v| {
                    let t = f(v);
                    o_n.next(t);
                },
                move |observable_error| o_e.error(observable_error),
                move || o_c.complete(),
            );
            UnsubscribeLogic::Wrapped(Box::new(self.subscribe(u)))
        })
    }

    /// Filters the items emitted by the observable based on a predicate
    /// function.
    ///
    /// Only items for which the predicate function returns `true` will be
    /// emitted by the resulting observable.
    fn filter<P>(mut self, predicate: P) -> Observable<T>
    where
        Self: Sized + 'static,
        P: (FnOnce(&T) -> bool) + Copy + 'static,
    {
        Observable::new(move |o| {
            let mut o_e = o.share();
            let mut o_c = o.share();
            let mut o_n = o;

            let u = Subscriber::new(
                move |v| {
                    if predicate(&v) {
                        o_n.next(v);
                    }
                },
                move |observable_error| o_e.error(observable_error),
                move || o_c.complete(),
            );
            UnsubscribeLogic::Wrapped(Box::new(self.subscribe(u)))
        })
    }

    /// Skips the first `n` items emitted by the observable and then emits the
    /// rest.
    ///
    /// If `n` is greater than or equal to the total number of items, the
    /// resulting observable emits nothing and just completes.
    fn skip(mut self, n: usize) -> Observable<T>
    where
        Self: Sized + 'static,
    {
        Observable::new(move |o| {
            let mut o_e = o.share();
            let mut o_c = o.share();
            let mut o_n = o;

            let mut n = n;
            let u = Subscriber::new(
                move |v| {
                    if n > 0 {
                        n -= 1;
                        return;
                    }
                    o_n.next(v);
                },
                move |observable_error| o_e.error(observable_error),
                move || o_c.complete(),
            );
            UnsubscribeLogic::Wrapped(Box::new(self.subscribe(u)))
        })
    }

    /// Emits at most the first `n` items emitted by the observable, then
    /// completes the downstream observer.
    ///
    /// # Notes
    ///
    /// Delivery is synchronous, so a source cannot be interrupted mid-burst:
    /// it keeps emitting into the terminated observer, which silently drops
    /// the remainder. `take` bounds what the subscriber sees, not the work the
    /// source performs.
    fn take(mut self, n: usize) -> Observable<T>
    where
        Self: Sized + 'static,
    {
        Observable::new(move |mut o| {
            if n == 0 {
                o.complete();
            }
            let mut o_e = o.share();
            let mut o_c = o.share();
            let mut o_n = o;

            let mut remaining = n;
            let u = Subscriber::new(
                move |v| {
                    if remaining == 0 {
                        return;
                    }
                    remaining -= 1;
                    o_n.next(v);
                    if remaining == 0 {
                        o_n.complete();
                    }
                },
                move |observable_error| o_e.error(observable_error),
                move || o_c.complete(),
            );
            UnsubscribeLogic::Wrapped(Box::new(self.subscribe(u)))
        })
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}
