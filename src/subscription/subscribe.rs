use std::{cell::RefCell, error::Error, mem, rc::Rc};

use crate::observer::Observer;

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by an observable stream.
pub trait Subscribeable {
    /// The type of items emitted by the observable stream.
    type ObsType;

    /// Subscribes to the observable stream and specifies how to handle emitted
    /// values.
    ///
    /// The `Subscriber` parameter defines the behavior for processing values
    /// emitted by the observable stream. The producer runs synchronously inside
    /// this call: every emission it performs is delivered to the subscriber
    /// before `subscribe` returns.
    ///
    /// The returned `Subscription` allows the subscriber to cancel the
    /// subscription and release its resources.
    ///
    /// # Arguments
    ///
    /// - `s`: A `Subscriber` that handles emitted values and other events from
    ///        the observable stream.
    ///
    /// # Returns
    ///
    /// A `Subscription` that represents the subscription to the observable
    /// stream.
    fn subscribe(&mut self, s: Subscriber<Self::ObsType>) -> Subscription;
}

/// A trait for types that can be unsubscribed, allowing the clean release of
/// resources associated with a subscription.
pub trait Unsubscribeable {
    /// Unsubscribes from a subscription and releases associated resources.
    ///
    /// Unsubscribing terminates the observer: no further values or terminal
    /// signals are delivered, and the teardown action associated with the
    /// subscription runs.
    ///
    /// This method is idempotent. Calling it again, or calling it after the
    /// stream already completed or errored, does nothing; the teardown action
    /// never runs more than once.
    fn unsubscribe(&mut self);
}

type NextFn<T> = Box<dyn FnMut(T)>;
type CompleteFn = Box<dyn FnMut()>;
type ErrorFn = Box<dyn FnMut(Rc<dyn Error>)>;

/// Delivery state of a subscriber. `Terminated` is absorbing: it is entered at
/// most once, through `complete`, `error` or `unsubscribe`, and never left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ObserverState {
    Active,
    Terminated,
}

struct SubscriberState<NextFnType> {
    next_fn: Option<NextFn<NextFnType>>,
    complete_fn: Option<CompleteFn>,
    error_fn: Option<ErrorFn>,
    state: ObserverState,
    teardown: UnsubscribeLogic,
}

impl<NextFnType> SubscriberState<NextFnType> {
    // Enters the terminal state and hands back whatever teardown is pending.
    // Handlers are dropped here so consumer resources are released as soon as
    // the stream ends, not when the last handle goes away.
    fn terminate(&mut self) -> UnsubscribeLogic {
        self.state = ObserverState::Terminated;
        self.next_fn = None;
        self.complete_fn = None;
        self.error_fn = None;
        mem::replace(&mut self.teardown, UnsubscribeLogic::Nil)
    }
}

/// A type that acts as an observer, allowing users to handle emitted values,
/// errors, and completion when subscribing to an `Observable`.
///
/// All three handlers are optional. A handler that is absent means the
/// corresponding signal is silently absorbed; a subscriber with no handlers at
/// all is legal and simply produces no visible output.
///
/// A `Subscriber` delivers at most one terminal signal (`complete` or `error`)
/// for its subscription, drops every value emitted after termination, and runs
/// the teardown action captured from the producer exactly once, whichever of
/// `complete`, `error` or `unsubscribe` ends the stream.
///
/// Users can create a `Subscriber` instance using the `new` method with all
/// three handlers, start from `on_next` and attach the rest, or use
/// `Subscriber::default()` for a subscriber with no handlers.
pub struct Subscriber<NextFnType> {
    state: Rc<RefCell<SubscriberState<NextFnType>>>,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Creates a new `Subscriber` instance with custom handling functions for
    /// emitted values, errors, and completion.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static,
        error_fn: impl FnMut(Rc<dyn Error>) + 'static,
        complete_fn: impl FnMut() + 'static,
    ) -> Self {
        Self::from_handlers(
            Some(Box::new(next_fn)),
            Some(Box::new(error_fn)),
            Some(Box::new(complete_fn)),
        )
    }

    /// Create a new `Subscriber` with the provided `next` function.
    ///
    /// The `next` closure is called when the observable emits a new item. It
    /// takes a parameter of type `NextFnType`, which is an item emitted by the
    /// observable.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static) -> Self {
        Self::from_handlers(Some(Box::new(next_fn)), None, None)
    }

    /// Set the completion function for the `Subscriber`.
    ///
    /// The provided closure will be called when the observable completes its
    /// emission sequence.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static) {
        self.state.borrow_mut().complete_fn = Some(Box::new(complete_fn));
    }

    /// Set the error-handling function for the `Subscriber`.
    ///
    /// The provided closure will be called when the observable signals an error
    /// during its emission sequence. It takes an `Rc` wrapping a trait object
    /// that implements the `Error` trait as its parameter.
    pub fn on_error(&mut self, error_fn: impl FnMut(Rc<dyn Error>) + 'static) {
        self.state.borrow_mut().error_fn = Some(Box::new(error_fn));
    }

    /// Returns `true` once the subscriber has completed, errored, or been
    /// unsubscribed. A terminated subscriber never delivers again.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.borrow().state == ObserverState::Terminated
    }

    fn from_handlers(
        next_fn: Option<NextFn<NextFnType>>,
        error_fn: Option<ErrorFn>,
        complete_fn: Option<CompleteFn>,
    ) -> Self {
        Subscriber {
            state: Rc::new(RefCell::new(SubscriberState {
                next_fn,
                complete_fn,
                error_fn,
                state: ObserverState::Active,
                teardown: UnsubscribeLogic::Nil,
            })),
        }
    }

    // Another handle onto the same observer. The producer, the operators and
    // the returned Subscription all reach one state machine through shared
    // handles.
    pub(crate) fn share(&self) -> Self {
        Subscriber {
            state: Rc::clone(&self.state),
        }
    }

    // Captures the teardown returned by the producer. If the producer already
    // terminated the stream while it ran, the teardown runs here, immediately;
    // either way it runs exactly once per subscription.
    pub(crate) fn set_teardown(&mut self, teardown: UnsubscribeLogic) {
        let run_now = {
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Terminated {
                Some(teardown)
            } else {
                state.teardown = teardown;
                None
            }
        };
        if let Some(teardown) = run_now {
            teardown.unsubscribe();
        }
    }
}

impl<NextFnType> Default for Subscriber<NextFnType> {
    /// A subscriber with no registered handlers. Emissions and terminal
    /// signals are absorbed silently; the teardown contract still holds.
    fn default() -> Self {
        Self::from_handlers(None, None, None)
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        // The handler is moved out for the duration of the call so it may
        // reach other subscriptions without aliasing this observer's borrow.
        let next_fn = {
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Terminated {
                return;
            }
            state.next_fn.take()
        };
        if let Some(mut next_fn) = next_fn {
            next_fn(v);
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Active {
                state.next_fn = Some(next_fn);
            }
        }
    }

    fn complete(&mut self) {
        // Terminate before invoking the handler: a handler that re-enters this
        // observer must not be able to deliver a second terminal signal.
        let (complete_fn, teardown) = {
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Terminated {
                return;
            }
            (state.complete_fn.take(), state.terminate())
        };
        if let Some(mut complete_fn) = complete_fn {
            complete_fn();
        }
        teardown.unsubscribe();
    }

    fn error(&mut self, observable_error: Rc<dyn Error>) {
        let (error_fn, teardown) = {
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Terminated {
                return;
            }
            (state.error_fn.take(), state.terminate())
        };
        if let Some(mut error_fn) = error_fn {
            error_fn(observable_error);
        }
        teardown.unsubscribe();
    }
}

impl<T> Unsubscribeable for Subscriber<T> {
    fn unsubscribe(&mut self) {
        let teardown = {
            let mut state = self.state.borrow_mut();
            if state.state == ObserverState::Terminated {
                return;
            }
            state.terminate()
        };
        teardown.unsubscribe();
    }
}

/// Represents a subscription to an observable, allowing control over the
/// subscription.
///
/// When an observable is subscribed to, it returns a `Subscription` instance.
/// The subscription can be used to cancel the stream and release the resources
/// held by it. Unsubscribing is idempotent and safe to call after the stream
/// has already completed or errored on its own.
pub struct Subscription {
    unsubscribe_logic: UnsubscribeLogic,
}

impl Subscription {
    /// Creates a new `Subscription` instance with the specified unsubscribe
    /// logic.
    ///
    /// The `unsubscribe_logic` parameter defines the logic to execute upon
    /// unsubscribing from the observable. See [`UnsubscribeLogic`] for the
    /// available strategies.
    ///
    /// [`UnsubscribeLogic`]: enum.UnsubscribeLogic.html
    #[must_use]
    pub fn new(unsubscribe_logic: UnsubscribeLogic) -> Self {
        Subscription { unsubscribe_logic }
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(&mut self) {
        mem::replace(&mut self.unsubscribe_logic, UnsubscribeLogic::Nil).unsubscribe();
    }
}

/// Enumerates the unsubscribe logic options for a subscription.
///
/// This is the teardown associated with one subscription: the producer returns
/// one of these from its subscribe function, and the observer guarantees it
/// runs exactly once when the stream terminates, whether by completion, error,
/// or explicit cancellation.
pub enum UnsubscribeLogic {
    /// No specific unsubscribe logic.
    Nil,

    /// If one subscription depends on another. The wrapped subscription's
    /// unsubscribe will be called upon unsubscribing.
    Wrapped(Box<Subscription>),

    /// Unsubscribe logic defined by a function.
    Logic(Box<dyn FnOnce()>),
}

impl UnsubscribeLogic {
    pub(crate) fn unsubscribe(self) {
        match self {
            UnsubscribeLogic::Nil => (),
            UnsubscribeLogic::Logic(fnc) => fnc(),
            UnsubscribeLogic::Wrapped(mut subscription) => subscription.unsubscribe(),
        }
    }
}
