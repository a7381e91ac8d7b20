//! Provides structures and traits related to subscription management.
//!
//! This module includes types such as `Subscriber` for handling observed
//! values, errors, and completions, as well as `Subscription` for controlling
//! subscriptions to observables.
//!
//! Additionally, it defines the traits used for subscribing, unsubscribing,
//! and describing teardown logic.
pub mod subscribe;
