mod custom_error;
mod register_emissions;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use rivulet::{
    subscribe::{Subscriber, UnsubscribeLogic},
    Observable, ObservableExt, Observer, Subscribeable, Unsubscribeable,
};

use custom_error::CustomError;
use register_emissions::register_emissions_subscriber;

#[test]
fn filter_map_chain() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let received_c = Rc::clone(&received);
    let completes = Rc::new(Cell::new(0));
    let completes_c = Rc::clone(&completes);

    let mut s = Observable::from_iter(0..=9)
        .filter(|v| v % 2 != 0)
        .map(|v| format!("odd {}", v));

    let o = Subscriber::new(
        move |v: String| received_c.borrow_mut().push(v),
        |_observable_error| {},
        move || completes_c.set(completes_c.get() + 1),
    );
    s.subscribe(o);

    assert_eq!(
        *received.borrow(),
        vec!["odd 1", "odd 3", "odd 5", "odd 7", "odd 9"],
        "chained operators should preserve order and apply in sequence"
    );
    assert_eq!(
        completes.get(),
        1,
        "completion should propagate through the chain exactly once"
    );
}

#[test]
fn skip_then_take_bounds_the_window() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let received_c = Rc::clone(&received);

    let mut s = Observable::from_iter(0..100).skip(10).take(5);

    s.subscribe(Subscriber::on_next(move |v| {
        received_c.borrow_mut().push(v)
    }));

    assert_eq!(
        *received.borrow(),
        vec![10, 11, 12, 13, 14],
        "skip and take should compose into a bounded window"
    );
}

#[test]
fn skip_all_values_still_completes() {
    let (mut make_subscriber, nexts, completes, errors) = register_emissions_subscriber();

    let mut s = Observable::from_iter(vec![1, 2, 3]).skip(10);
    s.subscribe(make_subscriber.pop().unwrap()());

    assert!(
        nexts.borrow().is_empty(),
        "skipping past the end should emit nothing"
    );
    assert_eq!(completes.borrow().len(), 1);
    assert!(errors.borrow().is_empty());
}

#[test]
fn error_propagates_through_chain() {
    let (mut make_subscriber, nexts, completes, errors) = register_emissions_subscriber();

    let source = Observable::new(move |mut o: Subscriber<i32>| {
        o.next(1);
        o.error(Rc::new(CustomError::new("source failed")));
        UnsubscribeLogic::Nil
    });

    let mut s = source.map(|v| v * 2).filter(|v| *v > 0);
    s.subscribe(make_subscriber.pop().unwrap()());

    assert_eq!(*nexts.borrow(), vec![2]);
    assert_eq!(
        errors.borrow().len(),
        1,
        "the error must travel the whole chain to the subscriber"
    );
    assert!(completes.borrow().is_empty());
}

#[test]
fn take_terminates_downstream_before_source_finishes() {
    let emitted_by_source = Rc::new(Cell::new(0));
    let emitted_by_source_c = Rc::clone(&emitted_by_source);
    let received = Rc::new(RefCell::new(Vec::new()));
    let received_c = Rc::clone(&received);
    let completes = Rc::new(Cell::new(0));
    let completes_c = Rc::clone(&completes);

    // The source always emits its full burst; synchronous delivery cannot be
    // interrupted mid-emission. take() bounds what the subscriber observes.
    let source = Observable::new(move |mut o: Subscriber<i32>| {
        for i in 0..10 {
            emitted_by_source_c.set(emitted_by_source_c.get() + 1);
            o.next(i);
        }
        o.complete();
        UnsubscribeLogic::Nil
    });

    let mut s = source.take(3);
    let o = Subscriber::new(
        move |v| received_c.borrow_mut().push(v),
        |_observable_error| {},
        move || completes_c.set(completes_c.get() + 1),
    );
    s.subscribe(o);

    assert_eq!(emitted_by_source.get(), 10, "the source runs to completion");
    assert_eq!(
        *received.borrow(),
        vec![0, 1, 2],
        "the subscriber sees only the taken prefix"
    );
    assert_eq!(
        completes.get(),
        1,
        "take's early completion and the source's completion must collapse into one"
    );
}

#[test]
fn chain_is_cold() {
    let received = Rc::new(RefCell::new(Vec::new()));
    let received_c1 = Rc::clone(&received);
    let received_c2 = Rc::clone(&received);

    let mut s = Observable::from_iter(vec![1, 2]).map(|v| v * 10);

    s.subscribe(Subscriber::on_next(move |v| {
        received_c1.borrow_mut().push(v)
    }));
    s.subscribe(Subscriber::on_next(move |v| {
        received_c2.borrow_mut().push(v)
    }));

    assert_eq!(
        *received.borrow(),
        vec![10, 20, 10, 20],
        "every subscription to a chain should replay the source"
    );
}

#[test]
fn unsubscribing_chain_cascades_to_source() {
    let teardowns = Rc::new(Cell::new(0));
    let teardowns_c = Rc::clone(&teardowns);

    // Open-ended source: emits without completing, so termination can only
    // come from the subscriber side.
    let source = Observable::new(move |mut o: Subscriber<i32>| {
        o.next(1);
        o.next(2);

        let teardowns = Rc::clone(&teardowns_c);
        UnsubscribeLogic::Logic(Box::new(move || teardowns.set(teardowns.get() + 1)))
    });

    let mut s = source.map(|v| v + 1).filter(|v| *v > 0);

    let mut subscription = s.subscribe(Subscriber::on_next(|_| {}));
    assert_eq!(teardowns.get(), 0, "open subscription must keep its teardown");

    subscription.unsubscribe();
    assert_eq!(
        teardowns.get(),
        1,
        "unsubscribing the chain must tear down the source subscription"
    );

    subscription.unsubscribe();
    assert_eq!(teardowns.get(), 1, "cascade must not repeat");
}
