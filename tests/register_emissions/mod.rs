use std::{cell::RefCell, rc::Rc};

use rivulet::subscribe::Subscriber;

pub fn register_emissions_subscriber() -> (
    Vec<impl FnOnce() -> Subscriber<i32>>,
    Rc<RefCell<Vec<i32>>>,
    Rc<RefCell<Vec<i32>>>,
    Rc<RefCell<Vec<i32>>>,
) {
    let nexts: Vec<i32> = Vec::with_capacity(5);
    let nexts = Rc::new(RefCell::new(nexts));
    let nexts_c = Rc::clone(&nexts);

    let completes: Vec<i32> = Vec::with_capacity(5);
    let completes = Rc::new(RefCell::new(completes));
    let completes_c = Rc::clone(&completes);

    let errors: Vec<i32> = Vec::with_capacity(5);
    let errors = Rc::new(RefCell::new(errors));
    let errors_c = Rc::clone(&errors);

    let make_subscriber = vec![
        move || {
            Subscriber::new(
                move |n| {
                    // Track next() calls.
                    nexts_c.borrow_mut().push(n);
                },
                move |_| {
                    // Track error() calls.
                    errors_c.borrow_mut().push(1);
                },
                move || {
                    // Track complete() calls.
                    completes_c.borrow_mut().push(1);
                },
            )
        };
        10
    ];
    (make_subscriber, nexts, completes, errors)
}
