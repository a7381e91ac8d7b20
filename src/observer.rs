use std::{error::Error, rc::Rc};

/// The receiving side of a stream: emitted values arrive through `next`, and
/// the stream ends with at most one `complete` or `error` signal.
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: Rc<dyn Error>);
}
