//! A compute-once cache for the expensive fields of a pointer event.
//!
//! Positions, point lists and touch areas require walking sample buffers
//! and converting units, and the vast majority of move events are never
//! inspected for anything but occurrence. [`Lazy`] holds either an
//! unevaluated thunk or the memoized result; the thunk runs at most once
//! no matter how many times the value is read.

use std::cell::{OnceCell, RefCell};
use std::fmt;

type Thunk<T> = Box<dyn FnOnce() -> T>;

pub struct Lazy<T> {
    value: OnceCell<T>,
    thunk: RefCell<Option<Thunk<T>>>,
}

impl<T> Lazy<T> {
    /// Wrap a computation to be run on first read.
    pub fn new(f: impl FnOnce() -> T + 'static) -> Self {
        Self {
            value: OnceCell::new(),
            thunk: RefCell::new(Some(Box::new(f))),
        }
    }

    /// Wrap an already-computed value.
    pub fn ready(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(value);
        Self {
            value: cell,
            thunk: RefCell::new(None),
        }
    }

    /// Evaluate the thunk if it has not run yet and return the value.
    pub fn force(&self) -> &T {
        if self.value.get().is_none() {
            if let Some(f) = self.thunk.borrow_mut().take() {
                let _ = self.value.set(f());
            }
        }
        // Every constructor leaves either a value or a thunk in place.
        self.value.get().expect("Lazy without value or thunk")
    }

    /// Whether the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value.get() {
            Some(v) => f.debug_tuple("Lazy").field(v).finish(),
            None => f.write_str("Lazy(<pending>)"),
        }
    }
}
