//! One raw notification channel: an ordered list of attached handlers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::RawEvent;

/// Opaque handle returned by [`RawChannel::attach`].
pub type HookId = u64;

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Hook<E> {
    id: HookId,
    /// Invoke this handler even when the event was already consumed by
    /// target-level handling.
    handled_too: bool,
    f: Handler<E>,
}

/// An ordered list of raw handlers, invoked synchronously in attach
/// order when the backend emits a notification.
pub struct RawChannel<E> {
    hooks: RefCell<Vec<Hook<E>>>,
    next_id: Cell<HookId>,
}

impl<E> RawChannel<E> {
    pub fn new() -> Self {
        Self {
            hooks: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Attach a handler. Handlers attached with `handled_too` still
    /// observe notifications that were pre-consumed before bubbling.
    pub fn attach(&self, handled_too: bool, f: impl FnMut(&E) + 'static) -> HookId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.hooks.borrow_mut().push(Hook {
            id,
            handled_too,
            f: Rc::new(RefCell::new(f)),
        });
        id
    }

    /// Detach a handler. Detaching an id that was never attached (or was
    /// already detached) is a no-op.
    pub fn detach(&self, id: HookId) {
        self.hooks.borrow_mut().retain(|h| h.id != id);
    }

    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }
}

impl<E: RawEvent> RawChannel<E> {
    /// Invoke every attached handler with `event`, in attach order.
    /// Handlers without `handled_too` are skipped when the event is
    /// already handled.
    pub fn emit(&self, event: &E) {
        // Snapshot so a handler may attach/detach without a borrow panic.
        let snapshot: Vec<(bool, Handler<E>)> = self
            .hooks
            .borrow()
            .iter()
            .map(|h| (h.handled_too, h.f.clone()))
            .collect();
        for (handled_too, f) in snapshot {
            if event.is_handled() && !handled_too {
                continue;
            }
            (f.borrow_mut())(event);
        }
    }
}

impl<E> Default for RawChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseInput;
    use crate::types::Point;

    fn click() -> MouseInput {
        MouseInput::new(Some(crate::types::MouseButton::Left), Point::new(1.0, 2.0))
    }

    #[test]
    fn test_emit_in_attach_order() {
        let channel = RawChannel::<MouseInput>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let log = log.clone();
            channel.attach(false, move |_e| log.borrow_mut().push(n));
        }
        channel.emit(&click());
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_detach_is_noop_when_absent() {
        let channel = RawChannel::<MouseInput>::new();
        let id = channel.attach(false, |_e| {});
        channel.detach(id);
        channel.detach(id);
        channel.detach(999);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_handled_events_skip_normal_handlers() {
        let channel = RawChannel::<MouseInput>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        channel.attach(false, move |_e| l.borrow_mut().push("normal"));
        let l = log.clone();
        channel.attach(true, move |_e| l.borrow_mut().push("handled_too"));

        let mut event = click();
        event.handled = true;
        channel.emit(&event);
        assert_eq!(*log.borrow(), vec!["handled_too"]);

        event.handled = false;
        channel.emit(&event);
        assert_eq!(*log.borrow(), vec!["handled_too", "normal", "handled_too"]);
    }
}
