//! The unified pointer event and its subscription machinery.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::input::{Delivery, Phase, RawInput};
use crate::lazy::Lazy;
use crate::surface::Surface;
use crate::types::{DeviceType, Point, Rect};

/// One contact point of a unified event, relative to the attachment
/// surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub pressure: f32,
}

/// The single normalized record produced per accepted raw notification.
///
/// A `PointerEvent` is constructed once, handed synchronously to every
/// subscriber of the matching notification kind, and then discarded; no
/// identity is retained across events. The expensive fields (position,
/// point list, touch area) are deferred and each computed at most once,
/// on first read.
#[derive(Debug)]
pub struct PointerEvent {
    /// For mouse events a fixed sentinel ([`crate::types::MOUSE_LEFT_ID`]
    /// / [`crate::types::MOUSE_RIGHT_ID`]); for stylus/touch the native
    /// per-contact identifier.
    pub device_id: i32,
    /// Logical device classification, decided by the filtering rules.
    pub device_type: DeviceType,
    /// Event time; 0 when the native source supplied none.
    pub time: u32,
    pub(crate) position: Lazy<Point>,
    pub(crate) points: Lazy<Vec<PointerSample>>,
    /// `Some` only for touch-down events.
    pub(crate) touch_area: Option<Lazy<Rect>>,
    pub(crate) source: RawInput,
}

impl PointerEvent {
    /// Contact position relative to the attachment surface. Computed on
    /// first read.
    pub fn position(&self) -> Point {
        *self.position.force()
    }

    /// Every intermediate contact sample between the previous dispatch
    /// and this one, relative to the attachment surface (a single-element
    /// sequence for mouse events). Computed on first read.
    pub fn points(&self) -> &[PointerSample] {
        self.points.force()
    }

    /// Bounding rectangle of the contact footprint. `None` for anything
    /// but a touch-down event. Computed on first read.
    pub fn touch_area(&self) -> Option<Rect> {
        self.touch_area.as_ref().map(|area| *area.force())
    }

    /// The raw record that produced this event.
    pub fn source(&self) -> &RawInput {
        &self.source
    }

    /// Re-project the contact position against an arbitrary reference
    /// surface instead of the attachment surface.
    pub fn position_relative(&self, reference: &dyn Surface) -> Point {
        self.source.global_position() - reference.origin().to_vector()
    }
}

/// The six public notification kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PreviewDown,
    PreviewMove,
    PreviewUp,
    Down,
    Move,
    Up,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PreviewDown,
        EventKind::PreviewMove,
        EventKind::PreviewUp,
        EventKind::Down,
        EventKind::Move,
        EventKind::Up,
    ];

    /// The notification kind a raw notification of this delivery and
    /// phase maps to.
    pub fn of(delivery: Delivery, phase: Phase) -> Self {
        match (delivery, phase) {
            (Delivery::Preview, Phase::Down) => EventKind::PreviewDown,
            (Delivery::Preview, Phase::Move) => EventKind::PreviewMove,
            (Delivery::Preview, Phase::Up) => EventKind::PreviewUp,
            (Delivery::Bubble, Phase::Down) => EventKind::Down,
            (Delivery::Bubble, Phase::Move) => EventKind::Move,
            (Delivery::Bubble, Phase::Up) => EventKind::Up,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EventKind::PreviewDown => 0,
            EventKind::PreviewMove => 1,
            EventKind::PreviewUp => 2,
            EventKind::Down => 3,
            EventKind::Move => 4,
            EventKind::Up => 5,
        }
    }
}

/// Opaque handle to one subscription, accepted back by
/// [`crate::unifier::PointerUnifier::unsubscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub(crate) kind: EventKind,
    pub(crate) id: u64,
}

type Callback = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

/// An explicit ordered list of subscriber callbacks for one notification
/// kind, invoked synchronously in registration order. A subscriber that
/// panics aborts delivery to later subscribers; no isolation is
/// attempted.
pub(crate) struct Emitter {
    kind: EventKind,
    subscribers: RefCell<Vec<(u64, Callback)>>,
    next_id: Cell<u64>,
}

impl Emitter {
    pub(crate) fn new(kind: EventKind) -> Self {
        Self {
            kind,
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn subscribe(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(f))));
        Subscription {
            kind: self.kind,
            id,
        }
    }

    /// No-op when the subscription is not (or no longer) present.
    pub(crate) fn unsubscribe(&self, subscription: &Subscription) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.id);
    }

    pub(crate) fn emit(&self, event: &PointerEvent) {
        // Snapshot so a subscriber may (un)subscribe during dispatch.
        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        for f in snapshot {
            (f.borrow_mut())(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseInput;
    use crate::types::MouseButton;

    fn test_event() -> PointerEvent {
        let input = MouseInput::new(Some(MouseButton::Left), Point::new(3.0, 4.0));
        PointerEvent {
            device_id: -1,
            device_type: DeviceType::Mouse,
            time: 0,
            position: Lazy::ready(Point::new(3.0, 4.0)),
            points: Lazy::ready(vec![]),
            touch_area: None,
            source: RawInput::Mouse(input),
        }
    }

    #[test]
    fn test_subscribers_run_in_registration_order() {
        let emitter = Emitter::new(EventKind::Down);
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let log = log.clone();
            emitter.subscribe(move |_e| log.borrow_mut().push(n));
        }
        emitter.emit(&test_event());
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let emitter = Emitter::new(EventKind::Down);
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        let first = emitter.subscribe(move |_e| l.borrow_mut().push("first"));
        let l = log.clone();
        emitter.subscribe(move |_e| l.borrow_mut().push("second"));

        emitter.unsubscribe(&first);
        emitter.unsubscribe(&first); // absent handle is a no-op
        emitter.emit(&test_event());
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_event_kind_mapping() {
        assert_eq!(
            EventKind::of(Delivery::Preview, Phase::Down),
            EventKind::PreviewDown
        );
        assert_eq!(EventKind::of(Delivery::Bubble, Phase::Up), EventKind::Up);
        for (n, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), n);
        }
    }
}
