//! The dispatch core: filtering, classification, and the six public
//! notifications.

use std::rc::Rc;

use tracing::{trace, warn};

use crate::adapter::{self, RawSink, SurfaceHooks};
use crate::builder;
use crate::event::{Emitter, EventKind, PointerEvent, Subscription};
use crate::input::{Delivery, MouseInput, Phase, StylusInput, TabletKind, TouchInput};
use crate::surface::Surface;
use crate::types::{MouseButton, MOUSE_LEFT_ID};

/// Normalizes the raw mouse, stylus and touch notifications of one
/// surface into six unified notifications: down/move/up, each in a
/// preview and a bubble variant.
///
/// Filtering rules, in precedence order:
/// 1. mouse notifications that a stylus device generated are dropped
///    (the contact is reported through the stylus channel instead);
/// 2. stylus notifications are dropped unless the hardware table
///    classifies the contact as a genuine pen tip; accepted ones are
///    surfaced as [`crate::types::DeviceType::Pen`];
/// 3. mouse button down/up tag `device_id` with the button sentinel,
///    mouse moves carry [`MOUSE_LEFT_ID`] by convention;
/// 4. only accepted touch-down notifications carry a touch area.
///
/// Dispatch is synchronous and single-threaded; subscribers run in
/// registration order, and a panicking subscriber aborts delivery to the
/// ones after it. Dropping the unifier unregisters it.
pub struct PointerUnifier {
    surface: Rc<dyn Surface>,
    sink: Rc<Sink>,
    hooks: Option<SurfaceHooks>,
}

impl PointerUnifier {
    pub fn new(surface: Rc<dyn Surface>) -> Self {
        let sink = Rc::new(Sink {
            surface: Rc::clone(&surface),
            emitters: EventKind::ALL.map(Emitter::new),
        });
        Self {
            surface,
            sink,
            hooks: None,
        }
    }

    /// Attach the raw handlers to the surface. Idempotent: calling
    /// `register` again without an intervening [`unregister`] is a
    /// guarded no-op, so one physical action never delivers twice.
    ///
    /// [`unregister`]: PointerUnifier::unregister
    pub fn register(&mut self) {
        if self.hooks.is_some() {
            warn!("register called on an already registered surface; ignoring");
            return;
        }
        let sink: Rc<dyn RawSink> = Rc::clone(&self.sink) as Rc<dyn RawSink>;
        self.hooks = Some(adapter::attach(&self.surface, &sink));
    }

    /// Detach exactly the handlers [`register`] attached. A no-op when
    /// not registered. Takes effect for notifications dispatched after
    /// it returns.
    ///
    /// [`register`]: PointerUnifier::register
    pub fn unregister(&mut self) {
        if let Some(hooks) = self.hooks.take() {
            hooks.detach(self.surface.as_ref());
        }
    }

    pub fn is_registered(&self) -> bool {
        self.hooks.is_some()
    }

    /// Subscribe to one notification kind; the callback runs
    /// synchronously for every accepted event, in registration order.
    pub fn subscribe(
        &self,
        kind: EventKind,
        f: impl FnMut(&PointerEvent) + 'static,
    ) -> Subscription {
        self.sink.emitter(kind).subscribe(f)
    }

    /// Remove a subscription; a handle that is not (or no longer)
    /// subscribed is a no-op.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.sink.emitter(subscription.kind).unsubscribe(subscription);
    }

    pub fn on_preview_down(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::PreviewDown, f)
    }

    pub fn on_preview_move(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::PreviewMove, f)
    }

    pub fn on_preview_up(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::PreviewUp, f)
    }

    pub fn on_down(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::Down, f)
    }

    pub fn on_move(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::Move, f)
    }

    pub fn on_up(&self, f: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        self.subscribe(EventKind::Up, f)
    }
}

impl Drop for PointerUnifier {
    fn drop(&mut self) {
        self.unregister();
    }
}

struct Sink {
    surface: Rc<dyn Surface>,
    emitters: [Emitter; 6],
}

impl Sink {
    fn emitter(&self, kind: EventKind) -> &Emitter {
        &self.emitters[kind.index()]
    }
}

impl RawSink for Sink {
    fn mouse(&self, delivery: Delivery, phase: Phase, input: &MouseInput) {
        // Stylus-generated mouse events are reported through the stylus
        // channel; dropping them here keeps the contact single-counted.
        if let Some(stylus_id) = input.stylus_origin {
            trace!(stylus_id, ?phase, "dropping stylus-generated mouse notification");
            return;
        }
        let device_id = match phase {
            Phase::Down | Phase::Up => input
                .button
                .map(MouseButton::device_id)
                .unwrap_or(MOUSE_LEFT_ID),
            Phase::Move => MOUSE_LEFT_ID,
        };
        let event = builder::mouse_event(&self.surface, input, device_id);
        self.emitter(EventKind::of(delivery, phase)).emit(&event);
    }

    fn stylus(&self, delivery: Delivery, phase: Phase, input: &StylusInput) {
        // Touch contacts also surface through the stylus channel; those
        // are reported exactly once, through the touch path.
        if input.kind != TabletKind::Stylus {
            trace!(
                device_id = input.device_id,
                ?phase,
                "dropping touch contact on the stylus channel"
            );
            return;
        }
        let event = builder::stylus_event(&self.surface, input);
        self.emitter(EventKind::of(delivery, phase)).emit(&event);
    }

    fn touch(&self, delivery: Delivery, phase: Phase, input: &TouchInput) {
        let event = builder::touch_event(&self.surface, input, phase == Phase::Down);
        self.emitter(EventKind::of(delivery, phase)).emit(&event);
    }
}
