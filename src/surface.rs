//! The attachment target that raw device notifications are observed on.

use crate::input::{
    Delivery, MouseInput, Phase, RawInputChannels, StylusInput, TouchInput,
};
use crate::types::Point;

/// The trait that windowing backends implement for each attachable
/// surface. The unifier only ever talks to a surface through this trait;
/// native dispatch order, rendering and hit testing stay on the backend's
/// side.
pub trait Surface {
    /// The raw notification channels of this surface.
    fn channels(&self) -> &RawInputChannels;

    /// Position of this surface in the global coordinate space.
    /// Surface-relative positions are computed as `global - origin`.
    fn origin(&self) -> Point {
        Point::zero()
    }

    /// Whether this surface consumes its own primary-button events
    /// before they bubble (push-button controls typically do). The
    /// adapter then attaches bubble mouse down/up handlers with the
    /// `handled_too` flag so the events are still observed.
    fn consumes_primary_button(&self) -> bool {
        false
    }
}

/// Drive one physical mouse action through a surface's raw channels,
/// honoring the dispatch contract: preview fires strictly before bubble.
/// On a surface that pre-consumes its primary-button events, the bubble
/// copy of down/up notifications is marked handled.
pub fn dispatch_mouse(surface: &dyn Surface, phase: Phase, input: &MouseInput) {
    let dual = surface.channels().mouse(phase);
    dual.get(Delivery::Preview).emit(input);

    let mut bubble = input.clone();
    if surface.consumes_primary_button() && phase != Phase::Move {
        bubble.handled = true;
    }
    dual.get(Delivery::Bubble).emit(&bubble);
}

/// Drive one physical stylus action through a surface's raw channels,
/// preview before bubble.
pub fn dispatch_stylus(surface: &dyn Surface, phase: Phase, input: &StylusInput) {
    let dual = surface.channels().stylus(phase);
    dual.get(Delivery::Preview).emit(input);
    dual.get(Delivery::Bubble).emit(input);
}

/// Drive one physical touch action through a surface's raw channels,
/// preview before bubble.
pub fn dispatch_touch(surface: &dyn Surface, phase: Phase, input: &TouchInput) {
    let dual = surface.channels().touch(phase);
    dual.get(Delivery::Preview).emit(input);
    dual.get(Delivery::Bubble).emit(input);
}
