//! Attaches and detaches the raw handlers of one surface.
//!
//! Pure plumbing: the 18 handlers forward raw notifications into a
//! [`RawSink`] without filtering or constructing anything. The original
//! per-channel wiring collapses to one table-driven loop over
//! `Delivery x Phase` per device family.

use std::rc::Rc;

use crate::input::{
    Delivery, HookId, MouseInput, Phase, StylusInput, TouchInput,
};
use crate::surface::Surface;

/// Where the adapter forwards raw notifications to. Implemented by the
/// dispatch core.
pub(crate) trait RawSink {
    fn mouse(&self, delivery: Delivery, phase: Phase, input: &MouseInput);
    fn stylus(&self, delivery: Delivery, phase: Phase, input: &StylusInput);
    fn touch(&self, delivery: Delivery, phase: Phase, input: &TouchInput);
}

/// The hook ids of everything [`attach`] attached, so [`detach`] removes
/// exactly that and nothing else.
#[derive(Default)]
pub(crate) struct SurfaceHooks {
    mouse: Vec<(Delivery, Phase, HookId)>,
    stylus: Vec<(Delivery, Phase, HookId)>,
    touch: Vec<(Delivery, Phase, HookId)>,
}

impl SurfaceHooks {
    pub(crate) fn detach(self, surface: &dyn Surface) {
        let channels = surface.channels();
        for (delivery, phase, id) in self.mouse {
            channels.mouse(phase).get(delivery).detach(id);
        }
        for (delivery, phase, id) in self.stylus {
            channels.stylus(phase).get(delivery).detach(id);
        }
        for (delivery, phase, id) in self.touch {
            channels.touch(phase).get(delivery).detach(id);
        }
    }
}

pub(crate) fn attach(surface: &Rc<dyn Surface>, sink: &Rc<dyn RawSink>) -> SurfaceHooks {
    let channels = surface.channels();
    let mut hooks = SurfaceHooks::default();

    for delivery in Delivery::ALL {
        for phase in Phase::ALL {
            // Surfaces that consume their own button events before
            // bubbling must still be observed, via the handled-too
            // variant. Moves are never pre-consumed.
            let handled_too = delivery == Delivery::Bubble
                && phase != Phase::Move
                && surface.consumes_primary_button();

            let s = Rc::clone(sink);
            let id = channels
                .mouse(phase)
                .get(delivery)
                .attach(handled_too, move |e: &MouseInput| s.mouse(delivery, phase, e));
            hooks.mouse.push((delivery, phase, id));

            let s = Rc::clone(sink);
            let id = channels
                .stylus(phase)
                .get(delivery)
                .attach(false, move |e: &StylusInput| s.stylus(delivery, phase, e));
            hooks.stylus.push((delivery, phase, id));

            let s = Rc::clone(sink);
            let id = channels
                .touch(phase)
                .get(delivery)
                .attach(false, move |e: &TouchInput| s.touch(delivery, phase, e));
            hooks.touch.push((delivery, phase, id));
        }
    }
    hooks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawInputChannels;

    struct PlainSurface {
        channels: RawInputChannels,
    }

    impl Surface for PlainSurface {
        fn channels(&self) -> &RawInputChannels {
            &self.channels
        }
    }

    struct NullSink;
    impl RawSink for NullSink {
        fn mouse(&self, _: Delivery, _: Phase, _: &MouseInput) {}
        fn stylus(&self, _: Delivery, _: Phase, _: &StylusInput) {}
        fn touch(&self, _: Delivery, _: Phase, _: &TouchInput) {}
    }

    fn hook_count(channels: &RawInputChannels) -> usize {
        let mut count = 0;
        for phase in Phase::ALL {
            for delivery in Delivery::ALL {
                count += channels.mouse(phase).get(delivery).len();
                count += channels.stylus(phase).get(delivery).len();
                count += channels.touch(phase).get(delivery).len();
            }
        }
        count
    }

    #[test]
    fn test_attach_covers_all_channels_and_detach_removes_them() {
        let surface: Rc<dyn Surface> = Rc::new(PlainSurface {
            channels: RawInputChannels::default(),
        });
        let sink: Rc<dyn RawSink> = Rc::new(NullSink);

        let hooks = attach(&surface, &sink);
        assert_eq!(hook_count(surface.channels()), 18);

        hooks.detach(surface.as_ref());
        assert_eq!(hook_count(surface.channels()), 0);
    }
}
