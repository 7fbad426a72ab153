//! Construction of unified pointer events from raw notifications.
//!
//! Every expensive field is wired as a thunk over clones of the raw
//! payload; nothing beyond the clone happens at construction time.

use std::rc::Rc;

use crate::area;
use crate::event::{PointerEvent, PointerSample};
use crate::input::{MouseInput, RawInput, StylusInput, TouchInput};
use crate::lazy::Lazy;
use crate::surface::Surface;
use crate::types::{
    DeviceType, Point, DEFAULT_MOUSE_PRESSURE, DEFAULT_TOUCH_PRESSURE,
};

pub(crate) fn mouse_event(
    surface: &Rc<dyn Surface>,
    input: &MouseInput,
    device_id: i32,
) -> PointerEvent {
    let global = input.position;

    let s = Rc::clone(surface);
    let position = Lazy::new(move || relative(global, &*s));

    let s = Rc::clone(surface);
    let points = Lazy::new(move || {
        vec![PointerSample {
            position: relative(global, &*s),
            pressure: DEFAULT_MOUSE_PRESSURE,
        }]
    });

    PointerEvent {
        device_id,
        device_type: DeviceType::Mouse,
        time: input.time,
        position,
        points,
        touch_area: None,
        source: RawInput::Mouse(input.clone()),
    }
}

pub(crate) fn stylus_event(surface: &Rc<dyn Surface>, input: &StylusInput) -> PointerEvent {
    let source = RawInput::Stylus(input.clone());

    let s = Rc::clone(surface);
    let global = source.global_position();
    let position = Lazy::new(move || relative(global, &*s));

    let s = Rc::clone(surface);
    let samples = input.samples.clone();
    let points = Lazy::new(move || {
        let origin = s.origin().to_vector();
        samples
            .iter()
            .map(|sample| PointerSample {
                position: sample.position - origin,
                pressure: sample.pressure.unwrap_or(DEFAULT_MOUSE_PRESSURE),
            })
            .collect()
    });

    PointerEvent {
        device_id: input.device_id,
        device_type: DeviceType::Pen,
        time: input.time,
        position,
        points,
        touch_area: None,
        source,
    }
}

pub(crate) fn touch_event(
    surface: &Rc<dyn Surface>,
    input: &TouchInput,
    with_area: bool,
) -> PointerEvent {
    let source = RawInput::Touch(input.clone());

    let s = Rc::clone(surface);
    let global = source.global_position();
    let position = Lazy::new(move || relative(global, &*s));

    let s = Rc::clone(surface);
    let samples = input.samples.clone();
    let points = Lazy::new(move || {
        let origin = s.origin().to_vector();
        samples
            .iter()
            .map(|sample| PointerSample {
                position: sample.position - origin,
                pressure: DEFAULT_TOUCH_PRESSURE,
            })
            .collect()
    });

    // Only down notifications introduce a new contact, so only they
    // carry a footprint area.
    let touch_area = with_area.then(|| {
        let s = Rc::clone(surface);
        let samples = input.samples.clone();
        Lazy::new(move || area::contact_area(&samples, s.origin()))
    });

    PointerEvent {
        device_id: input.device_id,
        device_type: DeviceType::Touch,
        time: input.time,
        position,
        points,
        touch_area,
        source,
    }
}

fn relative(global: Point, surface: &dyn Surface) -> Point {
    global - surface.origin().to_vector()
}
