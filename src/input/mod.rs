//! Raw device payloads and the raw notification channels of a surface.
//!
//! These are the types the windowing backend fills in; nothing here is
//! unified yet. Each device family exposes one channel per phase
//! (down/move/up), each in a preview (early) and bubble (late) delivery
//! variant — 18 attachment points per surface in total.

mod channel;

pub use channel::{HookId, RawChannel};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::types::{MouseButton, Point};

/// Which half of the native dispatch a raw notification belongs to.
/// The backend fires [`Delivery::Preview`] strictly before
/// [`Delivery::Bubble`] for the same physical action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delivery {
    Preview,
    Bubble,
}

impl Delivery {
    pub const ALL: [Delivery; 2] = [Delivery::Preview, Delivery::Bubble];
}

/// The phase of a contact's lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Down,
    Move,
    Up,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Down, Phase::Move, Phase::Up];
}

/// What the hardware table reports a stylus-channel contact to really be.
/// Touch stacks commonly surface finger contacts through the stylus
/// channel as well; those carry [`TabletKind::Touch`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabletKind {
    /// A genuine pen tip.
    Stylus,
    /// A finger contact reported over the stylus channel.
    Touch,
}

/// A raw mouse notification.
#[derive(Debug, Clone)]
pub struct MouseInput {
    /// The button for down/up notifications; `None` for moves.
    pub button: Option<MouseButton>,
    /// Cursor position in the global coordinate space.
    pub position: Point,
    /// When the backend synthesized this mouse event from a stylus
    /// device, the originating stylus device id. Such events are dropped
    /// by the dispatch core and reported through the stylus channel
    /// instead.
    pub stylus_origin: Option<i32>,
    /// Whether target-level handling already consumed this event. Only
    /// handlers attached with `handled_too` still observe it.
    pub handled: bool,
    /// Event time; 0 when the backend supplies none.
    pub time: u32,
}

impl MouseInput {
    pub fn new(button: Option<MouseButton>, position: Point) -> Self {
        Self {
            button,
            position,
            stylus_origin: None,
            handled: false,
            time: 0,
        }
    }
}

/// One property of a contact sample, together with the resolution and
/// unit metadata needed to convert it into device-independent units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PropertyValue {
    /// Raw value in device units.
    pub value: f32,
    /// Device units per physical unit. A (near-)zero resolution makes
    /// the value unusable and it degrades to 0.
    pub resolution: f32,
    pub unit: PropertyUnit,
}

/// The physical unit a sample property is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyUnit {
    None,
    Inches,
    Centimeters,
}

/// Keys of the per-sample property table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleProperty {
    X,
    Y,
    Pressure,
    ContactWidth,
    ContactHeight,
}

/// One intermediate position reading of a stylus or touch contact.
/// Backends may accumulate several of these between two dispatched
/// notifications to avoid losing high-frequency movement detail.
#[derive(Debug, Clone)]
pub struct ContactSample {
    /// Sample position in the global coordinate space.
    pub position: Point,
    /// Native pressure reading, if the device reports one.
    pub pressure: Option<f32>,
    /// Additional per-sample properties (contact footprint sizes).
    pub properties: AHashMap<SampleProperty, PropertyValue>,
}

impl ContactSample {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            pressure: None,
            properties: AHashMap::new(),
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_property(mut self, key: SampleProperty, value: PropertyValue) -> Self {
        self.properties.insert(key, value);
        self
    }
}

/// A raw stylus-channel notification.
#[derive(Debug, Clone)]
pub struct StylusInput {
    /// Native per-contact identifier.
    pub device_id: i32,
    /// Hardware classification of the contact.
    pub kind: TabletKind,
    /// Intermediate samples since the previous dispatch; the last one is
    /// the current position.
    pub samples: Vec<ContactSample>,
    pub time: u32,
}

/// A raw touch-channel notification.
#[derive(Debug, Clone)]
pub struct TouchInput {
    /// Native per-contact identifier.
    pub device_id: i32,
    /// Intermediate samples since the previous dispatch; the last one is
    /// the current position.
    pub samples: Vec<ContactSample>,
    pub time: u32,
}

/// The originating raw record of a unified pointer event, kept so the
/// position can be re-projected against an arbitrary reference surface
/// after dispatch.
#[derive(Debug, Clone)]
pub enum RawInput {
    Mouse(MouseInput),
    Stylus(StylusInput),
    Touch(TouchInput),
}

impl RawInput {
    /// The current contact position in the global coordinate space.
    pub fn global_position(&self) -> Point {
        match self {
            RawInput::Mouse(m) => m.position,
            RawInput::Stylus(s) => last_position(&s.samples),
            RawInput::Touch(t) => last_position(&t.samples),
        }
    }
}

fn last_position(samples: &[ContactSample]) -> Point {
    samples.last().map(|s| s.position).unwrap_or_default()
}

/// Raw events that can be pre-consumed by target-level handling.
pub trait RawEvent {
    fn is_handled(&self) -> bool {
        false
    }
}

impl RawEvent for MouseInput {
    fn is_handled(&self) -> bool {
        self.handled
    }
}
impl RawEvent for StylusInput {}
impl RawEvent for TouchInput {}

/// A raw channel in both delivery variants.
pub struct DualChannel<E> {
    pub preview: RawChannel<E>,
    pub bubble: RawChannel<E>,
}

impl<E> DualChannel<E> {
    pub fn get(&self, delivery: Delivery) -> &RawChannel<E> {
        match delivery {
            Delivery::Preview => &self.preview,
            Delivery::Bubble => &self.bubble,
        }
    }
}

impl<E> Default for DualChannel<E> {
    fn default() -> Self {
        Self {
            preview: RawChannel::new(),
            bubble: RawChannel::new(),
        }
    }
}

/// The 18 raw attachment points of one surface.
#[derive(Default)]
pub struct RawInputChannels {
    pub mouse_down: DualChannel<MouseInput>,
    pub mouse_move: DualChannel<MouseInput>,
    pub mouse_up: DualChannel<MouseInput>,
    pub stylus_down: DualChannel<StylusInput>,
    pub stylus_move: DualChannel<StylusInput>,
    pub stylus_up: DualChannel<StylusInput>,
    pub touch_down: DualChannel<TouchInput>,
    pub touch_move: DualChannel<TouchInput>,
    pub touch_up: DualChannel<TouchInput>,
}

impl RawInputChannels {
    pub fn mouse(&self, phase: Phase) -> &DualChannel<MouseInput> {
        match phase {
            Phase::Down => &self.mouse_down,
            Phase::Move => &self.mouse_move,
            Phase::Up => &self.mouse_up,
        }
    }

    pub fn stylus(&self, phase: Phase) -> &DualChannel<StylusInput> {
        match phase {
            Phase::Down => &self.stylus_down,
            Phase::Move => &self.stylus_move,
            Phase::Up => &self.stylus_up,
        }
    }

    pub fn touch(&self, phase: Phase) -> &DualChannel<TouchInput> {
        match phase {
            Phase::Down => &self.touch_down,
            Phase::Move => &self.touch_move,
            Phase::Up => &self.touch_up,
        }
    }
}
