//! Geometry aliases and the shared constants of the unified pointer model.

use serde::{Deserialize, Serialize};

pub type Point = euclid::default::Point2D<f32>;
pub type Vector = euclid::default::Vector2D<f32>;
pub type Size = euclid::default::Size2D<f32>;
pub type Rect = euclid::default::Rect<f32>;

/// `device_id` reported for the left mouse button (and for mouse moves,
/// which carry no button identity).
pub const MOUSE_LEFT_ID: i32 = -1;
/// `device_id` reported for the right mouse button.
pub const MOUSE_RIGHT_ID: i32 = -2;

/// Pressure reported for mouse points, which have no native pressure
/// channel. Also used when a stylus sample omits its pressure reading.
pub const DEFAULT_MOUSE_PRESSURE: f32 = 0.5;
/// Pressure reported for touch points, which have no native pressure
/// channel either.
pub const DEFAULT_TOUCH_PRESSURE: f32 = 0.5;

/// Device-independent units per inch, the target scale for contact
/// footprint sizes.
pub const UNITS_PER_INCH: f32 = 96.0;
pub const CM_PER_INCH: f32 = 2.54;

/// The logical classification of the device behind a unified pointer
/// event. This is decided by the filtering rules, not by the raw channel
/// the notification arrived on: a stylus-channel notification is only
/// ever surfaced as [`DeviceType::Pen`], and touch contacts that leak
/// into the mouse or stylus channels are dropped there.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    Mouse,
    Pen,
    Touch,
}

/// A mouse button tracked by the unified model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    /// The fixed sentinel `device_id` for this button.
    pub fn device_id(self) -> i32 {
        match self {
            MouseButton::Left => MOUSE_LEFT_ID,
            MouseButton::Right => MOUSE_RIGHT_ID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_sentinels() {
        assert_eq!(MouseButton::Left.device_id(), -1);
        assert_eq!(MouseButton::Right.device_id(), -2);
    }
}
