//! Unified pointer events for heterogeneous input devices.
//!
//! Mouse, stylus and multi-touch notifications on one attachment surface
//! are normalized into a single pointer-event model with three phases —
//! down, move, up — each in a preview (early) and bubble (late) delivery
//! variant. Consumers react identically to "a pointer went down at
//! (x, y)" whether the physical source was a mouse button, a pen tip or
//! a finger.
//!
//! The windowing backend stays external: it implements
//! [`surface::Surface`] and drives the raw channels, guaranteeing that
//! preview notifications fire strictly before bubble notifications for
//! the same physical action. Everything else — stylus/touch
//! disambiguation, duplicate suppression, button tagging, and the lazy
//! evaluation of positions, point lists and touch areas — lives here.

pub mod area;
pub mod event;
pub mod input;
pub mod lazy;
pub mod surface;
pub mod types;
pub mod unifier;

mod adapter;
mod builder;

pub use event::{EventKind, PointerEvent, PointerSample, Subscription};
pub use surface::Surface;
pub use types::{DeviceType, MouseButton};
pub use unifier::PointerUnifier;
