//! Animation: easing curves, timed progress and drawable ops.

pub mod easing;
pub mod ops;

pub use easing::{Animation, Easing};
pub use ops::{DrawableOp, OpKind};
