//! Rendering seam: the drawing surface trait and a headless recording backend.

pub mod surface;
pub mod recording;

pub use surface::{Color, FontId, FramebufferId, ImageId, Surface, TextMeasurer};
pub use recording::{DrawCommand, RecordingSurface};
