//! Block widget: a filled, optionally rounded rectangle.

use std::any::Any;

use crate::dom::node::Drawable;
use crate::geometry::{Bounds, Vec2};
use crate::render::{Color, Surface};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A rectangle filling the drawable's full size.
///
/// Blocks have no intrinsic size: give them one, or children to grow around.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    color: Color,
    radius: f32,
}

impl Default for Block {
    fn default() -> Self {
        Self { color: Color::rgb(0x30, 0x30, 0x30), radius: 0.0 }
    }
}

impl Block {
    pub fn new(color: Color) -> Self {
        Self { color, radius: 0.0 }
    }

    /// Set the fill color (builder).
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the corner radius (builder).
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn fill(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Widget for Block {
    fn widget_type(&self) -> &str {
        "Block"
    }

    fn render(&self, drawable: &Drawable, surface: &mut dyn Surface) {
        surface.draw_rect(Bounds::from_parts(Vec2::ZERO, drawable.size), self.color, self.radius);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
