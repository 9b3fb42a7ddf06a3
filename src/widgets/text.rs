//! Text widget: a single run of text sized by the surface's text metrics.

use std::any::Any;

use crate::dom::node::Drawable;
use crate::geometry::Vec2;
use crate::render::{Color, FontId, Surface, TextMeasurer};
use crate::widget::traits::Widget;

/// A non-interactive text label.
///
/// Its intrinsic size is exactly the measured text bounds, so an unsized
/// drawable holding a `Text` shrinks to fit it.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    font: FontId,
    font_size: f32,
    color: Color,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), font: FontId::default(), font_size: 12.0, color: Color::WHITE }
    }

    /// Set the font (builder).
    pub fn font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    /// Set the font size (builder).
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the color (builder).
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text. The drawable keeps its size until it is laid out
    /// again.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Widget for Text {
    fn widget_type(&self) -> &str {
        "Text"
    }

    fn measure(&self, measurer: &dyn TextMeasurer) -> Option<Vec2> {
        Some(measurer.text_bounds(self.font, &self.content, self.font_size))
    }

    fn render(&self, _drawable: &Drawable, surface: &mut dyn Surface) {
        surface.draw_text(self.font, Vec2::ZERO, &self.content, self.font_size, self.color);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
