//! Group widget: a pure container.

use std::any::Any;

use crate::dom::node::Drawable;
use crate::render::Surface;
use crate::widget::traits::Widget;

/// Draws nothing itself; sizes to and positions its children.
#[derive(Debug, Clone, Copy, Default)]
pub struct Group;

impl Widget for Group {
    fn widget_type(&self) -> &str {
        "Group"
    }

    fn render(&self, _drawable: &Drawable, _surface: &mut dyn Surface) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
