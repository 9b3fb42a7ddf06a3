//! Widget trait: measure, render, react to events, added/removed hooks.
//!
//! A [`Drawable`] carries geometry and flags; the `Widget` stored next to it in
//! the scene supplies behaviour. Every capability except rendering has a no-op
//! default, so a pure container implements two methods plus the downcast pair.

use std::any::Any;

use crate::dom::node::Drawable;
use crate::event::handler::EventCx;
use crate::event::Event;
use crate::geometry::Vec2;
use crate::render::{Surface, TextMeasurer};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Behaviour behind a drawable.
///
/// Object-safe: the scene stores widgets as `Box<dyn Widget>`.
pub trait Widget {
    /// Type name, used as the default debug name of the drawable.
    fn widget_type(&self) -> &str;

    /// Intrinsic size, asked for when the drawable has no resolved size.
    ///
    /// `None` means the size must come from the children.
    fn measure(&self, _measurer: &dyn TextMeasurer) -> Option<Vec2> {
        None
    }

    /// Draw the drawable's own content.
    ///
    /// The surface is already translated to the drawable's origin, so content
    /// spans `(0, 0)..drawable.size`. Children are drawn afterwards, on top.
    fn render(&self, drawable: &Drawable, surface: &mut dyn Surface);

    /// Whether the drawable can take keyboard focus. A focusable widget makes
    /// its drawable focusable and input-accepting when inserted.
    fn can_focus(&self) -> bool {
        false
    }

    /// React to an event after the drawable's own handler table declined it.
    ///
    /// Returning `true` consumes the event and stops bubbling.
    fn on_event(&mut self, _cx: &mut EventCx<'_>, _event: &Event) -> bool {
        false
    }

    /// Called once when the drawable is inserted into the scene.
    fn on_added(&mut self) {}

    /// Called once when the drawable (or an ancestor) is removed.
    fn on_removed(&mut self) {}

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
