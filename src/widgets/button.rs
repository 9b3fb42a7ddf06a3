//! Button widget: a focusable, clickable label on a filled background.
//!
//! The background follows the drawable's [`InputState`]. A left click, or
//! Enter while focused, runs the click callback and consumes the event. A
//! button without a callback lets clicks through, so they bubble and an
//! unconsumed click focuses it.

use std::any::Any;

use crate::dom::node::{Drawable, InputState};
use crate::event::handler::EventCx;
use crate::event::input::{Key, MouseButton};
use crate::event::Event;
use crate::geometry::{Bounds, Vec2};
use crate::render::{Color, FontId, Surface, TextMeasurer};
use crate::widget::traits::Widget;

/// Click callback of a [`Button`].
pub type ClickHandler = Box<dyn FnMut(&mut EventCx<'_>)>;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button with a label.
pub struct Button {
    label: String,
    font: FontId,
    font_size: f32,
    padding: Vec2,
    colors: [Color; 3],
    text_color: Color,
    on_click: Option<ClickHandler>,
    disabled: bool,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            font: FontId::default(),
            font_size: 12.0,
            padding: Vec2::new(8.0, 4.0),
            colors: [Color::rgb(0x3a, 0x3a, 0x3a), Color::rgb(0x4a, 0x4a, 0x4a), Color::rgb(0x2a, 0x2a, 0x2a)],
            text_color: Color::WHITE,
            on_click: None,
            disabled: false,
        }
    }

    /// Set the click callback (builder).
    pub fn on_click(mut self, handler: impl FnMut(&mut EventCx<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Set the font size (builder).
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the space between label and edge (builder).
    pub fn padding(mut self, x: f32, y: f32) -> Self {
        self.padding = Vec2::new(x, y);
        self
    }

    /// Set the background for the idle, hovered and pressed states (builder).
    pub fn colors(mut self, idle: Color, hovered: Color, pressed: Color) -> Self {
        self.colors = [idle, hovered, pressed];
        self
    }

    /// Set whether the button refuses focus (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    fn background(&self, state: InputState) -> Color {
        match state {
            InputState::None => self.colors[0],
            InputState::Hovered => self.colors[1],
            InputState::Pressed => self.colors[2],
        }
    }

    fn click(&mut self, cx: &mut EventCx<'_>) -> bool {
        match self.on_click.as_mut() {
            Some(handler) => {
                handler(cx);
                cx.request_redraw();
                true
            }
            None => false,
        }
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn measure(&self, measurer: &dyn TextMeasurer) -> Option<Vec2> {
        let text = measurer.text_bounds(self.font, &self.label, self.font_size);
        Some(text + self.padding * 2.0)
    }

    fn render(&self, drawable: &Drawable, surface: &mut dyn Surface) {
        surface.draw_rect(Bounds::from_parts(Vec2::ZERO, drawable.size), self.background(drawable.input_state), 4.0);
        surface.draw_text(self.font, self.padding, &self.label, self.font_size, self.text_color);
    }

    fn can_focus(&self) -> bool {
        !self.disabled
    }

    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        match event {
            Event::MouseClicked { button: MouseButton::Left, .. } => self.click(cx),
            Event::KeyPressed { key: Key::Enter, .. } => self.click(cx),
            Event::FocusGained | Event::FocusLost => {
                cx.request_redraw();
                false
            }
            _ => false,
        }
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
