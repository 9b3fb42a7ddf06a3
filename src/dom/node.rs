//! Node types: NodeId, Drawable, InputState, Transform.

use slotmap::new_key_type;

use crate::animate::DrawableOp;
use crate::event::handler::{EventCx, Handlers};
use crate::event::{Event, EventKind};
use crate::geometry::Vec2;
use crate::layout::alignment::Alignment;
use crate::layout::unit::UnitVec;
use crate::render::FramebufferId;

new_key_type! {
    /// Unique identifier for a drawable in the scene. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Pointer interaction state of a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputState {
    #[default]
    None,
    Hovered,
    Pressed,
}

/// Render-time transform applied around a drawable's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation in radians.
    pub rotation: f32,
    pub scale: Vec2,
    /// Skew in radians, per axis.
    pub skew: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self { rotation: 0.0, scale: Vec2::ONE, skew: Vec2::ZERO }
    }
}

impl Transform {
    /// Whether this transform changes nothing.
    pub fn is_identity(&self) -> bool {
        self.rotation == 0.0 && self.scale == Vec2::ONE && self.skew.is_zero()
    }
}

/// A single node of the scene: the unit of layout, hit-testing and rendering.
///
/// Positions are relative to the parent's origin. A size with a zero component
/// is unresolved until the positioner runs. Behaviour (rendering, measuring,
/// reacting to input) lives in the [`Widget`](crate::widget::Widget) stored
/// alongside the drawable in the [`Scene`](super::Scene), and in the closures of
/// its handler table.
pub struct Drawable {
    /// Debug name. Defaults to the widget type when inserted.
    pub name: String,
    /// Position relative to the parent.
    pub at: Vec2,
    /// Full content size.
    pub size: Vec2,
    /// Clipped viewport size. `None` means the whole content is visible.
    pub(crate) visible_size: Option<Vec2>,
    /// Whether `at` was set by the application rather than by the positioner.
    pub(crate) explicit_at: bool,
    pub alignment: Alignment,
    /// Size in dynamic units, resolved before layout.
    pub size_units: Option<UnitVec>,
    /// Position in dynamic units, resolved before layout.
    pub at_units: Option<UnitVec>,
    pub enabled: bool,
    pub accepts_input: bool,
    pub renders: bool,
    pub focusable: bool,
    pub input_state: InputState,
    pub(crate) needs_redraw: bool,
    /// Content scroll offset (how far the content is shifted up/left).
    pub scroll: Vec2,
    pub transform: Transform,
    pub(crate) ops: Vec<DrawableOp>,
    pub(crate) framebuffer: Option<FramebufferId>,
    /// Never cache this drawable in a framebuffer.
    pub refuse_framebuffer: bool,
    pub(crate) handlers: Handlers,
}

impl std::fmt::Debug for Drawable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drawable")
            .field("name", &self.name)
            .field("at", &self.at)
            .field("size", &self.size)
            .field("visible_size", &self.visible_size)
            .field("enabled", &self.enabled)
            .field("accepts_input", &self.accepts_input)
            .field("renders", &self.renders)
            .field("input_state", &self.input_state)
            .finish_non_exhaustive()
    }
}

impl Default for Drawable {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable {
    /// A drawable with unresolved size, default alignment, enabled and rendering,
    /// not accepting input.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            at: Vec2::ZERO,
            size: Vec2::ZERO,
            visible_size: None,
            explicit_at: false,
            alignment: Alignment::default(),
            size_units: None,
            at_units: None,
            enabled: true,
            accepts_input: false,
            renders: true,
            focusable: false,
            input_state: InputState::None,
            needs_redraw: true,
            scroll: Vec2::ZERO,
            transform: Transform::default(),
            ops: Vec::new(),
            framebuffer: None,
            refuse_framebuffer: false,
            handlers: Handlers::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Builder
    // -----------------------------------------------------------------------

    /// Set the debug name (builder).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set an explicit position relative to the parent (builder).
    ///
    /// A non-zero explicit position is respected by the positioner. A negative
    /// one removes the drawable from automatic placement entirely.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.set_at(Vec2::new(x, y));
        self
    }

    /// Set the size (builder).
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    /// Set a visible size smaller than the content size (builder).
    pub fn visible_size(mut self, width: f32, height: f32) -> Self {
        self.visible_size = Some(Vec2::new(width, height));
        self
    }

    /// Set the size in dynamic units (builder).
    pub fn size_units(mut self, units: UnitVec) -> Self {
        self.size_units = Some(units);
        self
    }

    /// Set the position in dynamic units (builder).
    pub fn at_units(mut self, units: UnitVec) -> Self {
        self.at_units = Some(units);
        self
    }

    /// Set the alignment policy for children (builder).
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set whether this drawable is a hit-test target (builder).
    pub fn accepts_input(mut self, accepts: bool) -> Self {
        self.accepts_input = accepts;
        self
    }

    /// Set whether this drawable can be focused (builder).
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Set whether this drawable is disabled (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }

    /// Set whether this drawable renders (builder).
    pub fn renders(mut self, renders: bool) -> Self {
        self.renders = renders;
        self
    }

    /// Register a handler for one event kind (builder).
    ///
    /// Registering a handler makes the drawable accept input.
    pub fn on(
        mut self,
        kind: EventKind,
        handler: impl FnMut(&mut EventCx<'_>, &Event) -> bool + 'static,
    ) -> Self {
        self.handlers.set(kind, handler);
        self.accepts_input = true;
        self
    }

    /// Shorthand for `on(EventKind::MouseClicked, ..)`.
    pub fn on_click(self, handler: impl FnMut(&mut EventCx<'_>, &Event) -> bool + 'static) -> Self {
        self.on(EventKind::MouseClicked, handler)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The visible size: the explicit viewport if set, else the full size.
    pub fn visible(&self) -> Vec2 {
        self.visible_size.unwrap_or(self.size)
    }

    /// Whether an explicit visible size smaller than the content was declared.
    pub fn has_visible_size(&self) -> bool {
        self.visible_size.is_some()
    }

    /// Set the visible size, clamped to the content size.
    pub fn set_visible_size(&mut self, visible: Vec2) {
        self.visible_size = Some(visible);
        self.fix_visible_size();
    }

    /// Clamp the visible size so it never exceeds the content size.
    pub fn fix_visible_size(&mut self) {
        if let Some(visible) = self.visible_size.as_mut() {
            *visible = visible.min(self.size);
        }
    }

    /// Set the position as an application-chosen one.
    pub fn set_at(&mut self, at: Vec2) {
        self.at = at;
        self.explicit_at = true;
    }

    /// Whether the positioner must leave `at` alone.
    pub fn has_explicit_at(&self) -> bool {
        self.explicit_at && !self.at.is_zero()
    }

    /// Whether the drawable asked to be redrawn.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Whether any op is attached.
    pub fn has_ops(&self) -> bool {
        !self.ops.is_empty()
    }

    /// Whether an attached op still changes the drawable every frame.
    pub fn is_animating(&self) -> bool {
        self.ops.iter().any(DrawableOp::is_animating)
    }

    /// Attach a drawable op. It is applied from the next rendered frame.
    pub fn add_op(&mut self, op: DrawableOp) {
        self.ops.push(op);
        self.needs_redraw = true;
    }

    /// The framebuffer this drawable renders into, if cached.
    pub fn framebuffer(&self) -> Option<FramebufferId> {
        self.framebuffer
    }

    /// Scale position, size and visible size by `(sx, sy)`.
    pub fn rescale(&mut self, sx: f32, sy: f32) {
        self.at = self.at.scale(sx, sy);
        self.size = self.size.scale(sx, sy);
        if let Some(visible) = self.visible_size.as_mut() {
            *visible = visible.scale(sx, sy);
        }
        self.scroll = self.scroll.scale(sx, sy);
        self.fix_visible_size();
        self.needs_redraw = true;
    }
}
