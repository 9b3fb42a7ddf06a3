//! Drawable ops: per-frame mutations and render state attached to a drawable.
//!
//! An op is applied in the pre-render phase of every frame the drawable is
//! drawn: geometry first, then any surface state, which is undone in
//! post-render. Ops with an [`Animation`] interpolate
//! from the drawable's value at first application to the target; ops without
//! one jump straight to the target. Finished ops are dropped after post-render.

use super::easing::Animation;
use crate::dom::node::Drawable;
use crate::geometry::{Bounds, Vec2};
use crate::render::Surface;

/// What an op changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpKind {
    Move(Vec2),
    Resize(Vec2),
    /// Target rotation in radians.
    Rotate(f32),
    Scale(Vec2),
    Skew(Vec2),
    /// Clip the drawable and its children to these bounds (drawable-local).
    Scissor(Bounds),
}

/// A mutation or render state attached to a drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableOp {
    kind: OpKind,
    animation: Option<Animation>,
    /// Starting value captured at first application.
    from: Option<Vec2>,
    applied: bool,
}

impl DrawableOp {
    pub fn new(kind: OpKind, animation: Option<Animation>) -> Self {
        Self { kind, animation, from: None, applied: false }
    }

    /// Move to `to` (relative to the parent).
    pub fn move_to(to: Vec2, animation: Option<Animation>) -> Self {
        Self::new(OpKind::Move(to), animation)
    }

    pub fn resize(to: Vec2, animation: Option<Animation>) -> Self {
        Self::new(OpKind::Resize(to), animation)
    }

    pub fn rotate(radians: f32, animation: Option<Animation>) -> Self {
        Self::new(OpKind::Rotate(radians), animation)
    }

    pub fn scale(to: Vec2, animation: Option<Animation>) -> Self {
        Self::new(OpKind::Scale(to), animation)
    }

    pub fn skew(to: Vec2, animation: Option<Animation>) -> Self {
        Self::new(OpKind::Skew(to), animation)
    }

    /// Clip to `bounds` until the op is removed.
    pub fn scissor(bounds: Bounds) -> Self {
        Self::new(OpKind::Scissor(bounds), None)
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Scissors never finish; other ops finish once their animation does, or
    /// after one application when they have none.
    pub fn is_finished(&self) -> bool {
        match self.kind {
            OpKind::Scissor(_) => false,
            _ => match &self.animation {
                Some(animation) => animation.is_finished(),
                None => self.applied,
            },
        }
    }

    fn progress(&mut self, delta: u64) -> f32 {
        match self.animation.as_mut() {
            Some(animation) => {
                if self.applied {
                    animation.update(delta);
                }
                animation.value()
            }
            None => 1.0,
        }
    }

    /// Whether the op still changes the drawable from frame to frame.
    pub fn is_animating(&self) -> bool {
        !matches!(self.kind, OpKind::Scissor(_)) && !self.is_finished()
    }

    /// Advance by `delta` nanoseconds and update `node`. Runs before the
    /// drawable is translated, so a move shows on the same frame.
    pub fn apply(&mut self, node: &mut Drawable, delta: u64) {
        let t = self.progress(delta);
        match self.kind {
            OpKind::Move(to) => {
                let from = *self.from.get_or_insert(node.at);
                node.at = from.lerp(to, t);
                node.explicit_at = true;
            }
            OpKind::Resize(to) => {
                let from = *self.from.get_or_insert(node.size);
                node.size = from.lerp(to, t);
                node.fix_visible_size();
            }
            OpKind::Rotate(to) => {
                let from = self.from.get_or_insert(Vec2::new(node.transform.rotation, 0.0)).x;
                node.transform.rotation = from + (to - from) * t;
            }
            OpKind::Scale(to) => {
                let from = *self.from.get_or_insert(node.transform.scale);
                node.transform.scale = from.lerp(to, t);
            }
            OpKind::Skew(to) => {
                let from = *self.from.get_or_insert(node.transform.skew);
                node.transform.skew = from.lerp(to, t);
            }
            OpKind::Scissor(_) => {}
        }
        if !matches!(self.kind, OpKind::Scissor(_)) {
            node.needs_redraw = true;
        }
        self.applied = true;
    }

    /// Push render state on the surface, in drawable-local coordinates.
    pub fn begin(&self, surface: &mut dyn Surface) {
        if let OpKind::Scissor(bounds) = self.kind {
            surface.push_scissor(bounds);
        }
    }

    /// Undo [`begin`](Self::begin).
    pub fn end(&self, surface: &mut dyn Surface) {
        if let OpKind::Scissor(_) = self.kind {
            surface.pop_scissor();
        }
    }
}
