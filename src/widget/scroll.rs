//! Scroll state for drawables whose content exceeds their visible size.
//!
//! `ScrollState` handles clamping of the content offset against the content and
//! viewport sizes.

use crate::dom::node::Drawable;
use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

/// The scroll offset of a viewport over larger content.
///
/// The offset is always clamped to `[0, max_scroll]` where
/// `max_scroll = content_size - viewport_size` (clamped to zero).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    offset: Vec2,
    pub content_size: Vec2,
    pub viewport_size: Vec2,
}

impl ScrollState {
    /// Zero offset over the given content and viewport.
    pub fn new(content_size: Vec2, viewport_size: Vec2) -> Self {
        Self { offset: Vec2::ZERO, content_size, viewport_size }
    }

    /// Scroll state mirroring a drawable's size, visible size and offset.
    pub fn for_drawable(drawable: &Drawable) -> Self {
        let mut state = Self::new(drawable.size, drawable.visible());
        state.scroll_to(drawable.scroll);
        state
    }

    /// Current offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// `max(0, content - viewport)` per axis.
    pub fn max_scroll(&self) -> Vec2 {
        (self.content_size - self.viewport_size).max(Vec2::ZERO)
    }

    /// Scroll to an absolute offset, clamped.
    pub fn scroll_to(&mut self, to: Vec2) {
        let max = self.max_scroll();
        self.offset = Vec2::new(to.x.clamp(0.0, max.x), to.y.clamp(0.0, max.y));
    }

    /// Scroll by a relative delta, clamped. Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        let before = self.offset;
        self.scroll_to(self.offset + delta);
        self.offset != before
    }
}

// ===========================================================================
// Tests
// ===========================================================================
