//! Dynamic units: sizes and positions relative to the parent or the viewport.
//!
//! A drawable may declare its size or position in [`Unit`]s instead of pixels.
//! They are resolved to pixels by the positioner before the drawable is laid out,
//! so a percentage follows its parent across resizes.

use crate::geometry::Vec2;

/// A length that resolves to pixels at layout time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Absolute pixels.
    Px(f32),
    /// Percentage (0..=100) of the parent's size on the same axis.
    Percent(f32),
    /// Percentage of the viewport width.
    Vw(f32),
    /// Percentage of the viewport height.
    Vh(f32),
}

impl Unit {
    /// Whether resolving this unit needs a sized parent.
    pub fn needs_parent(self) -> bool {
        matches!(self, Unit::Percent(_))
    }

    /// Resolve to pixels.
    ///
    /// `parent` is the parent's extent on the axis this unit applies to. Returns
    /// `None` for a percentage when there is no parent or the parent extent is zero.
    pub fn resolve(self, parent: Option<f32>, viewport: Vec2) -> Option<f32> {
        match self {
            Unit::Px(px) => Some(px),
            Unit::Percent(pct) => match parent {
                Some(extent) if extent != 0.0 => Some(extent * pct / 100.0),
                _ => None,
            },
            Unit::Vw(pct) => Some(viewport.x * pct / 100.0),
            Unit::Vh(pct) => Some(viewport.y * pct / 100.0),
        }
    }
}

impl From<f32> for Unit {
    fn from(px: f32) -> Self {
        Unit::Px(px)
    }
}

/// A pair of units, one per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec {
    pub x: Unit,
    pub y: Unit,
}

impl UnitVec {
    pub fn new(x: impl Into<Unit>, y: impl Into<Unit>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Resolve both axes. `parent` is the parent's size, if any.
    ///
    /// Returns `None` if either axis cannot be resolved.
    pub fn resolve(self, parent: Option<Vec2>, viewport: Vec2) -> Option<Vec2> {
        let x = self.x.resolve(parent.map(|p| p.x), viewport)?;
        let y = self.y.resolve(parent.map(|p| p.y), viewport)?;
        Some(Vec2::new(x, y))
    }
}
