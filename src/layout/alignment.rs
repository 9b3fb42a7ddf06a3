//! Alignment policy: direction, justification, cross alignment, padding, row size.

use crate::geometry::{Axis, Vec2};

/// How children are distributed along the main axis of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    /// First child at the start, last at the end, equal gaps between.
    /// A row with a single child is start-justified.
    SpaceBetween,
    /// Equal gaps before, between and after every child.
    SpaceEvenly,
}

/// How children are placed along the cross axis of their row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrossAlign {
    Start,
    #[default]
    Center,
    End,
}

/// The layout policy of a drawable with children.
///
/// `padding` is indexed by axis, not by role: `padding.x` is the horizontal gap
/// and `padding.y` the vertical gap, whichever of them is the main axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// The main axis: children flow along it and wrap across it.
    pub mode: Axis,
    pub main: Justify,
    pub cross: CrossAlign,
    pub padding: Vec2,
    /// Maximum number of children per row. Must be greater than zero.
    pub max_row_size: usize,
}

impl Default for Alignment {
    fn default() -> Self {
        Self {
            mode: Axis::Horizontal,
            main: Justify::Start,
            cross: CrossAlign::Center,
            padding: Vec2::new(6.0, 2.0),
            max_row_size: 50,
        }
    }
}

impl Alignment {
    /// Default alignment flowing along the given axis.
    pub fn new(mode: Axis) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Horizontal flow (rows of children, wrapping downwards).
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Vertical flow (columns of children, wrapping rightwards).
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the main-axis justification (builder).
    pub fn justify(mut self, main: Justify) -> Self {
        self.main = main;
        self
    }

    /// Set the cross-axis alignment (builder).
    pub fn align(mut self, cross: CrossAlign) -> Self {
        self.cross = cross;
        self
    }

    /// Set the padding (builder).
    pub fn padding(mut self, x: f32, y: f32) -> Self {
        self.padding = Vec2::new(x, y);
        self
    }

    /// Set the maximum number of children per row (builder).
    pub fn max_row_size(mut self, max: usize) -> Self {
        self.max_row_size = max;
        self
    }

    /// Index of the main axis into a [`Vec2`].
    #[inline]
    pub fn main_index(&self) -> usize {
        self.mode.index()
    }

    /// Index of the cross axis into a [`Vec2`].
    #[inline]
    pub fn cross_index(&self) -> usize {
        self.mode.cross().index()
    }
}
