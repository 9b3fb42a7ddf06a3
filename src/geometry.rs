//! Core geometry types: Vec2, Bounds, Axis.
//!
//! Positions and sizes in gilt-scene are pairs of `f32` pixels. Layout code works
//! in terms of a *main* and a *cross* axis, so [`Vec2`] can be indexed by axis
//! (`0` = x/width, `1` = y/height) as well as by field.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two layout axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Index into a [`Vec2`]: `0` for horizontal, `1` for vertical.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A pair of pixel values, used both for positions (`x`, `y`) and sizes
/// (`x` = width, `y` = height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Both components zero.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Both components one.
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both components are zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Whether either component is zero. A size with a zero dimension is
    /// considered unresolved.
    #[inline]
    pub fn has_zero(self) -> bool {
        self.x == 0.0 || self.y == 0.0
    }

    /// Whether either component is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.x < 0.0 || self.y < 0.0
    }

    /// Scale each component independently.
    #[inline]
    pub fn scale(self, sx: f32, sy: f32) -> Vec2 {
        Vec2 { x: self.x * sx, y: self.y * sy }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2 { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    /// Linearly interpolate between `self` and `other` by `factor`.
    #[inline]
    pub fn lerp(self, other: Vec2, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x + (other.x - self.x) * factor,
            y: self.y + (other.y - self.y) * factor,
        }
    }

    /// Whether both components are within `epsilon` of `other`'s.
    #[inline]
    pub fn approx_eq(self, other: Vec2, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Index<usize> for Vec2 {
    type Output = f32;

    /// # Panics
    ///
    /// Panics if `index > 1`.
    #[inline]
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vec2 index out of range: {index}"),
        }
    }
}

impl IndexMut<usize> for Vec2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vec2 index out of range: {index}"),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: an origin and a size.
///
/// Unlike a half-open cell region, hit-testing here is edge-inclusive on all
/// four sides, so a point on the right or bottom edge is inside.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub at: Vec2,
    pub size: Vec2,
}

impl Bounds {
    /// Create bounds from raw components.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { at: Vec2::new(x, y), size: Vec2::new(width, height) }
    }

    /// Create bounds from an origin and a size.
    #[inline]
    pub const fn from_parts(at: Vec2, size: Vec2) -> Self {
        Self { at, size }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.at.x + self.size.x
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.at.y + self.size.y
    }

    /// Whether the point lies inside (edges included).
    #[inline]
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= self.at.x && x <= self.right() && y >= self.at.y && y <= self.bottom()
    }

    /// Whether `other` overlaps this rectangle with non-zero area.
    #[inline]
    pub fn overlaps(self, other: Bounds) -> bool {
        self.at.x < other.right()
            && other.at.x < self.right()
            && self.at.y < other.bottom()
            && other.at.y < self.bottom()
    }

    /// Translate the rectangle by `offset`.
    #[inline]
    pub fn translate(self, offset: Vec2) -> Bounds {
        Bounds { at: self.at + offset, size: self.size }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
