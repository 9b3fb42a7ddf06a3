//! The drawing surface the scene renders through.
//!
//! The core never touches pixels. A backend implements [`Surface`] (and the
//! [`TextMeasurer`] it builds on) and the frame orchestrator drives it.

use crate::geometry::{Bounds, Vec2};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Backend font handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// Backend image handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Backend offscreen framebuffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. Returns `None` on malformed input.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Measures text for intrinsic sizing.
pub trait TextMeasurer {
    /// Width and height of `text` in `font` at `size` pixels.
    fn text_bounds(&self, font: FontId, text: &str, size: f32) -> Vec2;
}

/// A drawing backend.
///
/// Transform calls (`translate`, `rotate`, `scale`, `skew`) compose onto the
/// current state; `push`/`pop` save and restore it.
pub trait Surface: TextMeasurer {
    /// Start a frame of the given window size.
    fn begin_frame(&mut self, width: f32, height: f32, pixel_ratio: f32);
    fn end_frame(&mut self);

    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn skew(&mut self, x: f32, y: f32);

    /// Clip subsequent drawing to `bounds` (in current coordinates).
    fn push_scissor(&mut self, bounds: Bounds);
    fn pop_scissor(&mut self);

    fn draw_rect(&mut self, bounds: Bounds, color: Color, radius: f32);
    fn draw_text(&mut self, font: FontId, at: Vec2, text: &str, size: f32, color: Color);
    fn draw_image(&mut self, image: ImageId, bounds: Bounds);

    /// Whether offscreen framebuffers are available.
    fn supports_framebuffers(&self) -> bool {
        true
    }
    fn create_framebuffer(&mut self, width: f32, height: f32) -> FramebufferId;
    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);
    /// Redirect drawing into `framebuffer` until `unbind_framebuffer`.
    fn bind_framebuffer(&mut self, framebuffer: FramebufferId);
    fn unbind_framebuffer(&mut self, framebuffer: FramebufferId);
    /// Blit a framebuffer's content at `bounds`.
    fn draw_framebuffer(&mut self, framebuffer: FramebufferId, bounds: Bounds);

    /// Hand the finished frame to the window system.
    fn present(&mut self) {}
}
