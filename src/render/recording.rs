//! Headless surface that records every call as a [`DrawCommand`].

use std::fmt;

use super::surface::{Color, FontId, FramebufferId, ImageId, Surface, TextMeasurer};
use crate::geometry::{Bounds, Vec2};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame { width: f32, height: f32 },
    EndFrame,
    Push,
    Pop,
    Translate(Vec2),
    Rotate(f32),
    Scale(Vec2),
    Skew(Vec2),
    PushScissor(Bounds),
    PopScissor,
    Rect { bounds: Bounds, color: Color },
    Text { at: Vec2, text: String },
    Image { image: ImageId, bounds: Bounds },
    CreateFramebuffer { id: FramebufferId, size: Vec2 },
    DeleteFramebuffer(FramebufferId),
    BindFramebuffer(FramebufferId),
    UnbindFramebuffer(FramebufferId),
    DrawFramebuffer { id: FramebufferId, bounds: Bounds },
    Present,
}

fn bounds(b: &Bounds) -> String {
    format!("{},{} {}x{}", b.at.x, b.at.y, b.size.x, b.size.y)
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::BeginFrame { width, height } => write!(f, "begin {width}x{height}"),
            DrawCommand::EndFrame => f.write_str("end"),
            DrawCommand::Push => f.write_str("push"),
            DrawCommand::Pop => f.write_str("pop"),
            DrawCommand::Translate(v) => write!(f, "translate {},{}", v.x, v.y),
            DrawCommand::Rotate(r) => write!(f, "rotate {r}"),
            DrawCommand::Scale(v) => write!(f, "scale {},{}", v.x, v.y),
            DrawCommand::Skew(v) => write!(f, "skew {},{}", v.x, v.y),
            DrawCommand::PushScissor(b) => write!(f, "scissor {}", bounds(b)),
            DrawCommand::PopScissor => f.write_str("unscissor"),
            DrawCommand::Rect { bounds: b, color } => write!(
                f,
                "rect {} #{:02x}{:02x}{:02x}{:02x}",
                bounds(b),
                color.r,
                color.g,
                color.b,
                color.a
            ),
            DrawCommand::Text { at, text } => write!(f, "text {},{} {text:?}", at.x, at.y),
            DrawCommand::Image { image, bounds: b } => write!(f, "image {} {}", image.0, bounds(b)),
            DrawCommand::CreateFramebuffer { id, size } => {
                write!(f, "fb-create {} {}x{}", id.0, size.x, size.y)
            }
            DrawCommand::DeleteFramebuffer(id) => write!(f, "fb-delete {}", id.0),
            DrawCommand::BindFramebuffer(id) => write!(f, "fb-bind {}", id.0),
            DrawCommand::UnbindFramebuffer(id) => write!(f, "fb-unbind {}", id.0),
            DrawCommand::DrawFramebuffer { id, bounds: b } => write!(f, "fb-draw {} {}", id.0, bounds(b)),
            DrawCommand::Present => f.write_str("present"),
        }
    }
}

/// A [`Surface`] that draws nothing and remembers everything.
///
/// Text is measured as `0.5 * size` per character wide and `size` tall.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    next_framebuffer: u32,
    live_framebuffers: Vec<FramebufferId>,
    framebuffers_supported: bool,
    depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { framebuffers_supported: true, ..Self::default() }
    }

    /// A surface that reports no framebuffer support.
    pub fn without_framebuffers() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take and clear the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Framebuffers created and not yet deleted.
    pub fn live_framebuffers(&self) -> &[FramebufferId] {
        &self.live_framebuffers
    }

    /// Current push depth; zero between frames when pushes and pops balance.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of completed frames recorded.
    pub fn frame_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::EndFrame)).count()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl TextMeasurer for RecordingSurface {
    fn text_bounds(&self, _font: FontId, text: &str, size: f32) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * size * 0.5, size)
    }
}

impl Surface for RecordingSurface {
    fn begin_frame(&mut self, width: f32, height: f32, _pixel_ratio: f32) {
        self.record(DrawCommand::BeginFrame { width, height });
    }

    fn end_frame(&mut self) {
        self.record(DrawCommand::EndFrame);
    }

    fn push(&mut self) {
        self.depth += 1;
        self.record(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.record(DrawCommand::Pop);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.record(DrawCommand::Translate(Vec2::new(x, y)));
    }

    fn rotate(&mut self, radians: f32) {
        self.record(DrawCommand::Rotate(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.record(DrawCommand::Scale(Vec2::new(sx, sy)));
    }

    fn skew(&mut self, x: f32, y: f32) {
        self.record(DrawCommand::Skew(Vec2::new(x, y)));
    }

    fn push_scissor(&mut self, bounds: Bounds) {
        self.record(DrawCommand::PushScissor(bounds));
    }

    fn pop_scissor(&mut self) {
        self.record(DrawCommand::PopScissor);
    }

    fn draw_rect(&mut self, bounds: Bounds, color: Color, _radius: f32) {
        self.record(DrawCommand::Rect { bounds, color });
    }

    fn draw_text(&mut self, _font: FontId, at: Vec2, text: &str, _size: f32, _color: Color) {
        self.record(DrawCommand::Text { at, text: text.to_owned() });
    }

    fn draw_image(&mut self, image: ImageId, bounds: Bounds) {
        self.record(DrawCommand::Image { image, bounds });
    }

    fn supports_framebuffers(&self) -> bool {
        self.framebuffers_supported
    }

    fn create_framebuffer(&mut self, width: f32, height: f32) -> FramebufferId {
        let id = FramebufferId(self.next_framebuffer);
        self.next_framebuffer += 1;
        self.live_framebuffers.push(id);
        self.record(DrawCommand::CreateFramebuffer { id, size: Vec2::new(width, height) });
        id
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.live_framebuffers.retain(|&fb| fb != framebuffer);
        self.record(DrawCommand::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.record(DrawCommand::BindFramebuffer(framebuffer));
    }

    fn unbind_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.record(DrawCommand::UnbindFramebuffer(framebuffer));
    }

    fn draw_framebuffer(&mut self, framebuffer: FramebufferId, bounds: Bounds) {
        self.record(DrawCommand::DrawFramebuffer { id: framebuffer, bounds });
    }

    fn present(&mut self) {
        self.record(DrawCommand::Present);
    }
}
