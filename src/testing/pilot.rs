//! Pilot: programmatic interaction with a headless Ui.
//!
//! The `Pilot` wraps a [`Ui`] over a [`RecordingSurface`] and a
//! [`ManualTime`] clock, so tests control both input and the passage of time
//! and can inspect exactly what was drawn.

use std::path::PathBuf;

use crate::app::{Ui, UiError};
use crate::clock::{Clock, ManualTime};
use crate::config::Settings;
use crate::dom::tree::Scene;
use crate::event::input::{InputEvent, Key, Modifiers, MouseButton};
use crate::render::{DrawCommand, RecordingSurface};

use super::snapshot::commands_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless UI driver for testing.
///
/// # Examples
///
/// ```
/// use gilt_scene::dom::{Drawable, Scene};
/// use gilt_scene::testing::Pilot;
/// use gilt_scene::widgets::{Block, Group};
///
/// let mut scene = Scene::new();
/// let root = scene.insert(Drawable::new(), Group);
/// scene.insert_child(root, Drawable::new().size(10.0, 10.0), Block::default());
///
/// let mut pilot = Pilot::new(scene, 100.0, 100.0).unwrap();
/// assert!(pilot.frame());
/// assert!(!pilot.frame());
/// ```
pub struct Pilot {
    ui: Ui<RecordingSurface>,
    time: ManualTime,
}

impl Pilot {
    /// Drive `scene` in a window of the given size with default settings.
    pub fn new(scene: Scene, width: f32, height: f32) -> Result<Self, UiError> {
        Self::with_settings(scene, Settings::default(), width, height)
    }

    pub fn with_settings(scene: Scene, settings: Settings, width: f32, height: f32) -> Result<Self, UiError> {
        let time = ManualTime::new();
        let ui = Ui::new(scene, RecordingSurface::new(), settings, width, height)?
            .with_clock(Clock::with_source(time.clone()));
        Ok(Self { ui, time })
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Feed a raw event. Returns whether it was consumed.
    pub fn input(&mut self, event: InputEvent) -> bool {
        self.ui.handle_input(event)
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.input(InputEvent::MouseMoved { x, y });
    }

    /// Move to `(x, y)` and press then release `button`.
    pub fn click_with(&mut self, button: MouseButton, x: f32, y: f32) {
        self.move_to(x, y);
        self.input(InputEvent::MousePressed(button));
        self.input(InputEvent::MouseReleased(button));
    }

    /// Left-click at `(x, y)`.
    pub fn click(&mut self, x: f32, y: f32) {
        self.click_with(MouseButton::Left, x, y);
    }

    pub fn scroll(&mut self, x: f32, y: f32) -> bool {
        self.input(InputEvent::MouseScrolled { x, y })
    }

    /// Press and release `key`. Returns whether the press was consumed.
    pub fn press_key(&mut self, key: Key) -> bool {
        let consumed = self.input(InputEvent::KeyDown(key));
        self.input(InputEvent::KeyUp(key));
        consumed
    }

    /// Press `key` while holding `modifiers`.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.input(InputEvent::ModifierDown(modifiers));
        let consumed = self.press_key(key);
        self.input(InputEvent::ModifierUp(modifiers));
        consumed
    }

    /// Type each character of `text`.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.input(InputEvent::KeyTyped(ch));
        }
    }

    pub fn drop_files(&mut self, paths: Vec<PathBuf>) -> bool {
        self.input(InputEvent::FilesDropped(paths))
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.input(InputEvent::Resize { width, height })
    }

    // ── Time and frames ──────────────────────────────────────────────

    /// Move the clock forward without rendering.
    pub fn advance_ms(&mut self, millis: u64) {
        self.time.advance_ms(millis);
    }

    /// Render one frame. Returns whether anything was drawn.
    pub fn frame(&mut self) -> bool {
        self.ui.render()
    }

    /// Advance the clock by `millis` and render one frame.
    pub fn frame_after(&mut self, millis: u64) -> bool {
        self.advance_ms(millis);
        self.frame()
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn ui(&self) -> &Ui<RecordingSurface> {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui<RecordingSurface> {
        &mut self.ui
    }

    pub fn time(&self) -> &ManualTime {
        &self.time
    }

    /// Take every command recorded since the last call.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.ui.surface_mut().take_commands()
    }

    /// [`take_commands`](Self::take_commands) rendered as snapshot text.
    pub fn take_log(&mut self) -> String {
        commands_to_string(&self.take_commands())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::config::Platform;
    use crate::dom::node::Drawable;
    use crate::widgets::{Button, Group};

    fn button_scene(clicks: &Rc<Cell<u32>>) -> Scene {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new(), Group);
        let c = Rc::clone(clicks);
        scene.insert_child(
            root,
            Drawable::new().at(10.0, 10.0),
            Button::new("go").on_click(move |_| c.set(c.get() + 1)),
        );
        scene
    }

    #[test]
    fn click_hits_button() {
        let clicks = Rc::new(Cell::new(0));
        let mut pilot = Pilot::new(button_scene(&clicks), 200.0, 100.0).unwrap();
        pilot.click(15.0, 15.0);
        pilot.click(150.0, 80.0);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn frames_follow_dirtiness() {
        let clicks = Rc::new(Cell::new(0));
        let mut pilot = Pilot::new(button_scene(&clicks), 200.0, 100.0).unwrap();
        assert!(pilot.frame());
        assert!(!pilot.frame_after(16));
        pilot.move_to(15.0, 15.0);
        assert!(pilot.frame());
    }

    #[test]
    fn take_log_drains() {
        let clicks = Rc::new(Cell::new(0));
        let mut pilot = Pilot::new(button_scene(&clicks), 200.0, 100.0).unwrap();
        pilot.frame();
        assert!(pilot.take_log().starts_with("begin 200x100"));
        assert_eq!(pilot.take_log(), "");
    }

    #[test]
    fn tab_with_shift_goes_backwards() {
        let clicks = Rc::new(Cell::new(0));
        let settings = Settings::new().with_platform(Platform::Other);
        let mut pilot = Pilot::with_settings(button_scene(&clicks), settings, 200.0, 100.0).unwrap();
        assert!(pilot.press_key_with(Key::Tab, Modifiers::LSHIFT));
        assert!(pilot.ui().focused().is_some());
        assert!(pilot.ui().input().modifiers().is_empty());
    }

    #[test]
    fn time_is_manual() {
        let clicks = Rc::new(Cell::new(0));
        let mut pilot = Pilot::new(button_scene(&clicks), 200.0, 100.0).unwrap();
        pilot.advance_ms(5);
        assert_eq!(pilot.time().get(), 5_000_000);
    }
}
