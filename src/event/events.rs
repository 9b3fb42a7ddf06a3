//! Dispatched events: what drawables and widgets receive.
//!
//! Unlike raw [`InputEvent`](super::input::InputEvent)s these are already
//! routed: pointer events carry the pointer position and the modifier mask at
//! dispatch time, clicks carry their combo count.

use std::path::PathBuf;

use super::input::{Key, Modifiers, MouseButton};

/// An event delivered to a drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MousePressed { button: MouseButton, x: f32, y: f32, mods: Modifiers },
    MouseReleased { button: MouseButton, x: f32, y: f32, mods: Modifiers },
    /// A press and release on the same drawable. `clicks` counts consecutive
    /// releases of the same button within the combo interval (1 = single).
    MouseClicked { button: MouseButton, x: f32, y: f32, clicks: u32, mods: Modifiers },
    MouseEntered,
    MouseExited,
    MouseScrolled { amount_x: f32, amount_y: f32, mods: Modifiers },
    KeyTyped { ch: char, mods: Modifiers },
    KeyPressed { key: Key, mods: Modifiers },
    KeyReleased { key: Key, mods: Modifiers },
    UnmappedInput { code: i32, down: bool, mods: Modifiers },
    FocusGained,
    FocusLost,
    FileDrop { paths: Vec<PathBuf> },
}

/// The fieldless tag of an [`Event`], used to key handler tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MousePressed,
    MouseReleased,
    MouseClicked,
    MouseEntered,
    MouseExited,
    MouseScrolled,
    KeyTyped,
    KeyPressed,
    KeyReleased,
    UnmappedInput,
    FocusGained,
    FocusLost,
    FileDrop,
}

impl EventKind {
    /// Number of kinds.
    pub const COUNT: usize = 13;

    /// Dense index in `0..COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MousePressed { .. } => EventKind::MousePressed,
            Event::MouseReleased { .. } => EventKind::MouseReleased,
            Event::MouseClicked { .. } => EventKind::MouseClicked,
            Event::MouseEntered => EventKind::MouseEntered,
            Event::MouseExited => EventKind::MouseExited,
            Event::MouseScrolled { .. } => EventKind::MouseScrolled,
            Event::KeyTyped { .. } => EventKind::KeyTyped,
            Event::KeyPressed { .. } => EventKind::KeyPressed,
            Event::KeyReleased { .. } => EventKind::KeyReleased,
            Event::UnmappedInput { .. } => EventKind::UnmappedInput,
            Event::FocusGained => EventKind::FocusGained,
            Event::FocusLost => EventKind::FocusLost,
            Event::FileDrop { .. } => EventKind::FileDrop,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self.kind() {
            EventKind::MousePressed => "mouse-pressed",
            EventKind::MouseReleased => "mouse-released",
            EventKind::MouseClicked => "mouse-clicked",
            EventKind::MouseEntered => "mouse-entered",
            EventKind::MouseExited => "mouse-exited",
            EventKind::MouseScrolled => "mouse-scrolled",
            EventKind::KeyTyped => "key-typed",
            EventKind::KeyPressed => "key-pressed",
            EventKind::KeyReleased => "key-released",
            EventKind::UnmappedInput => "unmapped-input",
            EventKind::FocusGained => "focus-gained",
            EventKind::FocusLost => "focus-lost",
            EventKind::FileDrop => "file-drop",
        }
    }

    /// Whether this is a pointer event, routed by hit-testing.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self.kind(),
            EventKind::MousePressed
                | EventKind::MouseReleased
                | EventKind::MouseClicked
                | EventKind::MouseEntered
                | EventKind::MouseExited
                | EventKind::MouseScrolled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_dense() {
        assert_eq!(EventKind::MousePressed.index(), 0);
        assert_eq!(EventKind::FileDrop.index(), EventKind::COUNT - 1);
    }

    #[test]
    fn kind_and_name() {
        let e = Event::MouseClicked {
            button: MouseButton::Left,
            x: 1.0,
            y: 2.0,
            clicks: 2,
            mods: Modifiers::NONE,
        };
        assert_eq!(e.kind(), EventKind::MouseClicked);
        assert_eq!(e.name(), "mouse-clicked");
        assert!(e.is_pointer());
        assert!(!Event::KeyTyped { ch: 'x', mods: Modifiers::NONE }.is_pointer());
        assert_eq!(Event::FileDrop { paths: vec![] }.kind(), EventKind::FileDrop);
    }
}
