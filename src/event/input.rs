//! Raw input types and the crossterm adapter.
//!
//! Defines [`Key`], [`MouseButton`], the 8-bit [`Modifiers`] mask and the raw
//! [`InputEvent`] a host feeds into the UI. Crossterm events are converted via
//! [`from_crossterm`] so the rest of the crate never depends on crossterm.

use std::ops::{BitAnd, BitOr, Not};
use std::path::PathBuf;

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A non-printable key with a symbolic name. Printable keys arrive as typed
/// characters instead; keys with neither go through raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    F(u8),
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
}

// ---------------------------------------------------------------------------
// MouseButton
// ---------------------------------------------------------------------------

/// A mouse button. `Left` is the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u8),
}

impl MouseButton {
    /// Map a host button index (0 = left, 1 = right, 2 = middle).
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => MouseButton::Left,
            1 => MouseButton::Right,
            2 => MouseButton::Middle,
            n => MouseButton::Other(n),
        }
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask, one bit per physical modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const LSHIFT: Modifiers = Modifiers(1);
    pub const RSHIFT: Modifiers = Modifiers(2);
    pub const LCONTROL: Modifiers = Modifiers(4);
    pub const RCONTROL: Modifiers = Modifiers(8);
    pub const LALT: Modifiers = Modifiers(16);
    pub const RALT: Modifiers = Modifiers(32);
    pub const LMETA: Modifiers = Modifiers(64);
    pub const RMETA: Modifiers = Modifiers(128);

    pub const SHIFT: Modifiers = Modifiers(1 | 2);
    pub const CONTROL: Modifiers = Modifiers(4 | 8);
    pub const ALT: Modifiers = Modifiers(16 | 32);
    pub const META: Modifiers = Modifiers(64 | 128);

    /// Whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether `self` shares any bit with `other`.
    pub fn intersects(self, other: Modifiers) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn has_shift(self) -> bool {
        self.intersects(Modifiers::SHIFT)
    }

    pub fn has_control(self) -> bool {
        self.intersects(Modifiers::CONTROL)
    }

    pub fn has_alt(self) -> bool {
        self.intersects(Modifiers::ALT)
    }

    pub fn has_meta(self) -> bool {
        self.intersects(Modifiers::META)
    }

    /// Collapse left/right variants onto the left bit, so `RSHIFT` and
    /// `LSHIFT` compare equal.
    pub fn normalized(self) -> Modifiers {
        let mut out = Modifiers::NONE;
        for (side, left) in [
            (Modifiers::SHIFT, Modifiers::LSHIFT),
            (Modifiers::CONTROL, Modifiers::LCONTROL),
            (Modifiers::ALT, Modifiers::LALT),
            (Modifiers::META, Modifiers::LMETA),
        ] {
            if self.intersects(side) {
                out = out | left;
            }
        }
        out
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

impl Not for Modifiers {
    type Output = Modifiers;
    fn not(self) -> Self::Output {
        Modifiers(!self.0)
    }
}

/// Crossterm reports modifiers without sides; they map to the left keys.
impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if m.contains(ct::KeyModifiers::SHIFT) {
            out = out | Modifiers::LSHIFT;
        }
        if m.contains(ct::KeyModifiers::CONTROL) {
            out = out | Modifiers::LCONTROL;
        }
        if m.contains(ct::KeyModifiers::ALT) {
            out = out | Modifiers::LALT;
        }
        if m.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META) {
            out = out | Modifiers::LMETA;
        }
        out
    }
}

fn modifier_key(code: ct::ModifierKeyCode) -> Option<Modifiers> {
    use ct::ModifierKeyCode as M;
    Some(match code {
        M::LeftShift => Modifiers::LSHIFT,
        M::RightShift => Modifiers::RSHIFT,
        M::LeftControl => Modifiers::LCONTROL,
        M::RightControl => Modifiers::RCONTROL,
        M::LeftAlt => Modifiers::LALT,
        M::RightAlt => Modifiers::RALT,
        M::LeftSuper | M::LeftMeta => Modifiers::LMETA,
        M::RightSuper | M::RightMeta => Modifiers::RMETA,
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// A raw event from the host, before hit-testing and dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseMoved { x: f32, y: f32 },
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    MouseScrolled { x: f32, y: f32 },
    /// A printable character, already mapped to the keyboard layout.
    KeyTyped(char),
    KeyDown(Key),
    KeyUp(Key),
    /// A key with no symbolic name, identified by a host-consistent code.
    KeyDownCode(i32),
    KeyUpCode(i32),
    ModifierDown(Modifiers),
    ModifierUp(Modifiers),
    Resize { width: f32, height: f32 },
    FilesDropped(Vec<PathBuf>),
}

fn convert_key(code: ct::KeyCode) -> Option<Key> {
    Some(match code {
        ct::KeyCode::F(n) => Key::F(n),
        ct::KeyCode::Esc => Key::Escape,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Tab | ct::KeyCode::BackTab => Key::Tab,
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        _ => return None,
    })
}

/// Stable code for keys crossterm reports that have no [`Key`] variant.
fn unmapped_code(code: ct::KeyCode) -> Option<i32> {
    Some(match code {
        ct::KeyCode::CapsLock => 1,
        ct::KeyCode::ScrollLock => 2,
        ct::KeyCode::NumLock => 3,
        ct::KeyCode::PrintScreen => 4,
        ct::KeyCode::Pause => 5,
        ct::KeyCode::Menu => 6,
        ct::KeyCode::KeypadBegin => 7,
        _ => return None,
    })
}

/// Convert a crossterm event into zero or more raw input events.
///
/// Mouse buttons carry their position, so a press becomes a move followed by
/// the press. Pasted text is typed character by character. Terminal focus
/// changes have no counterpart and produce nothing.
pub fn from_crossterm(event: ct::Event) -> Vec<InputEvent> {
    match event {
        ct::Event::Key(key) => convert_key_event(key),
        ct::Event::Mouse(mouse) => {
            let moved = InputEvent::MouseMoved { x: f32::from(mouse.column), y: f32::from(mouse.row) };
            match mouse.kind {
                ct::MouseEventKind::Down(b) => vec![moved, InputEvent::MousePressed(b.into())],
                ct::MouseEventKind::Up(b) => vec![moved, InputEvent::MouseReleased(b.into())],
                ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => vec![moved],
                ct::MouseEventKind::ScrollUp => vec![moved, InputEvent::MouseScrolled { x: 0.0, y: 1.0 }],
                ct::MouseEventKind::ScrollDown => vec![moved, InputEvent::MouseScrolled { x: 0.0, y: -1.0 }],
                ct::MouseEventKind::ScrollLeft => vec![moved, InputEvent::MouseScrolled { x: 1.0, y: 0.0 }],
                ct::MouseEventKind::ScrollRight => vec![moved, InputEvent::MouseScrolled { x: -1.0, y: 0.0 }],
            }
        }
        ct::Event::Resize(width, height) => vec![InputEvent::Resize {
            width: f32::from(width),
            height: f32::from(height),
        }],
        ct::Event::Paste(text) => text.chars().map(InputEvent::KeyTyped).collect(),
        ct::Event::FocusGained | ct::Event::FocusLost => Vec::new(),
    }
}

fn convert_key_event(key: ct::KeyEvent) -> Vec<InputEvent> {
    let release = key.kind == ct::KeyEventKind::Release;
    if let ct::KeyCode::Modifier(code) = key.code {
        return match modifier_key(code) {
            Some(m) if release => vec![InputEvent::ModifierUp(m)],
            Some(m) => vec![InputEvent::ModifierDown(m)],
            None => Vec::new(),
        };
    }
    if let ct::KeyCode::Char(c) = key.code {
        return if release { Vec::new() } else { vec![InputEvent::KeyTyped(c)] };
    }
    if let Some(k) = convert_key(key.code) {
        return vec![if release { InputEvent::KeyUp(k) } else { InputEvent::KeyDown(k) }];
    }
    match unmapped_code(key.code) {
        Some(code) if release => vec![InputEvent::KeyUpCode(code)],
        Some(code) => vec![InputEvent::KeyDownCode(code)],
        None => Vec::new(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifier_bits() {
        assert_eq!(Modifiers::LSHIFT.0, 1);
        assert_eq!(Modifiers::RMETA.0, 128);
        let m = Modifiers::LSHIFT | Modifiers::RCONTROL;
        assert!(m.contains(Modifiers::LSHIFT));
        assert!(!m.contains(Modifiers::CONTROL));
        assert!(m.has_control());
        assert!(!m.has_alt());
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn normalized_collapses_sides() {
        assert_eq!(Modifiers::RSHIFT.normalized(), Modifiers::LSHIFT);
        assert_eq!(
            (Modifiers::RALT | Modifiers::LMETA).normalized(),
            Modifiers::LALT | Modifiers::LMETA
        );
    }

    #[test]
    fn crossterm_modifiers() {
        let m: Modifiers = (ct::KeyModifiers::SHIFT | ct::KeyModifiers::CONTROL).into();
        assert_eq!(m, Modifiers::LSHIFT | Modifiers::LCONTROL);
        let m: Modifiers = ct::KeyModifiers::SUPER.into();
        assert_eq!(m, Modifiers::LMETA);
    }

    // ── Buttons ──────────────────────────────────────────────────────

    #[test]
    fn button_indices() {
        assert_eq!(MouseButton::from_index(0), MouseButton::Left);
        assert_eq!(MouseButton::from_index(2), MouseButton::Middle);
        assert_eq!(MouseButton::from_index(5), MouseButton::Other(5));
        assert_eq!(MouseButton::from(ct::MouseButton::Right), MouseButton::Right);
    }

    // ── Crossterm events ─────────────────────────────────────────────

    fn key(code: ct::KeyCode, kind: ct::KeyEventKind) -> ct::Event {
        ct::Event::Key(ct::KeyEvent::new_with_kind(code, ct::KeyModifiers::NONE, kind))
    }

    #[test]
    fn chars_are_typed_on_press_only() {
        assert_eq!(
            from_crossterm(key(ct::KeyCode::Char('a'), ct::KeyEventKind::Press)),
            vec![InputEvent::KeyTyped('a')]
        );
        assert!(from_crossterm(key(ct::KeyCode::Char('a'), ct::KeyEventKind::Release)).is_empty());
    }

    #[test]
    fn named_keys_down_and_up() {
        assert_eq!(
            from_crossterm(key(ct::KeyCode::Enter, ct::KeyEventKind::Press)),
            vec![InputEvent::KeyDown(Key::Enter)]
        );
        assert_eq!(
            from_crossterm(key(ct::KeyCode::F(5), ct::KeyEventKind::Release)),
            vec![InputEvent::KeyUp(Key::F(5))]
        );
    }

    #[test]
    fn unmapped_keys_use_codes() {
        assert_eq!(
            from_crossterm(key(ct::KeyCode::CapsLock, ct::KeyEventKind::Press)),
            vec![InputEvent::KeyDownCode(1)]
        );
        assert!(from_crossterm(key(ct::KeyCode::Null, ct::KeyEventKind::Press)).is_empty());
    }

    #[test]
    fn modifier_keys() {
        assert_eq!(
            from_crossterm(key(
                ct::KeyCode::Modifier(ct::ModifierKeyCode::RightShift),
                ct::KeyEventKind::Press
            )),
            vec![InputEvent::ModifierDown(Modifiers::RSHIFT)]
        );
        assert_eq!(
            from_crossterm(key(
                ct::KeyCode::Modifier(ct::ModifierKeyCode::LeftSuper),
                ct::KeyEventKind::Release
            )),
            vec![InputEvent::ModifierUp(Modifiers::LMETA)]
        );
    }

    #[test]
    fn mouse_press_carries_position() {
        let event = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert_eq!(
            from_crossterm(event),
            vec![
                InputEvent::MouseMoved { x: 4.0, y: 7.0 },
                InputEvent::MousePressed(MouseButton::Left)
            ]
        );
    }

    #[test]
    fn scroll_resize_paste_focus() {
        let scroll = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert_eq!(from_crossterm(scroll)[1], InputEvent::MouseScrolled { x: 0.0, y: -1.0 });
        assert_eq!(
            from_crossterm(ct::Event::Resize(80, 24)),
            vec![InputEvent::Resize { width: 80.0, height: 24.0 }]
        );
        assert_eq!(
            from_crossterm(ct::Event::Paste("hi".into())),
            vec![InputEvent::KeyTyped('h'), InputEvent::KeyTyped('i')]
        );
        assert!(from_crossterm(ct::Event::FocusLost).is_empty());
    }
}
