//! Global key binder.
//!
//! [`KeyBinder`] maps a trigger plus a modifier combination to a callback. The
//! input manager offers every dispatched event to the binder before any
//! drawable sees it; a callback returning `true` consumes the event.
//!
//! Modifiers are compared side-insensitively: a binding for `LCONTROL` also
//! fires with the right control key held.

use std::collections::HashMap;

use super::events::Event;
use super::input::{Key, Modifiers, MouseButton};

/// A bound action. Returns `true` to consume the triggering event.
pub type BindingAction = Box<dyn FnMut() -> bool>;

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// What fires a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A typed printable character.
    Char(char),
    /// A named key going down.
    Key(Key),
    /// An unmapped key code going down.
    Code(i32),
    /// A click of `button` completing a combo of the given length.
    Click(MouseButton, u32),
}

impl Trigger {
    /// The trigger an event corresponds to, if it can fire bindings at all.
    pub fn of(event: &Event) -> Option<Trigger> {
        match *event {
            Event::KeyTyped { ch, .. } => Some(Trigger::Char(ch)),
            Event::KeyPressed { key, .. } => Some(Trigger::Key(key)),
            Event::UnmappedInput { code, down: true, .. } => Some(Trigger::Code(code)),
            Event::MouseClicked { button, clicks, .. } => Some(Trigger::Click(button, clicks)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// KeyBinder
// ---------------------------------------------------------------------------

/// Registry of global bindings, mapping (Trigger, Modifiers) -> action.
#[derive(Default)]
pub struct KeyBinder {
    bindings: HashMap<(Trigger, Modifiers), BindingAction>,
}

impl std::fmt::Debug for KeyBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBinder").field("bindings", &self.bindings.len()).finish()
    }
}

impl KeyBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, replacing any previous one for the same
    /// trigger and modifiers.
    pub fn bind(&mut self, trigger: Trigger, mods: Modifiers, action: impl FnMut() -> bool + 'static) {
        self.bindings.insert((trigger, mods.normalized()), Box::new(action));
    }

    /// Remove a binding. Returns whether one existed.
    pub fn unbind(&mut self, trigger: Trigger, mods: Modifiers) -> bool {
        self.bindings.remove(&(trigger, mods.normalized())).is_some()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Offer an event held with `mods`. Returns `true` if a binding fired
    /// and consumed it.
    pub fn accept(&mut self, event: &Event, mods: Modifiers) -> bool {
        match Trigger::of(event) {
            Some(trigger) => self.fire(trigger, mods),
            None => false,
        }
    }

    /// Offer an unmapped key code. Only key-down fires bindings.
    pub fn accept_code(&mut self, code: i32, down: bool, mods: Modifiers) -> bool {
        down && self.fire(Trigger::Code(code), mods)
    }

    fn fire(&mut self, trigger: Trigger, mods: Modifiers) -> bool {
        match self.bindings.get_mut(&(trigger, mods.normalized())) {
            Some(action) => action(),
            None => false,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
