//! Event system: raw input, dispatched events, handlers, bindings, focus and
//! the input manager.

pub mod binding;
pub mod events;
pub mod focus;
pub mod handler;
pub mod input;
pub mod manager;

pub use binding::{BindingAction, KeyBinder, Trigger};
pub use events::{Event, EventKind};
pub use focus::{FocusChain, FocusError};
pub use handler::{bubble, bubble_path, deliver, EventCx, EventHandler, Handlers};
pub use input::{from_crossterm, InputEvent, Key, Modifiers, MouseButton};
pub use manager::InputManager;
