//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a [`Ui`](crate::app::Ui) without a window, with
//! time under the test's control. Use [`commands_to_string`] to capture what
//! was drawn as plain text for snapshot assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{commands_to_string, tree_to_string};

pub use crate::render::RecordingSurface;
