//! Snapshot helpers.
//!
//! Turn a recorded command log or a scene into plain text suitable for
//! `insta` snapshots and plain string assertions.

use crate::dom::tree::Scene;
use crate::render::DrawCommand;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// One command per line, indented two spaces per open `push`.
///
/// # Examples
///
/// ```
/// use gilt_scene::geometry::Vec2;
/// use gilt_scene::render::DrawCommand;
/// use gilt_scene::testing::commands_to_string;
///
/// let log = [DrawCommand::Push, DrawCommand::Translate(Vec2::new(1.0, 2.0)), DrawCommand::Pop];
/// assert_eq!(commands_to_string(&log), "push\n  translate 1,2\npop");
/// ```
pub fn commands_to_string(commands: &[DrawCommand]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for command in commands {
        if matches!(command, DrawCommand::Pop) {
            depth = depth.saturating_sub(1);
        }
        if !out.is_empty() {
            out.push('\n');
        }
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&command.to_string());
        if matches!(command, DrawCommand::Push) {
            depth += 1;
        }
    }
    out
}

/// The scene's debug dump from the root, without the trailing newline.
/// Empty for a scene with no root.
pub fn tree_to_string(scene: &Scene) -> String {
    match scene.root() {
        Some(root) => scene.debug_tree(root).trim_end().to_owned(),
        None => String::new(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
