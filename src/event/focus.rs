//! Tab focus chain and focus errors.
//!
//! [`FocusChain`] keeps the tab order of the drawables that can take focus:
//! focusable, enabled and rendered (including every ancestor), in depth-first
//! order from the root.

use crate::dom::node::NodeId;
use crate::dom::tree::Scene;

/// Focus requests that cannot be honoured.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FocusError {
    #[error("drawable {name:?} is not focusable")]
    NotFocusable { name: String },
    #[error("drawable {0:?} is not in the scene")]
    UnknownNode(NodeId),
}

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Maintains an ordered list of focusable drawables for tab navigation.
///
/// The chain is rebuilt from the scene before each navigation, so it follows
/// tree changes. Focus cycles in forward (Tab) or backward (Shift+Tab) order.
#[derive(Debug, Default)]
pub struct FocusChain {
    nodes: Vec<NodeId>,
    current: Option<usize>,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chain from the scene.
    ///
    /// If the previously current drawable is still in the chain it stays
    /// current; otherwise there is no current drawable.
    pub fn rebuild(&mut self, scene: &Scene) {
        let old = self.current_node();
        self.nodes.clear();
        self.current = None;

        let Some(root) = scene.root() else {
            return;
        };
        self.nodes = scene
            .walk_depth_first(root)
            .into_iter()
            .filter(|&id| is_reachable(scene, id))
            .collect();

        if let Some(old) = old {
            self.current = self.nodes.iter().position(|&n| n == old);
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current.and_then(|idx| self.nodes.get(idx).copied())
    }

    /// Advance to the next drawable, wrapping around. `None` if the chain is
    /// empty.
    pub fn focus_next(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.nodes.len(),
            None => 0,
        };
        self.current = Some(next);
        self.nodes.get(next).copied()
    }

    /// Step back to the previous drawable, wrapping around.
    pub fn focus_previous(&mut self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.nodes.len() - 1,
            Some(idx) => idx - 1,
        };
        self.current = Some(prev);
        self.nodes.get(prev).copied()
    }

    /// Make `id` current. Returns `false` if it is not in the chain, in which
    /// case there is no current drawable afterwards.
    pub fn set_current(&mut self, id: Option<NodeId>) -> bool {
        self.current = id.and_then(|id| self.nodes.iter().position(|&n| n == id));
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn is_reachable(scene: &Scene, id: NodeId) -> bool {
    let Some(node) = scene.get(id) else {
        return false;
    };
    node.focusable
        && node.enabled
        && node.renders
        && scene
            .ancestors(id)
            .into_iter()
            .filter_map(|a| scene.get(a))
            .all(|a| a.enabled && a.renders)
}

// ===========================================================================
// Tests
// ===========================================================================
