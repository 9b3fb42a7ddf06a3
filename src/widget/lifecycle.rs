//! Drawable lifecycle: added to and removed from the scene.
//!
//! The `LifecycleTracker` records which drawables are currently live in the
//! scene and accumulates `Added`/`Removed` notifications that the host can
//! drain after building or editing the tree.

use std::collections::HashSet;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Structural change to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A drawable was inserted.
    Added { node_id: NodeId },
    /// A drawable was removed, alone or as part of a removed subtree.
    Removed { node_id: NodeId },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks live drawables and queues lifecycle events in order of occurrence.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    live: HashSet<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an insertion. Duplicate insertions produce no second event.
    pub fn on_added(&mut self, id: NodeId) {
        if self.live.insert(id) {
            self.pending.push(LifecycleEvent::Added { node_id: id });
        }
    }

    /// Record a removal. Removing an unknown drawable is a no-op.
    pub fn on_removed(&mut self, id: NodeId) {
        if self.live.remove(&id) {
            self.pending.push(LifecycleEvent::Removed { node_id: id });
        }
    }

    /// Whether a drawable is currently live.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.live.contains(&id)
    }

    /// Number of live drawables.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Drain and return all pending events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
