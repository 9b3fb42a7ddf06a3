//! Event delivery: per-drawable handler tables, the handler context and the
//! bubble path.
//!
//! A drawable owns one optional closure per [`EventKind`]. Delivery calls that
//! closure first and falls back to the widget's
//! [`on_event`](crate::widget::Widget::on_event). Both get an [`EventCx`] with
//! mutable access to the whole scene, so while a handler runs it is taken out
//! of the scene and put back afterwards.

use tracing::trace;

use super::events::{Event, EventKind};
use crate::dom::node::{Drawable, NodeId};
use crate::dom::tree::Scene;

/// A handler closure. Returns `true` to consume the event.
pub type EventHandler = Box<dyn FnMut(&mut EventCx<'_>, &Event) -> bool>;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// One optional handler per event kind.
pub struct Handlers {
    slots: [Option<EventHandler>; EventKind::COUNT],
}

impl Default for Handlers {
    fn default() -> Self {
        Self { slots: std::array::from_fn(|_| None) }
    }
}

impl Handlers {
    /// Install the handler for `kind`, replacing any previous one.
    pub fn set(&mut self, kind: EventKind, handler: impl FnMut(&mut EventCx<'_>, &Event) -> bool + 'static) {
        self.slots[kind.index()] = Some(Box::new(handler));
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn remove(&mut self, kind: EventKind) -> Option<EventHandler> {
        self.slots[kind.index()].take()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Call the handler for the event's kind. `false` when there is none.
    pub fn call(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        match self.slots[event.kind().index()].as_mut() {
            Some(handler) => handler(cx, event),
            None => false,
        }
    }

    /// Put back handlers taken for a call. Slots filled in the meantime win.
    pub(crate) fn restore(&mut self, mut taken: Handlers) {
        for (slot, old) in self.slots.iter_mut().zip(taken.slots.iter_mut()) {
            if slot.is_none() {
                *slot = old.take();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EventCx
// ---------------------------------------------------------------------------

/// What a handler sees: the scene and the drawable receiving the event.
pub struct EventCx<'a> {
    scene: &'a mut Scene,
    node: NodeId,
}

impl<'a> EventCx<'a> {
    pub fn new(scene: &'a mut Scene, node: NodeId) -> Self {
        Self { scene, node }
    }

    /// The drawable the event is delivered to (not necessarily its target:
    /// bubbling delivers to ancestors too).
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    pub fn drawable(&self) -> Option<&Drawable> {
        self.scene.get(self.node)
    }

    pub fn drawable_mut(&mut self) -> Option<&mut Drawable> {
        self.scene.get_mut(self.node)
    }

    /// Mark the receiving drawable for redraw.
    pub fn request_redraw(&mut self) {
        self.scene.request_redraw(self.node);
    }
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Deliver `event` to one drawable: its handler table, then its widget.
///
/// Disabled or missing drawables decline everything. Returns whether the
/// event was consumed.
pub fn deliver(scene: &mut Scene, id: NodeId, event: &Event) -> bool {
    let Some(node) = scene.get_mut(id) else {
        return false;
    };
    if !node.enabled {
        return false;
    }
    trace!(node = ?id, event = event.name(), "deliver");

    let mut taken = std::mem::take(&mut node.handlers);
    let consumed = taken.call(&mut EventCx::new(scene, id), event);
    if let Some(node) = scene.get_mut(id) {
        node.handlers.restore(taken);
    }
    if consumed {
        return true;
    }

    let Some(mut widget) = scene.widgets.remove(id) else {
        return false;
    };
    let consumed = widget.on_event(&mut EventCx::new(scene, id), event);
    if scene.contains(id) {
        scene.widgets.insert(id, widget);
    } else {
        // Removed by its own handler.
        widget.on_removed();
    }
    consumed
}

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
/// `start` is not in the scene.
pub fn bubble_path(scene: &Scene, start: NodeId) -> Vec<NodeId> {
    if !scene.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(scene.ancestors(start));
    path
}

/// Deliver `event` along the bubble path of `start` until a drawable
/// consumes it.
pub fn bubble(scene: &mut Scene, start: NodeId, event: &Event) -> bool {
    bubble_path(scene, start).into_iter().any(|id| deliver(scene, id, event))
}

// ===========================================================================
// Tests
// ===========================================================================
