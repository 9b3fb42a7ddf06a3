//! Tree operations: insert, remove, reparent, walk, coordinates, dirty tracking.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::trace;

use super::node::{Drawable, NodeId};
use crate::geometry::{Bounds, Vec2};
use crate::widget::lifecycle::{LifecycleEvent, LifecycleTracker};
use crate::widget::scroll::ScrollState;
use crate::widget::Widget;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The drawable tree, backed by a slotmap arena.
///
/// All drawables live in a single `SlotMap`. Parent/child relationships and the
/// widget behind each drawable are stored in secondary maps, so removal is
/// O(subtree size) and lookup is O(1). Children are ordered by insertion, which
/// is also draw order: later children are drawn on top.
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeId, Drawable>,
    pub(crate) widgets: SecondaryMap<NodeId, Box<dyn Widget>>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
    lifecycle: LifecycleTracker,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            widgets: SecondaryMap::new(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
            lifecycle: LifecycleTracker::new(),
        }
    }

    /// Insert a parentless drawable.
    ///
    /// If no root has been set yet, this drawable becomes the root.
    pub fn insert(&mut self, drawable: Drawable, widget: impl Widget + 'static) -> NodeId {
        let id = self.attach(drawable, Box::new(widget));
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a drawable as the last child of `parent`.
    ///
    /// Returns `None` (and inserts nothing) if `parent` does not exist.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        drawable: Drawable,
        widget: impl Widget + 'static,
    ) -> Option<NodeId> {
        self.insert_child_boxed(parent, drawable, Box::new(widget))
    }

    /// [`insert_child`](Self::insert_child) for an already boxed widget.
    pub fn insert_child_boxed(
        &mut self,
        parent: NodeId,
        drawable: Drawable,
        widget: Box<dyn Widget>,
    ) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.attach(drawable, widget);
        self.parent.insert(id, parent);
        self.children.get_mut(parent)?.push(id);
        self.request_redraw(parent);
        Some(id)
    }

    fn attach(&mut self, mut drawable: Drawable, mut widget: Box<dyn Widget>) -> NodeId {
        if drawable.name.is_empty() {
            drawable.name = widget.widget_type().to_owned();
        }
        if widget.can_focus() {
            drawable.focusable = true;
            drawable.accepts_input = true;
        }
        widget.on_added();
        let id = self.nodes.insert(drawable);
        self.widgets.insert(id, widget);
        self.children.insert(id, Vec::new());
        self.lifecycle.on_added(id);
        trace!(node = ?id, "drawable added");
        id
    }

    /// Remove a drawable and all its descendants.
    ///
    /// Every removed widget gets `on_removed`; the former parent is marked for
    /// redraw. Returns the removed drawable, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<Drawable> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
            self.request_redraw(parent_id);
        }

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            if let Some(mut widget) = self.widgets.remove(current) {
                widget.on_removed();
            }
            self.lifecycle.on_removed(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        trace!(node = ?id, "drawable removed");
        removed
    }

    /// Move `node` (with its subtree) to become the last child of `new_parent`.
    ///
    /// Returns `false` if either does not exist or `new_parent` lies inside the
    /// subtree of `node`.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> bool {
        if !self.nodes.contains_key(node)
            || !self.nodes.contains_key(new_parent)
            || node == new_parent
            || self.ancestors(new_parent).contains(&node)
        {
            return false;
        }

        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
            self.request_redraw(old_parent);
        }

        self.parent.insert(node, new_parent);
        if let Some(kids) = self.children.get_mut(new_parent) {
            kids.push(node);
        }
        self.request_redraw(new_parent);
        true
    }

    /// Get the parent of a drawable, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a drawable in draw order. Returns an empty slice if
    /// it has no children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a drawable.
    pub fn get(&self, id: NodeId) -> Option<&Drawable> {
        self.nodes.get(id)
    }

    /// Mutable access to a drawable.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Drawable> {
        self.nodes.get_mut(id)
    }

    /// The widget behind a drawable.
    ///
    /// `None` while that widget is itself handling an event.
    pub fn widget(&self, id: NodeId) -> Option<&dyn Widget> {
        self.widgets.get(id).map(|w| w.as_ref())
    }

    /// Mutable access to the widget behind a drawable.
    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.get_mut(id).map(|w| w.as_mut())
    }

    /// Downcast the widget behind a drawable to a concrete type.
    pub fn widget_as<T: 'static>(&self, id: NodeId) -> Option<&T> {
        self.widgets.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast the widget behind a drawable to a concrete type.
    pub fn widget_as_mut<T: 'static>(&mut self, id: NodeId) -> Option<&mut T> {
        self.widgets.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// The current root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of drawables in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the scene contains a drawable with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Drain lifecycle notifications accumulated since the last call.
    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Breadth-first traversal starting from `start`.
    pub fn walk_breadth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            queue.extend(self.children(current).iter().copied());
        }
        result
    }

    // -----------------------------------------------------------------------
    // Coordinates
    // -----------------------------------------------------------------------

    /// Position of `id` in window coordinates: its own `at` plus every
    /// ancestor's, minus each ancestor's scroll offset.
    pub fn absolute_position(&self, id: NodeId) -> Option<Vec2> {
        let mut pos = self.nodes.get(id)?.at;
        for ancestor in self.ancestors(id) {
            let node = &self.nodes[ancestor];
            pos = pos + node.at - node.scroll;
        }
        Some(pos)
    }

    /// Visible bounds of `id` in window coordinates.
    pub fn bounds(&self, id: NodeId) -> Option<Bounds> {
        let at = self.absolute_position(id)?;
        Some(Bounds::from_parts(at, self.nodes.get(id)?.visible()))
    }

    // -----------------------------------------------------------------------
    // Dirty tracking
    // -----------------------------------------------------------------------

    /// Ask for `id` to be redrawn on the next frame.
    pub fn request_redraw(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.needs_redraw = true;
        }
    }

    /// Whether `id` or anything below it must be redrawn: a redraw request
    /// (structural changes make one) or a running animation.
    pub fn subtree_dirty(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.needs_redraw
            || node.is_animating()
            || self.children(id).iter().any(|&child| self.subtree_dirty(child))
    }

    /// Clear the redraw request of `id` and all its descendants.
    pub fn clear_redraw(&mut self, id: NodeId) {
        for node_id in self.walk_depth_first(id) {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.needs_redraw = false;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Geometry mutation
    // -----------------------------------------------------------------------

    /// Scale `id` and all its descendants by `(sx, sy)`.
    pub fn rescale(&mut self, id: NodeId, sx: f32, sy: f32) {
        for node_id in self.walk_depth_first(id) {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.rescale(sx, sy);
            }
        }
    }

    /// Scroll the content of `id` by `delta`, clamped to its content extent.
    ///
    /// Returns `false` when the drawable cannot scroll in that direction (no
    /// visible size smaller than its content, or already at the limit).
    pub fn scroll_by(&mut self, id: NodeId, delta: Vec2) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let mut state = ScrollState::for_drawable(node);
        if !state.scroll_by(delta) {
            return false;
        }
        node.scroll = state.offset();
        node.needs_redraw = true;
        true
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
