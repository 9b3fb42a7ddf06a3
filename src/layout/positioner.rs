//! Flow positioner: sizes drawables bottom-up and places children top-down.
//!
//! Children flow along the main axis of their parent's [`Alignment`]. When the
//! parent has a visible main extent, children are packed greedily into rows
//! that wrap across the cross axis; otherwise they form a single row and the
//! parent grows to fit them. Each row is then justified along the main axis and
//! aligned along the cross axis.
//!
//! A parent whose size is unresolved takes the size of its packed rows plus
//! padding. Children with a negative position or that do not render are left
//! alone. A child with an explicit position keeps it; it only contributes to
//! its parent's size when it is the sole child.

use crate::dom::node::NodeId;
use crate::dom::tree::Scene;
use crate::geometry::Vec2;
use crate::render::TextMeasurer;

use super::alignment::{Alignment, CrossAlign, Justify};

// ---------------------------------------------------------------------------
// Errors and context
// ---------------------------------------------------------------------------

/// A malformed tree: these are configuration mistakes of the application.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("drawable {name:?} has no size and no children")]
    NoSizeNoChildren { name: String },
    #[error("drawable {name:?} has max_row_size {max_row_size}; rows must hold at least one child")]
    InvalidMaxRowSize { name: String, max_row_size: usize },
    #[error("drawable {name:?} uses a percentage unit but its parent has no size")]
    DynamicWithoutSizedParent { name: String },
    #[error("drawable {0:?} is not in the scene")]
    UnknownNode(NodeId),
}

/// Inputs shared by one layout pass.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Current window size divided by the initial one; padding scales with it.
    pub scale: Vec2,
    /// Window size, for viewport units.
    pub viewport: Vec2,
    /// Measures text for widgets with intrinsic size.
    pub measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutContext<'a> {
    /// Unscaled context for a window of `viewport` size.
    pub fn new(viewport: Vec2, measurer: &'a dyn TextMeasurer) -> Self {
        Self { scale: Vec2::ONE, viewport, measurer }
    }

    /// Set the padding scale factor (builder).
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }
}

/// Computes sizes and positions for a drawable and its subtree.
pub trait Positioner {
    fn position(&self, scene: &mut Scene, id: NodeId, cx: &LayoutContext<'_>) -> Result<(), LayoutError>;
}

// ---------------------------------------------------------------------------
// FlowPositioner
// ---------------------------------------------------------------------------

/// The default positioner: row packing with wrap, justify and cross alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowPositioner;

/// One packed row: its members, main extent (padding included) and tallest
/// member on the cross axis.
#[derive(Debug, Default)]
struct Row {
    members: Vec<NodeId>,
    main: f32,
    cross: f32,
}

impl Positioner for FlowPositioner {
    fn position(&self, scene: &mut Scene, id: NodeId, cx: &LayoutContext<'_>) -> Result<(), LayoutError> {
        resolve_units(scene, id, cx)?;
        measure(scene, id, cx);

        let node = scene.get(id).ok_or(LayoutError::UnknownNode(id))?;
        let needs_size = node.size.has_zero();
        let alignment = node.alignment;
        let name = node.name.clone();
        let children = scene.children(id).to_vec();

        if children.is_empty() {
            if needs_size {
                return Err(LayoutError::NoSizeNoChildren { name });
            }
            fix_visible(scene, id);
            return Ok(());
        }
        if alignment.max_row_size == 0 {
            return Err(LayoutError::InvalidMaxRowSize { name, max_row_size: 0 });
        }

        let main = alignment.main_index();
        let crs = alignment.cross_index();
        let padding = alignment.padding.scale(cx.scale.x, cx.scale.y);
        let (main_pad, cross_pad) = (padding[main], padding[crs]);

        let single = children.len() == 1;
        let mut flow = Vec::with_capacity(children.len());
        for child in children {
            // Skipped children still get a size; they only stay out of the flow.
            self.position(scene, child, cx)?;
            let Some(node) = scene.get(child) else { continue };
            if node.at.is_negative() || !node.renders {
                continue;
            }
            if !node.has_explicit_at() || single {
                flow.push(child);
            }
        }
        if flow.is_empty() {
            if let Some(node) = scene.get_mut(id) {
                for axis in 0..2 {
                    if node.size[axis] == 0.0 {
                        node.size[axis] = padding[axis] * 2.0;
                    }
                }
            }
            fix_visible(scene, id);
            return Ok(());
        }

        let budget = visible_of(scene, id)[main];
        let rows = if budget != 0.0 {
            pack_rows(scene, &flow, &alignment, budget, main_pad)
        } else {
            vec![single_row(scene, &flow, &alignment, main_pad)]
        };

        if needs_size {
            let widest = rows.iter().map(|r| r.main).fold(0.0, f32::max);
            let total_cross = rows.iter().map(|r| r.cross + cross_pad).sum::<f32>() + cross_pad;
            if let Some(node) = scene.get_mut(id) {
                if node.size[main] == 0.0 {
                    node.size[main] = widest;
                }
                if node.size[crs] == 0.0 {
                    node.size[crs] = total_cross;
                }
            }
        }
        fix_visible(scene, id);

        let parent = visible_of(scene, id);
        if let [row] = rows.as_slice() {
            align(scene, row, &alignment, 0.0, parent[crs], cross_pad);
            justify(scene, row, &alignment, parent[main], main_pad);
        } else {
            let mut offset = cross_pad;
            for row in &rows {
                align(scene, row, &alignment, offset, row.cross, 0.0);
                justify(scene, row, &alignment, parent[main], main_pad);
                offset += row.cross + cross_pad;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

fn visible_of(scene: &Scene, id: NodeId) -> Vec2 {
    scene.get(id).map(|n| n.visible()).unwrap_or_default()
}

fn fix_visible(scene: &mut Scene, id: NodeId) {
    if let Some(node) = scene.get_mut(id) {
        node.fix_visible_size();
    }
}

/// Resolve dynamic size and position units against the parent and viewport.
fn resolve_units(scene: &mut Scene, id: NodeId, cx: &LayoutContext<'_>) -> Result<(), LayoutError> {
    let node = scene.get(id).ok_or(LayoutError::UnknownNode(id))?;
    if node.size_units.is_none() && node.at_units.is_none() {
        return Ok(());
    }
    let (size_units, at_units) = (node.size_units, node.at_units);
    let unresolved = || LayoutError::DynamicWithoutSizedParent { name: node.name.clone() };
    let parent = scene.parent(id).and_then(|p| scene.get(p)).map(|p| p.size);

    let size = size_units
        .map(|u| u.resolve(parent, cx.viewport).ok_or_else(unresolved))
        .transpose()?;
    let at = at_units
        .map(|u| u.resolve(parent, cx.viewport).ok_or_else(unresolved))
        .transpose()?;

    if let Some(node) = scene.get_mut(id) {
        if let Some(size) = size {
            node.size = size;
        }
        if let Some(at) = at {
            node.set_at(at);
        }
    }
    Ok(())
}

/// Fill unresolved size components from the widget's intrinsic size.
fn measure(scene: &mut Scene, id: NodeId, cx: &LayoutContext<'_>) {
    if !scene.get(id).is_some_and(|n| n.size.has_zero()) {
        return;
    }
    let Some(intrinsic) = scene.widget(id).and_then(|w| w.measure(cx.measurer)) else {
        return;
    };
    if let Some(node) = scene.get_mut(id) {
        for axis in 0..2 {
            if node.size[axis] == 0.0 {
                node.size[axis] = intrinsic[axis];
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Row packing
// ---------------------------------------------------------------------------

/// Greedily pack `flow` into rows of at most `budget` main extent and
/// `max_row_size` members. A row always takes at least one member.
fn pack_rows(scene: &Scene, flow: &[NodeId], alignment: &Alignment, budget: f32, pad: f32) -> Vec<Row> {
    let (main, crs) = (alignment.main_index(), alignment.cross_index());
    let mut rows = Vec::new();
    let mut row = Row { main: pad, ..Row::default() };
    for &child in flow {
        let visible = visible_of(scene, child);
        let full = !row.members.is_empty()
            && (row.main + visible[main] + pad > budget || row.members.len() >= alignment.max_row_size);
        if full {
            rows.push(std::mem::replace(&mut row, Row { main: pad, ..Row::default() }));
        }
        row.main += visible[main] + pad;
        row.cross = row.cross.max(visible[crs]);
        row.members.push(child);
    }
    rows.push(row);
    rows
}

fn single_row(scene: &Scene, flow: &[NodeId], alignment: &Alignment, pad: f32) -> Row {
    let (main, crs) = (alignment.main_index(), alignment.cross_index());
    let mut row = Row { main: pad, ..Row::default() };
    for &child in flow {
        let visible = visible_of(scene, child);
        row.main += visible[main] + pad;
        row.cross = row.cross.max(visible[crs]);
        row.members.push(child);
    }
    row
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Place members on the cross axis within `[min, min + extent]`.
fn align(scene: &mut Scene, row: &Row, alignment: &Alignment, min: f32, extent: f32, pad: f32) {
    let crs = alignment.cross_index();
    for &member in &row.members {
        let Some(node) = scene.get_mut(member) else { continue };
        if node.has_explicit_at() {
            continue;
        }
        let visible = node.visible()[crs];
        node.at[crs] = match alignment.cross {
            CrossAlign::Start => min + pad,
            CrossAlign::Center => min + (extent - visible) / 2.0,
            CrossAlign::End => min + extent - visible - pad,
        };
    }
}

/// Place members on the main axis across `budget`.
fn justify(scene: &mut Scene, row: &Row, alignment: &Alignment, budget: f32, pad: f32) {
    let main = alignment.main_index();
    let count = row.members.len();
    let free = budget - row.main;
    let (mut cursor, gap) = match alignment.main {
        Justify::Start => (pad, 0.0),
        Justify::Center => (free / 2.0 + pad, 0.0),
        Justify::End => (free + pad, 0.0),
        Justify::SpaceBetween if count > 1 => (pad, free / (count - 1) as f32),
        Justify::SpaceBetween => (pad, 0.0),
        Justify::SpaceEvenly => {
            let gap = free / (count + 1) as f32;
            (pad + gap, gap)
        }
    };
    for &member in &row.members {
        let Some(node) = scene.get_mut(member) else { continue };
        let extent = node.visible()[main];
        if !node.has_explicit_at() {
            node.at[main] = cursor;
        }
        cursor += extent + pad + gap;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Drawable;
    use crate::geometry::Axis;
    use crate::layout::unit::{Unit, UnitVec};
    use crate::render::RecordingSurface;
    use crate::widgets::{Block, Group, Text};
    use pretty_assertions::assert_eq;

    fn layout(scene: &mut Scene, id: NodeId) -> Result<(), LayoutError> {
        let surface = RecordingSurface::new();
        let cx = LayoutContext::new(Vec2::new(800.0, 600.0), &surface);
        FlowPositioner.position(scene, id, &cx)
    }

    fn flat(padding: f32) -> Alignment {
        Alignment::horizontal().padding(padding, padding)
    }

    fn at(scene: &Scene, id: NodeId) -> Vec2 {
        scene.get(id).unwrap().at
    }

    fn size(scene: &Scene, id: NodeId) -> Vec2 {
        scene.get(id).unwrap().size
    }

    fn block(scene: &mut Scene, parent: NodeId, w: f32, h: f32) -> NodeId {
        scene
            .insert_child(parent, Drawable::new().size(w, h), Block::default())
            .unwrap()
    }

    // ── Leaves ─────────────────────────────────────────────────────────

    #[test]
    fn leaf_without_size_is_an_error() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().named("empty"), Group);
        assert_eq!(
            layout(&mut scene, root),
            Err(LayoutError::NoSizeNoChildren { name: "empty".into() })
        );
    }

    #[test]
    fn leaf_clamps_visible_size() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(50.0, 50.0).visible_size(80.0, 20.0), Group);
        layout(&mut scene, root).unwrap();
        assert_eq!(scene.get(root).unwrap().visible(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn leaf_takes_intrinsic_size() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new(), Text::new("hello").font_size(10.0));
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(25.0, 10.0));
    }

    #[test]
    fn max_row_size_zero_is_an_error() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().named("r").alignment(flat(0.0).max_row_size(0)), Group);
        block(&mut scene, root, 10.0, 10.0);
        assert_eq!(
            layout(&mut scene, root),
            Err(LayoutError::InvalidMaxRowSize { name: "r".into(), max_row_size: 0 })
        );
    }

    // ── Single child ───────────────────────────────────────────────────

    #[test]
    fn single_child_sizes_parent_with_padding_and_centers() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(5.0)), Group);
        let child = block(&mut scene, root, 20.0, 10.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(30.0, 20.0));
        assert_eq!(at(&scene, child), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn single_child_justified_in_sized_parent() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new().size(100.0, 50.0).alignment(flat(0.0).justify(Justify::Center)),
            Group,
        );
        let child = block(&mut scene, root, 20.0, 10.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(at(&scene, child), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn single_child_space_between_is_start() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new()
                .size(100.0, 50.0)
                .alignment(flat(2.0).justify(Justify::SpaceBetween).align(CrossAlign::Start)),
            Group,
        );
        let child = block(&mut scene, root, 20.0, 10.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(at(&scene, child), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn single_explicit_child_sizes_parent_but_keeps_position() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(1.0)), Group);
        let child = scene
            .insert_child(root, Drawable::new().at(7.0, 3.0).size(10.0, 10.0), Block::default())
            .unwrap();
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(12.0, 12.0));
        assert_eq!(at(&scene, child), Vec2::new(7.0, 3.0));
    }

    // ── Multiple children, no wrap ─────────────────────────────────────

    #[test]
    fn row_grows_parent() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(2.0).align(CrossAlign::Start)), Group);
        let a = block(&mut scene, root, 10.0, 10.0);
        let b = block(&mut scene, root, 20.0, 30.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(36.0, 34.0));
        assert_eq!(at(&scene, a), Vec2::new(2.0, 2.0));
        assert_eq!(at(&scene, b), Vec2::new(14.0, 2.0));
    }

    #[test]
    fn column_grows_parent() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new().alignment(Alignment::vertical().padding(0.0, 0.0).align(CrossAlign::End)),
            Group,
        );
        let a = block(&mut scene, root, 10.0, 10.0);
        let b = block(&mut scene, root, 20.0, 30.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(20.0, 40.0));
        assert_eq!(at(&scene, a), Vec2::new(10.0, 0.0));
        assert_eq!(at(&scene, b), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn skipped_children_do_not_participate() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(0.0)), Group);
        let a = block(&mut scene, root, 10.0, 10.0);
        let hidden = scene
            .insert_child(root, Drawable::new().size(99.0, 99.0).renders(false), Block::default())
            .unwrap();
        let floating = scene
            .insert_child(root, Drawable::new().at(-1.0, -1.0).size(99.0, 99.0), Block::default())
            .unwrap();
        let b = block(&mut scene, root, 10.0, 10.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(20.0, 10.0));
        assert_eq!(at(&scene, b).x, 10.0);
        assert_eq!(at(&scene, a).x, 0.0);
        assert_eq!(at(&scene, hidden), Vec2::ZERO);
        assert_eq!(at(&scene, floating), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn all_children_hidden_sizes_to_padding() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(800.0, 600.0), Group);
        let popup = scene
            .insert_child(root, Drawable::new().named("popup").alignment(flat(4.0)), Group)
            .unwrap();
        for _ in 0..2 {
            scene
                .insert_child(popup, Drawable::new().size(10.0, 10.0).renders(false), Block::default())
                .unwrap();
        }
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, popup), Vec2::new(8.0, 8.0));
        assert_eq!(scene.get(popup).unwrap().visible(), Vec2::new(8.0, 8.0));
    }

    #[test]
    fn skipped_children_are_still_measured() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(800.0, 600.0).alignment(flat(0.0)), Group);
        block(&mut scene, root, 10.0, 10.0);
        let floating = scene
            .insert_child(root, Drawable::new().at(-1.0, -1.0), Text::new("hello").font_size(10.0))
            .unwrap();
        let hidden = scene
            .insert_child(root, Drawable::new().renders(false), Text::new("hi").font_size(10.0))
            .unwrap();
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, floating), Vec2::new(25.0, 10.0));
        assert_eq!(size(&scene, hidden), Vec2::new(10.0, 10.0));
        assert_eq!(at(&scene, floating), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn explicit_child_among_many_is_not_placed_or_counted() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(0.0)), Group);
        block(&mut scene, root, 10.0, 10.0);
        let pinned = scene
            .insert_child(root, Drawable::new().at(3.0, 4.0).size(50.0, 50.0), Block::default())
            .unwrap();
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(10.0, 10.0));
        assert_eq!(at(&scene, pinned), Vec2::new(3.0, 4.0));
    }

    // ── Justification ──────────────────────────────────────────────────

    fn justified(justify: Justify) -> Vec<f32> {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new().size(100.0, 10.0).alignment(flat(0.0).justify(justify)),
            Group,
        );
        let a = block(&mut scene, root, 10.0, 10.0);
        let b = block(&mut scene, root, 10.0, 10.0);
        layout(&mut scene, root).unwrap();
        vec![at(&scene, a).x, at(&scene, b).x]
    }

    #[test]
    fn justify_modes() {
        assert_eq!(justified(Justify::Start), vec![0.0, 10.0]);
        assert_eq!(justified(Justify::Center), vec![40.0, 50.0]);
        assert_eq!(justified(Justify::End), vec![80.0, 90.0]);
        assert_eq!(justified(Justify::SpaceBetween), vec![0.0, 90.0]);
        let evenly = justified(Justify::SpaceEvenly);
        assert!((evenly[0] - 80.0 / 3.0).abs() < 1e-3);
        assert!((evenly[1] - (10.0 + 160.0 / 3.0)).abs() < 1e-3);
    }

    // ── Wrapping ───────────────────────────────────────────────────────

    #[test]
    fn wrap_scenario_two_rows() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new().size(800.0, 800.0).visible_size(150.0, 800.0).alignment(flat(0.0)),
            Group,
        );
        let first = block(&mut scene, root, 100.0, 50.0);
        let second = block(&mut scene, root, 60.0, 60.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(at(&scene, first), Vec2::new(0.0, 0.0));
        assert_eq!(at(&scene, second), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn wrap_row_count_is_ceil_of_n_over_k() {
        for (n, k) in [(7usize, 3usize), (6, 3), (1, 4), (9, 1)] {
            let mut scene = Scene::new();
            let width = 10.0 * k as f32;
            let root = scene.insert(
                Drawable::new().size(width, 1000.0).alignment(flat(0.0).max_row_size(k)),
                Group,
            );
            let kids: Vec<_> = (0..n).map(|_| block(&mut scene, root, 10.0, 10.0)).collect();
            layout(&mut scene, root).unwrap();
            let mut rows: Vec<f32> = kids.iter().map(|&c| at(&scene, c).y).collect();
            rows.dedup();
            assert_eq!(rows.len(), n.div_ceil(k), "n={n} k={k}");
        }
    }

    #[test]
    fn wrap_respects_max_row_size_before_budget() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new().size(1000.0, 0.0).alignment(flat(0.0).max_row_size(2)),
            Group,
        );
        for _ in 0..3 {
            block(&mut scene, root, 10.0, 10.0);
        }
        layout(&mut scene, root).unwrap();
        // Width stays as declared, height is the two rows.
        assert_eq!(size(&scene, root), Vec2::new(1000.0, 20.0));
    }

    #[test]
    fn wrap_rows_stack_with_cross_padding() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new()
                .size(30.0, 0.0)
                .alignment(Alignment::horizontal().padding(5.0, 4.0).align(CrossAlign::Start)),
            Group,
        );
        let a = block(&mut scene, root, 20.0, 10.0);
        let b = block(&mut scene, root, 20.0, 6.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(at(&scene, a), Vec2::new(5.0, 4.0));
        assert_eq!(at(&scene, b), Vec2::new(5.0, 18.0));
        assert_eq!(size(&scene, root), Vec2::new(30.0, 28.0));
    }

    #[test]
    fn visible_never_exceeds_size_after_layout() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().visible_size(500.0, 500.0).alignment(flat(3.0)), Group);
        let inner = scene.insert_child(root, Drawable::new().alignment(flat(1.0)), Group).unwrap();
        block(&mut scene, inner, 5.0, 5.0);
        block(&mut scene, inner, 5.0, 5.0);
        block(&mut scene, root, 40.0, 7.0);
        layout(&mut scene, root).unwrap();
        for id in scene.walk_depth_first(root) {
            let node = scene.get(id).unwrap();
            assert!(node.visible().x <= node.size.x && node.visible().y <= node.size.y);
        }
    }

    // ── Scaling and units ──────────────────────────────────────────────

    #[test]
    fn padding_scales_with_window() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(flat(5.0)), Group);
        block(&mut scene, root, 10.0, 10.0);
        let surface = RecordingSurface::new();
        let cx = LayoutContext::new(Vec2::new(800.0, 600.0), &surface).with_scale(Vec2::new(2.0, 1.0));
        FlowPositioner.position(&mut scene, root, &cx).unwrap();
        assert_eq!(size(&scene, root), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn percent_units_follow_parent() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(200.0, 100.0).alignment(flat(0.0)), Group);
        let child = scene
            .insert_child(
                root,
                Drawable::new().size_units(UnitVec::new(Unit::Percent(50.0), Unit::Vh(10.0))),
                Block::default(),
            )
            .unwrap();
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, child), Vec2::new(100.0, 60.0));
    }

    #[test]
    fn percent_units_without_sized_parent_fail() {
        let mut scene = Scene::new();
        let root = scene.insert(
            Drawable::new()
                .named("pct")
                .size_units(UnitVec::new(Unit::Percent(50.0), Unit::Px(10.0))),
            Block::default(),
        );
        assert_eq!(
            layout(&mut scene, root),
            Err(LayoutError::DynamicWithoutSizedParent { name: "pct".into() })
        );
    }

    #[test]
    fn nested_layout_positions_grandchildren() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().alignment(Alignment::new(Axis::Vertical).padding(0.0, 0.0)), Group);
        let inner = scene.insert_child(root, Drawable::new().alignment(flat(0.0)), Group).unwrap();
        let leaf_a = block(&mut scene, inner, 10.0, 10.0);
        let leaf_b = block(&mut scene, inner, 10.0, 10.0);
        block(&mut scene, root, 5.0, 5.0);
        layout(&mut scene, root).unwrap();
        assert_eq!(size(&scene, inner), Vec2::new(20.0, 10.0));
        assert_eq!(at(&scene, leaf_b).x - at(&scene, leaf_a).x, 10.0);
        assert_eq!(size(&scene, root), Vec2::new(20.0, 15.0));
    }
}
