//! Input manager: turns raw host input into dispatched events.
//!
//! [`InputManager`] tracks the pointer, the hovered and focused drawables, the
//! held modifier keys and the click combo. Pointer events go to the hovered
//! drawable and bubble to the root; keyboard and file-drop events go to the
//! focused drawable only. The global [`KeyBinder`] sees every event first.

use std::path::PathBuf;

use tracing::trace;

use super::binding::KeyBinder;
use super::events::Event;
use super::focus::{FocusChain, FocusError};
use super::handler::{bubble, deliver};
use super::input::{Key, Modifiers, MouseButton};
use crate::config::Settings;
use crate::dom::node::{InputState, NodeId};
use crate::dom::tree::Scene;
use crate::geometry::{Bounds, Vec2};

/// Pointer, keyboard and focus state of one UI.
#[derive(Debug)]
pub struct InputManager {
    settings: Settings,
    binder: KeyBinder,
    mouse: Vec2,
    mods: Modifiers,
    /// Left button held: hover is frozen for dragging.
    mouse_down: bool,
    click_timer: u64,
    click_amount: u32,
    clicked_button: MouseButton,
    hovered: Option<NodeId>,
    focused: Option<NodeId>,
    focus_chain: FocusChain,
}

impl InputManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            binder: KeyBinder::new(),
            mouse: Vec2::ZERO,
            mods: Modifiers::NONE,
            mouse_down: false,
            click_timer: 0,
            click_amount: 0,
            clicked_button: MouseButton::Left,
            hovered: None,
            focused: None,
            focus_chain: FocusChain::new(),
        }
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Length of the current click combo.
    pub fn click_amount(&self) -> u32 {
        self.click_amount
    }

    pub fn binder(&self) -> &KeyBinder {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut KeyBinder {
        &mut self.binder
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Drop references to a drawable that is leaving the scene.
    pub fn forget(&mut self, id: NodeId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    /// Forget hovered/focused drawables that are no longer in the scene.
    fn prune(&mut self, scene: &Scene) {
        if self.hovered.is_some_and(|id| !scene.contains(id)) {
            self.hovered = None;
        }
        if self.focused.is_some_and(|id| !scene.contains(id)) {
            self.focused = None;
        }
    }

    /// Whether the pointer is inside the visible bounds of `id`.
    fn pointer_inside(&self, scene: &Scene, id: NodeId) -> bool {
        scene.bounds(id).is_some_and(|b| b.contains(self.mouse.x, self.mouse.y))
    }

    // -----------------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------------

    fn map_modifier(&self, modifier: Modifiers) -> Modifiers {
        if self.settings.meta_is_control() && modifier == Modifiers::LMETA {
            Modifiers::LCONTROL
        } else {
            modifier
        }
    }

    pub fn add_modifier(&mut self, modifier: Modifiers) {
        self.mods = self.mods | self.map_modifier(modifier);
    }

    pub fn remove_modifier(&mut self, modifier: Modifiers) {
        self.mods = self.mods & !self.map_modifier(modifier);
    }

    pub fn clear_modifiers(&mut self) {
        self.mods = Modifiers::NONE;
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    /// The deepest drawable under `(x, y)` that accepts input.
    ///
    /// A drawable is only searched when it is enabled, rendered and contains
    /// the point; later siblings win over earlier ones, children over parents.
    pub fn ray_check(scene: &Scene, root: NodeId, x: f32, y: f32) -> Option<NodeId> {
        pick(scene, root, Vec2::ZERO, x, y, true)
    }

    fn set_hovered(&mut self, scene: &mut Scene, target: Option<NodeId>) {
        if self.hovered == target {
            return;
        }
        if let Some(old) = self.hovered.take() {
            if let Some(node) = scene.get_mut(old) {
                node.input_state = InputState::None;
                node.needs_redraw = true;
            }
            deliver(scene, old, &Event::MouseExited);
        }
        if let Some(new) = target.filter(|&id| scene.contains(id)) {
            if let Some(node) = scene.get_mut(new) {
                node.input_state = InputState::Hovered;
                node.needs_redraw = true;
            }
            self.hovered = Some(new);
            deliver(scene, new, &Event::MouseEntered);
        }
    }

    /// Re-run the hit test at the current pointer position.
    pub fn recalculate(&mut self, scene: &mut Scene) {
        self.mouse_moved(scene, self.mouse.x, self.mouse.y);
    }

    // -----------------------------------------------------------------------
    // Pointer
    // -----------------------------------------------------------------------

    /// Update the pointer position. While the left button is held the hovered
    /// drawable stays the same.
    pub fn mouse_moved(&mut self, scene: &mut Scene, x: f32, y: f32) {
        self.prune(scene);
        self.mouse = Vec2::new(x, y);
        if self.mouse_down {
            return;
        }
        let target = scene.root().and_then(|root| Self::ray_check(scene, root, x, y));
        self.set_hovered(scene, target);
    }

    pub fn mouse_pressed(&mut self, scene: &mut Scene, button: MouseButton) -> bool {
        self.prune(scene);
        if button == MouseButton::Left {
            self.mouse_down = true;
        }
        if let Some(node) = self.hovered.and_then(|id| scene.get_mut(id)) {
            node.input_state = InputState::Pressed;
            node.needs_redraw = true;
        }
        let event = Event::MousePressed { button, x: self.mouse.x, y: self.mouse.y, mods: self.mods };
        self.dispatch(scene, &event, self.hovered)
    }

    /// Handle a button release at time `now` (nanoseconds).
    ///
    /// Advances the click combo, drops focus when the pointer is outside the
    /// focused drawable, then dispatches the release and the click. An
    /// unconsumed left click focuses the hovered drawable if it can be focused.
    /// Returns whether the release or the click was consumed.
    pub fn mouse_released(&mut self, scene: &mut Scene, button: MouseButton, now: u64) -> bool {
        self.prune(scene);
        if button == MouseButton::Left {
            self.mouse_down = false;
        }
        self.advance_combo(button, now);

        if self.focused.is_some_and(|id| !self.pointer_inside(scene, id)) {
            self.unfocus(scene);
        }

        if let Some(node) = self.hovered.and_then(|id| scene.get_mut(id)) {
            node.input_state = InputState::Hovered;
            node.needs_redraw = true;
        }
        let (x, y, mods) = (self.mouse.x, self.mouse.y, self.mods);
        let target = self.hovered;
        let released = self.dispatch(scene, &Event::MouseReleased { button, x, y, mods }, target);
        let click = Event::MouseClicked { button, x, y, clicks: self.click_amount, mods };
        let clicked = self.dispatch(scene, &click, target);
        if !clicked && button == MouseButton::Left {
            self.safe_focus(scene, target);
        }

        // The drag is over: hover follows the pointer again.
        self.recalculate(scene);
        released || clicked
    }

    fn advance_combo(&mut self, button: MouseButton, now: u64) {
        if button != self.clicked_button {
            self.clicked_button = button;
            self.click_amount = 1;
        } else if now.saturating_sub(self.click_timer) < self.settings.combo_max_interval {
            if self.click_amount < self.settings.max_combo_size {
                self.click_amount += 1;
            } else if self.settings.clear_combo_when_maxed {
                self.click_amount = 1;
            }
        } else {
            self.click_amount = 1;
        }
        self.click_timer = now;
    }

    /// Handle a scroll of `(x, y)` raw units.
    ///
    /// Amounts are negated without natural scrolling, swapped while shift is
    /// held, then multiplied per axis. An unconsumed scroll moves the content
    /// of the nearest scrollable drawable under the pointer.
    pub fn mouse_scrolled(&mut self, scene: &mut Scene, x: f32, y: f32) -> bool {
        self.prune(scene);
        let (mut x, mut y) = if self.settings.natural_scrolling { (x, y) } else { (-x, -y) };
        if self.mods.has_shift() {
            std::mem::swap(&mut x, &mut y);
        }
        let (sx, sy) = self.settings.scroll_multiplier;
        let (x, y) = (x * sx, y * sy);

        let event = Event::MouseScrolled { amount_x: x, amount_y: y, mods: self.mods };
        if self.dispatch(scene, &event, self.hovered) {
            return true;
        }

        let Some(root) = scene.root() else {
            return false;
        };
        let Some(under) = pick(scene, root, Vec2::ZERO, self.mouse.x, self.mouse.y, false) else {
            return false;
        };
        let delta = Vec2::new(-x, -y);
        let mut candidates = vec![under];
        candidates.extend(scene.ancestors(under));
        for id in candidates {
            if scene.get(id).is_some_and(|n| n.has_visible_size()) && scene.scroll_by(id, delta) {
                trace!(node = ?id, "scrolled");
                self.recalculate(scene);
                return true;
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    fn to_focused(&mut self, scene: &mut Scene, event: &Event) -> bool {
        self.prune(scene);
        if self.binder.accept(event, self.mods) {
            trace!(event = event.name(), "consumed by binder");
            return true;
        }
        match self.focused {
            Some(id) => deliver(scene, id, event),
            None => false,
        }
    }

    /// A printable character, mapped to the keyboard layout.
    pub fn key_typed(&mut self, scene: &mut Scene, ch: char) -> bool {
        let event = Event::KeyTyped { ch, mods: self.mods };
        self.to_focused(scene, &event)
    }

    pub fn key_down(&mut self, scene: &mut Scene, key: Key) -> bool {
        let event = Event::KeyPressed { key, mods: self.mods };
        self.to_focused(scene, &event)
    }

    pub fn key_up(&mut self, scene: &mut Scene, key: Key) -> bool {
        let event = Event::KeyReleased { key, mods: self.mods };
        self.to_focused(scene, &event)
    }

    /// A key with no symbolic name. Bindings see the code first.
    pub fn key_down_code(&mut self, scene: &mut Scene, code: i32) -> bool {
        self.unmapped(scene, code, true)
    }

    pub fn key_up_code(&mut self, scene: &mut Scene, code: i32) -> bool {
        self.unmapped(scene, code, false)
    }

    fn unmapped(&mut self, scene: &mut Scene, code: i32, down: bool) -> bool {
        self.prune(scene);
        if self.binder.accept_code(code, down, self.mods) {
            return true;
        }
        let event = Event::UnmappedInput { code, down, mods: self.mods };
        match self.focused {
            Some(id) => deliver(scene, id, &event),
            None => false,
        }
    }

    pub fn files_dropped(&mut self, scene: &mut Scene, paths: Vec<PathBuf>) -> bool {
        self.prune(scene);
        match self.focused {
            Some(id) => deliver(scene, id, &Event::FileDrop { paths }),
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Dispatch and focus
    // -----------------------------------------------------------------------

    /// Offer `event` to the binder, then to `to` and its ancestors until one
    /// consumes it.
    pub fn dispatch(&mut self, scene: &mut Scene, event: &Event, to: Option<NodeId>) -> bool {
        if self.binder.accept(event, self.mods) {
            trace!(event = event.name(), "consumed by binder");
            return true;
        }
        let Some(start) = to else {
            return false;
        };
        let consumed = bubble(scene, start, event);
        trace!(event = event.name(), target = ?start, consumed, "dispatched");
        consumed
    }

    /// Move focus to `target` (`None` unfocuses).
    ///
    /// The old focus gets [`Event::FocusLost`], the new one
    /// [`Event::FocusGained`]. Returns `Ok(false)` when `target` is already
    /// focused, otherwise whether the new drawable consumed `FocusGained`.
    pub fn focus(&mut self, scene: &mut Scene, target: Option<NodeId>) -> Result<bool, FocusError> {
        self.prune(scene);
        if target == self.focused {
            return Ok(false);
        }
        if let Some(id) = target {
            let node = scene.get(id).ok_or(FocusError::UnknownNode(id))?;
            if !node.focusable {
                return Err(FocusError::NotFocusable { name: node.name.clone() });
            }
        }
        if let Some(old) = self.focused.take() {
            deliver(scene, old, &Event::FocusLost);
        }
        self.focused = target;
        Ok(match target {
            Some(id) => deliver(scene, id, &Event::FocusGained),
            None => false,
        })
    }

    /// Focus `target` if it exists and is focusable. Never fails.
    pub fn safe_focus(&mut self, scene: &mut Scene, target: Option<NodeId>) -> bool {
        match target {
            Some(id) if scene.get(id).is_some_and(|n| n.focusable) => self.focus(scene, Some(id)).unwrap_or(false),
            _ => false,
        }
    }

    pub fn unfocus(&mut self, scene: &mut Scene) -> bool {
        self.focus(scene, None).unwrap_or(false)
    }

    /// Focus the next drawable in tab order. Returns the newly focused one.
    pub fn focus_next(&mut self, scene: &mut Scene) -> Option<NodeId> {
        self.focus_chain.rebuild(scene);
        self.focus_chain.set_current(self.focused);
        let next = self.focus_chain.focus_next()?;
        self.focus(scene, Some(next)).ok()?;
        Some(next)
    }

    /// Focus the previous drawable in tab order.
    pub fn focus_previous(&mut self, scene: &mut Scene) -> Option<NodeId> {
        self.focus_chain.rebuild(scene);
        self.focus_chain.set_current(self.focused);
        let prev = self.focus_chain.focus_previous()?;
        self.focus(scene, Some(prev)).ok()?;
        Some(prev)
    }

    /// Reset pointer, modifier and focus state without delivering events.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.focused = None;
        self.mouse_down = false;
        self.mods = Modifiers::NONE;
        self.click_amount = 0;
        self.focus_chain.clear();
    }
}

/// Recursive hit test. `origin` is the parent's content origin in window
/// coordinates (its position minus its scroll).
fn pick(scene: &Scene, id: NodeId, origin: Vec2, x: f32, y: f32, needs_input: bool) -> Option<NodeId> {
    let node = scene.get(id)?;
    let at = origin + node.at;
    if !node.enabled || !node.renders || !Bounds::from_parts(at, node.visible()).contains(x, y) {
        return None;
    }
    let mut hit = (node.accepts_input || !needs_input).then_some(id);
    let content = at - node.scroll;
    for &child in scene.children(id) {
        if let Some(found) = pick(scene, child, content, x, y, needs_input) {
            hit = Some(found);
        }
    }
    hit
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::Platform;
    use crate::dom::node::Drawable;
    use crate::event::binding::Trigger;
    use crate::event::events::EventKind;
    use crate::event::handler::EventCx;
    use crate::widgets::{Block, Button, Group};

    const MS: u64 = 1_000_000;

    type Log = Rc<RefCell<Vec<String>>>;

    /// A handler that records `tag:event-name` and returns `consume`.
    fn logging(log: &Log, tag: &str, consume: bool) -> impl FnMut(&mut EventCx<'_>, &Event) -> bool + 'static {
        let log = Rc::clone(log);
        let tag = tag.to_owned();
        move |_, event| {
            log.borrow_mut().push(format!("{tag}:{}", event.name()));
            consume
        }
    }

    /// ```text
    /// root (0,0 200x200)
    ///  ├─ panel (10,10 100x100, input)
    ///  │   └─ inner (10,10 20x20, input)   -> absolute (20,20)
    ///  └─ other (150,150 40x40, input)
    /// ```
    fn scene() -> (Scene, NodeId, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().named("root").size(200.0, 200.0), Group);
        let panel = scene
            .insert_child(root, Drawable::new().named("panel").at(10.0, 10.0).size(100.0, 100.0).accepts_input(true), Group)
            .unwrap();
        let inner = scene
            .insert_child(panel, Drawable::new().named("inner").at(10.0, 10.0).size(20.0, 20.0).accepts_input(true), Block::default())
            .unwrap();
        let other = scene
            .insert_child(root, Drawable::new().named("other").at(150.0, 150.0).size(40.0, 40.0).accepts_input(true), Block::default())
            .unwrap();
        (scene, root, panel, inner, other)
    }

    fn manager() -> InputManager {
        InputManager::new(&Settings::default().with_platform(Platform::Other))
    }

    // ── Hit testing ──────────────────────────────────────────────────

    #[test]
    fn ray_check_finds_deepest() {
        let (scene, root, panel, inner, other) = scene();
        assert_eq!(InputManager::ray_check(&scene, root, 25.0, 25.0), Some(inner));
        assert_eq!(InputManager::ray_check(&scene, root, 50.0, 50.0), Some(panel));
        assert_eq!(InputManager::ray_check(&scene, root, 160.0, 160.0), Some(other));
        assert_eq!(InputManager::ray_check(&scene, root, 5.0, 5.0), None);
        assert_eq!(InputManager::ray_check(&scene, root, 500.0, 5.0), None);
    }

    #[test]
    fn ray_check_edges_are_inclusive() {
        let (scene, root, _panel, inner, _other) = scene();
        assert_eq!(InputManager::ray_check(&scene, root, 40.0, 40.0), Some(inner));
    }

    #[test]
    fn ray_check_skips_disabled_subtrees() {
        let (mut scene, root, panel, _inner, _other) = scene();
        scene.get_mut(panel).unwrap().enabled = false;
        assert_eq!(InputManager::ray_check(&scene, root, 25.0, 25.0), None);
    }

    #[test]
    fn ray_check_later_sibling_wins() {
        let (mut scene, root, _panel, _inner, _other) = scene();
        let top = scene
            .insert_child(root, Drawable::new().at(10.0, 10.0).size(100.0, 100.0).accepts_input(true), Group)
            .unwrap();
        assert_eq!(InputManager::ray_check(&scene, root, 25.0, 25.0), Some(top));
    }

    #[test]
    fn ray_check_follows_scroll() {
        let (mut scene, root, panel, inner, _other) = scene();
        scene.get_mut(panel).unwrap().scroll = Vec2::new(0.0, 10.0);
        assert_eq!(InputManager::ray_check(&scene, root, 25.0, 15.0), Some(inner));
        assert_eq!(InputManager::ray_check(&scene, root, 25.0, 35.0), Some(panel));
    }

    // ── Hover ────────────────────────────────────────────────────────

    #[test]
    fn hover_follows_pointer_and_sets_state() {
        let (mut scene, _root, panel, inner, _other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        assert_eq!(input.hovered(), Some(inner));
        assert_eq!(scene.get(inner).unwrap().input_state, InputState::Hovered);
        input.mouse_moved(&mut scene, 80.0, 80.0);
        assert_eq!(input.hovered(), Some(panel));
        assert_eq!(scene.get(inner).unwrap().input_state, InputState::None);
        assert_eq!(scene.get(panel).unwrap().input_state, InputState::Hovered);
    }

    #[test]
    fn enter_and_exit_are_delivered() {
        let (mut scene, _root, _panel, inner, other) = scene();
        let log: Log = Rc::default();
        scene.get_mut(inner).unwrap().handlers.set(EventKind::MouseEntered, logging(&log, "inner", false));
        scene.get_mut(inner).unwrap().handlers.set(EventKind::MouseExited, logging(&log, "inner", false));
        scene.get_mut(other).unwrap().handlers.set(EventKind::MouseEntered, logging(&log, "other", false));
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_moved(&mut scene, 26.0, 26.0);
        input.mouse_moved(&mut scene, 160.0, 160.0);
        assert_eq!(*log.borrow(), vec!["inner:mouse-entered", "inner:mouse-exited", "other:mouse-entered"]);
    }

    #[test]
    fn held_button_freezes_hover() {
        let (mut scene, _root, _panel, inner, _other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_pressed(&mut scene, MouseButton::Left);
        assert_eq!(scene.get(inner).unwrap().input_state, InputState::Pressed);
        input.mouse_moved(&mut scene, 160.0, 160.0);
        assert_eq!(input.hovered(), Some(inner));
        assert_eq!(input.mouse_position(), Vec2::new(160.0, 160.0));
    }

    #[test]
    fn right_button_does_not_freeze_hover() {
        let (mut scene, _root, _panel, _inner, other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_pressed(&mut scene, MouseButton::Right);
        input.mouse_moved(&mut scene, 160.0, 160.0);
        assert_eq!(input.hovered(), Some(other));
    }

    #[test]
    fn release_after_drag_rehovers() {
        let (mut scene, _root, _panel, inner, other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_pressed(&mut scene, MouseButton::Left);
        input.mouse_moved(&mut scene, 160.0, 160.0);
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        assert_eq!(input.hovered(), Some(other));
        assert_eq!(scene.get(inner).unwrap().input_state, InputState::None);
    }

    #[test]
    fn drag_from_empty_space_hovers_on_release() {
        let (mut scene, _root, _panel, _inner, other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 5.0, 5.0);
        input.mouse_pressed(&mut scene, MouseButton::Left);
        input.mouse_moved(&mut scene, 160.0, 160.0);
        assert_eq!(input.hovered(), None);
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        assert_eq!(input.hovered(), Some(other));
        assert_eq!(scene.get(other).unwrap().input_state, InputState::Hovered);
    }

    #[test]
    fn removed_hover_is_forgotten() {
        let (mut scene, _root, _panel, inner, _other) = scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        scene.remove(inner);
        input.mouse_pressed(&mut scene, MouseButton::Left);
        assert_eq!(input.hovered(), None);
    }

    // ── Clicks ───────────────────────────────────────────────────────

    #[test]
    fn press_release_click_bubble_in_order() {
        let (mut scene, _root, panel, inner, _other) = scene();
        let log: Log = Rc::default();
        for kind in [EventKind::MousePressed, EventKind::MouseReleased, EventKind::MouseClicked] {
            scene.get_mut(panel).unwrap().handlers.set(kind, logging(&log, "panel", true));
        }
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        assert!(input.mouse_pressed(&mut scene, MouseButton::Left));
        assert!(input.mouse_released(&mut scene, MouseButton::Left, 0));
        assert_eq!(input.hovered(), Some(inner));
        assert_eq!(scene.get(inner).unwrap().input_state, InputState::Hovered);
        assert_eq!(*log.borrow(), vec!["panel:mouse-pressed", "panel:mouse-released", "panel:mouse-clicked"]);
    }

    fn clicks_at(input: &mut InputManager, scene: &mut Scene, times: &[u64]) -> Vec<u32> {
        times
            .iter()
            .map(|&t| {
                input.mouse_released(scene, MouseButton::Left, t);
                input.click_amount()
            })
            .collect()
    }

    #[test]
    fn combo_counts_and_clamps() {
        let (mut scene, ..) = scene();
        let mut input = manager();
        assert_eq!(clicks_at(&mut input, &mut scene, &[0, 50 * MS, 100 * MS, 150 * MS]), vec![1, 2, 3, 3]);
    }

    #[test]
    fn combo_wraps_when_cleared_at_max() {
        let (mut scene, ..) = scene();
        let mut input = InputManager::new(&Settings::default().with_clear_combo_when_maxed(true));
        assert_eq!(clicks_at(&mut input, &mut scene, &[0, 50 * MS, 100 * MS, 150 * MS]), vec![1, 2, 3, 1]);
    }

    #[test]
    fn combo_breaks_after_interval() {
        let (mut scene, ..) = scene();
        let mut input = manager();
        assert_eq!(clicks_at(&mut input, &mut scene, &[0, 50 * MS, 300 * MS]), vec![1, 2, 1]);
    }

    #[test]
    fn button_change_restarts_combo() {
        let (mut scene, ..) = scene();
        let mut input = manager();
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        input.mouse_released(&mut scene, MouseButton::Right, 10 * MS);
        assert_eq!(input.click_amount(), 1);
        input.mouse_released(&mut scene, MouseButton::Right, 20 * MS);
        assert_eq!(input.click_amount(), 2);
    }

    #[test]
    fn click_count_is_delivered() {
        let (mut scene, _root, _panel, inner, _other) = scene();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        scene.get_mut(inner).unwrap().handlers.set(EventKind::MouseClicked, move |_, e| {
            if let Event::MouseClicked { clicks, .. } = e {
                s.borrow_mut().push(*clicks);
            }
            true
        });
        let mut input = manager();
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        input.mouse_released(&mut scene, MouseButton::Left, MS);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    // ── Focus ────────────────────────────────────────────────────────

    fn focus_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(200.0, 200.0), Group);
        let a = scene.insert_child(root, Drawable::new().named("a").at(10.0, 10.0).size(50.0, 20.0), Button::new("a")).unwrap();
        let b = scene.insert_child(root, Drawable::new().named("b").at(10.0, 100.0).size(50.0, 20.0), Button::new("b")).unwrap();
        (scene, root, a, b)
    }

    #[test]
    fn unconsumed_left_click_focuses() {
        let (mut scene, _root, a, _b) = focus_scene();
        let mut input = manager();
        input.mouse_moved(&mut scene, 20.0, 20.0);
        assert!(!input.mouse_released(&mut scene, MouseButton::Right, 0));
        assert_eq!(input.focused(), None);
        assert!(!input.mouse_released(&mut scene, MouseButton::Left, 0));
        assert_eq!(input.focused(), Some(a));
    }

    #[test]
    fn consumed_click_does_not_focus() {
        let (mut scene, _root, a, _b) = focus_scene();
        scene.get_mut(a).unwrap().handlers.set(EventKind::MouseClicked, |_, _| true);
        let mut input = manager();
        input.mouse_moved(&mut scene, 20.0, 20.0);
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        assert_eq!(input.focused(), None);
    }

    #[test]
    fn releasing_outside_focus_unfocuses() {
        let (mut scene, _root, a, _b) = focus_scene();
        let log: Log = Rc::default();
        scene.get_mut(a).unwrap().handlers.set(EventKind::FocusLost, logging(&log, "a", false));
        let mut input = manager();
        assert_eq!(input.focus(&mut scene, Some(a)), Ok(false));
        input.mouse_moved(&mut scene, 150.0, 150.0);
        input.mouse_released(&mut scene, MouseButton::Left, 0);
        assert_eq!(input.focused(), None);
        assert_eq!(*log.borrow(), vec!["a:focus-lost"]);
    }

    #[test]
    fn focus_rules() {
        let (mut scene, root, a, b) = focus_scene();
        let mut input = manager();
        let gained: Log = Rc::default();
        scene.get_mut(b).unwrap().handlers.set(EventKind::FocusGained, logging(&gained, "b", true));

        assert_eq!(input.focus(&mut scene, Some(a)), Ok(false));
        assert_eq!(input.focus(&mut scene, Some(a)), Ok(false));
        assert_eq!(input.focus(&mut scene, Some(b)), Ok(true));
        assert_eq!(input.focused(), Some(b));
        assert!(matches!(input.focus(&mut scene, Some(root)), Err(FocusError::NotFocusable { .. })));
        assert_eq!(input.focused(), Some(b));
        assert!(!input.safe_focus(&mut scene, Some(root)));
        input.unfocus(&mut scene);
        assert_eq!(input.focused(), None);
    }

    #[test]
    fn focus_unknown_node() {
        let (mut scene, _root, a, _b) = focus_scene();
        scene.remove(a);
        let mut input = manager();
        assert_eq!(input.focus(&mut scene, Some(a)), Err(FocusError::UnknownNode(a)));
    }

    #[test]
    fn tab_order_cycles() {
        let (mut scene, _root, a, b) = focus_scene();
        let mut input = manager();
        assert_eq!(input.focus_next(&mut scene), Some(a));
        assert_eq!(input.focus_next(&mut scene), Some(b));
        assert_eq!(input.focus_next(&mut scene), Some(a));
        assert_eq!(input.focus_previous(&mut scene), Some(b));
        assert_eq!(input.focused(), Some(b));
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    #[test]
    fn keys_go_to_focused_without_bubbling() {
        let (mut scene, root, a, _b) = focus_scene();
        let log: Log = Rc::default();
        scene.get_mut(root).unwrap().handlers.set(EventKind::KeyTyped, logging(&log, "root", true));
        let mut input = manager();
        assert!(!input.key_typed(&mut scene, 'x'));
        input.focus(&mut scene, Some(a)).unwrap();
        assert!(!input.key_typed(&mut scene, 'x'));
        assert!(log.borrow().is_empty());

        scene.get_mut(a).unwrap().handlers.set(EventKind::KeyPressed, logging(&log, "a", true));
        assert!(input.key_down(&mut scene, Key::Enter));
        assert_eq!(*log.borrow(), vec!["a:key-pressed"]);
    }

    #[test]
    fn binder_sees_keys_first() {
        let (mut scene, _root, a, _b) = focus_scene();
        let log: Log = Rc::default();
        scene.get_mut(a).unwrap().handlers.set(EventKind::KeyPressed, logging(&log, "a", true));
        let mut input = manager();
        input.focus(&mut scene, Some(a)).unwrap();
        input.binder_mut().bind(Trigger::Key(Key::Escape), Modifiers::NONE, || true);
        assert!(input.key_down(&mut scene, Key::Escape));
        assert!(log.borrow().is_empty());
        assert!(input.key_down(&mut scene, Key::Enter));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unmapped_codes_and_file_drops() {
        let (mut scene, _root, a, _b) = focus_scene();
        let log: Log = Rc::default();
        scene.get_mut(a).unwrap().handlers.set(EventKind::UnmappedInput, logging(&log, "a", true));
        scene.get_mut(a).unwrap().handlers.set(EventKind::FileDrop, logging(&log, "a", true));
        let mut input = manager();
        input.binder_mut().bind(Trigger::Code(9), Modifiers::NONE, || true);
        input.focus(&mut scene, Some(a)).unwrap();
        assert!(input.key_down_code(&mut scene, 9));
        assert!(input.key_up_code(&mut scene, 9));
        assert!(input.files_dropped(&mut scene, vec![PathBuf::from("a.txt")]));
        assert_eq!(*log.borrow(), vec!["a:unmapped-input", "a:file-drop"]);
    }

    // ── Modifiers ────────────────────────────────────────────────────

    #[test]
    fn modifiers_add_and_remove() {
        let mut input = manager();
        input.add_modifier(Modifiers::LSHIFT);
        input.add_modifier(Modifiers::LMETA);
        assert_eq!(input.modifiers(), Modifiers::LSHIFT | Modifiers::LMETA);
        input.remove_modifier(Modifiers::LSHIFT);
        assert_eq!(input.modifiers(), Modifiers::LMETA);
        input.clear_modifiers();
        assert!(input.modifiers().is_empty());
    }

    #[test]
    fn mac_command_acts_as_control() {
        let mut input = InputManager::new(&Settings::default().with_platform(Platform::MacOs));
        input.add_modifier(Modifiers::LMETA);
        assert_eq!(input.modifiers(), Modifiers::LCONTROL);
        input.remove_modifier(Modifiers::LMETA);
        assert!(input.modifiers().is_empty());
        input.add_modifier(Modifiers::RMETA);
        assert_eq!(input.modifiers(), Modifiers::RMETA);

        let mut plain = InputManager::new(
            &Settings::default().with_platform(Platform::MacOs).with_command_acts_as_control(false),
        );
        plain.add_modifier(Modifiers::LMETA);
        assert_eq!(plain.modifiers(), Modifiers::LMETA);
    }

    // ── Scrolling ────────────────────────────────────────────────────

    fn scroll_log(scene: &mut Scene, id: NodeId) -> Rc<RefCell<Vec<(f32, f32)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        scene.get_mut(id).unwrap().handlers.set(EventKind::MouseScrolled, move |_, e| {
            if let Event::MouseScrolled { amount_x, amount_y, .. } = e {
                s.borrow_mut().push((*amount_x, *amount_y));
            }
            true
        });
        seen
    }

    #[test]
    fn scroll_policy() {
        let (mut scene, _root, _panel, inner, _other) = scene();
        let seen = scroll_log(&mut scene, inner);
        let mut input = InputManager::new(&Settings::default().with_scroll_multiplier(2.0, 3.0));
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_scrolled(&mut scene, 1.0, 2.0);
        input.add_modifier(Modifiers::LSHIFT);
        input.mouse_scrolled(&mut scene, 1.0, 2.0);
        assert_eq!(*seen.borrow(), vec![(2.0, 6.0), (4.0, 3.0)]);
    }

    #[test]
    fn scroll_without_natural_scrolling_negates() {
        let (mut scene, _root, _panel, inner, _other) = scene();
        let seen = scroll_log(&mut scene, inner);
        let mut input = InputManager::new(&Settings::default().with_natural_scrolling(false));
        input.mouse_moved(&mut scene, 25.0, 25.0);
        input.mouse_scrolled(&mut scene, 1.0, -2.0);
        assert_eq!(*seen.borrow(), vec![(-1.0, 2.0)]);
    }

    #[test]
    fn unconsumed_scroll_moves_nearest_scrollable() {
        let mut scene = Scene::new();
        let root = scene.insert(Drawable::new().size(100.0, 100.0), Group);
        let list = scene
            .insert_child(root, Drawable::new().size(100.0, 400.0).visible_size(100.0, 100.0), Group)
            .unwrap();
        scene.insert_child(list, Drawable::new().size(100.0, 50.0).accepts_input(true), Block::default()).unwrap();
        let mut input = manager();
        input.mouse_moved(&mut scene, 50.0, 50.0);
        assert!(input.mouse_scrolled(&mut scene, 0.0, -30.0));
        assert_eq!(scene.get(list).unwrap().scroll, Vec2::new(0.0, 30.0));
        assert!(input.mouse_scrolled(&mut scene, 0.0, 31.0));
        assert_eq!(scene.get(list).unwrap().scroll, Vec2::ZERO);
        assert!(!input.mouse_scrolled(&mut scene, 0.0, 5.0));
    }
}
