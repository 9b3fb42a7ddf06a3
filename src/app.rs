//! Ui: the frame orchestrator.
//!
//! [`Ui`] owns the scene, the drawing surface, the input manager, the clock and
//! the scheduled executors. A host feeds it raw input through
//! [`Ui::handle_input`] and calls [`Ui::render`] once per tick; everything else
//! happens synchronously inside those calls.

use tracing::{debug, error, info, warn};

use crate::clock::{Clock, Executor, ExecutorId, Executors};
use crate::config::{Settings, SettingsError};
use crate::dom::node::{Drawable, NodeId, Transform};
use crate::dom::tree::Scene;
use crate::event::binding::KeyBinder;
use crate::event::focus::FocusError;
use crate::event::input::{InputEvent, Key};
use crate::event::manager::InputManager;
use crate::geometry::{Bounds, Vec2};
use crate::layout::positioner::{FlowPositioner, LayoutContext, LayoutError, Positioner};
use crate::render::Surface;
use crate::widget::Widget;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Errors building or laying out a [`Ui`].
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid window size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
    #[error("the scene has no root drawable")]
    EmptyScene,
}

/// Runs every drawn frame, after `begin_frame` and before the tree.
pub type RenderHook = Box<dyn FnMut(&mut dyn Surface)>;

/// Runs after the tree is drawn. Returning `true` removes the hook.
pub type PostRenderHook = Box<dyn FnMut(&mut dyn Surface) -> bool>;

// ---------------------------------------------------------------------------
// Frame statistics
// ---------------------------------------------------------------------------

/// Frame timings over the last completed statistics interval. Times are in
/// nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub fps: u64,
    pub average_frame_time: u64,
    pub longest_frame_time: u64,
    pub shortest_frame_time: u64,
}

#[derive(Debug, Default)]
struct StatsWindow {
    elapsed: u64,
    frames: u64,
    total: u64,
    longest: u64,
    shortest: u64,
}

impl StatsWindow {
    /// Record one drawn frame. Returns the statistics once `interval` has
    /// passed, and starts a new window.
    fn record(&mut self, frame_time: u64, delta: u64, interval: u64) -> Option<FrameStats> {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.frames += 1;
        self.total = self.total.saturating_add(frame_time);
        self.longest = self.longest.max(frame_time);
        self.shortest = if self.frames == 1 { frame_time } else { self.shortest.min(frame_time) };
        if self.elapsed < interval {
            return None;
        }
        let stats = FrameStats {
            fps: self.frames * NANOS_PER_SEC / self.elapsed.max(1),
            average_frame_time: self.total / self.frames,
            longest_frame_time: self.longest,
            shortest_frame_time: self.shortest,
        };
        *self = Self::default();
        Some(stats)
    }
}

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// The root of a running interface.
pub struct Ui<S: Surface> {
    scene: Scene,
    surface: S,
    settings: Settings,
    clock: Clock,
    executors: Executors,
    input: InputManager,
    positioner: FlowPositioner,
    before_render: Vec<RenderHook>,
    hooks: Vec<PostRenderHook>,
    size: Vec2,
    initial_size: Vec2,
    pixel_ratio: f32,
    stats_window: StatsWindow,
    stats: Option<FrameStats>,
}

impl<S: Surface> std::fmt::Debug for Ui<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("size", &self.size)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("drawables", &self.scene.len())
            .field("executors", &self.executors.len())
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Ui<S> {
    /// Set up a UI over `scene` in a window of `width` x `height`.
    ///
    /// The root takes the window size on any axis it leaves unresolved. The
    /// tree is positioned, and framebuffers are created for the drawables that
    /// qualify.
    pub fn new(scene: Scene, surface: S, settings: Settings, width: f32, height: f32) -> Result<Self, UiError> {
        settings.validate()?;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(UiError::InvalidSize { width, height });
        }
        let root = scene.root().ok_or(UiError::EmptyScene)?;
        let size = Vec2::new(width, height);

        let mut ui = Self {
            input: InputManager::new(&settings),
            scene,
            surface,
            settings,
            clock: Clock::new(),
            executors: Executors::new(),
            positioner: FlowPositioner,
            before_render: Vec::new(),
            hooks: Vec::new(),
            size,
            initial_size: size,
            pixel_ratio: 1.0,
            stats_window: StatsWindow::default(),
            stats: None,
        };

        if let Some(node) = ui.scene.get_mut(root) {
            if node.size.x == 0.0 {
                node.size.x = width;
            }
            if node.size.y == 0.0 {
                node.size.y = height;
            }
        }
        let cx = LayoutContext::new(size, &ui.surface);
        ui.positioner.position(&mut ui.scene, root, &cx)?;
        ui.warn_oversized(root);
        ui.create_framebuffers(root);

        info!(width, height, drawables = ui.scene.len(), "ui ready");
        Ok(ui)
    }

    /// Replace the clock (builder). The frame delta restarts from the new
    /// clock's current time.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn warn_oversized(&self, root: NodeId) {
        for id in self.scene.walk_depth_first(root) {
            let Some(node) = self.scene.get(id) else { continue };
            if id != root
                && !node.has_visible_size()
                && (node.size.x > self.size.x || node.size.y > self.size.y)
            {
                warn!(
                    name = %node.name,
                    width = node.size.x,
                    height = node.size.y,
                    "drawable is larger than the window and has no visible size"
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the tree. Changes made here are not re-laid-out
    /// until [`relayout`](Self::relayout).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn binder_mut(&mut self) -> &mut KeyBinder {
        self.input.binder_mut()
    }

    /// Current window size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Statistics of the last completed interval, when `debug` is on.
    pub fn stats(&self) -> Option<FrameStats> {
        self.stats
    }

    // -----------------------------------------------------------------------
    // Tree changes
    // -----------------------------------------------------------------------

    /// Add a drawable under `parent` and position its subtree.
    ///
    /// The new drawable keeps its own position; siblings are not reflowed
    /// until [`relayout`](Self::relayout).
    pub fn add_child(
        &mut self,
        parent: NodeId,
        drawable: Drawable,
        widget: impl Widget + 'static,
    ) -> Result<NodeId, UiError> {
        let id = self
            .scene
            .insert_child(parent, drawable, widget)
            .ok_or(LayoutError::UnknownNode(parent))?;
        let cx = LayoutContext::new(self.size, &self.surface).with_scale(self.layout_scale());
        if let Err(err) = self.positioner.position(&mut self.scene, id, &cx) {
            self.scene.remove(id);
            return Err(err.into());
        }
        self.create_framebuffers(id);
        self.input.recalculate(&mut self.scene);
        Ok(id)
    }

    /// Remove a drawable and its subtree, releasing its framebuffers and any
    /// hover or focus it held.
    pub fn remove(&mut self, id: NodeId) -> Option<Drawable> {
        if !self.scene.contains(id) {
            return None;
        }
        for node in self.scene.walk_depth_first(id) {
            self.input.forget(node);
        }
        self.delete_framebuffers(id);
        let removed = self.scene.remove(id);
        self.input.recalculate(&mut self.scene);
        removed
    }

    /// Position the whole tree again, with padding scaled by how far the
    /// window has been resized.
    pub fn relayout(&mut self) -> Result<(), UiError> {
        let root = self.scene.root().ok_or(UiError::EmptyScene)?;
        let cx = LayoutContext::new(self.size, &self.surface).with_scale(self.layout_scale());
        self.positioner.position(&mut self.scene, root, &cx)?;
        self.delete_framebuffers(root);
        self.create_framebuffers(root);
        self.scene.request_redraw(root);
        self.input.recalculate(&mut self.scene);
        Ok(())
    }

    fn layout_scale(&self) -> Vec2 {
        Vec2::new(self.size.x / self.initial_size.x, self.size.y / self.initial_size.y)
    }

    // -----------------------------------------------------------------------
    // Framebuffers
    // -----------------------------------------------------------------------

    fn wants_framebuffer(&self, id: NodeId, node: &Drawable) -> bool {
        if Some(id) == self.scene.root() && self.settings.root_is_framebuffer {
            return true;
        }
        !node.refuse_framebuffer && self.scene.children(id).len() > self.settings.min_drawables_for_framebuffer
    }

    fn create_framebuffers(&mut self, from: NodeId) {
        if !self.settings.framebuffers_enabled || !self.surface.supports_framebuffers() {
            return;
        }
        for id in self.scene.walk_depth_first(from) {
            let Some(node) = self.scene.get(id) else { continue };
            if node.framebuffer.is_some() || !self.wants_framebuffer(id, node) {
                continue;
            }
            let visible = node.visible();
            let fb = self.surface.create_framebuffer(visible.x, visible.y);
            if let Some(node) = self.scene.get_mut(id) {
                debug!(name = %node.name, framebuffer = fb.0, "framebuffer created");
                node.framebuffer = Some(fb);
                node.needs_redraw = true;
            }
        }
    }

    fn delete_framebuffers(&mut self, from: NodeId) {
        for id in self.scene.walk_depth_first(from) {
            if let Some(fb) = self.scene.get_mut(id).and_then(|n| n.framebuffer.take()) {
                self.surface.delete_framebuffer(fb);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Run `hook` at the start of every drawn frame.
    pub fn before_render(&mut self, hook: impl FnMut(&mut dyn Surface) + 'static) {
        self.before_render.push(Box::new(hook));
    }

    /// Run `hook` at the end of every drawn frame until it returns `true`.
    pub fn add_hook(&mut self, hook: impl FnMut(&mut dyn Surface) -> bool + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Run one frame.
    ///
    /// The tree is drawn when something in it is dirty, or on every frame
    /// with render pausing off. Executors are ticked either way. Returns
    /// whether a frame was drawn.
    pub fn render(&mut self) -> bool {
        let delta = self.clock.delta();
        let drew = match self.scene.root() {
            Some(root) if !self.settings.render_pausing_enabled || self.scene.subtree_dirty(root) => {
                self.draw_frame(root, delta);
                true
            }
            _ => false,
        };
        self.executors.tick(delta);
        if drew {
            self.surface.present();
        }
        drew
    }

    fn draw_frame(&mut self, root: NodeId, delta: u64) {
        let surface: &mut dyn Surface = &mut self.surface;
        surface.begin_frame(self.size.x, self.size.y, self.pixel_ratio);
        for hook in &mut self.before_render {
            hook(&mut *surface);
        }
        render_node(&mut self.scene, root, &mut *surface, delta);
        self.hooks.retain_mut(|hook| !hook(&mut *surface));
        surface.end_frame();
        self.scene.clear_redraw(root);

        if self.settings.debug {
            let frame_time = self.clock.peek();
            if let Some(stats) = self.stats_window.record(frame_time, delta, self.settings.debug_stats_interval) {
                debug!(
                    fps = stats.fps,
                    avg = stats.average_frame_time,
                    longest = stats.longest_frame_time,
                    shortest = stats.shortest_frame_time,
                    "frame stats"
                );
                self.stats = Some(stats);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Resize
    // -----------------------------------------------------------------------

    /// Resize the window, scaling the whole tree by the change in size.
    ///
    /// A zero size and an unchanged size (unless `force`) are ignored. The
    /// size is clamped to the configured minimum and maximum, then to the
    /// aspect ratio. Returns whether the resize was applied.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32, force: bool) -> bool {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            error!(width, height, "cannot resize to zero size, ignoring");
            return false;
        }
        if !force && width == self.size.x && height == self.size.y && pixel_ratio == self.pixel_ratio {
            warn!(width, height, "resize to the same size, ignoring");
            return false;
        }
        let (width, height) = self.constrain(width, height);
        let Some(root) = self.scene.root() else {
            return false;
        };

        let (sx, sy) = (width / self.size.x, height / self.size.y);
        self.scene.rescale(root, sx, sy);
        self.size = Vec2::new(width, height);
        self.pixel_ratio = pixel_ratio;

        self.delete_framebuffers(root);
        self.create_framebuffers(root);
        self.scene.request_redraw(root);
        self.input.recalculate(&mut self.scene);
        debug!(width, height, pixel_ratio, "resized");
        true
    }

    fn constrain(&self, mut width: f32, mut height: f32) -> (f32, f32) {
        if let Some((min_w, min_h)) = self.settings.min_window_size {
            if width < min_w || height < min_h {
                warn!(width, height, min_w, min_h, "window below minimum size, clamping");
                width = width.max(min_w);
                height = height.max(min_h);
            }
        }
        if let Some((max_w, max_h)) = self.settings.max_window_size {
            if width > max_w || height > max_h {
                warn!(width, height, max_w, max_h, "window above maximum size, clamping");
                width = width.min(max_w);
                height = height.min(max_h);
            }
        }
        if let Some((rw, rh)) = self.settings.window_aspect_ratio {
            let ratio = rw / rh;
            let current = width / height;
            if (current - ratio).abs() > f32::EPSILON {
                if current > ratio {
                    width = height * ratio;
                } else {
                    height = width / ratio;
                }
                warn!(width, height, ratio, "window does not match aspect ratio, adjusting");
            }
        }
        (width, height)
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Feed one raw input event. Returns whether something consumed it.
    ///
    /// An unconsumed Tab moves focus forward (backward with shift held).
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let scene = &mut self.scene;
        match event {
            InputEvent::MouseMoved { x, y } => {
                self.input.mouse_moved(scene, x, y);
                false
            }
            InputEvent::MousePressed(button) => self.input.mouse_pressed(scene, button),
            InputEvent::MouseReleased(button) => {
                let now = self.clock.now();
                self.input.mouse_released(scene, button, now)
            }
            InputEvent::MouseScrolled { x, y } => self.input.mouse_scrolled(scene, x, y),
            InputEvent::KeyTyped(ch) => self.input.key_typed(scene, ch),
            InputEvent::KeyDown(key) => {
                if self.input.key_down(scene, key) {
                    return true;
                }
                if key != Key::Tab {
                    return false;
                }
                if self.input.modifiers().has_shift() {
                    self.input.focus_previous(scene).is_some()
                } else {
                    self.input.focus_next(scene).is_some()
                }
            }
            InputEvent::KeyUp(key) => self.input.key_up(scene, key),
            InputEvent::KeyDownCode(code) => self.input.key_down_code(scene, code),
            InputEvent::KeyUpCode(code) => self.input.key_up_code(scene, code),
            InputEvent::ModifierDown(modifier) => {
                self.input.add_modifier(modifier);
                false
            }
            InputEvent::ModifierUp(modifier) => {
                self.input.remove_modifier(modifier);
                false
            }
            InputEvent::Resize { width, height } => self.resize(width, height, self.pixel_ratio, false),
            InputEvent::FilesDropped(paths) => self.input.files_dropped(scene, paths),
        }
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.input.focused()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.input.hovered()
    }

    /// Focus `target`, or unfocus with `None`. Fails if it cannot take focus.
    pub fn focus(&mut self, target: Option<NodeId>) -> Result<bool, FocusError> {
        self.input.focus(&mut self.scene, target)
    }

    pub fn safe_focus(&mut self, target: NodeId) -> bool {
        self.input.safe_focus(&mut self.scene, Some(target))
    }

    pub fn unfocus(&mut self) -> bool {
        self.input.unfocus(&mut self.scene)
    }

    pub fn focus_next(&mut self) -> Option<NodeId> {
        self.input.focus_next(&mut self.scene)
    }

    pub fn focus_previous(&mut self) -> Option<NodeId> {
        self.input.focus_previous(&mut self.scene)
    }

    // -----------------------------------------------------------------------
    // Scheduling
    // -----------------------------------------------------------------------

    /// Call `f` every `interval` nanoseconds, `repeats` times (0 = forever).
    pub fn every(&mut self, interval: u64, repeats: u32, f: impl FnMut() + 'static) -> ExecutorId {
        self.executors.add(Executor::fixed_time(interval, repeats, f))
    }

    /// Call `f` every `interval` nanoseconds for `duration` nanoseconds.
    pub fn every_for(&mut self, interval: u64, duration: u64, f: impl FnMut() + 'static) -> ExecutorId {
        self.executors.add(Executor::until(interval, duration, f))
    }

    /// Call `f` every `interval` nanoseconds until `done` returns `true`.
    pub fn every_until(
        &mut self,
        interval: u64,
        done: impl FnMut() -> bool + 'static,
        f: impl FnMut() + 'static,
    ) -> ExecutorId {
        self.executors.add(Executor::conditional(interval, done, f))
    }

    /// Call `f` once, `delay` nanoseconds from now.
    pub fn after(&mut self, delay: u64, f: impl FnMut() + 'static) -> ExecutorId {
        self.executors.add(Executor::after(delay, f))
    }

    /// Stop a scheduled executor. Returns `false` if it already finished.
    pub fn cancel(&mut self, id: ExecutorId) -> bool {
        self.executors.cancel(id)
    }

    pub fn is_scheduled(&self, id: ExecutorId) -> bool {
        self.executors.contains(id)
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Release framebuffers and drop focus, hooks and executors.
    pub fn cleanup(&mut self) {
        if let Some(root) = self.scene.root() {
            self.delete_framebuffers(root);
        }
        self.input.unfocus(&mut self.scene);
        self.input.reset();
        self.before_render.clear();
        self.hooks.clear();
        self.executors.clear();
        info!("ui cleaned up");
    }
}

// ---------------------------------------------------------------------------
// Tree rendering
// ---------------------------------------------------------------------------

/// Draw `id` and its subtree: apply ops, translate to the drawable's origin,
/// draw, undo, then drop finished ops.
fn render_node(scene: &mut Scene, id: NodeId, surface: &mut dyn Surface, delta: u64) {
    let mut ops = match scene.get_mut(id) {
        Some(node) if node.renders => {
            let mut ops = std::mem::take(&mut node.ops);
            for op in &mut ops {
                op.apply(node, delta);
            }
            ops
        }
        _ => return,
    };
    let Some(node) = scene.get(id) else { return };
    let (at, size, visible, transform, framebuffer) =
        (node.at, node.size, node.visible(), node.transform, node.framebuffer);
    let dirty = scene.subtree_dirty(id);

    surface.push();
    surface.translate(at.x, at.y);
    if !transform.is_identity() {
        apply_transform(surface, transform, size);
    }
    for op in &ops {
        op.begin(surface);
    }
    match framebuffer {
        Some(fb) => {
            if dirty {
                surface.bind_framebuffer(fb);
                draw_content(scene, id, surface, delta);
                surface.unbind_framebuffer(fb);
            }
            surface.draw_framebuffer(fb, Bounds::from_parts(Vec2::ZERO, visible));
        }
        None => draw_content(scene, id, surface, delta),
    }
    for op in ops.iter().rev() {
        op.end(surface);
    }
    surface.pop();

    ops.retain(|op| !op.is_finished());
    if let Some(node) = scene.get_mut(id) {
        ops.append(&mut node.ops);
        node.ops = ops;
    }
}

/// Rotation, scale and skew, all about the drawable's center.
fn apply_transform(surface: &mut dyn Surface, transform: Transform, size: Vec2) {
    let (cx, cy) = (size.x / 2.0, size.y / 2.0);
    surface.translate(cx, cy);
    if transform.rotation != 0.0 {
        surface.rotate(transform.rotation);
    }
    if transform.scale != Vec2::ONE {
        surface.scale(transform.scale.x, transform.scale.y);
    }
    if !transform.skew.is_zero() {
        surface.skew(transform.skew.x, transform.skew.y);
    }
    surface.translate(-cx, -cy);
}

/// The widget's own content, then the children shifted by the scroll offset,
/// all clipped to the visible size when one is set.
fn draw_content(scene: &mut Scene, id: NodeId, surface: &mut dyn Surface, delta: u64) {
    let Some(node) = scene.get(id) else { return };
    let clip = node.has_visible_size().then(|| Bounds::from_parts(Vec2::ZERO, node.visible()));
    let scroll = node.scroll;
    if let Some(bounds) = clip {
        surface.push_scissor(bounds);
    }
    if let Some(widget) = scene.widget(id) {
        widget.render(node, surface);
    }

    let children = scene.children(id).to_vec();
    let scrolled = !children.is_empty() && !scroll.is_zero();
    if scrolled {
        surface.push();
        surface.translate(-scroll.x, -scroll.y);
    }
    for child in children {
        render_node(scene, child, surface, delta);
    }
    if scrolled {
        surface.pop();
    }
    if clip.is_some() {
        surface.pop_scissor();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
