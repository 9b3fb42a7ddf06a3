//! Frame clock and scheduled executors.
//!
//! All times are nanoseconds. The [`Clock`] reads a [`TimeSource`]; hosts and
//! tests that need deterministic time use [`ManualTime`]. Executors are ticked
//! once per frame with the frame delta and dropped as soon as they finish.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use tracing::trace;

// ---------------------------------------------------------------------------
// Time sources
// ---------------------------------------------------------------------------

/// A monotonic nanosecond counter.
pub trait TimeSource {
    fn now(&self) -> u64;
}

/// Wall-clock monotonic time, counted from creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Time that only moves when told to. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualTime(Rc<Cell<u64>>);

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `nanos`.
    pub fn advance(&self, nanos: u64) {
        self.0.set(self.0.get().saturating_add(nanos));
    }

    /// Move time forward by `millis` milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(millis * 1_000_000);
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> u64 {
        self.0.get()
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Delta-time source for the frame loop.
pub struct Clock {
    source: Box<dyn TimeSource>,
    last: u64,
}

impl Clock {
    /// A clock over [`MonotonicTime`].
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }

    pub fn with_source(source: impl TimeSource + 'static) -> Self {
        let last = source.now();
        Self { source: Box::new(source), last }
    }

    /// Current time of the underlying source.
    pub fn now(&self) -> u64 {
        self.source.now()
    }

    /// Nanoseconds since the previous call (or creation), and reset the
    /// reference point to now.
    pub fn delta(&mut self) -> u64 {
        let now = self.source.now();
        let delta = now.saturating_sub(self.last);
        self.last = now;
        delta
    }

    /// Nanoseconds since the previous `delta`, without resetting.
    pub fn peek(&self) -> u64 {
        self.source.now().saturating_sub(self.last)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Executors
// ---------------------------------------------------------------------------

/// Callback run when an executor fires.
pub type Callback = Box<dyn FnMut()>;

/// Predicate that ends a conditional executor when it returns `true`.
pub type Condition = Box<dyn FnMut() -> bool>;

/// Termination rule of an executor.
pub enum ExecutorKind {
    /// Fires every interval; finished after `repeats` firings. `repeats == 0`
    /// runs forever.
    FixedTime { repeats: u32, cycles: u32 },
    /// Fires every interval until `duration` has elapsed in total.
    Until { duration: u64, total: u64 },
    /// Fires every interval until the condition holds. The condition is
    /// evaluated fresh on every tick.
    Conditional(Condition),
    /// Fires once after the delay.
    After,
}

/// A scheduled callback.
///
/// Accumulates frame deltas and fires when the accumulated time reaches the
/// interval, then starts accumulating again from zero. At most one firing
/// happens per tick.
pub struct Executor {
    interval: u64,
    elapsed: u64,
    kind: ExecutorKind,
    callback: Callback,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.kind {
            ExecutorKind::FixedTime { .. } => "FixedTime",
            ExecutorKind::Until { .. } => "Until",
            ExecutorKind::Conditional(_) => "Conditional",
            ExecutorKind::After => "After",
        };
        f.debug_struct("Executor")
            .field("kind", &kind)
            .field("interval", &self.interval)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl Executor {
    pub fn fixed_time(interval: u64, repeats: u32, callback: impl FnMut() + 'static) -> Self {
        Self::new(interval, ExecutorKind::FixedTime { repeats, cycles: 0 }, callback)
    }

    pub fn until(interval: u64, duration: u64, callback: impl FnMut() + 'static) -> Self {
        Self::new(interval, ExecutorKind::Until { duration, total: 0 }, callback)
    }

    pub fn conditional(
        interval: u64,
        condition: impl FnMut() -> bool + 'static,
        callback: impl FnMut() + 'static,
    ) -> Self {
        Self::new(interval, ExecutorKind::Conditional(Box::new(condition)), callback)
    }

    pub fn after(delay: u64, callback: impl FnMut() + 'static) -> Self {
        Self::new(delay, ExecutorKind::After, callback)
    }

    fn new(interval: u64, kind: ExecutorKind, callback: impl FnMut() + 'static) -> Self {
        Self { interval, elapsed: 0, kind, callback: Box::new(callback) }
    }

    /// Number of firings so far, for repeat-bounded executors.
    pub fn cycles(&self) -> Option<u32> {
        match self.kind {
            ExecutorKind::FixedTime { cycles, .. } => Some(cycles),
            _ => None,
        }
    }

    /// Advance by `delta` nanoseconds, firing if due. Returns whether the
    /// executor has finished and should be dropped.
    pub fn tick(&mut self, delta: u64) -> bool {
        match &mut self.kind {
            ExecutorKind::FixedTime { repeats, cycles } => {
                if *repeats != 0 && *cycles >= *repeats {
                    return true;
                }
                self.elapsed = self.elapsed.saturating_add(delta);
                if self.elapsed >= self.interval {
                    self.elapsed = 0;
                    (self.callback)();
                    if *repeats != 0 {
                        *cycles += 1;
                    }
                }
                *repeats != 0 && *cycles >= *repeats
            }
            ExecutorKind::Until { duration, total } => {
                *total = total.saturating_add(delta);
                if *total >= *duration {
                    return true;
                }
                self.fire_if_due(delta);
                false
            }
            ExecutorKind::Conditional(condition) => {
                if condition() {
                    return true;
                }
                self.fire_if_due(delta);
                false
            }
            ExecutorKind::After => {
                self.elapsed = self.elapsed.saturating_add(delta);
                if self.elapsed >= self.interval {
                    (self.callback)();
                    return true;
                }
                false
            }
        }
    }

    fn fire_if_due(&mut self, delta: u64) {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            (self.callback)();
        }
    }
}

/// Handle to a scheduled executor, for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutorId(u64);

/// The active executors, ticked in scheduling order.
#[derive(Debug, Default)]
pub struct Executors {
    next_id: u64,
    active: Vec<(ExecutorId, Executor)>,
}

impl Executors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an executor; it is first ticked on the next frame.
    pub fn add(&mut self, executor: Executor) -> ExecutorId {
        let id = ExecutorId(self.next_id);
        self.next_id += 1;
        self.active.push((id, executor));
        id
    }

    /// Remove an executor. Returns `false` if it already finished or was cancelled.
    pub fn cancel(&mut self, id: ExecutorId) -> bool {
        let before = self.active.len();
        self.active.retain(|(other, _)| *other != id);
        self.active.len() != before
    }

    /// Whether `id` is still scheduled.
    pub fn contains(&self, id: ExecutorId) -> bool {
        self.active.iter().any(|(other, _)| *other == id)
    }

    /// Tick every executor with `delta` and drop the finished ones, keeping the
    /// relative order of the survivors.
    pub fn tick(&mut self, delta: u64) {
        self.active.retain_mut(|(id, executor)| {
            let finished = executor.tick(delta);
            if finished {
                trace!(executor = ?id, "executor finished");
            }
            !finished
        });
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
