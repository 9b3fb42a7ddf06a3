//! Easing curves and timed animations.

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Progress over a fixed duration, advanced by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    duration: u64,
    elapsed: u64,
    easing: Easing,
}

impl Animation {
    /// An animation lasting `duration` nanoseconds.
    pub fn new(duration: u64, easing: Easing) -> Self {
        Self { duration, elapsed: 0, easing }
    }

    /// Advance by `delta` nanoseconds. Returns whether the animation is finished.
    pub fn update(&mut self, delta: u64) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in `[0, 1]`. A zero-length animation is always at 1.
    pub fn value(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        self.easing.apply(self.elapsed as f32 / self.duration as f32)
    }

    /// Restart from zero.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}
