//! Easing curves and the time-driven scroller used by marquee animations.

use crate::clock::Clock;
use std::time::Duration;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (constant velocity)
    #[default]
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Produces interpolated horizontal offsets over time.
///
/// A scroll is started with a start offset, a distance and a duration; the
/// host then polls [`compute_offset`](Self::compute_offset) once per frame.
pub trait ScrollAnimator {
    /// Begin scrolling from `start_x` by `dx` pixels over `duration`.
    fn start_scroll(&mut self, start_x: i32, dx: i32, duration: Duration);

    /// Advance to the current time.
    ///
    /// Returns `true` while there is an offset to apply, including the frame
    /// on which the scroll lands on its final offset. Returns `false` once
    /// that final offset has been reported.
    fn compute_offset(&mut self) -> bool;

    /// Offset computed by the last [`compute_offset`](Self::compute_offset).
    fn curr_x(&self) -> i32;

    /// Whether the current scroll has fully finished.
    fn is_finished(&self) -> bool;

    /// Stop immediately, jumping to the final offset.
    fn abort(&mut self);
}

/// Clock-driven [`ScrollAnimator`] with a configurable easing curve.
#[derive(Debug, Clone)]
pub struct Scroller<C: Clock> {
    clock: C,
    easing: Easing,
    start_x: i32,
    final_x: i32,
    curr_x: i32,
    start_time: Duration,
    duration: Duration,
    finished: bool,
}

impl<C: Clock> Scroller<C> {
    /// Create an idle linear scroller.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            easing: Easing::Linear,
            start_x: 0,
            final_x: 0,
            curr_x: 0,
            start_time: Duration::ZERO,
            duration: Duration::ZERO,
            finished: true,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Offset the current scroll will land on.
    #[must_use]
    pub const fn final_x(&self) -> i32 {
        self.final_x
    }

    /// Duration of the current scroll.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

impl<C: Clock> ScrollAnimator for Scroller<C> {
    fn start_scroll(&mut self, start_x: i32, dx: i32, duration: Duration) {
        self.start_x = start_x;
        self.final_x = start_x.saturating_add(dx);
        self.curr_x = start_x;
        self.start_time = self.clock.now();
        self.duration = duration;
        self.finished = false;
    }

    fn compute_offset(&mut self) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = self.clock.now().saturating_sub(self.start_time);
        if elapsed >= self.duration {
            self.curr_x = self.final_x;
            self.finished = true;
            return true;
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let distance = f64::from(self.final_x) - f64::from(self.start_x);
        self.curr_x = self.start_x + (distance * self.easing.apply(t)).round() as i32;
        true
    }

    fn curr_x(&self) -> i32 {
        self.curr_x
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn abort(&mut self) {
        self.curr_x = self.final_x;
        self.finished = true;
    }
}
