//! Marquee scroll state machine.
//!
//! A run scrolls the text fully out to the left, teleports it just past the
//! right edge, scrolls it back to its rest position, pauses, and repeats:
//!
//! ```text
//! Idle --start (text overflows)--> ScrollingOut --done--> ScrollingIn
//!   ^                                   ^                     |
//!   |                                   +--[halt]-- cycles left
//!   +------------------------------------------ cycles exhausted
//! ```
//!
//! [`MarqueeController::stop_marquee`] jumps straight to `Idle` from any
//! state without telling the listener.
//!
//! The host drives the controller from its UI thread: it calls
//! [`on_animation_tick`](MarqueeController::on_animation_tick) every frame
//! while a run is active and hands fired [`DeferredTask`]s back through
//! [`run_deferred`](MarqueeController::run_deferred).

use crate::config::MarqueeConfig;
use marquee_core::{
    Clock, DeferredTask, ScrollAnimator, Scheduler, Scroller, TextMetrics, TimerQueue,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Phase of a marquee run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarqueeState {
    /// At rest; no animation in flight
    #[default]
    Idle,
    /// Text sliding out past the left edge
    ScrollingOut,
    /// Text sliding in from the right edge
    ScrollingIn,
}

/// Observer of marquee phase transitions.
///
/// Fires synchronously on entry to `ScrollingOut`, entry to `ScrollingIn`,
/// and on a run reaching `Idle` by exhausting its cycles. A programmatic
/// [`stop_marquee`](MarqueeController::stop_marquee) is not reported.
pub trait MarqueeListener {
    /// Called after the controller has entered `state`.
    fn on_state_change(&mut self, marquee: &MarqueeController, state: MarqueeState);
}

impl<F> MarqueeListener for F
where
    F: FnMut(&MarqueeController, MarqueeState),
{
    fn on_state_change(&mut self, marquee: &MarqueeController, state: MarqueeState) {
        self(marquee, state);
    }
}

/// Duration of one scroll-out pass.
///
/// Quantized to whole units of [`MarqueeConfig::UNIT_PX`] pixels, rounding
/// up, so 101px and 200px of text scroll out in the same time.
#[must_use]
pub fn cycle_duration(text_length_px: u32, unit_duration_ms: u32) -> Duration {
    let units = u64::from(text_length_px.div_ceil(MarqueeConfig::UNIT_PX));
    Duration::from_millis(units * u64::from(unit_duration_ms))
}

/// Duration of the scroll-in pass: one view width at the scroll-out speed.
#[must_use]
pub fn scroll_in_duration(cycle: Duration, text_length_px: u32, view_width_px: u32) -> Duration {
    if text_length_px == 0 {
        return Duration::ZERO;
    }
    let millis = cycle.as_millis() * u128::from(view_width_px) / u128::from(text_length_px);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Map a requested cycle count onto the run target.
///
/// Negative means unbounded and is stored as `u32::MAX`; zero runs once.
#[must_use]
pub const fn normalize_cycle_count(cycle_count: i32) -> u32 {
    if cycle_count < 0 {
        u32::MAX
    } else if cycle_count == 0 {
        1
    } else {
        cycle_count as u32
    }
}

fn px_to_offset(px: u32) -> i32 {
    i32::try_from(px).unwrap_or(i32::MAX)
}

/// Drives the marquee scroll animation for one widget.
pub struct MarqueeController {
    config: MarqueeConfig,
    animator: Box<dyn ScrollAnimator>,
    scheduler: Box<dyn Scheduler>,
    listener: Option<Box<dyn MarqueeListener>>,
    state: MarqueeState,
    run_total_count: u32,
    already_count: u32,
    text_length_px: u32,
    view_width_px: u32,
    cycle_duration: Duration,
    initial_offset: i32,
    offset: i32,
    generation: u64,
    halted: bool,
    redraw_requested: bool,
}

impl fmt::Debug for MarqueeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarqueeController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("run_total_count", &self.run_total_count)
            .field("already_count", &self.already_count)
            .field("text_length_px", &self.text_length_px)
            .field("view_width_px", &self.view_width_px)
            .field("cycle_duration", &self.cycle_duration)
            .field("offset", &self.offset)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}

impl MarqueeController {
    /// Create an idle controller over host-supplied collaborators.
    #[must_use]
    pub fn new(
        animator: impl ScrollAnimator + 'static,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        Self {
            config: MarqueeConfig::default(),
            animator: Box::new(animator),
            scheduler: Box::new(scheduler),
            listener: None,
            state: MarqueeState::Idle,
            run_total_count: 0,
            already_count: 0,
            text_length_px: 0,
            view_width_px: 0,
            cycle_duration: Duration::ZERO,
            initial_offset: 0,
            offset: 0,
            generation: 0,
            halted: false,
            redraw_requested: false,
        }
    }

    /// Create a controller with a linear [`Scroller`] and a [`TimerQueue`]
    /// on `clock`. The returned queue is the host's end: drain it every frame
    /// and pass due tasks to [`run_deferred`](Self::run_deferred).
    #[must_use]
    pub fn with_clock<C>(clock: C) -> (Self, TimerQueue<C>)
    where
        C: Clock + Clone + 'static,
    {
        let queue = TimerQueue::new(clock.clone());
        let controller = Self::new(Scroller::new(clock), queue.clone());
        (controller, queue)
    }

    /// Replace the timing configuration.
    #[must_use]
    pub fn with_config(mut self, config: MarqueeConfig) -> Self {
        self.set_unit_duration(config.unit_duration_ms);
        self.set_halt_time(config.halt_time_ms);
        self
    }

    // =========================================================================
    // Run control
    // =========================================================================

    /// Start a run of `cycle_count` cycles; negative runs until stopped.
    ///
    /// Ignored while a run is in flight, and when the text already fits the
    /// view.
    pub fn start_marquee(&mut self, cycle_count: i32, metrics: &dyn TextMetrics) {
        if self.state != MarqueeState::Idle {
            tracing::debug!(state = ?self.state, "marquee already running, start ignored");
            return;
        }

        let text_length_px = metrics.text_length_px();
        self.view_width_px = metrics.view_width_px();
        if text_length_px <= self.view_width_px {
            tracing::info!(
                text_length_px,
                view_width_px = self.view_width_px,
                "text fits the view, marquee refused"
            );
            return;
        }

        self.text_length_px = text_length_px;
        self.cycle_duration = cycle_duration(text_length_px, self.config.unit_duration_ms);
        self.run_total_count = normalize_cycle_count(cycle_count);
        self.already_count = 0;
        self.generation = self.generation.wrapping_add(1);
        self.halted = false;
        self.scroll_out();
    }

    /// Reset to `Idle` at the rest offset without notifying the listener.
    pub fn stop_marquee(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.reset(false);
    }

    /// Advance the current phase. Call once per rendered frame.
    pub fn on_animation_tick(&mut self) {
        if self.state == MarqueeState::Idle || self.halted {
            return;
        }

        if self.animator.compute_offset() {
            self.offset = self.animator.curr_x();
            self.redraw_requested = true;
            return;
        }

        match self.state {
            MarqueeState::ScrollingOut => self.scroll_in(),
            MarqueeState::ScrollingIn => self.finish_cycle(),
            MarqueeState::Idle => {}
        }
    }

    /// Resume after an inter-cycle pause.
    ///
    /// Tasks left over from a run that has since been stopped or restarted
    /// are dropped.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        if task.generation != self.generation || !self.halted {
            tracing::debug!(
                task_generation = task.generation,
                generation = self.generation,
                "stale marquee resume dropped"
            );
            return;
        }
        self.halted = false;
        self.scroll_out();
    }

    /// Record a new view width and capture the current offset as the rest
    /// position. An in-flight run keeps its planned distances.
    pub fn on_layout(&mut self, width_px: u32) {
        self.view_width_px = width_px;
        self.initial_offset = self.offset;
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Register the observer, replacing any previous one.
    pub fn set_marquee_listener(&mut self, listener: impl MarqueeListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the observer.
    pub fn clear_marquee_listener(&mut self) {
        self.listener = None;
    }

    /// Set the time to scroll 100 pixels. Applies from the next run.
    ///
    /// Zero is clamped to 1ms.
    pub fn set_unit_duration(&mut self, ms: u32) {
        if ms == 0 {
            tracing::warn!("unit duration of 0ms clamped to 1ms");
        }
        self.config.unit_duration_ms = ms.max(1);
    }

    /// Set the pause between cycles. Applies from the next pause.
    pub fn set_halt_time(&mut self, ms: u32) {
        self.config.halt_time_ms = ms;
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Current phase.
    #[must_use]
    pub const fn marquee_state(&self) -> MarqueeState {
        self.state
    }

    /// Cycles completed in the current run.
    #[must_use]
    pub const fn already_count(&self) -> u32 {
        self.already_count
    }

    /// Cycle target of the current (or last) run; `u32::MAX` when unbounded.
    #[must_use]
    pub const fn run_total_count(&self) -> u32 {
        self.run_total_count
    }

    /// Whether a run is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state != MarqueeState::Idle
    }

    /// Whether the run is paused between cycles.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Horizontal scroll offset the host should render the text at.
    #[must_use]
    pub const fn current_offset(&self) -> i32 {
        self.offset
    }

    /// Rest offset captured at layout.
    #[must_use]
    pub const fn initial_offset(&self) -> i32 {
        self.initial_offset
    }

    /// Text width the current run was planned with.
    #[must_use]
    pub const fn text_length_px(&self) -> u32 {
        self.text_length_px
    }

    /// Last known view width.
    #[must_use]
    pub const fn view_width_px(&self) -> u32 {
        self.view_width_px
    }

    /// Scroll-out duration of the current run.
    #[must_use]
    pub const fn cycle_duration(&self) -> Duration {
        self.cycle_duration
    }

    /// Timing configuration.
    #[must_use]
    pub const fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Return and clear the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn scroll_out(&mut self) {
        self.animator.start_scroll(
            self.offset,
            px_to_offset(self.text_length_px),
            self.cycle_duration,
        );
        self.enter(MarqueeState::ScrollingOut);
        tracing::debug!(
            text_length_px = self.text_length_px,
            duration_ms = self.cycle_duration.as_millis() as u64,
            run_total_count = self.run_total_count,
            "marquee scrolling out"
        );
    }

    fn scroll_in(&mut self) {
        let duration =
            scroll_in_duration(self.cycle_duration, self.text_length_px, self.view_width_px);
        let view_width = px_to_offset(self.view_width_px);
        self.offset = self.initial_offset.saturating_sub(view_width);
        self.animator.start_scroll(self.offset, view_width, duration);
        self.enter(MarqueeState::ScrollingIn);
        tracing::debug!(
            duration_ms = duration.as_millis() as u64,
            "marquee scrolling in"
        );
    }

    fn finish_cycle(&mut self) {
        self.already_count = self.already_count.saturating_add(1);
        if self.already_count < self.run_total_count {
            self.halted = true;
            tracing::debug!(
                already_count = self.already_count,
                halt_ms = self.config.halt_time_ms,
                "marquee cycle complete, halting"
            );
            self.scheduler.post_delayed(
                self.config.halt_time(),
                DeferredTask {
                    generation: self.generation,
                },
            );
        } else {
            tracing::debug!(already_count = self.already_count, "marquee run complete");
            self.reset(true);
        }
    }

    fn reset(&mut self, notify: bool) {
        self.animator.abort();
        self.offset = self.initial_offset;
        self.halted = false;
        self.state = MarqueeState::Idle;
        self.redraw_requested = true;
        if notify {
            self.notify();
        }
        self.already_count = 0;
    }

    fn enter(&mut self, state: MarqueeState) {
        self.state = state;
        self.redraw_requested = true;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.on_state_change(self, self.state);
            self.listener = Some(listener);
        }
    }
}
