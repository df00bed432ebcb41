//! Marquee text widget for single-line horizontal scrolling.
//!
//! [`MarqueeController`] is the scroll state machine; [`MarqueeText`] wires it
//! to a line of text that can be laid out and painted like any other widget.
//!
//! ```
//! use marquee_core::{FixedMetrics, ManualClock};
//! use marquee_widgets::{MarqueeController, MarqueeState};
//!
//! let clock = ManualClock::new();
//! let (mut marquee, queue) = MarqueeController::with_clock(clock.clone());
//! marquee.start_marquee(2, &FixedMetrics::new(350, 200));
//! assert_eq!(marquee.marquee_state(), MarqueeState::ScrollingOut);
//!
//! // One host frame
//! clock.advance_ms(16);
//! for task in queue.drain_due() {
//!     marquee.run_deferred(task);
//! }
//! marquee.on_animation_tick();
//! assert!(marquee.current_offset() > 0);
//! ```

pub mod config;
pub mod error;
pub mod marquee;
pub mod marquee_text;

pub use config::MarqueeConfig;
pub use error::MarqueeError;
pub use marquee::{
    cycle_duration, normalize_cycle_count, scroll_in_duration, MarqueeController,
    MarqueeListener, MarqueeState,
};
pub use marquee_text::MarqueeText;
