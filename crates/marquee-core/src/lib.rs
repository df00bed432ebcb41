//! Core types and traits for the marquee text widget.
//!
//! This crate provides the host-facing primitives the widget is built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Layout and painting: [`Constraints`], [`Widget`], [`Canvas`], [`RecordingCanvas`]
//! - Time: [`Clock`], [`SystemClock`], [`ManualClock`]
//! - Animation: [`Easing`], [`ScrollAnimator`], [`Scroller`]
//! - Deferred work: [`Scheduler`], [`TimerQueue`], [`DeferredTask`]
//! - Measurement: [`TextMetrics`], [`FixedMetrics`], [`MonospaceMetrics`]

mod animation;
mod canvas;
mod clock;
mod color;
mod constraints;
mod geometry;
mod metrics;
mod scheduler;
pub mod widget;

pub use animation::{Easing, ScrollAnimator, Scroller};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use clock::{Clock, ManualClock, SystemClock};
pub use color::Color;
pub use constraints::Constraints;
pub use geometry::{Point, Rect, Size};
pub use metrics::{FixedMetrics, MonospaceMetrics, TextMetrics};
pub use scheduler::{DeferredTask, Scheduler, TimerQueue};
pub use widget::{Canvas, LayoutResult, TextStyle, TypeId, Widget};
