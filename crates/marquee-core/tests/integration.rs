//! Integration tests for marquee-core.
//!
//! These verify the public API works correctly end-to-end.

use marquee_core::{
    Canvas, Clock, Constraints, DeferredTask, DrawCommand, ManualClock, RecordingCanvas, Rect,
    ScrollAnimator, Scheduler, Scroller, Size, TextStyle, TimerQueue,
};
use std::time::Duration;

// =============================================================================
// Scroller + TimerQueue on a shared clock
// =============================================================================

#[test]
fn test_scroll_then_deferred_restart() {
    let clock = ManualClock::new();
    let mut scroller = Scroller::new(clock.clone());
    let mut queue = TimerQueue::new(clock.clone());

    scroller.start_scroll(0, 300, Duration::from_millis(300));
    let mut frames = 0;
    while scroller.compute_offset() {
        frames += 1;
        clock.advance_ms(16);
    }
    assert_eq!(scroller.curr_x(), 300);
    assert_eq!(frames, 20);

    queue.post_delayed(Duration::from_millis(500), DeferredTask { generation: 1 });
    clock.advance_ms(499);
    assert!(queue.drain_due().is_empty());
    clock.advance_ms(1);
    assert_eq!(queue.drain_due(), vec![DeferredTask { generation: 1 }]);
}

#[test]
fn test_boxed_collaborators() {
    let clock = ManualClock::new();
    let mut animator: Box<dyn ScrollAnimator> = Box::new(Scroller::new(clock.clone()));
    let mut scheduler: Box<dyn Scheduler> = Box::new(TimerQueue::new(clock.clone()));

    animator.start_scroll(-100, 100, Duration::from_millis(100));
    clock.advance_ms(50);
    assert!(animator.compute_offset());
    assert_eq!(animator.curr_x(), -50);

    scheduler.post_delayed(Duration::ZERO, DeferredTask { generation: 0 });
    assert_eq!(clock.now(), Duration::from_millis(50));
}

// =============================================================================
// Painting
// =============================================================================

#[test]
fn test_clipped_text_paint() {
    let mut canvas = RecordingCanvas::new();
    let bounds = Rect::from_size(Constraints::loose(Size::new(120.0, 20.0)).constrain(Size::new(500.0, 19.2)));

    canvas.push_clip(bounds);
    canvas.draw_text("ticker", bounds.origin().offset_x(-40.0), &TextStyle::default());
    canvas.pop_clip();

    assert_eq!(canvas.command_count(), 3);
    assert!(matches!(canvas.commands()[1], DrawCommand::Text { .. }));
    assert_eq!(canvas.texts().next().map(|(_, p)| p.x), Some(-40.0));
}
