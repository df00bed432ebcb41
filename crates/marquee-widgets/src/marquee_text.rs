//! Single-line text widget with marquee scrolling.

use crate::config::MarqueeConfig;
use crate::marquee::{MarqueeController, MarqueeListener, MarqueeState};
use marquee_core::{
    Canvas, Clock, Color, Constraints, DeferredTask, FixedMetrics, LayoutResult,
    MonospaceMetrics, Rect, Size, TextMetrics, TextStyle, TimerQueue, TypeId, Widget,
};

/// Single line of text that scrolls horizontally when it overflows.
#[derive(Debug)]
pub struct MarqueeText {
    /// Text content
    content: String,
    /// Text color
    color: Color,
    /// Font size in pixels
    font_size: f32,
    /// Line height multiplier
    line_height: f32,
    /// Test ID
    test_id_value: Option<String>,
    /// Bounds from the last layout
    bounds: Rect,
    laid_out: bool,
    controller: MarqueeController,
}

impl MarqueeText {
    /// Create a marquee over an existing controller.
    #[must_use]
    pub fn new(content: impl Into<String>, controller: MarqueeController) -> Self {
        Self {
            content: content.into(),
            color: Color::BLACK,
            font_size: 16.0,
            line_height: 1.2,
            test_id_value: None,
            bounds: Rect::default(),
            laid_out: false,
            controller,
        }
    }

    /// Create a marquee driven by `clock`, returning the host's task queue.
    #[must_use]
    pub fn with_clock<C>(content: impl Into<String>, clock: C) -> (Self, TimerQueue<C>)
    where
        C: Clock + Clone + 'static,
    {
        let (controller, queue) = MarqueeController::with_clock(clock);
        (Self::new(content, controller), queue)
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set line height multiplier.
    #[must_use]
    pub const fn line_height(mut self, multiplier: f32) -> Self {
        self.line_height = multiplier;
        self
    }

    /// Set marquee timing.
    #[must_use]
    pub fn config(mut self, config: MarqueeConfig) -> Self {
        self.controller = self.controller.with_config(config);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text. A run in flight keeps the width it was planned with.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Estimated width of the whole line.
    #[must_use]
    pub fn text_width(&self) -> f32 {
        MonospaceMetrics::measure(&self.content, self.font_size)
    }

    /// Underlying state machine.
    #[must_use]
    pub const fn controller(&self) -> &MarqueeController {
        &self.controller
    }

    /// Underlying state machine, for configuration.
    pub fn controller_mut(&mut self) -> &mut MarqueeController {
        &mut self.controller
    }

    /// Start a run measured with the built-in estimate.
    pub fn start_marquee(&mut self, cycle_count: i32) {
        let metrics = self.metrics();
        self.controller.start_marquee(cycle_count, &metrics);
    }

    /// Start a run measured by the host's text engine.
    pub fn start_with(&mut self, cycle_count: i32, metrics: &dyn TextMetrics) {
        self.controller.start_marquee(cycle_count, metrics);
    }

    /// Stop without notifying the listener.
    pub fn stop_marquee(&mut self) {
        self.controller.stop_marquee();
    }

    /// Register the state observer.
    pub fn set_marquee_listener(&mut self, listener: impl MarqueeListener + 'static) {
        self.controller.set_marquee_listener(listener);
    }

    /// Current phase.
    #[must_use]
    pub const fn marquee_state(&self) -> MarqueeState {
        self.controller.marquee_state()
    }

    /// Advance one frame. Returns whether the widget needs repainting.
    pub fn tick(&mut self) -> bool {
        self.controller.on_animation_tick();
        self.controller.take_redraw_request()
    }

    /// Hand a fired task from the host queue back to the controller.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        self.controller.run_deferred(task);
    }

    fn metrics(&self) -> FixedMetrics {
        FixedMetrics::new(self.text_width() as u32, self.bounds.width as u32)
    }

    fn style(&self) -> TextStyle {
        TextStyle {
            size: self.font_size,
            color: self.color,
        }
    }
}

impl Widget for MarqueeText {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let size = Size::new(self.text_width(), self.font_size * self.line_height);
        constraints.constrain(size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        let width_changed = bounds.width != self.bounds.width;
        self.bounds = bounds;
        if width_changed || !self.laid_out {
            self.laid_out = true;
            self.controller.on_layout(bounds.width as u32);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let position = self
            .bounds
            .origin()
            .offset_x(-(self.controller.current_offset() as f32));

        canvas.push_clip(self.bounds);
        canvas.draw_text(&self.content, position, &self.style());
        canvas.pop_clip();
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl TextMetrics for MarqueeText {
    fn text_length_px(&self) -> u32 {
        self.text_width() as u32
    }

    fn view_width_px(&self) -> u32 {
        self.bounds.width as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{DrawCommand, ManualClock, Point, RecordingCanvas};

    const LONG: &str = "Breaking: marquee text that is far too long for its box";

    fn laid_out(content: &str, width: f32) -> (MarqueeText, TimerQueue<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let (mut text, queue) = MarqueeText::with_clock(content, clock.clone());
        text.layout(Rect::new(10.0, 20.0, width, 20.0));
        (text, queue, clock)
    }

    #[test]
    fn test_marquee_text_new() {
        let (text, _) = MarqueeText::with_clock("Hello", ManualClock::new());
        assert_eq!(text.content(), "Hello");
        assert_eq!(text.font_size, 16.0);
        assert_eq!(text.marquee_state(), MarqueeState::Idle);
    }

    #[test]
    fn test_marquee_text_builder() {
        let (text, _) = MarqueeText::with_clock("Hi", ManualClock::new());
        let text = text
            .color(Color::RED)
            .font_size(20.0)
            .line_height(1.5)
            .config(MarqueeConfig::default().halt_time_ms(0))
            .with_test_id("ticker");

        assert_eq!(text.color, Color::RED);
        assert_eq!(text.font_size, 20.0);
        assert_eq!(text.line_height, 1.5);
        assert_eq!(text.controller().config().halt_time_ms, 0);
        assert_eq!(Widget::test_id(&text), Some("ticker"));
    }

    #[test]
    fn test_marquee_text_measure_single_line() {
        let (text, _) = MarqueeText::with_clock(LONG, ManualClock::new());
        let size = text.measure(Constraints::loose(Size::new(100.0, 100.0)));
        assert_eq!(size.width, 100.0);
        assert!((size.height - 19.2).abs() < 1e-4);
    }

    #[test]
    fn test_marquee_text_type_id() {
        let (text, _) = MarqueeText::with_clock("x", ManualClock::new());
        assert_eq!(Widget::type_id(&text), TypeId::of::<MarqueeText>());
    }

    #[test]
    fn test_layout_forwards_width() {
        let (text, _, _) = laid_out(LONG, 120.0);
        assert_eq!(text.controller().view_width_px(), 120);
        assert_eq!(text.bounds(), Rect::new(10.0, 20.0, 120.0, 20.0));
    }

    #[test]
    fn test_start_refused_when_text_fits() {
        let (mut text, _, _) = laid_out("short", 400.0);
        text.start_marquee(1);
        assert_eq!(text.marquee_state(), MarqueeState::Idle);
    }

    #[test]
    fn test_start_uses_estimated_width() {
        let (mut text, _, _) = laid_out(LONG, 120.0);
        text.start_marquee(1);
        assert_eq!(text.marquee_state(), MarqueeState::ScrollingOut);
        assert_eq!(text.controller().text_length_px(), text.text_width() as u32);
    }

    #[test]
    fn test_start_with_host_metrics() {
        let (mut text, _, _) = laid_out("short", 400.0);
        text.start_with(1, &FixedMetrics::new(900, 400));
        assert_eq!(text.marquee_state(), MarqueeState::ScrollingOut);
        assert_eq!(text.controller().text_length_px(), 900);
    }

    #[test]
    fn test_paint_clips_and_positions_at_rest() {
        let (text, _, _) = laid_out(LONG, 120.0);
        let mut canvas = RecordingCanvas::new();
        text.paint(&mut canvas);

        let clip = Rect::new(10.0, 20.0, 120.0, 20.0);
        assert_eq!(canvas.commands().len(), 3);
        assert_eq!(canvas.commands()[0], DrawCommand::PushClip(clip));
        match &canvas.commands()[1] {
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                assert_eq!(content, LONG);
                assert_eq!(*position, Point::new(10.0, 20.0));
                assert_eq!(style.size, 16.0);
            }
            other => panic!("Expected Text command, got {other:?}"),
        }
        assert_eq!(canvas.commands()[2], DrawCommand::PopClip);
    }

    #[test]
    fn test_paint_follows_scroll_offset() {
        let (mut text, _, clock) = laid_out(LONG, 120.0);
        text.start_with(1, &FixedMetrics::new(400, 120));
        clock.advance_ms(2000);
        assert!(text.tick());

        let mut canvas = RecordingCanvas::new();
        text.paint(&mut canvas);
        let (_, position) = canvas.texts().next().expect("text drawn");
        assert_eq!(position, Point::new(10.0 - 200.0, 20.0));
    }

    #[test]
    fn test_tick_idle_needs_no_repaint() {
        let (mut text, _, _) = laid_out(LONG, 120.0);
        assert!(!text.tick());
    }

    #[test]
    fn test_stop_restores_rest_position() {
        let (mut text, _, clock) = laid_out(LONG, 120.0);
        text.start_marquee(-1);
        clock.advance_ms(700);
        text.tick();
        text.stop_marquee();

        assert_eq!(text.marquee_state(), MarqueeState::Idle);
        assert_eq!(text.controller().current_offset(), 0);
    }

    #[test]
    fn test_relayout_same_width_keeps_rest_offset() {
        let (mut text, _, clock) = laid_out(LONG, 120.0);
        text.start_marquee(1);
        clock.advance_ms(500);
        text.tick();
        text.layout(Rect::new(0.0, 0.0, 120.0, 20.0));
        assert_eq!(text.controller().initial_offset(), 0);
    }

    #[test]
    fn test_set_content_keeps_run() {
        let (mut text, _, _) = laid_out(LONG, 120.0);
        text.start_marquee(1);
        let planned = text.controller().text_length_px();
        text.set_content("x");
        assert_eq!(text.content(), "x");
        assert_eq!(text.controller().text_length_px(), planned);
    }

    #[test]
    fn test_text_metrics_impl() {
        let (text, _, _) = laid_out("abcdefghij", 50.0);
        assert_eq!(TextMetrics::text_length_px(&text), 96);
        assert_eq!(TextMetrics::view_width_px(&text), 50);
    }
}
