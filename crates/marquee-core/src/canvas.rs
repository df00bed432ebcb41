//! Recording canvas for headless rendering and tests.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::widget::{Canvas, TextStyle};

/// A single recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill color
        color: Color,
    },
    /// Single line of text
    Text {
        /// Text content
        content: String,
        /// Top-left position
        position: Point,
        /// Text style
        style: TextStyle,
    },
    /// Clip region pushed
    PushClip(Rect),
    /// Clip region popped
    PopClip,
}

/// Canvas that records draw commands instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Text commands only, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text {
                content, position, ..
            } => Some((content.as_str(), *position)),
            _ => None,
        })
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        // Unbalanced pops are ignored
        if self.clip_stack.pop().is_some() {
            self.commands.push(DrawCommand::PopClip);
        }
    }
}
