//! Text measurement seam between widgets and the host's text engine.

/// Supplies the pixel metrics a marquee needs to plan a run.
pub trait TextMetrics {
    /// Measured advance width of the whole line of text.
    fn text_length_px(&self) -> u32;

    /// Current laid-out width of the view showing the text.
    fn view_width_px(&self) -> u32;
}

/// Metrics known up front, e.g. reported by an external text engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedMetrics {
    /// Measured text width in pixels
    pub text_length_px: u32,
    /// View width in pixels
    pub view_width_px: u32,
}

impl FixedMetrics {
    /// Create fixed metrics.
    #[must_use]
    pub const fn new(text_length_px: u32, view_width_px: u32) -> Self {
        Self {
            text_length_px,
            view_width_px,
        }
    }
}

impl TextMetrics for FixedMetrics {
    fn text_length_px(&self) -> u32 {
        self.text_length_px
    }

    fn view_width_px(&self) -> u32 {
        self.view_width_px
    }
}

/// Font-free width estimate for hosts without a shaping engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    /// Advance of one glyph as a fraction of the font size.
    pub const ADVANCE_EM: f32 = 0.6;

    /// Estimate the width of `text` at `font_size`.
    #[must_use]
    pub fn measure(text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * Self::ADVANCE_EM
    }
}
