use flowpage::{TextStyle, WordElement};

/// Text measurement hook used by line breaking and area layout.
pub trait MetricsProvider: Send + Sync {
    /// Width of `len` chars of `word` starting at char `start`, plus a trailing
    /// hyphen sign when `add_hyphen` is set.
    fn word_width(
        &self,
        word: &WordElement,
        start: usize,
        len: usize,
        add_hyphen: bool,
        style: &TextStyle,
    ) -> i32;

    /// Width of one breakable space.
    fn space_width(&self, style: &TextStyle) -> i32;

    /// Glyph height above the baseline.
    fn text_height(&self, style: &TextStyle) -> i32;

    /// Glyph depth below the baseline.
    fn descent(&self, style: &TextStyle) -> i32;
}

const BASE_FONT_PX: f32 = 16.0;

/// Deterministic metrics: every char has the same advance.
///
/// Values are given for a 16px font and scale linearly with the style's size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedAdvanceMetrics {
    pub char_width: i32,
    pub space_width: i32,
    pub hyphen_width: i32,
    pub text_height: i32,
    pub descent: i32,
}

impl FixedAdvanceMetrics {
    fn scaled(value: i32, style: &TextStyle) -> i32 {
        (value as f32 * style.font_size_px / BASE_FONT_PX).round() as i32
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self {
            char_width: 8,
            space_width: 4,
            hyphen_width: 8,
            text_height: 12,
            descent: 4,
        }
    }
}

impl MetricsProvider for FixedAdvanceMetrics {
    fn word_width(
        &self,
        word: &WordElement,
        start: usize,
        len: usize,
        add_hyphen: bool,
        style: &TextStyle,
    ) -> i32 {
        let chars = len.min(word.len().saturating_sub(start)) as i32;
        let mut width = chars * self.char_width;
        if add_hyphen {
            width += self.hyphen_width;
        }
        Self::scaled(width, style)
    }

    fn space_width(&self, style: &TextStyle) -> i32 {
        Self::scaled(self.space_width, style)
    }

    fn text_height(&self, style: &TextStyle) -> i32 {
        Self::scaled(self.text_height, style)
    }

    fn descent(&self, style: &TextStyle) -> i32 {
        Self::scaled(self.descent, style)
    }
}
