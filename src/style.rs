//! Text styles and the inline style stack.
//!
//! Styles are resolved values; inline [`StyleMarker`]s push partial
//! [`StyleDecoration`]s onto a [`StyleStack`]. The stack is a plain value
//! threaded through traversals, so a traversal can snapshot it, rewind it by
//! assignment, and replay markers from a paragraph start.

extern crate alloc;

use alloc::sync::Arc;
use smallvec::SmallVec;

use crate::element::{StyleMarker, TextElement};
use crate::model::Paragraph;

/// Metrics context used to resolve style lengths to pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    /// Display density used for point lengths.
    pub dpi: u32,
    /// Full viewport width, base for percentage lengths.
    pub full_width: i32,
    /// Full viewport height.
    pub full_height: i32,
}

impl Metrics {
    pub fn new(dpi: u32, full_width: i32, full_height: i32) -> Self {
        Self {
            dpi,
            full_width,
            full_height,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            dpi: 96,
            full_width: 480,
            full_height: 800,
        }
    }
}

/// A style length before resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleLength {
    /// Device pixels.
    Px(i32),
    /// Typographic points, scaled by dpi.
    Pt(f32),
    /// Multiples of the active font size.
    Em(f32),
    /// Percent of the viewport width.
    Percent(i16),
}

impl StyleLength {
    pub const ZERO: Self = Self::Px(0);

    /// Resolve to whole pixels.
    pub fn resolve(self, metrics: &Metrics, font_size_px: f32) -> i32 {
        match self {
            Self::Px(px) => px,
            Self::Pt(pt) => (pt * metrics.dpi as f32 / 72.0).round() as i32,
            Self::Em(em) => (em * font_size_px).round() as i32,
            Self::Percent(pct) => metrics.full_width * pct as i32 / 100,
        }
    }
}

/// Horizontal alignment of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Undefined,
    Left,
    Right,
    Center,
    Justify,
}

/// Fully resolved text style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size_px: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Line alignment.
    pub alignment: Alignment,
    pub left_indent: StyleLength,
    pub right_indent: StyleLength,
    /// Extra indent on a paragraph's first line.
    pub first_line_indent: StyleLength,
    /// Vertical space above a paragraph.
    pub space_before: StyleLength,
    /// Vertical space below a paragraph.
    pub space_after: StyleLength,
    /// Baseline shift; positive raises the text.
    pub vertical_align: StyleLength,
    /// Whether words may be split at hyphenation points.
    pub allow_hyphenation: bool,
}

impl TextStyle {
    pub fn left_indent_px(&self, metrics: &Metrics) -> i32 {
        self.left_indent.resolve(metrics, self.font_size_px)
    }

    pub fn right_indent_px(&self, metrics: &Metrics) -> i32 {
        self.right_indent.resolve(metrics, self.font_size_px)
    }

    pub fn first_line_indent_px(&self, metrics: &Metrics) -> i32 {
        self.first_line_indent.resolve(metrics, self.font_size_px)
    }

    pub fn space_before_px(&self, metrics: &Metrics) -> i32 {
        self.space_before.resolve(metrics, self.font_size_px)
    }

    pub fn space_after_px(&self, metrics: &Metrics) -> i32 {
        self.space_after.resolve(metrics, self.font_size_px)
    }

    pub fn vertical_align_px(&self, metrics: &Metrics) -> i32 {
        self.vertical_align.resolve(metrics, self.font_size_px)
    }

    /// Apply a decoration, returning the decorated style.
    pub fn decorated(&self, decoration: &StyleDecoration) -> Self {
        Self {
            font_size_px: decoration
                .font_scale
                .map_or(self.font_size_px, |scale| self.font_size_px * scale),
            bold: decoration.bold.unwrap_or(self.bold),
            italic: decoration.italic.unwrap_or(self.italic),
            underline: decoration.underline.unwrap_or(self.underline),
            alignment: decoration.alignment.unwrap_or(self.alignment),
            left_indent: decoration.left_indent.unwrap_or(self.left_indent),
            right_indent: decoration.right_indent.unwrap_or(self.right_indent),
            first_line_indent: decoration
                .first_line_indent
                .unwrap_or(self.first_line_indent),
            space_before: decoration.space_before.unwrap_or(self.space_before),
            space_after: decoration.space_after.unwrap_or(self.space_after),
            vertical_align: decoration.vertical_align.unwrap_or(self.vertical_align),
            allow_hyphenation: decoration
                .allow_hyphenation
                .unwrap_or(self.allow_hyphenation),
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_px: 16.0,
            bold: false,
            italic: false,
            underline: false,
            alignment: Alignment::Justify,
            left_indent: StyleLength::ZERO,
            right_indent: StyleLength::ZERO,
            first_line_indent: StyleLength::ZERO,
            space_before: StyleLength::ZERO,
            space_after: StyleLength::ZERO,
            vertical_align: StyleLength::ZERO,
            allow_hyphenation: true,
        }
    }
}

/// Partial style override carried by a push marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleDecoration {
    /// Multiplier applied to the parent font size.
    pub font_scale: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub alignment: Option<Alignment>,
    pub left_indent: Option<StyleLength>,
    pub right_indent: Option<StyleLength>,
    pub first_line_indent: Option<StyleLength>,
    pub space_before: Option<StyleLength>,
    pub space_after: Option<StyleLength>,
    pub vertical_align: Option<StyleLength>,
    pub allow_hyphenation: Option<bool>,
}

/// Stack of active styles above a base style that is never popped.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleStack {
    base: Arc<TextStyle>,
    pushed: SmallVec<[Arc<TextStyle>; 4]>,
}

impl StyleStack {
    /// Fresh stack holding only `base`.
    pub fn new(base: Arc<TextStyle>) -> Self {
        Self {
            base,
            pushed: SmallVec::new(),
        }
    }

    /// Fresh stack with the markers in `elements` replayed on top of `base`.
    pub fn replayed(base: Arc<TextStyle>, elements: &[TextElement]) -> Self {
        let mut stack = Self::new(base);
        stack.apply_elements(elements);
        stack
    }

    /// Stack in effect right before `element_index` of `paragraph`.
    pub fn at_position(base: Arc<TextStyle>, paragraph: &Paragraph, element_index: usize) -> Self {
        Self::replayed(base, paragraph.element_range(0, element_index))
    }

    /// The active style.
    pub fn current(&self) -> &TextStyle {
        self.pushed.last().unwrap_or(&self.base)
    }

    /// Shared handle to the active style.
    pub fn current_shared(&self) -> Arc<TextStyle> {
        Arc::clone(self.pushed.last().unwrap_or(&self.base))
    }

    /// Nesting depth above the base style.
    pub fn depth(&self) -> usize {
        self.pushed.len()
    }

    /// Drop every pushed decoration.
    pub fn reset(&mut self) {
        self.pushed.clear();
    }

    /// Apply one marker.
    pub fn apply(&mut self, marker: &StyleMarker) {
        match marker {
            StyleMarker::Push(decoration) => {
                let next = self.current().decorated(decoration);
                self.pushed.push(Arc::new(next));
            }
            StyleMarker::Pop => {
                self.pushed.pop();
            }
        }
    }

    /// Apply every style marker found in `elements`, ignoring other elements.
    pub fn apply_elements(&mut self, elements: &[TextElement]) {
        for element in elements {
            if let TextElement::Style(marker) = element {
                self.apply(marker);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(decoration: StyleDecoration) -> TextElement {
        TextElement::Style(StyleMarker::Push(Arc::new(decoration)))
    }

    #[test]
    fn lengths_resolve_against_metrics() {
        let metrics = Metrics::new(144, 400, 600);
        assert_eq!(StyleLength::Px(7).resolve(&metrics, 16.0), 7);
        assert_eq!(StyleLength::Pt(36.0).resolve(&metrics, 16.0), 72);
        assert_eq!(StyleLength::Em(1.5).resolve(&metrics, 16.0), 24);
        assert_eq!(StyleLength::Percent(10).resolve(&metrics, 16.0), 40);
    }

    #[test]
    fn push_and_pop_restore_parent_style() {
        let base = Arc::new(TextStyle::default());
        let mut stack = StyleStack::new(Arc::clone(&base));
        stack.apply(&StyleMarker::Push(Arc::new(StyleDecoration {
            bold: Some(true),
            font_scale: Some(2.0),
            ..StyleDecoration::default()
        })));
        assert!(stack.current().bold);
        assert_eq!(stack.current().font_size_px, 32.0);
        assert_eq!(stack.depth(), 1);

        stack.apply(&StyleMarker::Pop);
        assert_eq!(stack.current(), base.as_ref());
        stack.apply(&StyleMarker::Pop);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.current(), base.as_ref());
    }

    #[test]
    fn replay_ignores_non_marker_elements() {
        let base = Arc::new(TextStyle::default());
        let elements = vec![
            push(StyleDecoration {
                italic: Some(true),
                ..StyleDecoration::default()
            }),
            TextElement::word("hello"),
            TextElement::HSpace,
            push(StyleDecoration {
                underline: Some(true),
                ..StyleDecoration::default()
            }),
        ];
        let stack = StyleStack::replayed(base, &elements);
        assert_eq!(stack.depth(), 2);
        assert!(stack.current().italic);
        assert!(stack.current().underline);
    }
}
