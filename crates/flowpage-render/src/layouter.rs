//! Layout pass state shared by line breaking, page filling, backward search
//! and area layout.
//!
//! A [`TextLayouter`] borrows the model and the measuring collaborators for the
//! duration of one preparation pass. Its algorithms live in sibling modules as
//! additional `impl` blocks.

use std::sync::Arc;

use flowpage::{HyphenationInfo, Hyphenator, Metrics, TextElement, TextModel, TextStyle, WordElement};

use crate::line_info::LineInfoCache;
use crate::measure::MetricsProvider;

/// Unit used to measure content height during backward search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeUnit {
    /// Pixel heights including paragraph spacing.
    Pixel,
    /// Visible line count; spacing is ignored.
    Line,
}

/// Borrowed layout context for one preparation pass.
pub struct TextLayouter<'a> {
    pub(crate) model: &'a dyn TextModel,
    pub(crate) metrics: &'a dyn MetricsProvider,
    hyphenator: &'a dyn Hyphenator,
    pub(crate) base_style: Arc<TextStyle>,
    pub(crate) style_metrics: Metrics,
    pub(crate) cache: &'a mut LineInfoCache,
    last_hyphenation: Option<(usize, usize, HyphenationInfo)>,
}

impl<'a> TextLayouter<'a> {
    pub fn new(
        model: &'a dyn TextModel,
        metrics: &'a dyn MetricsProvider,
        hyphenator: &'a dyn Hyphenator,
        base_style: Arc<TextStyle>,
        style_metrics: Metrics,
        cache: &'a mut LineInfoCache,
    ) -> Self {
        Self {
            model,
            metrics,
            hyphenator,
            base_style,
            style_metrics,
            cache,
            last_hyphenation: None,
        }
    }

    /// Lines currently memoized by this pass.
    pub fn cached_lines(&self) -> usize {
        self.cache.len()
    }

    pub(crate) fn element_width(
        &self,
        element: &TextElement,
        char_index: usize,
        style: &TextStyle,
    ) -> i32 {
        match element {
            TextElement::Word(word) => self.metrics.word_width(
                word,
                char_index,
                word.len().saturating_sub(char_index),
                false,
                style,
            ),
            TextElement::NBSpace => self.metrics.space_width(style),
            _ => 0,
        }
    }

    pub(crate) fn element_height(&self, element: &TextElement, style: &TextStyle) -> i32 {
        match element {
            TextElement::Word(_) | TextElement::NBSpace => self.glyph_height(style),
            _ => 0,
        }
    }

    /// Glyph height raised by a positive vertical-align shift.
    pub(crate) fn glyph_height(&self, style: &TextStyle) -> i32 {
        self.metrics.text_height(style) + style.vertical_align_px(&self.style_metrics).max(0)
    }

    pub(crate) fn element_descent(&self, element: &TextElement, style: &TextStyle) -> i32 {
        match element {
            TextElement::Word(_) => self.metrics.descent(style),
            _ => 0,
        }
    }

    /// Hyphenation info for the word at `(paragraph, element)`; the most
    /// recent word is memoized.
    pub(crate) fn hyphenation_info(
        &mut self,
        paragraph: usize,
        element: usize,
        word: &WordElement,
    ) -> HyphenationInfo {
        if let Some((p, e, info)) = &self.last_hyphenation {
            if *p == paragraph && *e == element {
                return info.clone();
            }
        }
        let info = self.hyphenator.hyphenate(word.text());
        self.last_hyphenation = Some((paragraph, element, info.clone()));
        info
    }
}
