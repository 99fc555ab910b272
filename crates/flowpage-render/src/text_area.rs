//! Placement of a page's lines into glyph boxes.

use std::sync::Arc;

use flowpage::{Alignment, StyleStack, TextElement, TextStyle};

use crate::layouter::TextLayouter;
use crate::line_info::LineInfo;
use crate::page::Viewport;

/// What an [`ElementArea`] holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaKind {
    /// Glyphs of a word or a word fragment.
    Word,
    /// An underlined gap between two words.
    Space,
}

/// A placed box in absolute display pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementArea {
    pub kind: AreaKind,
    pub paragraph_index: usize,
    pub element_index: usize,
    pub start_char: usize,
    /// Characters covered; 0 for spaces.
    pub length: usize,
    /// Text to draw, empty for spaces.
    pub text: Box<str>,
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
    /// True when the style differs from the previous area of the line.
    pub style_change: bool,
    /// Draw a hyphen after the text.
    pub add_hyphenation_sign: bool,
    /// True unless the area is a leading fragment of a split word.
    pub last_fragment: bool,
    pub style: Arc<TextStyle>,
    /// Baseline the glyphs are drawn on, vertical-align shift applied.
    pub baseline: i32,
}

impl ElementArea {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }
}

impl TextLayouter<'_> {
    /// Lay out `lines` at the display origin `(left, top)`.
    ///
    /// Returns the areas and, per line, the index of its first area followed by
    /// a terminating total.
    pub fn prepare_text_area(
        &self,
        viewport: Viewport,
        left: i32,
        top: i32,
        lines: &[LineInfo],
    ) -> (Vec<ElementArea>, Vec<usize>) {
        let mut areas = Vec::with_capacity(lines.len() * 8);
        let mut offsets = Vec::with_capacity(lines.len() + 1);
        offsets.push(0);
        let mut y = top;
        for line in lines {
            self.layout_line(viewport, line, left, y, top, &mut areas);
            y += line.full_height();
            offsets.push(areas.len());
        }
        (areas, offsets)
    }

    fn layout_line(
        &self,
        viewport: Viewport,
        line: &LineInfo,
        left: i32,
        y: i32,
        top: i32,
        areas: &mut Vec<ElementArea>,
    ) {
        let baseline = (y + line.height).min(top + viewport.height - 1);
        let paragraph = line.paragraph.paragraph();
        let paragraph_index = line.paragraph_index();
        let mut style = StyleStack::at_position(
            self.base_style.clone(),
            paragraph,
            line.real_start_element,
        );

        let start_style = *style.current();
        let right_indent = start_style.right_indent_px(&self.style_metrics);
        let free = viewport.width - right_indent - line.width;
        let mut x = left + line.left_indent;
        let mut full_correction = 0;
        match start_style.alignment {
            Alignment::Right => x += free,
            Alignment::Center => x += free / 2,
            Alignment::Justify => {
                if !line.is_end_of_paragraph()
                    && paragraph.element(line.end_element) != Some(&TextElement::ParagraphBoundary)
                {
                    full_correction = free;
                }
            }
            Alignment::Left | Alignment::Undefined => {}
        }

        let mut space_count = line.space_count;
        let mut word_occurred = false;
        let mut style_change = true;
        let mut pending_space: Option<ElementArea> = None;
        let mut char_index = line.real_start_char;
        let mut element_index = line.real_start_element;
        while element_index < line.end_element {
            let Some(element) = paragraph.element(element_index) else {
                break;
            };
            let active = style.current_shared();
            let width = self.element_width(element, char_index, &active);
            match element {
                TextElement::HSpace => {
                    if word_occurred && space_count > 0 {
                        let correction = full_correction / space_count as i32;
                        let space_len = self.metrics.space_width(&active) + correction;
                        pending_space = active.underline.then(|| ElementArea {
                            kind: AreaKind::Space,
                            paragraph_index,
                            element_index,
                            start_char: 0,
                            length: 0,
                            text: Box::from(""),
                            x0: x,
                            x1: x + space_len - 1,
                            y0: baseline,
                            y1: baseline,
                            style_change: false,
                            add_hyphenation_sign: false,
                            last_fragment: true,
                            style: active.clone(),
                            baseline,
                        });
                        x += space_len;
                        full_correction -= correction;
                        word_occurred = false;
                        space_count -= 1;
                    }
                }
                TextElement::Word(word) => {
                    let height = self.element_height(element, &active);
                    let descent = self.element_descent(element, &active);
                    if let Some(space) = pending_space.take() {
                        areas.push(space);
                    }
                    let length = word.len().saturating_sub(char_index);
                    areas.push(ElementArea {
                        kind: AreaKind::Word,
                        paragraph_index,
                        element_index,
                        start_char: char_index,
                        length,
                        text: Box::from(word.slice(char_index, length)),
                        x0: x,
                        x1: x + width - 1,
                        y0: baseline - height + 1,
                        y1: baseline + descent,
                        style_change,
                        add_hyphenation_sign: false,
                        last_fragment: true,
                        style: active.clone(),
                        baseline: baseline - active.vertical_align_px(&self.style_metrics),
                    });
                    style_change = false;
                    word_occurred = true;
                }
                TextElement::Style(marker) => {
                    style.apply(marker);
                    style_change = true;
                }
                TextElement::NBSpace | TextElement::ParagraphBoundary => {}
            }
            x += width;
            element_index += 1;
            char_index = 0;
        }

        if line.is_end_of_paragraph() || line.end_char == 0 {
            return;
        }
        let Some(TextElement::Word(word)) = paragraph.element(line.end_element) else {
            return;
        };
        let active = style.current_shared();
        let start = if line.real_start_element == line.end_element {
            line.real_start_char
        } else {
            0
        };
        let length = line.end_char.saturating_sub(start);
        let add_hyphenation_sign = !word.breaks_after_hyphen(line.end_char);
        let width = self
            .metrics
            .word_width(word, start, length, add_hyphenation_sign, &active);
        let height = self.glyph_height(&active);
        let descent = self.metrics.descent(&active);
        if let Some(space) = pending_space.take() {
            areas.push(space);
        }
        areas.push(ElementArea {
            kind: AreaKind::Word,
            paragraph_index,
            element_index: line.end_element,
            start_char: start,
            length,
            text: Box::from(word.slice(start, length)),
            x0: x,
            x1: x + width - 1,
            y0: baseline - height + 1,
            y1: baseline + descent,
            style_change,
            add_hyphenation_sign,
            last_fragment: false,
            baseline: baseline - active.vertical_align_px(&self.style_metrics),
            style: active,
        });
    }
}
