//! Greedy line filling with hyphenation fallback.

use flowpage::{Alignment, ParagraphCursor, StyleStack, TextElement, TextStyle, WordElement};

use crate::layouter::TextLayouter;
use crate::line_info::{LineInfo, LineKey};
use crate::page::Viewport;

/// Left indents wider than the line minus this are clamped.
const MIN_LINE_ROOM_PX: i32 = 20;

impl TextLayouter<'_> {
    /// Fill one line of `paragraph` starting at `(start_element, start_char)`.
    ///
    /// `bound` is an exclusive `(element, char)` position the line never passes;
    /// a nonzero char lets the line end inside that word. `previous` is the line above, used
    /// for collapsing paragraph spacing. `style` must hold the style in effect at
    /// the start position; on return it holds the style at the line end.
    pub fn prepare_line(
        &mut self,
        viewport: Viewport,
        paragraph: &ParagraphCursor,
        start_element: usize,
        start_char: usize,
        bound: (usize, usize),
        previous: Option<&LineInfo>,
        style: &mut StyleStack,
    ) -> LineInfo {
        let para = paragraph.paragraph();
        let element_count = para.element_count();
        let (bound, bound_char) = if bound.0 < element_count {
            bound
        } else {
            (element_count, 0)
        };
        let key = LineKey::new(paragraph.index(), start_element, start_char);

        if let Some(cached) = self.cache.get(&key) {
            if (cached.end_element, cached.end_char) <= (bound, bound_char) {
                let mut line = cached.clone();
                line.adjust(previous);
                style.apply_elements(para.element_range(start_element, line.end_element));
                log::trace!(
                    "line cache hit paragraph={} start={}:{} end={}:{}",
                    key.paragraph,
                    start_element,
                    start_char,
                    line.end_element,
                    line.end_char
                );
                return line;
            }
        }

        let mut line = LineInfo::new(
            paragraph.clone(),
            start_element,
            start_char,
            style.current_shared(),
        );
        if (start_element, start_char) >= (bound, bound_char) {
            return line;
        }

        let mut cur_element = start_element;
        let mut cur_char = start_char;
        let first_line = start_element == 0 && start_char == 0;
        if first_line {
            while cur_element < bound {
                match para.element(cur_element) {
                    Some(TextElement::Style(marker)) => {
                        style.apply(marker);
                        cur_element += 1;
                    }
                    _ => break,
                }
            }
            cur_char = 0;
        }
        line.real_start_element = cur_element;
        line.real_start_char = cur_char;
        line.end_element = cur_element;
        line.end_char = cur_char;
        line.start_style = style.current_shared();

        let start_style = *style.current();
        let max_width = (viewport.width - start_style.right_indent_px(&self.style_metrics)).max(1);
        let mut left_indent = start_style.left_indent_px(&self.style_metrics);
        if first_line && start_style.alignment != Alignment::Center {
            left_indent += start_style.first_line_indent_px(&self.style_metrics);
        }
        if left_indent > max_width - MIN_LINE_ROOM_PX {
            left_indent = max_width * 3 / 4;
        }
        line.left_indent = left_indent;
        line.width = left_indent;

        let mut committed_style = style.clone();
        let mut committed = false;
        let mut new_width = line.width;
        let mut new_height = 0;
        let mut new_descent = 0;
        let mut word_occurred = false;
        let mut visible = false;
        let mut spaces = 0usize;
        let mut last_space_width = 0;
        let mut committed_space_width = 0;
        let mut remove_last_space = false;

        while cur_element < bound {
            let Some(element) = para.element(cur_element) else {
                break;
            };
            let active = *style.current();
            new_width += self.element_width(element, cur_char, &active);
            new_height = new_height.max(self.element_height(element, &active));
            new_descent = new_descent.max(self.element_descent(element, &active));
            match element {
                TextElement::HSpace => {
                    if word_occurred {
                        word_occurred = false;
                        spaces += 1;
                        last_space_width = self.metrics.space_width(&active);
                        new_width += last_space_width;
                    }
                }
                TextElement::NBSpace => word_occurred = true,
                TextElement::Word(_) => {
                    word_occurred = true;
                    visible = true;
                }
                TextElement::Style(marker) => style.apply(marker),
                TextElement::ParagraphBoundary => {}
            }

            if new_width > max_width && (committed || element.is_word()) {
                break;
            }

            cur_element += 1;
            cur_char = 0;
            let allow_break = (cur_element == bound && bound_char == 0)
                || match para.element(cur_element) {
                    Some(next) => {
                        *element != TextElement::NBSpace
                            && *next != TextElement::NBSpace
                            && (!next.is_word() || element.is_word())
                    }
                    None => true,
                };
            if allow_break {
                committed = true;
                line.visible = visible;
                line.width = new_width;
                line.height = line.height.max(new_height);
                line.descent = line.descent.max(new_descent);
                line.end_element = cur_element;
                line.end_char = 0;
                line.space_count = spaces;
                committed_style = style.clone();
                committed_space_width = last_space_width;
                remove_last_space = !word_occurred && spaces > 0;
            }
        }

        if cur_element < bound && (style.current().allow_hyphenation || !committed) {
            if let Some(TextElement::Word(word)) = para.element(cur_element) {
                let active = *style.current();
                new_width -= self.metrics.word_width(
                    word,
                    cur_char,
                    word.len().saturating_sub(cur_char),
                    false,
                    &active,
                );
                let remaining = max_width - new_width;
                let space_width = self.metrics.space_width(&active);
                if (word.len() > 3 && remaining > 2 * space_width) || !committed {
                    if let Some((hyphen_index, sub_width)) = self.split_word(
                        paragraph.index(),
                        cur_element,
                        word,
                        cur_char,
                        remaining,
                        !committed,
                        &active,
                    ) {
                        line.visible = true;
                        line.width = new_width + sub_width;
                        line.height = line.height.max(new_height);
                        line.descent = line.descent.max(new_descent);
                        if hyphen_index >= word.len() {
                            line.end_element = cur_element + 1;
                            line.end_char = 0;
                        } else {
                            line.end_element = cur_element;
                            line.end_char = hyphen_index;
                        }
                        line.space_count = spaces;
                        committed_style = style.clone();
                        remove_last_space = false;
                    }
                }
            }
        }

        let clipped = bound < element_count && cur_element >= bound;
        if cur_element == bound && bound_char > cur_char {
            if let Some(TextElement::Word(word)) = para.element(bound) {
                let active = *style.current();
                let remaining = max_width - new_width;
                let head = self.metrics.word_width(
                    word,
                    cur_char,
                    bound_char - cur_char,
                    !word.breaks_after_hyphen(bound_char),
                    &active,
                );
                let rest = self.metrics.word_width(
                    word,
                    cur_char,
                    word.len().saturating_sub(cur_char),
                    false,
                    &active,
                );
                // The unbounded line would pass the word or split it; clip either at the bound.
                let split = if rest <= remaining {
                    Some((bound_char, head))
                } else if (active.allow_hyphenation || !committed)
                    && ((word.len() > 3 && remaining > 2 * self.metrics.space_width(&active))
                        || !committed)
                {
                    self.split_word(
                        paragraph.index(),
                        bound,
                        word,
                        cur_char,
                        remaining,
                        !committed,
                        &active,
                    )
                    .map(|(hyphen_index, sub_width)| {
                        if hyphen_index < bound_char {
                            (hyphen_index, sub_width)
                        } else {
                            (bound_char, head)
                        }
                    })
                } else {
                    None
                };
                if let Some((hyphen_index, sub_width)) = split {
                    line.visible = true;
                    line.width = new_width + sub_width;
                    line.height = line.height.max(new_height).max(self.glyph_height(&active));
                    line.descent = line.descent.max(new_descent).max(self.metrics.descent(&active));
                    line.end_element = bound;
                    line.end_char = hyphen_index;
                    line.space_count = spaces;
                    committed_style = style.clone();
                    remove_last_space = false;
                }
            }
        }

        if remove_last_space {
            line.width -= committed_space_width;
            line.space_count -= 1;
        }
        *style = committed_style;

        if first_line {
            line.v_space_before = line.start_style.space_before_px(&self.style_metrics);
        }
        line.text_height = line.height;
        line.adjust(previous);
        if line.is_end_of_paragraph() {
            line.v_space_after = style.current().space_after_px(&self.style_metrics);
        }

        if !clipped {
            self.cache.insert(line.clone());
        }
        log::trace!(
            "line paragraph={} start={}:{} end={}:{} width={} spaces={}",
            key.paragraph,
            start_element,
            start_char,
            line.end_element,
            line.end_char,
            line.width,
            line.space_count
        );
        line
    }

    /// Find where to split `word` so its head fits into `remaining` pixels.
    ///
    /// Returns the split offset and the head width including any hyphen sign.
    /// With `alone` set the word is the only content of the line and a split
    /// is always produced.
    #[allow(clippy::too_many_arguments)]
    fn split_word(
        &mut self,
        paragraph: usize,
        element: usize,
        word: &WordElement,
        cur_char: usize,
        remaining: i32,
        alone: bool,
        style: &TextStyle,
    ) -> Option<(usize, i32)> {
        let len = word.len();
        if len == 0 || cur_char >= len {
            return None;
        }
        let info = self.hyphenation_info(paragraph, element, word);
        let head_width = |end: usize| {
            self.metrics.word_width(
                word,
                cur_char,
                end - cur_char,
                !word.breaks_after_hyphen(end),
                style,
            )
        };

        let mut hyphen_index = cur_char;
        let mut sub_width = 0;
        let mut low = cur_char;
        let mut high = len - 1;
        while high > low {
            let mid = (high + low + 1) / 2;
            let mut candidate = mid;
            while candidate > low && !info.is_possible(candidate) {
                candidate -= 1;
            }
            if candidate > low {
                let width = head_width(candidate);
                if width < remaining {
                    low = mid;
                    hyphen_index = candidate;
                    sub_width = width;
                } else {
                    high = mid - 1;
                }
            } else {
                low = mid;
            }
        }

        if hyphen_index == cur_char && alone {
            if let Some(candidate) = info.first_after(cur_char) {
                hyphen_index = candidate;
                sub_width = head_width(candidate);
                log::trace!(
                    "over-wide hyphenation at paragraph={} element={} offset={}",
                    paragraph,
                    element,
                    candidate
                );
            } else {
                sub_width = self.metrics.word_width(word, cur_char, 1, false, style);
                let mut right = if len == cur_char + 1 { len } else { len - 1 };
                let mut left = cur_char + 1;
                while right > left {
                    let mid = (right + left + 1) / 2;
                    let width = head_width(mid);
                    if width <= remaining {
                        left = mid;
                        sub_width = width;
                    } else {
                        right = mid - 1;
                    }
                }
                hyphen_index = right;
                log::warn!(
                    "forced split of over-wide word at paragraph={} element={} offset={}",
                    paragraph,
                    element,
                    hyphen_index
                );
            }
        }

        (hyphen_index > cur_char).then_some((hyphen_index, sub_width))
    }
}
