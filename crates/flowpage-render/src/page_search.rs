//! Backward search for a page start given its end.

use flowpage::{StyleStack, WordCursor};

use crate::error::LayoutError;
use crate::layouter::{SizeUnit, TextLayouter};
use crate::line_info::LineInfo;
use crate::page::Viewport;

/// Measured extent of a paragraph span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParagraphSize {
    pub height: i32,
    /// Space above the first measured line.
    pub top_margin: i32,
    /// Space below the last measured line.
    pub bottom_margin: i32,
}

fn line_height(line: &LineInfo, unit: SizeUnit) -> i32 {
    match unit {
        SizeUnit::Pixel => line.full_height(),
        SizeUnit::Line => i32::from(line.visible),
    }
}

fn stalled(cursor: &WordCursor) -> LayoutError {
    LayoutError::Stalled {
        paragraph: cursor.paragraph_index(),
        element: cursor.element_index(),
        char_index: cursor.char_index(),
    }
}

impl TextLayouter<'_> {
    /// Find the start of the page that ends at `end` and is `height` tall.
    pub fn find_page_start(
        &mut self,
        viewport: Viewport,
        end: &WordCursor,
        unit: SizeUnit,
        height: i32,
    ) -> Result<WordCursor, LayoutError> {
        let mut height = height;
        let mut size = self.paragraph_size(viewport, end, true, unit)?;
        height -= size.height;
        let mut position_changed = !end.is_start_of_paragraph();
        let mut start = end.to_paragraph_start();
        while height > 0 {
            let below = size;
            if position_changed && start.paragraph_cursor().is_end_of_section() {
                break;
            }
            let Some(previous) = start.previous_paragraph(self.model) else {
                break;
            };
            start = previous;
            if !start.paragraph_cursor().is_end_of_section() {
                position_changed = true;
            }
            size = self.paragraph_size(viewport, &start, false, unit)?;
            height -= size.height;
            height += size.bottom_margin.min(below.top_margin);
        }
        let start = self.skip(viewport, start, unit, -height)?;

        if unit == SizeUnit::Pixel && start.is_same_boundary(end) {
            log::debug!(
                "backward search from {:?} produced an empty page, retrying by lines",
                end.position()
            );
            return self.find_page_start(viewport, end, SizeUnit::Line, 1);
        }
        let start = if start.is_end_of_paragraph() {
            start.next_paragraph(self.model).unwrap_or(start)
        } else {
            start
        };
        log::debug!(
            "backward search from {:?} found start {:?}",
            end.position(),
            start.position()
        );
        Ok(start)
    }

    /// Height of `cursor`'s paragraph, either before the cursor or whole.
    pub fn paragraph_size(
        &mut self,
        viewport: Viewport,
        cursor: &WordCursor,
        before_current_position: bool,
        unit: SizeUnit,
    ) -> Result<ParagraphSize, LayoutError> {
        let paragraph = cursor.paragraph_cursor().clone();
        let bound = if before_current_position {
            (cursor.element_index(), cursor.char_index())
        } else {
            (paragraph.element_count(), 0)
        };
        let mut style = StyleStack::new(self.base_style.clone());
        let mut size = ParagraphSize::default();
        let mut element = 0;
        let mut char_index = 0;
        let mut previous: Option<LineInfo> = None;
        while (element, char_index) < bound {
            let line = self.prepare_line(
                viewport,
                &paragraph,
                element,
                char_index,
                bound,
                previous.as_ref(),
                &mut style,
            );
            if (line.end_element, line.end_char) <= (element, char_index) {
                return Err(stalled(&cursor.to_paragraph_start()));
            }
            element = line.end_element;
            char_index = line.end_char;
            size.height += line_height(&line, unit);
            if unit == SizeUnit::Pixel {
                if previous.is_none() {
                    size.top_margin = line.v_space_before;
                }
                size.bottom_margin = line.v_space_after;
            }
            previous = Some(line);
        }
        Ok(size)
    }

    /// Advance `cursor` line by line until `size` is consumed.
    fn skip(
        &mut self,
        viewport: Viewport,
        cursor: WordCursor,
        unit: SizeUnit,
        size: i32,
    ) -> Result<WordCursor, LayoutError> {
        let mut size = size;
        let mut cursor = cursor;
        let paragraph = cursor.paragraph_cursor().clone();
        let mut style = StyleStack::at_position(
            self.base_style.clone(),
            paragraph.paragraph(),
            cursor.element_index(),
        );
        let mut previous: Option<LineInfo> = None;
        while !cursor.is_end_of_paragraph() && size > 0 {
            let line = self.prepare_line(
                viewport,
                &paragraph,
                cursor.element_index(),
                cursor.char_index(),
                (paragraph.element_count(), 0),
                previous.as_ref(),
                &mut style,
            );
            let next = cursor.moved_to(line.end_element, line.end_char)?;
            if next <= cursor {
                return Err(stalled(&cursor));
            }
            cursor = next;
            size -= line_height(&line, unit);
            previous = Some(line);
        }
        Ok(cursor)
    }
}
