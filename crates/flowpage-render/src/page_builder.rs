//! Forward page fill.

use flowpage::{StyleStack, WordCursor};

use crate::error::LayoutError;
use crate::layouter::TextLayouter;
use crate::line_info::LineInfo;
use crate::page::Viewport;

impl TextLayouter<'_> {
    /// Break lines from `start` until the viewport height is used up.
    ///
    /// With `limit` set the fill never passes that cursor. Returns the lines and
    /// the cursor where the following page resumes.
    pub fn fill_page(
        &mut self,
        viewport: Viewport,
        start: &WordCursor,
        limit: Option<&WordCursor>,
    ) -> Result<(Vec<LineInfo>, WordCursor), LayoutError> {
        let mut lines: Vec<LineInfo> = Vec::with_capacity(32);
        let mut cursor = start.clone();
        let mut remaining = viewport.height;
        let mut exhausted = false;
        let mut style = StyleStack::at_position(
            self.base_style.clone(),
            cursor.paragraph_cursor().paragraph(),
            cursor.element_index(),
        );

        loop {
            if cursor.is_end_of_paragraph() {
                let Some(next) = cursor.next_paragraph(self.model) else {
                    break;
                };
                let section_break = next.paragraph_cursor().is_end_of_section() && !lines.is_empty();
                cursor = next;
                style = StyleStack::new(self.base_style.clone());
                if section_break {
                    break;
                }
            }
            if exhausted {
                break;
            }
            if limit.is_some_and(|limit| cursor >= *limit) {
                break;
            }

            let paragraph = cursor.paragraph_cursor().clone();
            let element_count = paragraph.element_count();
            let line_style = style.clone();
            let mut line = self.prepare_line(
                viewport,
                &paragraph,
                cursor.element_index(),
                cursor.char_index(),
                (element_count, 0),
                lines.last(),
                &mut style,
            );
            if let Some(limit) = limit {
                let end = (paragraph.index(), line.end_element, line.end_char);
                if end > limit.position() {
                    style = line_style;
                    line = self.prepare_line(
                        viewport,
                        &paragraph,
                        cursor.element_index(),
                        cursor.char_index(),
                        (limit.element_index(), limit.char_index()),
                        lines.last(),
                        &mut style,
                    );
                    log::warn!(
                        "line crossed page limit at {}:{}:{}, rebroken to {}:{}",
                        limit.paragraph_index(),
                        limit.element_index(),
                        limit.char_index(),
                        line.end_element,
                        line.end_char
                    );
                    if (line.end_element, line.end_char)
                        <= (cursor.element_index(), cursor.char_index())
                    {
                        break;
                    }
                }
            }

            let consumed = line.height + line.descent;
            if remaining - consumed < 0 && !lines.is_empty() {
                break;
            }
            remaining -= consumed + line.v_space_after;

            let end = cursor.moved_to(line.end_element, line.end_char)?;
            if end <= cursor {
                return Err(LayoutError::Stalled {
                    paragraph: cursor.paragraph_index(),
                    element: cursor.element_index(),
                    char_index: cursor.char_index(),
                });
            }
            cursor = end;
            lines.push(line);
            if remaining <= 0 {
                exhausted = true;
            }
        }

        log::debug!(
            "filled page from {:?} to {:?}: {} lines, {}px left",
            start.position(),
            cursor.position(),
            lines.len(),
            remaining
        );
        Ok((lines, cursor))
    }
}
