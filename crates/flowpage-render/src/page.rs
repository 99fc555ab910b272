use flowpage::WordCursor;

use crate::line_info::LineInfo;
use crate::text_area::ElementArea;

/// Size of the text box a page is laid out into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Slot in the three-page buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Previous,
    Current,
    Next,
}

/// How much of a page is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageState {
    /// Nothing known yet.
    #[default]
    None,
    /// Start cursor fixed, lines not computed.
    KnowStart,
    /// End cursor fixed, lines not computed.
    KnowEnd,
    /// Lines and areas computed.
    Prepared,
}

/// One screen of content.
#[derive(Clone, Debug, Default)]
pub struct Page {
    viewport: Viewport,
    state: PageState,
    start: Option<WordCursor>,
    end: Option<WordCursor>,
    lines: Vec<LineInfo>,
    areas: Vec<ElementArea>,
    line_area_offsets: Vec<usize>,
}

impl Page {
    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn is_prepared(&self) -> bool {
        self.state == PageState::Prepared
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn start_cursor(&self) -> Option<&WordCursor> {
        self.start.as_ref()
    }

    pub fn end_cursor(&self) -> Option<&WordCursor> {
        self.end.as_ref()
    }

    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    /// Element areas of every line, in order.
    pub fn areas(&self) -> &[ElementArea] {
        &self.areas
    }

    /// Index of each line's first area; one entry per line plus a terminator.
    pub fn line_area_offsets(&self) -> &[usize] {
        &self.line_area_offsets
    }

    /// Areas of line `index`, empty when out of range.
    pub fn line_areas(&self, index: usize) -> &[ElementArea] {
        match (
            self.line_area_offsets.get(index),
            self.line_area_offsets.get(index + 1),
        ) {
            (Some(from), Some(to)) => self.areas.get(*from..*to).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Forget everything, keeping allocations.
    pub fn reset(&mut self) {
        self.state = PageState::None;
        self.start = None;
        self.end = None;
        self.lines.clear();
        self.areas.clear();
        self.line_area_offsets.clear();
    }

    /// Seed the page with a known start.
    pub fn init_start(&mut self, cursor: WordCursor) {
        self.reset();
        self.start = Some(cursor);
        self.state = PageState::KnowStart;
    }

    /// Seed the page with a known end.
    pub fn init_end(&mut self, cursor: WordCursor) {
        self.reset();
        self.end = Some(cursor);
        self.state = PageState::KnowEnd;
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub(crate) fn set_prepared(
        &mut self,
        start: WordCursor,
        end: WordCursor,
        lines: Vec<LineInfo>,
        areas: Vec<ElementArea>,
        line_area_offsets: Vec<usize>,
    ) {
        self.start = Some(start);
        self.end = Some(end);
        self.lines = lines;
        self.areas = areas;
        self.line_area_offsets = line_area_offsets;
        self.state = PageState::Prepared;
    }
}

/// Previous/current/next pages, rotated on page turns.
#[derive(Debug, Default)]
pub(crate) struct PageBuffer {
    pub(crate) previous: Page,
    pub(crate) current: Page,
    pub(crate) next: Page,
}

impl PageBuffer {
    pub(crate) fn get(&self, kind: PageKind) -> &Page {
        match kind {
            PageKind::Previous => &self.previous,
            PageKind::Current => &self.current,
            PageKind::Next => &self.next,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: PageKind) -> &mut Page {
        match kind {
            PageKind::Previous => &mut self.previous,
            PageKind::Current => &mut self.current,
            PageKind::Next => &mut self.next,
        }
    }

    /// previous <- current <- next; the old previous becomes a blank next.
    pub(crate) fn rotate_forward(&mut self) {
        core::mem::swap(&mut self.previous, &mut self.current);
        core::mem::swap(&mut self.current, &mut self.next);
        self.next.reset();
    }

    /// next <- current <- previous; the old next becomes a blank previous.
    pub(crate) fn rotate_backward(&mut self) {
        core::mem::swap(&mut self.next, &mut self.current);
        core::mem::swap(&mut self.current, &mut self.previous);
        self.previous.reset();
    }

    pub(crate) fn reset_all(&mut self) {
        self.previous.reset();
        self.current.reset();
        self.next.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpage::Document;

    fn cursor_at(element: usize) -> WordCursor {
        let doc = Document::builder()
            .paragraph()
            .text("one two three")
            .build();
        WordCursor::at(&doc, 0, element, 0).expect("cursor should be valid")
    }

    #[test]
    fn seeding_replaces_previous_knowledge() {
        let mut page = Page::default();
        assert_eq!(page.state(), PageState::None);
        page.init_start(cursor_at(2));
        assert_eq!(page.state(), PageState::KnowStart);
        assert!(page.end_cursor().is_none());

        page.init_end(cursor_at(4));
        assert_eq!(page.state(), PageState::KnowEnd);
        assert!(page.start_cursor().is_none());
        assert_eq!(page.end_cursor().map(WordCursor::element_index), Some(4));
    }

    #[test]
    fn rotation_moves_pages_without_copying_content() {
        let mut buffer = PageBuffer::default();
        buffer.previous.init_end(cursor_at(0));
        buffer.current.init_start(cursor_at(2));
        buffer.next.init_start(cursor_at(4));

        buffer.rotate_forward();
        assert_eq!(
            buffer.previous.start_cursor().map(WordCursor::element_index),
            Some(2)
        );
        assert_eq!(
            buffer.current.start_cursor().map(WordCursor::element_index),
            Some(4)
        );
        assert_eq!(buffer.next.state(), PageState::None);

        buffer.rotate_backward();
        assert_eq!(
            buffer.current.start_cursor().map(WordCursor::element_index),
            Some(2)
        );
        assert_eq!(
            buffer.next.start_cursor().map(WordCursor::element_index),
            Some(4)
        );
        assert_eq!(buffer.previous.state(), PageState::None);
    }

    #[test]
    fn line_areas_out_of_range_is_empty() {
        let page = Page::default();
        assert!(page.line_areas(0).is_empty());
        assert!(page.line_areas(7).is_empty());
    }
}
