use std::collections::HashMap;
use std::sync::Arc;

use flowpage::{ParagraphCursor, TextStyle};

/// One physical line of a page.
///
/// Heights are in pixels; `height` includes the collapsed space above the
/// line when it opens a paragraph, `text_height` never does.
#[derive(Clone, Debug, PartialEq)]
pub struct LineInfo {
    pub paragraph: ParagraphCursor,
    pub start_element: usize,
    pub start_char: usize,
    /// First position after leading style markers.
    pub real_start_element: usize,
    pub real_start_char: usize,
    pub end_element: usize,
    pub end_char: usize,
    pub left_indent: i32,
    /// Content width including the left indent.
    pub width: i32,
    pub height: i32,
    pub text_height: i32,
    pub descent: i32,
    pub v_space_before: i32,
    pub v_space_after: i32,
    /// Interior spaces available for justification.
    pub space_count: usize,
    /// Style in effect at the real start.
    pub start_style: Arc<TextStyle>,
    /// True when the line holds at least one glyph.
    pub visible: bool,
    pub previous_info_used: bool,
}

impl LineInfo {
    pub(crate) fn new(
        paragraph: ParagraphCursor,
        start_element: usize,
        start_char: usize,
        start_style: Arc<TextStyle>,
    ) -> Self {
        Self {
            paragraph,
            start_element,
            start_char,
            real_start_element: start_element,
            real_start_char: start_char,
            end_element: start_element,
            end_char: start_char,
            left_indent: 0,
            width: 0,
            height: 0,
            text_height: 0,
            descent: 0,
            v_space_before: 0,
            v_space_after: 0,
            space_count: 0,
            start_style,
            visible: false,
            previous_info_used: false,
        }
    }

    pub fn paragraph_index(&self) -> usize {
        self.paragraph.index()
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.paragraph.index(), self.start_element, self.start_char)
    }

    /// True when the line opens its paragraph.
    pub fn is_first_line(&self) -> bool {
        self.start_element == 0 && self.start_char == 0
    }

    /// True when the line closes its paragraph.
    pub fn is_end_of_paragraph(&self) -> bool {
        self.end_element >= self.paragraph.element_count()
    }

    /// Vertical extent consumed on a page.
    pub fn full_height(&self) -> i32 {
        self.height + self.descent + self.v_space_after
    }

    /// Recompute the collapsed space above the line against `previous`.
    pub(crate) fn adjust(&mut self, previous: Option<&LineInfo>) {
        if !self.is_first_line() {
            self.height = self.text_height;
            self.previous_info_used = false;
            return;
        }
        self.previous_info_used = previous.is_some();
        self.height = self.text_height
            + match previous {
                Some(previous) => (self.v_space_before - previous.v_space_after).max(0),
                None => self.v_space_before,
            };
    }
}

/// Cache identity of a line: where it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub paragraph: usize,
    pub element: usize,
    pub char_index: usize,
}

impl LineKey {
    pub fn new(paragraph: usize, element: usize, char_index: usize) -> Self {
        Self {
            paragraph,
            element,
            char_index,
        }
    }
}

/// Memo of computed lines for one preparation pass.
#[derive(Debug, Default)]
pub struct LineInfoCache {
    entries: HashMap<LineKey, LineInfo>,
    hits: usize,
}

impl LineInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &LineKey) -> Option<&LineInfo> {
        let found = self.entries.get(key);
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    pub fn insert(&mut self, line: LineInfo) {
        self.entries.insert(line.key(), line);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served since the last clear.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
