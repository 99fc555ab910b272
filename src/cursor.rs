//! Document positions.
//!
//! [`ParagraphCursor`] pins one paragraph of a [`TextModel`]; [`WordCursor`]
//! adds an element index and a character offset inside that element. Both are
//! cheap to clone and immutable: moving a cursor returns a new value.

extern crate alloc;

use alloc::sync::Arc;
use core::cmp::Ordering;

use crate::element::TextElement;
use crate::error::CursorError;
use crate::model::{Paragraph, TextModel};

/// Handle to one paragraph of a model.
#[derive(Clone, Debug)]
pub struct ParagraphCursor {
    index: usize,
    paragraph: Arc<Paragraph>,
    paragraph_count: usize,
}

impl ParagraphCursor {
    /// Cursor for paragraph `index` of `model`.
    pub fn new(model: &dyn TextModel, index: usize) -> Result<Self, CursorError> {
        let count = model.paragraph_count();
        if count == 0 {
            return Err(CursorError::EmptyDocument);
        }
        let paragraph = model
            .paragraph(index)
            .ok_or(CursorError::ParagraphOutOfRange { index, count })?;
        Ok(Self {
            index,
            paragraph,
            paragraph_count: count,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn paragraph(&self) -> &Paragraph {
        &self.paragraph
    }

    /// Shared handle to the paragraph, usable as a cache identity.
    pub fn shared(&self) -> &Arc<Paragraph> {
        &self.paragraph
    }

    pub fn element_count(&self) -> usize {
        self.paragraph.element_count()
    }

    pub fn element(&self, index: usize) -> Option<&TextElement> {
        self.paragraph.element(index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.paragraph_count
    }

    pub fn is_end_of_section(&self) -> bool {
        self.paragraph.is_end_of_section()
    }

    /// Cursor for the following paragraph, `None` on the last one.
    pub fn next(&self, model: &dyn TextModel) -> Option<Self> {
        if self.is_last() {
            return None;
        }
        Self::new(model, self.index + 1).ok()
    }

    /// Cursor for the preceding paragraph, `None` on the first one.
    pub fn previous(&self, model: &dyn TextModel) -> Option<Self> {
        if self.is_first() {
            return None;
        }
        Self::new(model, self.index - 1).ok()
    }
}

impl PartialEq for ParagraphCursor {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for ParagraphCursor {}

/// A position inside a document: paragraph, element, and char offset.
///
/// Element index `element_count()` addresses the end of the paragraph. A
/// non-zero char offset addresses a split point inside a word.
#[derive(Clone, Debug)]
pub struct WordCursor {
    paragraph: ParagraphCursor,
    element_index: usize,
    char_index: usize,
}

impl WordCursor {
    /// Cursor at the start of `paragraph`.
    pub fn new(paragraph: ParagraphCursor) -> Self {
        Self {
            paragraph,
            element_index: 0,
            char_index: 0,
        }
    }

    /// Cursor at the start of the document.
    pub fn start_of_text(model: &dyn TextModel) -> Result<Self, CursorError> {
        Ok(Self::new(ParagraphCursor::new(model, 0)?))
    }

    /// Cursor at a validated position of `model`.
    pub fn at(
        model: &dyn TextModel,
        paragraph_index: usize,
        element_index: usize,
        char_index: usize,
    ) -> Result<Self, CursorError> {
        Self::new(ParagraphCursor::new(model, paragraph_index)?)
            .moved_to(element_index, char_index)
    }

    pub fn paragraph_cursor(&self) -> &ParagraphCursor {
        &self.paragraph
    }

    pub fn paragraph_index(&self) -> usize {
        self.paragraph.index
    }

    pub fn element_index(&self) -> usize {
        self.element_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Element under the cursor, `None` at end of paragraph.
    pub fn element(&self) -> Option<&TextElement> {
        self.paragraph.element(self.element_index)
    }

    /// Copy of this cursor moved to `(element_index, char_index)` in the same paragraph.
    pub fn moved_to(&self, element_index: usize, char_index: usize) -> Result<Self, CursorError> {
        let count = self.paragraph.element_count();
        if element_index > count {
            return Err(CursorError::ElementOutOfRange {
                paragraph: self.paragraph.index,
                element: element_index,
                count,
            });
        }
        if char_index > 0 {
            let len = self
                .paragraph
                .element(element_index)
                .map_or(0, TextElement::char_len);
            if char_index >= len {
                return Err(CursorError::CharOutOfRange {
                    paragraph: self.paragraph.index,
                    element: element_index,
                    char_index,
                    len,
                });
            }
        }
        Ok(Self {
            paragraph: self.paragraph.clone(),
            element_index,
            char_index,
        })
    }

    /// Copy moved to the start of its paragraph.
    pub fn to_paragraph_start(&self) -> Self {
        Self::new(self.paragraph.clone())
    }

    /// Copy moved to the end of its paragraph.
    pub fn to_paragraph_end(&self) -> Self {
        Self {
            paragraph: self.paragraph.clone(),
            element_index: self.paragraph.element_count(),
            char_index: 0,
        }
    }

    /// Start of the following paragraph, `None` at the last one.
    pub fn next_paragraph(&self, model: &dyn TextModel) -> Option<Self> {
        self.paragraph.next(model).map(Self::new)
    }

    /// Start of the preceding paragraph, `None` at the first one.
    pub fn previous_paragraph(&self, model: &dyn TextModel) -> Option<Self> {
        self.paragraph.previous(model).map(Self::new)
    }

    pub fn is_start_of_paragraph(&self) -> bool {
        self.element_index == 0 && self.char_index == 0
    }

    pub fn is_end_of_paragraph(&self) -> bool {
        self.element_index >= self.paragraph.element_count()
    }

    pub fn is_start_of_text(&self) -> bool {
        self.paragraph.is_first() && self.is_start_of_paragraph()
    }

    pub fn is_end_of_text(&self) -> bool {
        self.paragraph.is_last() && self.is_end_of_paragraph()
    }

    /// True at the start of a paragraph following a section marker.
    pub fn is_start_of_section(&self, model: &dyn TextModel) -> bool {
        if !self.is_start_of_paragraph() {
            return false;
        }
        match self.paragraph.previous(model) {
            Some(previous) => previous.is_end_of_section(),
            None => true,
        }
    }

    /// True inside a section marker paragraph or at the end of the text.
    pub fn is_end_of_section(&self) -> bool {
        self.paragraph.is_end_of_section() || self.is_end_of_text()
    }

    /// `(paragraph, element, char)` triple.
    pub fn position(&self) -> (usize, usize, usize) {
        (self.paragraph.index, self.element_index, self.char_index)
    }

    /// True when both cursors denote the same break between content.
    ///
    /// The end of one paragraph and the start of the next are the same boundary.
    pub fn is_same_boundary(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        let (first, second) = if self < other {
            (self, other)
        } else {
            (other, self)
        };
        first.is_end_of_paragraph()
            && second.is_start_of_paragraph()
            && first.paragraph.index + 1 == second.paragraph.index
    }
}

impl PartialEq for WordCursor {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl Eq for WordCursor {}

impl PartialOrd for WordCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}
