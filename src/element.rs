//! Pre-tokenized paragraph elements.
//!
//! A paragraph is a flat sequence of [`TextElement`]s. Words carry their text,
//! spaces and style markers carry none. Layout never splits text below the
//! word level except at character offsets inside a [`WordElement`].

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::style::StyleDecoration;

const HYPHEN: char = '-';

/// A word: an unbreakable run of glyphs, addressed by character offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordElement {
    text: Box<str>,
    char_len: usize,
}

impl WordElement {
    /// Create a word from its text.
    pub fn new(text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    /// Full word text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// True for a zero-length word.
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Character at `index`, if in range.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.text.chars().nth(index)
    }

    /// True when the character right before `offset` is a literal hyphen.
    ///
    /// Breaking after an existing hyphen must not add another sign.
    pub fn breaks_after_hyphen(&self, offset: usize) -> bool {
        offset > 0 && self.char_at(offset - 1) == Some(HYPHEN)
    }

    /// Substring covering `len` characters starting at character `start`.
    ///
    /// Out-of-range requests are clamped to the word.
    pub fn slice(&self, start: usize, len: usize) -> &str {
        let start = start.min(self.char_len);
        let end = start.saturating_add(len).min(self.char_len);
        let begin = byte_offset(&self.text, start);
        let finish = byte_offset(&self.text, end);
        &self.text[begin..finish]
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Style change carried inline in the element stream.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleMarker {
    /// Push a decoration on top of the active style.
    Push(Arc<StyleDecoration>),
    /// Pop the most recent decoration.
    Pop,
}

/// One element of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub enum TextElement {
    /// A word.
    Word(WordElement),
    /// Breakable horizontal space.
    HSpace,
    /// Non-breaking space; glues its neighbours together.
    NBSpace,
    /// Style change with no width.
    Style(StyleMarker),
    /// Terminal marker closing a paragraph.
    ParagraphBoundary,
}

impl TextElement {
    /// Convenience constructor for a word element.
    pub fn word(text: impl Into<Box<str>>) -> Self {
        Self::Word(WordElement::new(text))
    }

    /// The word payload, if this is a word.
    pub fn as_word(&self) -> Option<&WordElement> {
        match self {
            Self::Word(word) => Some(word),
            _ => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Self::Word(_))
    }

    pub fn is_style_marker(&self) -> bool {
        matches!(self, Self::Style(_))
    }

    /// Number of addressable character offsets (0 for non-words).
    pub fn char_len(&self) -> usize {
        match self {
            Self::Word(word) => word.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_slices_by_characters_not_bytes() {
        let word = WordElement::new("naïveté");
        assert_eq!(word.len(), 7);
        assert_eq!(word.slice(0, 3), "naï");
        assert_eq!(word.slice(3, 10), "veté");
        assert_eq!(word.slice(9, 2), "");
    }

    #[test]
    fn hyphen_detection_looks_at_preceding_char() {
        let word = WordElement::new("well-known");
        assert!(word.breaks_after_hyphen(5));
        assert!(!word.breaks_after_hyphen(4));
        assert!(!word.breaks_after_hyphen(0));
    }

    #[test]
    fn element_predicates() {
        assert!(TextElement::word("a").is_word());
        assert!(!TextElement::HSpace.is_word());
        assert!(TextElement::Style(StyleMarker::Pop).is_style_marker());
        assert_eq!(TextElement::NBSpace.char_len(), 0);
        assert_eq!(TextElement::word("abc").char_len(), 3);
    }
}
