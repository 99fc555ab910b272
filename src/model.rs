//! Paragraph-structured text model.
//!
//! The layout engine consumes documents through [`TextModel`]; [`Document`]
//! is the in-memory implementation, assembled with [`DocumentBuilder`].

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::element::{StyleMarker, TextElement};
use crate::style::StyleDecoration;

/// Kind of a paragraph in the flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParagraphKind {
    /// Regular flowed text.
    #[default]
    Text,
    /// Marker paragraph closing a section; pages never flow across it backwards.
    EndOfSection,
}

/// One paragraph: an element sequence terminated by [`TextElement::ParagraphBoundary`].
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    kind: ParagraphKind,
    elements: Vec<TextElement>,
}

impl Paragraph {
    /// Build a text paragraph, appending the terminal boundary when missing.
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self::with_kind(ParagraphKind::Text, elements)
    }

    /// Build a paragraph of an explicit kind.
    pub fn with_kind(kind: ParagraphKind, mut elements: Vec<TextElement>) -> Self {
        if elements.last() != Some(&TextElement::ParagraphBoundary) {
            elements.push(TextElement::ParagraphBoundary);
        }
        Self { kind, elements }
    }

    /// Empty section-closing marker paragraph.
    pub fn end_of_section() -> Self {
        Self::with_kind(ParagraphKind::EndOfSection, Vec::with_capacity(1))
    }

    pub fn kind(&self) -> ParagraphKind {
        self.kind
    }

    pub fn is_end_of_section(&self) -> bool {
        self.kind == ParagraphKind::EndOfSection
    }

    /// Number of elements, including the terminal boundary.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, index: usize) -> Option<&TextElement> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    /// Elements in `[from, to)`, clamped to the paragraph.
    pub fn element_range(&self, from: usize, to: usize) -> &[TextElement] {
        let to = to.min(self.elements.len());
        let from = from.min(to);
        &self.elements[from..to]
    }
}

/// Read access to a paragraph-structured document.
pub trait TextModel: Send + Sync {
    /// Number of paragraphs.
    fn paragraph_count(&self) -> usize;

    /// Paragraph at `index`, if it exists.
    fn paragraph(&self, index: usize) -> Option<Arc<Paragraph>>;
}

/// In-memory document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    paragraphs: Vec<Arc<Paragraph>>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs: paragraphs.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

impl TextModel for Document {
    fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    fn paragraph(&self, index: usize) -> Option<Arc<Paragraph>> {
        self.paragraphs.get(index).cloned()
    }
}

/// Incremental builder for [`Document`].
///
/// Text pushed with [`text`](Self::text) is tokenized on ASCII whitespace into
/// words separated by single [`TextElement::HSpace`] elements.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    paragraphs: Vec<Paragraph>,
    open: Option<Vec<TextElement>>,
}

impl DocumentBuilder {
    /// Start a new paragraph, closing any open one.
    pub fn paragraph(mut self) -> Self {
        self.close_open();
        self.open = Some(Vec::with_capacity(16));
        self
    }

    /// Append whitespace-separated words to the open paragraph.
    pub fn text(mut self, text: &str) -> Self {
        let elements = self.open_elements();
        let leading_space = text.starts_with(char::is_whitespace);
        let trailing_space = text.ends_with(char::is_whitespace);
        if leading_space && !elements.is_empty() {
            push_space(elements);
        }
        let mut first = true;
        for word in text.split_whitespace() {
            if !first {
                push_space(elements);
            }
            elements.push(TextElement::word(word));
            first = false;
        }
        if trailing_space && !first {
            push_space(elements);
        }
        self
    }

    /// Append one word without tokenizing.
    pub fn word(mut self, word: &str) -> Self {
        self.open_elements().push(TextElement::word(word));
        self
    }

    /// Append a breakable space.
    pub fn space(mut self) -> Self {
        self.open_elements().push(TextElement::HSpace);
        self
    }

    /// Append a non-breaking space.
    pub fn nb_space(mut self) -> Self {
        self.open_elements().push(TextElement::NBSpace);
        self
    }

    /// Push a style decoration.
    pub fn push_style(mut self, decoration: StyleDecoration) -> Self {
        self.open_elements()
            .push(TextElement::Style(StyleMarker::Push(Arc::new(decoration))));
        self
    }

    /// Pop the innermost style decoration.
    pub fn pop_style(mut self) -> Self {
        self.open_elements()
            .push(TextElement::Style(StyleMarker::Pop));
        self
    }

    /// Append a raw element.
    pub fn element(mut self, element: TextElement) -> Self {
        self.open_elements().push(element);
        self
    }

    /// Close the open paragraph and append a section marker paragraph.
    pub fn end_section(mut self) -> Self {
        self.close_open();
        self.paragraphs.push(Paragraph::end_of_section());
        self
    }

    pub fn build(mut self) -> Document {
        self.close_open();
        Document::new(self.paragraphs)
    }

    fn open_elements(&mut self) -> &mut Vec<TextElement> {
        self.open.get_or_insert_with(|| Vec::with_capacity(16))
    }

    fn close_open(&mut self) {
        if let Some(elements) = self.open.take() {
            self.paragraphs.push(Paragraph::new(elements));
        }
    }
}

fn push_space(elements: &mut Vec<TextElement>) {
    if elements.last() != Some(&TextElement::HSpace) {
        elements.push(TextElement::HSpace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_are_terminated_by_a_boundary() {
        let paragraph = Paragraph::new(vec![TextElement::word("one")]);
        assert_eq!(paragraph.element_count(), 2);
        assert_eq!(
            paragraph.element(1),
            Some(&TextElement::ParagraphBoundary)
        );

        let explicit = Paragraph::new(vec![
            TextElement::word("one"),
            TextElement::ParagraphBoundary,
        ]);
        assert_eq!(explicit.element_count(), 2);
    }

    #[test]
    fn builder_tokenizes_text_into_words_and_spaces() {
        let doc = Document::builder()
            .paragraph()
            .text("The quick")
            .text(" brown  fox")
            .build();
        assert_eq!(doc.paragraph_count(), 1);
        let paragraph = doc.paragraph(0).unwrap_or_else(|| panic!("paragraph 0"));
        let words: Vec<&str> = paragraph
            .elements()
            .iter()
            .filter_map(|e| e.as_word().map(|w| w.text()))
            .collect();
        assert_eq!(words, vec!["The", "quick", "brown", "fox"]);
        assert_eq!(paragraph.element(1), Some(&TextElement::HSpace));
        assert_eq!(paragraph.element(3), Some(&TextElement::HSpace));
        assert_eq!(paragraph.element_count(), 8);
    }

    #[test]
    fn builder_emits_section_markers() {
        let doc = Document::builder()
            .paragraph()
            .text("first")
            .end_section()
            .paragraph()
            .text("second")
            .build();
        assert_eq!(doc.paragraph_count(), 3);
        let marker = doc.paragraph(1).unwrap_or_else(|| panic!("marker"));
        assert!(marker.is_end_of_section());
        assert_eq!(marker.element_count(), 1);
    }

    #[test]
    fn element_range_clamps() {
        let paragraph = Paragraph::new(vec![TextElement::word("a"), TextElement::HSpace]);
        assert_eq!(paragraph.element_range(1, 10).len(), 2);
        assert!(paragraph.element_range(5, 2).is_empty());
    }
}
