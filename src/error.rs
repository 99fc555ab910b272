/// Cursor contract violation.
///
/// Raised when a caller addresses a position the document does not contain.
/// These are caller bugs and are never clamped silently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CursorError {
    /// The document has no paragraphs.
    EmptyDocument,
    /// Paragraph index past the paragraph count.
    ParagraphOutOfRange { index: usize, count: usize },
    /// Element index past the paragraph's element count.
    ElementOutOfRange {
        paragraph: usize,
        element: usize,
        count: usize,
    },
    /// Character offset outside the addressed element.
    CharOutOfRange {
        paragraph: usize,
        element: usize,
        char_index: usize,
        len: usize,
    },
}

impl core::fmt::Display for CursorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "document has no paragraphs"),
            Self::ParagraphOutOfRange { index, count } => write!(
                f,
                "paragraph index out of range: {} (count={})",
                index, count
            ),
            Self::ElementOutOfRange {
                paragraph,
                element,
                count,
            } => write!(
                f,
                "element index out of range in paragraph {}: {} (count={})",
                paragraph, element, count
            ),
            Self::CharOutOfRange {
                paragraph,
                element,
                char_index,
                len,
            } => write!(
                f,
                "char offset out of range at {}:{}: {} (len={})",
                paragraph, element, char_index, len
            ),
        }
    }
}

impl std::error::Error for CursorError {}
