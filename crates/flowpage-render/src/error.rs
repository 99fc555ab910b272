use flowpage::CursorError;

use crate::page::PageKind;

/// Layout engine error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// A cursor addressed a position outside the document.
    Cursor(CursorError),
    /// No text model is installed.
    NoTextModel,
    /// A page was asked for a boundary it cannot derive.
    BoundaryUnknown { slot: PageKind },
    /// A line fill made no forward progress.
    Stalled {
        paragraph: usize,
        element: usize,
        char_index: usize,
    },
    /// A reading position token could not be encoded or decoded.
    Position(String),
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cursor(err) => write!(f, "cursor error: {}", err),
            Self::NoTextModel => write!(f, "no text model installed"),
            Self::BoundaryUnknown { slot } => {
                write!(f, "page boundary unknown for {:?} page", slot)
            }
            Self::Stalled {
                paragraph,
                element,
                char_index,
            } => write!(
                f,
                "line fill made no progress at {}:{}:{}",
                paragraph, element, char_index
            ),
            Self::Position(reason) => write!(f, "reading position error: {}", reason),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<CursorError> for LayoutError {
    fn from(value: CursorError) -> Self {
        Self::Cursor(value)
    }
}
