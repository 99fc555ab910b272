use flowpage::{TextModel, WordCursor};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Opaque bookmark of a page start, stable across viewport changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadingPosition {
    pub paragraph_index: usize,
    pub element_index: usize,
    pub char_index: usize,
}

impl ReadingPosition {
    pub fn new(paragraph_index: usize, element_index: usize, char_index: usize) -> Self {
        Self {
            paragraph_index,
            element_index,
            char_index,
        }
    }

    /// Resolve against `model`, failing when the position no longer exists.
    pub fn to_cursor(self, model: &dyn TextModel) -> Result<WordCursor, LayoutError> {
        Ok(WordCursor::at(
            model,
            self.paragraph_index,
            self.element_index,
            self.char_index,
        )?)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        serde_json::to_string(self).map_err(|err| LayoutError::Position(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|err| LayoutError::Position(err.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LayoutError> {
        postcard::to_allocvec(self).map_err(|err| LayoutError::Position(err.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        postcard::from_bytes(bytes).map_err(|err| LayoutError::Position(err.to_string()))
    }
}

impl From<&WordCursor> for ReadingPosition {
    fn from(cursor: &WordCursor) -> Self {
        Self::new(
            cursor.paragraph_index(),
            cursor.element_index(),
            cursor.char_index(),
        )
    }
}
