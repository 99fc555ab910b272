//! Document model for paginated flowed text.
//!
//! `flowpage` holds the pre-tokenized paragraph model consumed by the layout
//! engine in `flowpage-render`: elements, resolved styles with an inline style
//! stack, document cursors, and hyphenation services.
//!
//! ```
//! use flowpage::{Document, TextModel, WordCursor};
//!
//! let doc = Document::builder()
//!     .paragraph()
//!     .text("The quick brown fox")
//!     .build();
//! assert_eq!(doc.paragraph_count(), 1);
//! let start = WordCursor::start_of_text(&doc).unwrap();
//! assert!(start.is_start_of_text());
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod cursor;
mod element;
mod error;
mod hyphenation;
mod model;
mod style;

pub use cursor::{ParagraphCursor, WordCursor};
pub use element::{StyleMarker, TextElement, WordElement};
pub use error::CursorError;
pub use hyphenation::{
    EnglishHeuristicHyphenator, HyphenationInfo, Hyphenator, NoHyphenation, PatternHyphenator,
};
pub use model::{Document, DocumentBuilder, Paragraph, ParagraphKind, TextModel};
pub use style::{Alignment, Metrics, StyleDecoration, StyleLength, StyleStack, TextStyle};
