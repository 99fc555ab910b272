//! Line breaking, pagination, and page-turn orchestration for `flowpage`.
//!
//! [`Paginator`] keeps a previous/current/next page buffer over a
//! [`flowpage::TextModel`] and prepares pages lazily from one known boundary.
//! The lower-level passes are methods on [`TextLayouter`]: line breaking,
//! forward page fill, backward page-start search, and area layout.

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

mod config;
mod error;
mod layouter;
mod line_breaker;
mod line_info;
mod measure;
mod page;
mod page_builder;
mod page_search;
mod paginator;
mod position;
mod text_area;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use layouter::{SizeUnit, TextLayouter};
pub use line_info::{LineInfo, LineInfoCache, LineKey};
pub use measure::{FixedAdvanceMetrics, MetricsProvider};
pub use page::{Page, PageKind, PageState, Viewport};
pub use page_search::ParagraphSize;
pub use paginator::{Paginator, ViewportHost};
pub use position::ReadingPosition;
pub use text_area::{AreaKind, ElementArea};
