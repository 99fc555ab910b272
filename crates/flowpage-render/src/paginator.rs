//! Three-page buffer driven by page turns.
//!
//! [`Paginator`] owns the previous, current and next [`Page`]s and prepares
//! them lazily. Each page is seeded with one boundary cursor taken from a
//! neighbor and filled on first access.

use std::sync::Arc;

use flowpage::{EnglishHeuristicHyphenator, Hyphenator, TextModel, TextStyle, WordCursor};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::layouter::{SizeUnit, TextLayouter};
use crate::line_info::LineInfoCache;
use crate::measure::{FixedAdvanceMetrics, MetricsProvider};
use crate::page::{Page, PageBuffer, PageKind, PageState};
use crate::position::ReadingPosition;

/// Display surface hosting the paginator.
pub trait ViewportHost: Send + Sync {
    /// Current display size in pixels.
    fn display_size(&self) -> (i32, i32);

    /// Laid-out content is stale and must be redrawn.
    fn invalidate(&self);
}

/// Page-turn driver over a text model.
pub struct Paginator {
    config: LayoutConfig,
    base_style: Arc<TextStyle>,
    model: Option<Arc<dyn TextModel>>,
    metrics: Arc<dyn MetricsProvider>,
    hyphenator: Arc<dyn Hyphenator>,
    host: Option<Arc<dyn ViewportHost>>,
    pages: PageBuffer,
    cache: LineInfoCache,
}

impl Paginator {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            base_style: Arc::new(config.base_style),
            model: None,
            metrics: Arc::new(FixedAdvanceMetrics::default()),
            hyphenator: Arc::new(EnglishHeuristicHyphenator),
            host: None,
            pages: PageBuffer::default(),
            cache: LineInfoCache::new(),
        }
    }

    /// Use a custom text measurer.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsProvider>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Use a custom hyphenation service.
    pub fn with_hyphenator(mut self, hyphenator: Arc<dyn Hyphenator>) -> Self {
        self.hyphenator = hyphenator;
        self
    }

    /// Attach a display host; its size overrides the configured display size.
    pub fn with_host(mut self, host: Arc<dyn ViewportHost>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn model(&self) -> Option<&Arc<dyn TextModel>> {
        self.model.as_ref()
    }

    /// Replace the text model and restart at its beginning.
    pub fn set_model(&mut self, model: Arc<dyn TextModel>) -> Result<(), LayoutError> {
        self.pages.reset_all();
        self.cache.clear();
        if model.paragraph_count() > 0 {
            let start = WordCursor::start_of_text(model.as_ref())?;
            self.pages.current.init_start(start);
        }
        log::debug!(
            "text model installed: {} paragraphs",
            model.paragraph_count()
        );
        self.model = Some(model);
        if let Some(host) = &self.host {
            host.invalidate();
        }
        Ok(())
    }

    /// Resize the display, keeping the current page's start.
    pub fn set_display_size(&mut self, width: i32, height: i32) {
        if self.config.display_width == width && self.config.display_height == height {
            return;
        }
        self.config.display_width = width;
        self.config.display_height = height;
        let start = self.pages.current.start_cursor().cloned();
        let end = self.pages.current.end_cursor().cloned();
        self.pages.reset_all();
        self.cache.clear();
        match (start, end) {
            (Some(start), _) => self.pages.current.init_start(start),
            (None, Some(end)) => self.pages.current.init_end(end),
            (None, None) => {}
        }
        log::debug!("display resized to {}x{}", width, height);
    }

    /// Prepared page in `kind`'s slot.
    ///
    /// A neighbor without a boundary is seeded from the current page first.
    pub fn page(&mut self, kind: PageKind) -> Result<&Page, LayoutError> {
        let model = self.model.clone().ok_or(LayoutError::NoTextModel)?;
        self.sync_host_size();
        self.prepare_slot(model.as_ref(), PageKind::Current)?;
        match kind {
            PageKind::Current => {}
            PageKind::Previous => {
                if self.pages.previous.state() == PageState::None {
                    if let Some(start) = self.pages.current.start_cursor().cloned() {
                        self.pages.previous.init_end(start);
                    }
                }
                self.prepare_slot(model.as_ref(), PageKind::Previous)?;
            }
            PageKind::Next => {
                if self.pages.next.state() == PageState::None {
                    if let Some(end) = self.pages.current.end_cursor().cloned() {
                        self.pages.next.init_start(end);
                    }
                }
                self.prepare_slot(model.as_ref(), PageKind::Next)?;
            }
        }
        Ok(self.pages.get(kind))
    }

    /// True when a page exists in direction `kind` from the current one.
    pub fn has_page(&self, kind: PageKind) -> bool {
        let current = &self.pages.current;
        match kind {
            PageKind::Current => current.state() != PageState::None,
            PageKind::Previous => current
                .start_cursor()
                .is_some_and(|start| !start.is_start_of_text()),
            PageKind::Next => current
                .end_cursor()
                .is_some_and(|end| !end.is_end_of_text()),
        }
    }

    /// Advance to the neighbor in direction `kind`; `Current` is a no-op.
    pub fn turn_page(&mut self, kind: PageKind) -> Result<(), LayoutError> {
        let model = self.model.clone().ok_or(LayoutError::NoTextModel)?;
        match kind {
            PageKind::Current => {}
            PageKind::Next => {
                self.prepare_slot(model.as_ref(), PageKind::Current)?;
                if !self.has_page(PageKind::Next) {
                    log::debug!("turn to next page ignored at end of text");
                    return Ok(());
                }
                self.pages.rotate_forward();
                log::debug!("turned forward, current state {:?}", self.pages.current.state());
                match self.pages.current.state() {
                    PageState::None => {
                        self.prepare_slot(model.as_ref(), PageKind::Previous)?;
                        let end = self
                            .pages
                            .previous
                            .end_cursor()
                            .cloned()
                            .ok_or(LayoutError::BoundaryUnknown {
                                slot: PageKind::Previous,
                            })?;
                        self.pages.current.init_start(end);
                    }
                    PageState::Prepared => {
                        if let Some(end) = self.pages.current.end_cursor().cloned() {
                            self.pages.next.init_start(end);
                        }
                    }
                    PageState::KnowStart | PageState::KnowEnd => {}
                }
            }
            PageKind::Previous => {
                self.prepare_slot(model.as_ref(), PageKind::Current)?;
                if !self.has_page(PageKind::Previous) {
                    log::debug!("turn to previous page ignored at start of text");
                    return Ok(());
                }
                self.pages.rotate_backward();
                log::debug!("turned back, current state {:?}", self.pages.current.state());
                match self.pages.current.state() {
                    PageState::None => {
                        self.prepare_slot(model.as_ref(), PageKind::Next)?;
                        let start = self
                            .pages
                            .next
                            .start_cursor()
                            .cloned()
                            .ok_or(LayoutError::BoundaryUnknown {
                                slot: PageKind::Next,
                            })?;
                        self.pages.current.init_end(start);
                    }
                    PageState::Prepared => {
                        if let Some(start) = self.pages.current.start_cursor().cloned() {
                            self.pages.previous.init_end(start);
                        }
                    }
                    PageState::KnowStart | PageState::KnowEnd => {}
                }
            }
        }
        Ok(())
    }

    /// Start of the current page, preparing it if needed.
    pub fn current_start_cursor(&mut self) -> Result<Option<WordCursor>, LayoutError> {
        Ok(self.page(PageKind::Current)?.start_cursor().cloned())
    }

    /// End of the current page, preparing it if needed.
    pub fn current_end_cursor(&mut self) -> Result<Option<WordCursor>, LayoutError> {
        Ok(self.page(PageKind::Current)?.end_cursor().cloned())
    }

    /// Bookmark for the current page start.
    pub fn reading_position(&mut self) -> Result<Option<ReadingPosition>, LayoutError> {
        Ok(self
            .current_start_cursor()?
            .as_ref()
            .map(ReadingPosition::from))
    }

    /// Jump so the current page starts at `position`.
    pub fn go_to(&mut self, position: ReadingPosition) -> Result<(), LayoutError> {
        let model = self.model.clone().ok_or(LayoutError::NoTextModel)?;
        let cursor = position.to_cursor(model.as_ref())?;
        self.pages.reset_all();
        self.cache.clear();
        self.pages.current.init_start(cursor);
        log::debug!(
            "jumped to {}:{}:{}",
            position.paragraph_index,
            position.element_index,
            position.char_index
        );
        Ok(())
    }

    fn sync_host_size(&mut self) {
        let Some(host) = &self.host else {
            return;
        };
        let (width, height) = host.display_size();
        self.set_display_size(width, height);
    }

    fn prepare_slot(&mut self, model: &dyn TextModel, slot: PageKind) -> Result<(), LayoutError> {
        let viewport = self.config.viewport();
        let old_state = self.pages.get(slot).state();
        self.pages.get_mut(slot).set_viewport(viewport);
        if matches!(old_state, PageState::None | PageState::Prepared) {
            return Ok(());
        }

        self.cache.clear();
        let mut end_moved = false;
        let mut layouter = TextLayouter::new(
            model,
            self.metrics.as_ref(),
            self.hyphenator.as_ref(),
            Arc::clone(&self.base_style),
            self.config.metrics(),
            &mut self.cache,
        );
        let page = self.pages.get(slot);
        let (start, lines, end) = if old_state == PageState::KnowStart {
            let start = page
                .start_cursor()
                .cloned()
                .ok_or(LayoutError::BoundaryUnknown { slot })?;
            let (lines, end) = layouter.fill_page(viewport, &start, None)?;
            (start, lines, end)
        } else {
            let end = page
                .end_cursor()
                .cloned()
                .ok_or(LayoutError::BoundaryUnknown { slot })?;
            let start = layouter.find_page_start(viewport, &end, SizeUnit::Pixel, viewport.height)?;
            let (lines, reached) = layouter.fill_page(viewport, &start, Some(&end))?;
            if is_same_seam(model, &reached, &end) {
                (start, lines, end)
            } else {
                log::warn!(
                    "page fill from {:?} stopped at {:?} instead of {:?}",
                    start.position(),
                    reached.position(),
                    end.position()
                );
                end_moved = true;
                (start, lines, reached)
            }
        };
        let (areas, offsets) = layouter.prepare_text_area(
            viewport,
            self.config.margin_left,
            self.config.margin_top,
            &lines,
        );
        log::debug!(
            "prepared {:?} page from {:?}: {:?}..{:?}, {} lines",
            slot,
            old_state,
            start.position(),
            end.position(),
            lines.len()
        );
        self.pages
            .get_mut(slot)
            .set_prepared(start, end, lines, areas, offsets);
        self.cache.clear();

        if slot == PageKind::Current {
            if old_state != PageState::KnowStart {
                self.pages.previous.reset();
            }
            if old_state != PageState::KnowEnd || end_moved {
                self.pages.next.reset();
            }
        }
        Ok(())
    }
}

/// True when nothing but empty section markers lies between `a` and `b`.
fn is_same_seam(model: &dyn TextModel, a: &WordCursor, b: &WordCursor) -> bool {
    if a.is_same_boundary(b) {
        return true;
    }
    let (first, second) = if a < b { (a, b) } else { (b, a) };
    if !first.is_start_of_paragraph() || !second.is_start_of_paragraph() {
        return false;
    }
    (first.paragraph_index()..second.paragraph_index()).all(|index| {
        model
            .paragraph(index)
            .is_some_and(|paragraph| paragraph.is_end_of_section())
    })
}
