//! embedded-graphics metrics and renderer for `flowpage-render` pages.
//!
//! [`MonoFontMetrics`] measures text with the built-in mono fonts and is meant
//! to be installed on the paginator with
//! [`Paginator::with_metrics`](flowpage_render::Paginator::with_metrics), so
//! that [`EgRenderer`] draws glyphs exactly where layout placed them.

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

use embedded_graphics::{
    mono_font::{
        ascii::{
            FONT_10X20, FONT_6X13_BOLD, FONT_6X13_ITALIC, FONT_6X9, FONT_7X13_BOLD,
            FONT_7X13_ITALIC, FONT_7X14, FONT_7X14_BOLD, FONT_8X13, FONT_8X13_BOLD,
            FONT_8X13_ITALIC, FONT_9X18, FONT_9X18_BOLD,
        },
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use flowpage::{TextStyle, WordElement};
use flowpage_render::{AreaKind, ElementArea, MetricsProvider, Page};
use std::borrow::Cow;
use std::sync::Arc;

/// Backend-local font identifier: size bucket and variant packed in a byte.
pub type FontId = u8;

/// Why style-to-font mapping had to fall back to a nearby face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFallbackReason {
    UnsupportedWeightItalic,
    UnknownFontId,
}

/// Mono-font text measurement.
///
/// Sizes are bucketed: below 16px, 16px, 20px, and 24px and up.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFontMetrics;

impl MonoFontMetrics {
    const SIZE_SMALL: FontId = 0;
    const SIZE_MEDIUM: FontId = 1;
    const SIZE_LARGE: FontId = 2;
    const SIZE_XL: FontId = 3;

    const VARIANT_REGULAR: FontId = 0;
    const VARIANT_ITALIC: FontId = 1;
    const VARIANT_BOLD: FontId = 2;
    const VARIANT_BOLD_ITALIC: FontId = 3;

    /// Create a shared metrics trait object for paginator wiring.
    pub fn shared() -> Arc<dyn MetricsProvider> {
        Arc::new(Self)
    }

    fn encode_font_id(size_bucket: FontId, variant: FontId) -> FontId {
        (size_bucket << 2) | (variant & 0x03)
    }

    fn decode_font_id(font_id: FontId) -> (FontId, FontId) {
        ((font_id >> 2) & 0x03, font_id & 0x03)
    }

    fn size_bucket_for(style: &TextStyle) -> FontId {
        if style.font_size_px >= 24.0 {
            Self::SIZE_XL
        } else if style.font_size_px >= 20.0 {
            Self::SIZE_LARGE
        } else if style.font_size_px >= 16.0 {
            Self::SIZE_MEDIUM
        } else {
            Self::SIZE_SMALL
        }
    }

    fn variant_for(style: &TextStyle) -> FontId {
        match (style.bold, style.italic) {
            (true, true) => Self::VARIANT_BOLD_ITALIC,
            (true, false) => Self::VARIANT_BOLD,
            (false, true) => Self::VARIANT_ITALIC,
            (false, false) => Self::VARIANT_REGULAR,
        }
    }

    /// Font id selected for `style`.
    pub fn font_id(style: &TextStyle) -> FontId {
        Self::encode_font_id(Self::size_bucket_for(style), Self::variant_for(style))
    }

    /// Font for `font_id`, with the reason when a substitute was used.
    pub fn font_for(font_id: FontId) -> (&'static MonoFont<'static>, Option<FontFallbackReason>) {
        let (size_bucket, variant) = Self::decode_font_id(font_id);
        match (size_bucket, variant) {
            (Self::SIZE_SMALL, Self::VARIANT_REGULAR) => (&FONT_6X9, None),
            (Self::SIZE_SMALL, Self::VARIANT_ITALIC) => (&FONT_6X13_ITALIC, None),
            (Self::SIZE_SMALL, Self::VARIANT_BOLD) => (&FONT_6X13_BOLD, None),
            (Self::SIZE_SMALL, Self::VARIANT_BOLD_ITALIC) => (
                &FONT_6X13_BOLD,
                Some(FontFallbackReason::UnsupportedWeightItalic),
            ),
            (Self::SIZE_MEDIUM, Self::VARIANT_REGULAR) => (&FONT_7X14, None),
            (Self::SIZE_MEDIUM, Self::VARIANT_ITALIC) => (&FONT_7X13_ITALIC, None),
            (Self::SIZE_MEDIUM, Self::VARIANT_BOLD) => (&FONT_7X14_BOLD, None),
            (Self::SIZE_MEDIUM, Self::VARIANT_BOLD_ITALIC) => (
                &FONT_7X13_BOLD,
                Some(FontFallbackReason::UnsupportedWeightItalic),
            ),
            (Self::SIZE_LARGE, Self::VARIANT_REGULAR) => (&FONT_8X13, None),
            (Self::SIZE_LARGE, Self::VARIANT_ITALIC) => (&FONT_8X13_ITALIC, None),
            (Self::SIZE_LARGE, Self::VARIANT_BOLD) => (&FONT_8X13_BOLD, None),
            (Self::SIZE_LARGE, Self::VARIANT_BOLD_ITALIC) => (
                &FONT_8X13_BOLD,
                Some(FontFallbackReason::UnsupportedWeightItalic),
            ),
            (Self::SIZE_XL, Self::VARIANT_REGULAR) => (&FONT_10X20, None),
            (Self::SIZE_XL, Self::VARIANT_ITALIC) => (
                &FONT_9X18,
                Some(FontFallbackReason::UnsupportedWeightItalic),
            ),
            (Self::SIZE_XL, Self::VARIANT_BOLD) => (&FONT_9X18_BOLD, None),
            (Self::SIZE_XL, Self::VARIANT_BOLD_ITALIC) => (
                &FONT_9X18_BOLD,
                Some(FontFallbackReason::UnsupportedWeightItalic),
            ),
            _ => (&FONT_8X13, Some(FontFallbackReason::UnknownFontId)),
        }
    }

    /// Font used to draw `style`.
    pub fn font_for_style(style: &TextStyle) -> &'static MonoFont<'static> {
        Self::font_for(Self::font_id(style)).0
    }

    fn advance(font: &MonoFont<'_>) -> i32 {
        (font.character_size.width + font.character_spacing) as i32
    }
}

impl MetricsProvider for MonoFontMetrics {
    fn word_width(
        &self,
        word: &WordElement,
        start: usize,
        len: usize,
        add_hyphen: bool,
        style: &TextStyle,
    ) -> i32 {
        let font = Self::font_for_style(style);
        let mut chars = normalize_text_for_mono(word.slice(start, len)).chars().count() as i32;
        if add_hyphen {
            chars += 1;
        }
        chars * Self::advance(font)
    }

    fn space_width(&self, style: &TextStyle) -> i32 {
        Self::advance(Self::font_for_style(style))
    }

    fn text_height(&self, style: &TextStyle) -> i32 {
        Self::font_for_style(style).baseline as i32 + 1
    }

    fn descent(&self, style: &TextStyle) -> i32 {
        let font = Self::font_for_style(style);
        (font.character_size.height as i32 - font.baseline as i32 - 1).max(0)
    }
}

fn normalize_text_for_mono(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| {
        matches!(
            ch,
            '\u{00A0}' // nbsp
                | '\u{2010}' // hyphen
                | '\u{2013}' // en dash
                | '\u{2014}' // em dash
                | '\u{2018}' // left single quote
                | '\u{2019}' // right single quote
                | '\u{201C}' // left double quote
                | '\u{201D}' // right double quote
                | '\u{2026}' // ellipsis
        )
    }) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00A0}' => out.push(' '),
            '\u{2010}' | '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Renderer options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EgRenderConfig {
    /// Clear display before drawing page.
    pub clear_first: bool,
    /// Draw underlines for underlined styles.
    pub underlines: bool,
}

impl Default for EgRenderConfig {
    fn default() -> Self {
        Self {
            clear_first: true,
            underlines: true,
        }
    }
}

/// What a render pass drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EgRenderDiagnostics {
    pub words: usize,
    pub hyphens: usize,
    pub underlines: usize,
    /// Areas drawn with a substitute font.
    pub font_fallbacks: usize,
}

/// Draws prepared pages onto embedded-graphics targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct EgRenderer {
    cfg: EgRenderConfig,
}

impl EgRenderer {
    pub fn new(cfg: EgRenderConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> EgRenderConfig {
        self.cfg
    }

    /// Render every area of `page`.
    pub fn render_page<D>(&self, page: &Page, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.render_page_with_diagnostics(page, display).map(|_| ())
    }

    /// Render a page and report what was drawn.
    pub fn render_page_with_diagnostics<D>(
        &self,
        page: &Page,
        display: &mut D,
    ) -> Result<EgRenderDiagnostics, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.cfg.clear_first {
            display.clear(BinaryColor::Off)?;
        }
        let diagnostics = self.render_areas(page.areas(), display)?;
        log::debug!(
            "rendered page: {} words, {} hyphens, {} underlines",
            diagnostics.words,
            diagnostics.hyphens,
            diagnostics.underlines
        );
        Ok(diagnostics)
    }

    /// Render `areas` without clearing the display.
    pub fn render_areas<D>(
        &self,
        areas: &[ElementArea],
        display: &mut D,
    ) -> Result<EgRenderDiagnostics, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut diagnostics = EgRenderDiagnostics::default();
        for area in areas {
            self.draw_area(display, area, &mut diagnostics)?;
        }
        Ok(diagnostics)
    }

    fn draw_area<D>(
        &self,
        display: &mut D,
        area: &ElementArea,
        diagnostics: &mut EgRenderDiagnostics,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if area.kind == AreaKind::Word {
            let (font, fallback) = MonoFontMetrics::font_for(MonoFontMetrics::font_id(&area.style));
            if fallback.is_some() {
                diagnostics.font_fallbacks += 1;
            }
            let style = MonoTextStyle::new(font, BinaryColor::On);
            let text = normalize_text_for_mono(&area.text);
            let end = Text::with_baseline(
                text.as_ref(),
                Point::new(area.x0, area.baseline),
                style,
                Baseline::Alphabetic,
            )
            .draw(display)?;
            diagnostics.words += 1;
            if area.add_hyphenation_sign {
                Text::with_baseline("-", end, style, Baseline::Alphabetic).draw(display)?;
                diagnostics.hyphens += 1;
            }
        }
        if self.cfg.underlines && area.style.underline && area.x1 >= area.x0 {
            let y = area.baseline + 1;
            Line::new(Point::new(area.x0, y), Point::new(area.x1, y))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(display)?;
            diagnostics.underlines += 1;
        }
        Ok(())
    }
}
