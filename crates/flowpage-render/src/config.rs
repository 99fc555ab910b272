use flowpage::{Metrics, TextStyle};

use crate::page::Viewport;

/// Layout configuration for page construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Physical display width.
    pub display_width: i32,
    /// Physical display height.
    pub display_height: i32,
    /// Left margin.
    pub margin_left: i32,
    /// Right margin.
    pub margin_right: i32,
    /// Top margin.
    pub margin_top: i32,
    /// Bottom margin.
    pub margin_bottom: i32,
    /// Display density, used to resolve point lengths.
    pub dpi: u32,
    /// Style every paragraph starts from before its markers apply.
    pub base_style: TextStyle,
}

impl LayoutConfig {
    /// Convenience for a display size with sensible defaults.
    pub fn for_display(width: i32, height: i32) -> Self {
        Self {
            display_width: width,
            display_height: height,
            ..Self::default()
        }
    }

    /// Same config with every margin set to `margin`.
    pub fn with_uniform_margin(mut self, margin: i32) -> Self {
        self.margin_left = margin;
        self.margin_right = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }

    /// Width of the text box.
    pub fn content_width(self) -> i32 {
        (self.display_width - self.margin_left - self.margin_right).max(1)
    }

    /// Height of the text box.
    pub fn content_height(self) -> i32 {
        (self.display_height - self.margin_top - self.margin_bottom).max(1)
    }

    /// Pagination viewport: the text box.
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.content_width(), self.content_height())
    }

    /// Metrics context for resolving style lengths.
    pub fn metrics(self) -> Metrics {
        Metrics::new(self.dpi, self.content_width(), self.content_height())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            display_width: 480,
            display_height: 800,
            margin_left: 32,
            margin_right: 32,
            margin_top: 48,
            margin_bottom: 40,
            dpi: 96,
            base_style: TextStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_box_never_collapses_to_zero() {
        let cfg = LayoutConfig::for_display(40, 40);
        assert_eq!(cfg.content_width(), 1);
        assert_eq!(cfg.content_height(), 1);

        let roomy = LayoutConfig::for_display(200, 100).with_uniform_margin(10);
        assert_eq!(roomy.viewport(), Viewport::new(180, 80));
        assert_eq!(roomy.metrics().full_width, 180);
    }
}
