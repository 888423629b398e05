//! Label widget implementation.
//!
//! [`Label`] displays a single line of text. Text shaping happens in the
//! painter; the label only estimates its extent from the character count and
//! the theme's text size so layouts can reserve space for it.

use thicket_render::Size;

use crate::theme::Theme;
use crate::widget::{CanvasObject, WidgetBase};

/// Average glyph advance as a fraction of the text size.
const AVERAGE_ADVANCE: f32 = 0.6;

/// Line height as a multiple of the text size.
const LINE_HEIGHT: f32 = 1.25;

/// A single line of text.
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    text: String,
    theme: Theme,
}

impl Label {
    /// Create a label with the default theme.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            theme: Theme::default(),
        }
    }

    /// Set the theme used for measuring using builder pattern.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Get the label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the label text, requesting a repaint only if it changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.base.update();
        }
    }
}

impl CanvasObject for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_theme(&mut self, theme: &Theme) {
        if self.theme != *theme {
            self.theme = *theme;
            self.base.update();
        }
    }

    fn min_size(&self) -> Size {
        let glyphs = self.text.chars().count() as f32;
        let padding = self.theme.padding * 2.0;
        Size::new(
            glyphs * self.theme.text_size * AVERAGE_ADVANCE + padding,
            self.theme.text_size * LINE_HEIGHT + padding,
        )
    }
}
