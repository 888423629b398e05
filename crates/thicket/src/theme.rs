//! Theme metrics and theme file loading.
//!
//! Widgets read a handful of scalar metrics from a [`Theme`]: the inline icon
//! size, the padding unit and the text size. A theme is a plain value; widgets
//! keep a copy and are told explicitly when it changes.
//!
//! Themes can be loaded from TOML. Keys that are missing take their default
//! values:
//!
//! ```
//! use thicket::theme::Theme;
//!
//! let theme = Theme::from_toml_str("padding = 2.0\nicon_inline_size = 16.0")?;
//! assert_eq!(theme.indent_step(), 18.0);
//! assert_eq!(theme.text_size, Theme::default().text_size);
//! # Ok::<(), thicket::theme::ThemeError>(())
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thicket_core::logging::targets;

/// Result type alias for theme operations.
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

/// Errors that can occur while loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// File I/O error.
    #[error("Failed to read theme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The theme file is not valid TOML or has wrongly typed keys.
    #[error("Failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),

    /// A metric is negative, zero where it must be positive, or not finite.
    #[error("Invalid value for theme metric '{field}': {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Scalar metrics consumed by widgets.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Size of inline icons such as the tree expander.
    pub icon_inline_size: f32,
    /// The standard padding unit.
    pub padding: f32,
    /// Nominal text size used to estimate label extents.
    pub text_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            icon_inline_size: 20.0,
            padding: 4.0,
            text_size: 14.0,
        }
    }
}

impl Theme {
    /// Horizontal inset applied per tree depth level.
    #[inline]
    pub fn indent_step(&self) -> f32 {
        self.icon_inline_size + self.padding
    }

    /// Parse a theme from a TOML document.
    pub fn from_toml_str(source: &str) -> ThemeResult<Self> {
        let theme: Theme = toml::from_str(source)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Read and parse a theme file.
    pub fn load(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::THEME, path = %path.display(), "loaded theme");
        Ok(theme)
    }

    /// Check that every metric is usable for layout.
    pub fn validate(&self) -> ThemeResult<()> {
        let metrics = [
            ("icon_inline_size", self.icon_inline_size),
            ("padding", self.padding),
            ("text_size", self.text_size),
        ];
        for (field, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(ThemeError::InvalidValue { field, value });
            }
        }
        if self.icon_inline_size == 0.0 {
            return Err(ThemeError::InvalidValue {
                field: "icon_inline_size",
                value: self.icon_inline_size,
            });
        }
        Ok(())
    }
}
