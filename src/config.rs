//! Style configuration.
//!
//! A [`StyleConfig`] is a plain value handed to [`crate::QrStyle::new`]. It can be
//! built in code, through one of the presets, or deserialized from JSON:
//!
//! ```json
//! {
//!     "square_size_px": 12,
//!     "square_color_map": ["red", "green", "blue"],
//!     "debug": false
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QrStyleError, Result};

/// Largest side, in pixels, of any image the pipeline allocates.
pub const MAX_IMAGE_SIDE_PX: u32 = 16_384;

/// Modules per side of the smallest QR symbol (version 1).
pub const MIN_MODULE_COUNT: u32 = 21;

/// Per-position color overrides for dark squares.
///
/// The shape is decided once, when the map is built or parsed: a list of
/// lists is a [`ColorMap::Grid`], a flat list is a [`ColorMap::Row`] applied
/// to every row. `null` entries fall back to black.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorMap {
    /// `map[row][col]` gives the color of each square.
    Grid(Vec<Vec<Option<String>>>),
    /// `map[col]` gives the color of the squares in column `col`, for every row.
    Row(Vec<Option<String>>),
}

impl ColorMap {
    /// Builds a one-dimensional map from color strings.
    pub fn row<S: Into<String>>(colors: impl IntoIterator<Item = S>) -> Self {
        Self::Row(colors.into_iter().map(|c| Some(c.into())).collect())
    }

    /// Builds a two-dimensional map from rows of color strings.
    pub fn grid<S, R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        Self::Grid(
            rows.into_iter()
                .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        )
    }
}

/// Options controlling how a QR code is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Side length in output pixels of one module. Must be positive.
    pub square_size_px: i64,
    /// Color of dark squares when no color map is set. Black when `None`.
    pub square_color: Option<String>,
    /// Per-position override of dark square colors.
    pub square_color_map: Option<ColorMap>,
    /// Write intermediate images to `debug_dir`.
    pub debug: bool,
    /// Where debug images go.
    pub debug_dir: PathBuf,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            square_size_px: 5,
            square_color: None,
            square_color_map: None,
            debug: false,
            debug_dir: PathBuf::from("debug"),
        }
    }
}

impl StyleConfig {
    /// A single-color style.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrstyle::config::StyleConfig;
    ///
    /// let config = StyleConfig::flat("#a59140", 5);
    /// assert_eq!(config.square_size_px, 5);
    /// ```
    pub fn flat(color: impl Into<String>, square_size_px: i64) -> Self {
        Self {
            square_size_px,
            square_color: Some(color.into()),
            ..Self::default()
        }
    }

    /// A style driven by a per-position color map.
    pub fn mapped(map: ColorMap, square_size_px: i64) -> Self {
        Self {
            square_size_px,
            square_color_map: Some(map),
            ..Self::default()
        }
    }

    /// Enables debug output into `dir`.
    pub fn with_debug(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug = true;
        self.debug_dir = dir.into();
        self
    }

    /// Parses a configuration from a JSON document. Missing keys take their default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// The square size as a pixel count, checked against [`MAX_IMAGE_SIDE_PX`].
    ///
    /// The smallest QR symbol plus its margin must fit; whether the actual
    /// symbol fits is checked again once the payload is encoded.
    pub fn square_size(&self) -> Result<u32> {
        let size = self.square_size_px;
        if size <= 0 {
            return Err(QrStyleError::Configuration(format!(
                "square_size_px must be a positive integer, got {size}"
            )));
        }
        let max = i64::from(MAX_IMAGE_SIDE_PX / (MIN_MODULE_COUNT + 2));
        if size > max {
            return Err(QrStyleError::Configuration(format!(
                "square_size_px {size} exceeds {max}, the largest that fits a \
                 {MAX_IMAGE_SIDE_PX} px image"
            )));
        }
        // bounded by max above
        Ok(size as u32)
    }

    /// Checks the options that do not depend on color parsing.
    ///
    /// Color strings are checked when the colorizer is built.
    pub fn validate(&self) -> Result<()> {
        self.square_size().map(|_| ())
    }
}
