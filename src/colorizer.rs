//! Dark square coloring.

use image::Rgba;

use crate::color::{parse_color, BLACK};
use crate::config::{ColorMap, StyleConfig};
use crate::error::{QrStyleError, Result};

/// Decides the color of each dark square.
///
/// Color strings are resolved when the colorizer is built, so a bad color
/// fails the configuration up front and lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareColorizer {
    /// Every dark square gets the same color.
    Flat(Rgba<u8>),
    /// `colors[col]`, reused for every row.
    Row(Vec<Option<Rgba<u8>>>),
    /// `colors[row][col]`.
    Grid(Vec<Vec<Option<Rgba<u8>>>>),
}

impl Default for SquareColorizer {
    fn default() -> Self {
        Self::Flat(BLACK)
    }
}

impl SquareColorizer {
    /// Builds the colorizer described by `config`.
    ///
    /// A color map takes precedence over `square_color`.
    ///
    /// # Errors
    ///
    /// Returns [`QrStyleError::Configuration`] for any unparsable color string.
    pub fn from_config(config: &StyleConfig) -> Result<Self> {
        match &config.square_color_map {
            Some(ColorMap::Grid(rows)) => Ok(Self::Grid(
                rows.iter()
                    .map(|row| resolve_slots(row))
                    .collect::<Result<_>>()?,
            )),
            Some(ColorMap::Row(colors)) => Ok(Self::Row(resolve_slots(colors)?)),
            None => match &config.square_color {
                Some(color) => Ok(Self::Flat(resolve(color)?)),
                None => Ok(Self::default()),
            },
        }
    }

    /// Color of the dark square at `(row, col)`. Missing map entries are black.
    pub fn color_for(&self, row: usize, col: usize) -> Rgba<u8> {
        let slot = match self {
            Self::Flat(color) => return *color,
            Self::Row(colors) => colors.get(col),
            Self::Grid(rows) => rows.get(row).and_then(|r| r.get(col)),
        };
        slot.copied().flatten().unwrap_or(BLACK)
    }
}

fn resolve(color: &str) -> Result<Rgba<u8>> {
    parse_color(color)
        .ok_or_else(|| QrStyleError::Configuration(format!("unrecognized color {color:?}")))
}

fn resolve_slots(slots: &[Option<String>]) -> Result<Vec<Option<Rgba<u8>>>> {
    slots
        .iter()
        .map(|slot| slot.as_deref().map(resolve).transpose())
        .collect()
}
