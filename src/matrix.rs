//! QR module matrix.
//!
//! Encoding itself is delegated to the `qrcode` crate. This module only keeps
//! the resulting dark/light grid in a form the rest of the pipeline can read
//! by `(row, col)` and that the overlap corrector can whiten in place.

use std::fmt;

use qrcode::{Color, EcLevel, QrCode};

use crate::error::{QrStyleError, Result};

/// A square grid of QR modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    /// Modules per side.
    size: usize,
    /// Row-major module states.
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Encodes `payload` at error correction level H.
    ///
    /// The QR version is left to the encoder, which picks the smallest one
    /// that fits. Level H keeps enough redundancy to survive the squares a
    /// logo will later cover.
    ///
    /// # Errors
    ///
    /// Returns [`QrStyleError::Encoding`] if the payload is too long for any version.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrstyle::matrix::ModuleMatrix;
    ///
    /// let matrix = ModuleMatrix::encode("http://example.com").unwrap();
    /// assert_eq!((matrix.size() - 17) % 4, 0);
    /// ```
    pub fn encode(payload: &str) -> Result<Self> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
        let size = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        tracing::debug!(size, version = ?code.version(), "encoded payload");
        Ok(Self { size, modules })
    }

    /// Builds a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns [`QrStyleError::Configuration`] unless every row is as long as
    /// there are rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let size = rows.len();
        if let Some(bad) = rows.iter().position(|r| r.len() != size) {
            return Err(QrStyleError::Configuration(format!(
                "module matrix must be square: row {bad} has {} modules, expected {size}",
                rows[bad].len()
            )));
        }
        Ok(Self {
            size,
            modules: rows.into_iter().flatten().collect(),
        })
    }

    /// Modules per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at `(row, col)` is dark. Out-of-range positions are light.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }

    /// Forces the module at `(row, col)` to light.
    pub fn set_light(&mut self, row: usize, col: usize) {
        if row < self.size && col < self.size {
            self.modules[row * self.size + col] = false;
        }
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Text rendering with a four-module quiet zone, two characters per module.
impl fmt::Display for ModuleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BORDER: isize = 4;
        let size = self.size as isize;
        for y in -BORDER..size + BORDER {
            for x in -BORDER..size + BORDER {
                let dark = y >= 0 && x >= 0 && self.is_dark(y as usize, x as usize);
                let c = if dark { '█' } else { ' ' };
                write!(f, "{c}{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
