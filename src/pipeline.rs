//! The render entry point tying the stages together.

use image::RgbaImage;

use crate::colorizer::SquareColorizer;
use crate::config::StyleConfig;
use crate::debug::{DebugSink, DirectorySink, NoopSink};
use crate::error::Result;
use crate::matrix::ModuleMatrix;
use crate::overlay::{logo_overlay, whiten_overlapped_squares};
use crate::render::{assemble, image_width_pixels, render_modules};

/// A validated style, ready to render any number of QR codes.
///
/// # Example
///
/// ```rust
/// use image::{Rgba, RgbaImage};
/// use qrstyle::{QrStyle, StyleConfig};
///
/// let style = QrStyle::new(StyleConfig::flat("#BA0038", 4)).unwrap();
/// let logo = RgbaImage::from_pixel(12, 12, Rgba([0, 0, 255, 255]));
/// let img = style.generate("http://example.com", &logo).unwrap();
/// assert_eq!(img.width(), img.height());
/// ```
#[derive(Debug, Clone)]
pub struct QrStyle {
    config: StyleConfig,
    colorizer: SquareColorizer,
    square_size: u32,
}

impl QrStyle {
    /// Validates `config` and resolves its colors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QrStyleError::Configuration`] for a square size that is
    /// not positive or too large, or for any color string that does not parse.
    pub fn new(config: StyleConfig) -> Result<Self> {
        let square_size = config.square_size()?;
        let colorizer = SquareColorizer::from_config(&config)?;
        Ok(Self {
            config,
            colorizer,
            square_size,
        })
    }

    /// The configuration this style was built from.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// The resolved dark square colors.
    pub fn colorizer(&self) -> &SquareColorizer {
        &self.colorizer
    }

    /// Renders `payload` with `logo` in the middle.
    ///
    /// Intermediate images go to the configured debug directory when `debug` is set.
    pub fn generate(&self, payload: &str, logo: &RgbaImage) -> Result<RgbaImage> {
        if self.config.debug {
            let sink = DirectorySink::new(&self.config.debug_dir);
            self.generate_with_sink(payload, logo, &sink)
        } else {
            self.generate_with_sink(payload, logo, &NoopSink)
        }
    }

    /// Renders `payload` with `logo` in the middle, reporting intermediate stages to `sink`.
    ///
    /// # Errors
    ///
    /// Besides encoding failures, returns [`crate::QrStyleError::Configuration`]
    /// when the encoded symbol is too large to draw at the configured square size.
    pub fn generate_with_sink(
        &self,
        payload: &str,
        logo: &RgbaImage,
        sink: &dyn DebugSink,
    ) -> Result<RgbaImage> {
        let mut matrix = self.generate_qrcode_matrix(payload, sink)?;

        let side = image_width_pixels(matrix.size(), self.square_size)?;
        let overlay = logo_overlay(logo, side);
        whiten_overlapped_squares(&mut matrix, &overlay, self.square_size, sink);

        let img = assemble(&matrix, &self.colorizer, &overlay, self.square_size, sink)?;
        tracing::debug!(
            modules = matrix.size(),
            width = img.width(),
            "rendered styled QR code"
        );
        Ok(img)
    }

    /// Encodes `payload` and the corrections the logo forces on it, without drawing.
    pub fn corrected_matrix(&self, payload: &str, logo: &RgbaImage) -> Result<ModuleMatrix> {
        let mut matrix = self.encode_checked(payload)?;
        let side = image_width_pixels(matrix.size(), self.square_size)?;
        let overlay = logo_overlay(logo, side);
        whiten_overlapped_squares(&mut matrix, &overlay, self.square_size, &NoopSink);
        Ok(matrix)
    }

    fn generate_qrcode_matrix(&self, payload: &str, sink: &dyn DebugSink) -> Result<ModuleMatrix> {
        let matrix = self.encode_checked(payload)?;
        if sink.wants_images() {
            let before = render_modules(&matrix, &self.colorizer, self.square_size)?;
            sink.emit("qr_code_image_before_modification", &before);
            sink.note(&format!("QR matrix before modification:\n{matrix}"));
        }
        Ok(matrix)
    }

    /// Encodes `payload` and makes sure the framed image fits before anything is allocated.
    fn encode_checked(&self, payload: &str) -> Result<ModuleMatrix> {
        let matrix = ModuleMatrix::encode(payload)?;
        image_width_pixels(matrix.size() + 2, self.square_size)?;
        Ok(matrix)
    }
}

/// Renders `payload` with `logo` centered, styled by `config`.
///
/// Shorthand for [`QrStyle::new`] followed by [`QrStyle::generate`].
pub fn generate(payload: &str, logo: &RgbaImage, config: &StyleConfig) -> Result<RgbaImage> {
    QrStyle::new(config.clone())?.generate(payload, logo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{parse_color, BLACK, WHITE};
    use crate::config::{ColorMap, MAX_IMAGE_SIDE_PX};
    use crate::error::QrStyleError;
    use crate::overlay::footprint_is_transparent;
    use image::Rgba;

    const PAYLOAD: &str = "http://example.com";
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn transparent_logo() -> RgbaImage {
        RgbaImage::new(10, 10)
    }

    fn opaque_logo(side: u32) -> RgbaImage {
        RgbaImage::from_pixel(side, side, RED)
    }

    fn flat_black(square: u32) -> StyleConfig {
        StyleConfig::flat("black", i64::from(square))
    }

    #[test]
    fn test_output_side_includes_margin() {
        let matrix = ModuleMatrix::encode(PAYLOAD).unwrap();
        for square in [1, 5, 12] {
            let img = generate(PAYLOAD, &transparent_logo(), &flat_black(square)).unwrap();
            let expected = (matrix.size() as u32 + 2) * square;
            assert_eq!(img.dimensions(), (expected, expected));
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = StyleConfig::mapped(ColorMap::row(["red", "green", "blue"]), 3);
        let a = generate(PAYLOAD, &opaque_logo(20), &config).unwrap();
        let b = generate(PAYLOAD, &opaque_logo(20), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_margin_is_opaque_white() {
        let square = 4;
        let config = StyleConfig::flat("navy", i64::from(square));
        let img = generate(PAYLOAD, &opaque_logo(500), &config).unwrap();
        let side = img.width();
        for (x, y, p) in img.enumerate_pixels() {
            let ring = x < square || y < square || x >= side - square || y >= side - square;
            if ring {
                assert_eq!(*p, WHITE, "margin pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_plain_black_and_white_without_logo() {
        let square = 5;
        let style = QrStyle::new(flat_black(square)).unwrap();
        let matrix = ModuleMatrix::encode(PAYLOAD).unwrap();
        let corrected = style.corrected_matrix(PAYLOAD, &transparent_logo()).unwrap();
        assert_eq!(corrected, matrix);

        let img = style.generate(PAYLOAD, &transparent_logo()).unwrap();
        for row in 0..matrix.size() {
            for col in 0..matrix.size() {
                let p = img.get_pixel((col as u32 + 1) * square, (row as u32 + 1) * square);
                let expected = if matrix.is_dark(row, col) { BLACK } else { WHITE };
                assert_eq!(*p, expected, "module ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_grid_map_paints_every_dark_module() {
        let square = 3;
        let matrix = ModuleMatrix::encode(PAYLOAD).unwrap();
        let palette = ["red", "green", "blue", "navy", "#a59140"];
        let size = matrix.size();
        let grid = ColorMap::grid(
            (0..size).map(|row| (0..size).map(move |col| palette[(row * size + col) % 5])),
        );
        let style = QrStyle::new(StyleConfig::mapped(grid, i64::from(square))).unwrap();
        assert!(matches!(style.colorizer(), SquareColorizer::Grid(rows) if rows.len() == size));

        let img = style.generate(PAYLOAD, &transparent_logo()).unwrap();
        for row in 0..size {
            for col in 0..size {
                let p = img.get_pixel((col as u32 + 1) * square, (row as u32 + 1) * square);
                let expected = if matrix.is_dark(row, col) {
                    parse_color(palette[(row * size + col) % 5]).unwrap()
                } else {
                    WHITE
                };
                assert_eq!(*p, expected, "module ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_logo_over_center_three_by_three() {
        let square = 5;
        let style = QrStyle::new(flat_black(square)).unwrap();
        let original = ModuleMatrix::encode(PAYLOAD).unwrap();
        let corrected = style.corrected_matrix(PAYLOAD, &opaque_logo(3 * square)).unwrap();

        // odd module count: a 3-module logo sits exactly on the center 3x3
        let center = original.size() / 2;
        let covered = center - 1..=center + 1;
        for row in 0..original.size() {
            for col in 0..original.size() {
                if covered.contains(&row) && covered.contains(&col) {
                    assert!(!corrected.is_dark(row, col), "module ({row}, {col})");
                } else {
                    assert_eq!(
                        corrected.is_dark(row, col),
                        original.is_dark(row, col),
                        "module ({row}, {col})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_overlap_invariant_holds_in_final_image() {
        let square = 6;
        let logo = opaque_logo(37);
        let style = QrStyle::new(flat_black(square)).unwrap();
        let corrected = style.corrected_matrix(PAYLOAD, &logo).unwrap();
        let overlay = logo_overlay(&logo, corrected.size() as u32 * square);
        for row in 0..corrected.size() {
            for col in 0..corrected.size() {
                let (x, y) = (col as u32 * square, row as u32 * square);
                if !footprint_is_transparent(&overlay, x, y, square) {
                    assert!(!corrected.is_dark(row, col), "module ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_debug_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = flat_black(2).with_debug(dir.path());
        let style = QrStyle::new(config).unwrap();
        assert!(style.config().debug);
        assert_eq!(style.config().debug_dir, dir.path());
        let debug_img = style.generate(PAYLOAD, &opaque_logo(4)).unwrap();

        for name in [
            "qr_code_image_before_modification.png",
            "qr_code_image_before_overlay.png",
            "debug_0_0.png",
        ] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }

        let plain = generate(PAYLOAD, &opaque_logo(4), &flat_black(2)).unwrap();
        assert_eq!(debug_img, plain);
    }

    #[test]
    fn test_bad_config_fails_before_rendering() {
        let err = generate(PAYLOAD, &transparent_logo(), &flat_black(0)).unwrap_err();
        assert!(matches!(err, QrStyleError::Configuration(_)));

        let err = QrStyle::new(StyleConfig::flat("not a color", 5)).unwrap_err();
        assert!(matches!(err, QrStyleError::Configuration(_)));
    }

    #[test]
    fn test_huge_square_size_is_a_configuration_error() {
        let config = StyleConfig::flat("black", 200_000_000);
        let err = generate(PAYLOAD, &RgbaImage::new(1, 1), &config).unwrap_err();
        assert!(matches!(err, QrStyleError::Configuration(_)));
    }

    #[test]
    fn test_square_size_too_large_for_encoded_symbol() {
        // fits a version 1 symbol, not the larger one this payload needs
        let square = MAX_IMAGE_SIDE_PX / 23;
        let style = QrStyle::new(flat_black(square)).unwrap();
        let matrix = ModuleMatrix::encode(PAYLOAD).unwrap();
        assert!(matrix.size() > 21);

        let err = style.generate(PAYLOAD, &transparent_logo()).unwrap_err();
        assert!(matches!(err, QrStyleError::Configuration(_)));
        let err = style.corrected_matrix(PAYLOAD, &transparent_logo()).unwrap_err();
        assert!(matches!(err, QrStyleError::Configuration(_)));
    }

    #[test]
    fn test_payload_too_long() {
        let err = generate(&"x".repeat(4000), &transparent_logo(), &StyleConfig::default())
            .unwrap_err();
        assert!(matches!(err, QrStyleError::Encoding(_)));
    }
}
