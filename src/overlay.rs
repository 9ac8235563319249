//! Logo placement and overlap correction.
//!
//! Scanners only tell two luminance classes apart. A dark square partly painted
//! over by the logo would read as neither, so every square touched by a visible
//! logo pixel is turned light before the code is drawn.

use image::{imageops, GenericImageView, RgbaImage};

use crate::color::TRANSPARENT;
use crate::debug::DebugSink;
use crate::matrix::ModuleMatrix;

/// Alpha value of a fully transparent 8-bit RGBA pixel.
pub const TRANSPARENT_ALPHA: u8 = 0;

/// Offset that centers an item of length `item` on a canvas of length `canvas`.
///
/// Negative when the item is larger than the canvas.
pub fn center_offset(canvas: u32, item: u32) -> i64 {
    (i64::from(canvas) - i64::from(item)) / 2
}

/// Source-over composites `top` onto `canvas` with their centers aligned.
///
/// Parts of `top` falling outside `canvas` are clipped.
pub fn composite_centered(canvas: &mut RgbaImage, top: &RgbaImage) {
    let x = center_offset(canvas.width(), top.width());
    let y = center_offset(canvas.height(), top.height());
    imageops::overlay(canvas, top, x, y);
}

/// Centers `logo` on a transparent `side × side` canvas.
///
/// The result lines up pixel for pixel with the raw QR raster, which makes
/// module footprints directly comparable.
pub fn logo_overlay(logo: &RgbaImage, side: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(side, side, TRANSPARENT);
    composite_centered(&mut canvas, logo);
    canvas
}

/// Returns `true` if every pixel of the `size × size` block at `(x, y)` is fully transparent.
///
/// The block must lie inside `overlay`.
pub fn footprint_is_transparent(overlay: &RgbaImage, x: u32, y: u32, size: u32) -> bool {
    overlay
        .view(x, y, size, size)
        .pixels()
        .all(|(_, _, p)| p.0[3] == TRANSPARENT_ALPHA)
}

/// Turns light every module whose footprint in `overlay` holds a visible pixel.
///
/// `overlay` must be the logo centered on a canvas of exactly
/// `matrix.size() * square_size` pixels, as built by [`logo_overlay`]. A single
/// non-transparent pixel anywhere in a module's footprint is enough. Returns
/// how many modules overlapped the logo.
///
/// # Panics
///
/// Panics if `overlay` is smaller than the matrix footprint.
pub fn whiten_overlapped_squares(
    matrix: &mut ModuleMatrix,
    overlay: &RgbaImage,
    square_size: u32,
    sink: &dyn DebugSink,
) -> usize {
    let count = matrix.size() as u32;
    debug_assert_eq!(count.checked_mul(square_size), Some(overlay.width()));
    debug_assert_eq!(overlay.width(), overlay.height());

    let mut overlapped = 0;
    for row in 0..count {
        for col in 0..count {
            let x = col * square_size;
            let y = row * square_size;

            if sink.wants_images() {
                let footprint = overlay.view(x, y, square_size, square_size).to_image();
                sink.emit(&format!("debug_{row}_{col}"), &footprint);
            }

            if !footprint_is_transparent(overlay, x, y, square_size) {
                matrix.set_light(row as usize, col as usize);
                overlapped += 1;
                sink.note(&format!("Found non transparent region at ({row}, {col})"));
            }
        }
    }
    tracing::debug!(overlapped, "whitened squares under logo");
    overlapped
}
