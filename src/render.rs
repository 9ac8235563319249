//! Rasterizing the module matrix and assembling the final image.

use image::{Rgba, RgbaImage};

use crate::color::{TRANSPARENT, WHITE};
use crate::colorizer::SquareColorizer;
use crate::config::MAX_IMAGE_SIDE_PX;
use crate::debug::DebugSink;
use crate::error::{QrStyleError, Result};
use crate::matrix::ModuleMatrix;
use crate::overlay::composite_centered;

/// Side length in pixels of `module_count` squares of `square_size` pixels.
///
/// # Errors
///
/// Returns [`QrStyleError::Configuration`] if the side would exceed
/// [`MAX_IMAGE_SIDE_PX`].
pub fn image_width_pixels(module_count: usize, square_size: u32) -> Result<u32> {
    u32::try_from(module_count)
        .ok()
        .and_then(|count| count.checked_mul(square_size))
        .filter(|&side| side <= MAX_IMAGE_SIDE_PX)
        .ok_or_else(|| {
            QrStyleError::Configuration(format!(
                "{module_count} squares of {square_size} px exceed the \
                 {MAX_IMAGE_SIDE_PX} px image limit"
            ))
        })
}

/// Draws one `square_size` block per module: dark modules in their colorizer
/// color, light modules white.
///
/// The canvas starts fully transparent and every pixel ends up covered.
pub fn render_modules(
    matrix: &ModuleMatrix,
    colorizer: &SquareColorizer,
    square_size: u32,
) -> Result<RgbaImage> {
    let side = image_width_pixels(matrix.size(), square_size)?;
    let mut img = RgbaImage::from_pixel(side, side, TRANSPARENT);

    for row in 0..matrix.size() {
        for col in 0..matrix.size() {
            let color = if matrix.is_dark(row, col) {
                colorizer.color_for(row, col)
            } else {
                WHITE
            };
            fill_square(
                &mut img,
                col as u32 * square_size,
                row as u32 * square_size,
                square_size,
                color,
            );
        }
    }

    Ok(img)
}

fn fill_square(img: &mut RgbaImage, x: u32, y: u32, size: u32, color: Rgba<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            img.put_pixel(x + dx, y + dy, color);
        }
    }
}

/// Builds the final image from a corrected matrix.
///
/// The matrix is rasterized, `overlay` (the logo centered on a canvas of the
/// raw raster size) is composited on top, and the result is centered on a
/// white canvas one module larger on every side. That border is the quiet
/// zone scanners need to find the symbol.
pub fn assemble(
    matrix: &ModuleMatrix,
    colorizer: &SquareColorizer,
    overlay: &RgbaImage,
    square_size: u32,
    sink: &dyn DebugSink,
) -> Result<RgbaImage> {
    // fail before allocating anything if the framed image can't fit
    image_width_pixels(matrix.size() + 2, square_size)?;
    let mut qr = render_modules(matrix, colorizer, square_size)?;
    sink.emit("qr_code_image_before_overlay", &qr);

    composite_centered(&mut qr, overlay);
    add_margin(&qr, matrix.size(), square_size)
}

/// Centers `qr` on an opaque white canvas of `(module_count + 2) * square_size` pixels.
pub fn add_margin(qr: &RgbaImage, module_count: usize, square_size: u32) -> Result<RgbaImage> {
    let side = image_width_pixels(module_count + 2, square_size)?;
    let mut framed = RgbaImage::from_pixel(side, side, WHITE);
    composite_centered(&mut framed, qr);
    Ok(framed)
}
