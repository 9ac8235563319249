use crate::config::StyleConfig;
use crate::error::Result;
use crate::pipeline::generate;

use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- File utilities ----*/

/// Loads a logo from disk as an RGBA image.
///
/// Any format enabled in the `image` crate is accepted; PNG with an alpha
/// channel is what the overlap correction is designed around.
///
/// # Errors
///
/// Returns [`crate::QrStyleError::Image`] if the file can't be read or decoded.
pub fn load_logo(path: impl AsRef<Path>) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Saves an image as PNG and returns the path written.
///
/// # Arguments
///
/// * `img` - The image to save.
/// * `directory_path` - Optional. The directory where the image will be saved. If not provided,
///   the default directory is "generated".
/// * `filename` - Optional. The file name without extension. If not provided, a timestamp-based
///   filename will be used.
///
/// # Errors
///
/// Returns an error if the directory can't be created or the image can't be encoded.
///
/// # Example
///
/// ```rust,no_run
/// use image::RgbaImage;
/// use qrstyle::helper::save_image;
///
/// let img = RgbaImage::new(10, 10);
/// let path = save_image(&img, Some("images"), Some("qr_code")).unwrap();
/// assert!(path.ends_with("qr_code.png"));
/// ```
pub fn save_image(
    img: &RgbaImage,
    directory_path: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.to_string(),
        None => {
            // clock before the epoch only happens on broken systems, fall back to zero
            let since_the_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
            format!("{}", since_the_epoch.as_millis())
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = Path::new(directory_path).join(format!("{}.png", filename));
    img.save(&file_path)?;
    tracing::info!(path = %file_path.display(), "Writing final result image");
    Ok(file_path)
}

/// Generates a styled QR code with the logo at `logo_path` and saves it.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `logo_path` - Path of the logo image to place in the center.
/// * `config` - Square size, colors and debug options.
/// * `directory` - Optional. Output directory, "generated" by default.
/// * `filename` - Optional. File name without extension, timestamp by default.
///
/// # Example
///
/// ```rust,no_run
/// use qrstyle::{helper::generate_image_and_save, StyleConfig};
///
/// let config = StyleConfig::flat("#a59140", 5);
/// let path = generate_image_and_save(
///     "http://example.com",
///     "logo.png",
///     &config,
///     Some("output"),
///     Some("styled_qr"),
/// )
/// .unwrap();
/// println!("{}", path.display());
/// ```
pub fn generate_image_and_save(
    content: &str,
    logo_path: impl AsRef<Path>,
    config: &StyleConfig,
    directory: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let logo = load_logo(logo_path)?;
    let img = generate(content, &logo, config)?;
    save_image(&img, directory, filename)
}
