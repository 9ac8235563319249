//! Error type shared by every rendering stage.

use qrcode::types::QrError;

/// Errors produced while configuring or running the rendering pipeline.
///
/// Failures while writing debug artifacts are not represented here: they are
/// logged and the render carries on.
#[derive(Debug, thiserror::Error)]
pub enum QrStyleError {
    /// The payload does not fit any QR version at error correction level H.
    #[error("QR encode error: {0}")]
    Encoding(#[from] QrError),

    /// The style configuration is malformed.
    #[error("Invalid style configuration: {0}")]
    Configuration(String),

    /// Loading the logo or saving the final image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure outside of debug output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON style configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T, E = QrStyleError> = std::result::Result<T, E>;
