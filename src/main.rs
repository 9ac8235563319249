//! Renders one styled QR code.
//!
//! Payload and logo are fixed below. The style is read from the JSON file named
//! by `QRSTYLE_CONFIG` if set, otherwise the built-in preset is used.

use std::env;

use qrstyle::helper::generate_image_and_save;
use qrstyle::{QrStyleError, StyleConfig};
use tracing_subscriber::EnvFilter;

const PAYLOAD: &str = "http://getsignature.com";
const LOGO_PATH: &str = "testdata/testlogo.png";
const OUTPUT_DIR: &str = "testdata";
const OUTPUT_NAME: &str = "qr_code_image_final";

fn style() -> Result<StyleConfig, QrStyleError> {
    match env::var_os("QRSTYLE_CONFIG") {
        Some(path) => {
            tracing::info!(path = ?path, "loading style configuration");
            StyleConfig::from_json_file(path)
        }
        None => Ok(StyleConfig::flat("#BA0038", 12)),
    }
}

fn main() -> Result<(), QrStyleError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("start");
    let config = style()?;
    let path = generate_image_and_save(
        PAYLOAD,
        LOGO_PATH,
        &config,
        Some(OUTPUT_DIR),
        Some(OUTPUT_NAME),
    )?;
    tracing::info!(path = %path.display(), "done");
    Ok(())
}
