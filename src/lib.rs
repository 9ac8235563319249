//! # qrstyle
//!
//! A Rust library for rendering stylized QR codes with a logo in the middle.
//!
//! `qrstyle` encodes a payload at the highest error correction level, lets every dark
//! square take its own color, and places a logo over the center of the symbol. Squares
//! covered by any visible logo pixel are forced light first, so the code stays scannable.
//!
//! ## Features
//!
//! - Error correction level H with the QR version picked from the payload length.
//! - Flat square color, or a per-column / per-square color map.
//! - Logo centered and alpha-composited over the code.
//! - One-module white quiet zone around the result.
//! - Optional debug output of every intermediate stage.
//!
//! ## Example
//!
//! Render a code with a per-column color map:
//!
//! ```rust
//! use image::{Rgba, RgbaImage};
//! use qrstyle::{generate, ColorMap, StyleConfig};
//!
//! let logo = RgbaImage::from_pixel(20, 20, Rgba([255, 165, 0, 255]));
//! let config = StyleConfig::mapped(ColorMap::row(["red", "green", "blue"]), 6);
//! let img = generate("https://example.com", &logo, &config).unwrap();
//! assert_eq!(img.width() % 6, 0);
//! ```
//!
//! Load a logo from disk and save the result:
//!
//! ```rust,no_run
//! use qrstyle::{helper::generate_image_and_save, StyleConfig};
//!
//! let config = StyleConfig::flat("#a59140", 5);
//! generate_image_and_save(
//!     "https://example.com",
//!     "src/logo.png",
//!     &config,
//!     Some("output"),
//!     Some("styled_qr"),
//! )
//! .unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: QR encoding into a module matrix.
//! - [`colorizer`]: Dark square colors.
//! - [`overlay`]: Logo placement and overlap correction.
//! - [`render`]: Rasterizing and final assembly.
//! - [`helper`]: Loading logos and saving images.

pub mod color;
pub mod colorizer;
pub mod config;
pub mod debug;
pub mod error;
pub mod helper;
pub mod matrix;
pub mod overlay;
pub mod pipeline;
pub mod render;

pub use config::{ColorMap, StyleConfig};
pub use error::{QrStyleError, Result};
pub use pipeline::{generate, QrStyle};
