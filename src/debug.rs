//! Debug output for intermediate rendering stages.
//!
//! Every stage talks to a [`DebugSink`]. When debugging is off the pipeline
//! uses [`NoopSink`], otherwise [`DirectorySink`] writes each image as a PNG.
//! Debug output is diagnostic only: write failures are logged, never returned.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;

/// Receiver for intermediate images and notices.
pub trait DebugSink {
    /// Whether the sink will do anything with images.
    ///
    /// Stages skip building images that exist only for debugging when this is `false`.
    fn wants_images(&self) -> bool {
        true
    }

    /// Records an intermediate image under `label`.
    fn emit(&self, label: &str, image: &RgbaImage);

    /// Records a free-form notice.
    fn note(&self, message: &str) {
        tracing::debug!("{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn wants_images(&self) -> bool {
        false
    }

    fn emit(&self, _label: &str, _image: &RgbaImage) {}

    fn note(&self, _message: &str) {}
}

/// Writes every image to `<dir>/<label>.png`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// A sink writing into `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an image with `label` is written to.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{label}.png"))
    }
}

impl DebugSink for DirectorySink {
    fn emit(&self, label: &str, image: &RgbaImage) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), %err, "cannot create debug directory");
            return;
        }
        let path = self.path_for(label);
        match image.save(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "Writing debug image"),
            Err(err) => tracing::warn!(path = %path.display(), %err, "failed to write debug image"),
        }
    }

    fn note(&self, message: &str) {
        tracing::info!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_noop_sink_wants_nothing() {
        let sink = NoopSink;
        assert!(!sink.wants_images());
        sink.emit("ignored", &RgbaImage::new(1, 1));
    }

    #[test]
    fn test_directory_sink_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested"));
        assert!(sink.wants_images());
        assert_eq!(sink.dir(), dir.path().join("nested").as_path());
        assert_eq!(sink.path_for("stage"), dir.path().join("nested").join("stage.png"));

        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        sink.emit("stage", &img);

        let written = image::open(sink.path_for("stage")).unwrap().to_rgba8();
        assert_eq!(written, img);
    }

    #[test]
    fn test_directory_sink_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let sink = DirectorySink::new(blocker.clone());
        sink.emit("stage", &RgbaImage::new(1, 1));
        assert!(!sink.path_for("stage").exists());
    }
}
