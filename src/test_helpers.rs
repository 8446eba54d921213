//! Shared test utilities for the picquick test suite.
//!
//! Tests work against real (tiny) images in temp directories: a solid-color
//! PNG is enough to exercise decode, resize, and re-encode, and keeps
//! fixtures out of the repository.

use crate::config::GalleryConfig;
use crate::imaging::{ThumbnailError, ThumbnailGenerator};
use crate::layout;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Config rooted at `root` with defaults. Panics if `root` doesn't exist.
pub fn test_config(root: &Path) -> GalleryConfig {
    GalleryConfig::new(root).unwrap()
}

/// Write a solid-color RGB PNG of the given size, creating parent dirs.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([90, 120, 150]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a PNG with an alpha channel (half-transparent solid color).
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbaImage::from_pixel(width, height, image::Rgba([90, 120, 150, 128]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Generator double that records invocations and writes a marker file at
/// the layout path, so existence-based skip logic behaves as it would with
/// the real [`Thumbnailer`](crate::imaging::Thumbnailer).
pub struct RecordingGenerator {
    config: Arc<GalleryConfig>,
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingGenerator {
    pub fn new(config: Arc<GalleryConfig>) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ThumbnailGenerator for RecordingGenerator {
    fn generate(&self, source: &Path) -> Result<PathBuf, ThumbnailError> {
        self.calls.lock().unwrap().push(source.to_path_buf());
        let output = layout::thumbnail_path(source, &self.config);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&output, b"thumb").unwrap();
        Ok(output)
    }
}

/// Generator double that always fails with a decode error.
pub struct FailingGenerator;

impl ThumbnailGenerator for FailingGenerator {
    fn generate(&self, source: &Path) -> Result<PathBuf, ThumbnailError> {
        Err(ThumbnailError::Decode {
            path: source.to_path_buf(),
            source: image::ImageError::IoError(std::io::Error::other("mock failure")),
        })
    }
}
