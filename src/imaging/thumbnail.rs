//! Thumbnail generation.
//!
//! [`Thumbnailer::generate`] is the single write path for thumbnails: both
//! the startup scanner and the filesystem watcher call it. It decodes the
//! source, scales to the configured target height with Lanczos3, flattens
//! any alpha channel, and re-encodes as JPEG at the path the
//! [`layout`](crate::layout) policy dictates.
//!
//! Failure is per-file and final: no retries, and a failed write may leave a
//! truncated file behind for the next scan pass to overwrite.

use crate::config::GalleryConfig;
use crate::imaging::calculations::scale_to_height;
use crate::layout;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageError, ImageReader};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: ImageError,
    },
    #[error("cannot encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: ImageError,
    },
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Seam between the scanner/watcher and the real image pipeline.
///
/// Tests substitute a recording implementation to verify invocation counts
/// (the "scan twice, decode once" property) without touching codecs.
pub trait ThumbnailGenerator: Send + Sync {
    /// Produce the thumbnail for `source`, returning the written path.
    fn generate(&self, source: &Path) -> Result<PathBuf, ThumbnailError>;
}

/// Production generator backed by the `image` crate.
pub struct Thumbnailer {
    config: Arc<GalleryConfig>,
}

impl Thumbnailer {
    pub fn new(config: Arc<GalleryConfig>) -> Self {
        Self { config }
    }
}

impl ThumbnailGenerator for Thumbnailer {
    fn generate(&self, source: &Path) -> Result<PathBuf, ThumbnailError> {
        let decoded = ImageReader::open(source)
            .map_err(|e| ThumbnailError::Io {
                path: source.to_path_buf(),
                source: e,
            })?
            .decode()
            .map_err(|e| ThumbnailError::Decode {
                path: source.to_path_buf(),
                source: e,
            })?;

        let (width, height) = scale_to_height(decoded.dimensions(), self.config.target_dimension);
        let resized = decoded.resize_exact(width, height, FilterType::Lanczos3);

        let output = layout::thumbnail_path(source, &self.config);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| ThumbnailError::Io {
                path: output.clone(),
                source: e,
            })?;
        }

        // Overwrites silently if the thumbnail already exists; skipping is
        // the caller's job.
        let file = fs::File::create(&output).map_err(|e| ThumbnailError::Io {
            path: output.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        // JPEG has no alpha channel; flattening to RGB drops it.
        resized
            .to_rgb8()
            .write_with_encoder(JpegEncoder::new(&mut writer))
            .map_err(|e| match e {
                ImageError::IoError(io) => ThumbnailError::Io {
                    path: output.clone(),
                    source: io,
                },
                other => ThumbnailError::Encode {
                    path: output.clone(),
                    source: other,
                },
            })?;
        writer.flush().map_err(|e| ThumbnailError::Io {
            path: output.clone(),
            source: e,
        })?;

        Ok(output)
    }
}
