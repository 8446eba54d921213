//! Startup thumbnail pass.
//!
//! Walks the image root once, generating a thumbnail for every eligible
//! image that doesn't have one yet. Existence is the only cache check — no
//! content hashing — which makes the pass safe to re-run: after a partial
//! failure, a second run skips everything already produced and retries only
//! the missing thumbnails.
//!
//! Per-file failures are logged and skipped; the walk always continues.
//! Images are processed in parallel with [rayon](https://docs.rs/rayon).

use crate::config::GalleryConfig;
use crate::imaging::ThumbnailGenerator;
use crate::layout;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome counts for one scanner pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Thumbnails generated this pass.
    pub created: usize,
    /// Eligible images whose thumbnail already existed.
    pub skipped: usize,
    /// Eligible images that failed to decode or write.
    pub failed: usize,
}

impl ScanReport {
    fn merge(self, other: Self) -> Self {
        Self {
            created: self.created + other.created,
            skipped: self.skipped + other.skipped,
            failed: self.failed + other.failed,
        }
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} skipped, {} failed",
            self.created, self.skipped, self.failed
        )
    }
}

/// Run the startup pass over `config.image_root`.
///
/// Only errors when the thumbnail directory itself cannot be created;
/// everything per-file is counted in the report instead.
pub fn scan(
    config: &GalleryConfig,
    generator: &impl ThumbnailGenerator,
) -> Result<ScanReport, ScanError> {
    fs::create_dir_all(&config.thumb_root)?;

    let images = collect_images(config);
    debug!(count = images.len(), "eligible images found");

    let report = images
        .par_iter()
        .map(|image| {
            let thumb = layout::thumbnail_path(image, config);
            if thumb.exists() {
                ScanReport {
                    skipped: 1,
                    ..Default::default()
                }
            } else {
                match generator.generate(image) {
                    Ok(_) => ScanReport {
                        created: 1,
                        ..Default::default()
                    },
                    Err(e) => {
                        warn!("skipping {}: {e}", image.display());
                        ScanReport {
                            failed: 1,
                            ..Default::default()
                        }
                    }
                }
            }
        })
        .reduce(ScanReport::default, ScanReport::merge);

    Ok(report)
}

/// Enumerate eligible images, excluding the thumbnail tree and hidden
/// entries. Depth is capped to the top level when recursion is off.
fn collect_images(config: &GalleryConfig) -> Vec<PathBuf> {
    let max_depth = if config.recursive { usize::MAX } else { 1 };

    let walker = WalkDir::new(&config.image_root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || (!e.file_name().to_string_lossy().starts_with('.')
                    && e.path() != config.thumb_root)
        });

    let mut images = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cannot read directory entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && config.is_eligible(entry.path()) {
            images.push(entry.into_path());
        }
    }
    images.sort();
    images
}
