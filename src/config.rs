//! Gallery configuration.
//!
//! One [`GalleryConfig`] is built at startup from CLI flags and passed by
//! reference into the scanner, the watcher, and the server. There is no
//! config file and no persisted state beyond the thumbnail files themselves.

use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};

/// Default thumbnail height in pixels.
pub const DEFAULT_TARGET_DIMENSION: u32 = 400;

/// Extensions treated as images out of the box. GIF is opt-in via
/// [`GalleryConfig::with_gif`].
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Where thumbnails go relative to the originals.
///
/// The policies diverge on collisions: `Flat` keys by basename, so two
/// same-named images in different folders silently overwrite one another.
/// That is a documented limitation of the flat layout, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutMode {
    /// Thumbnail tree mirrors the source tree under the thumb root.
    Mirrored,
    /// All thumbnails directly under the thumb root, keyed by basename.
    Flat,
}

/// Runtime configuration shared by every component.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Source of truth for original images. Canonicalized at construction so
    /// watcher event paths (absolute) always strip cleanly against it.
    pub image_root: PathBuf,
    /// Where thumbnails are written: `image_root/thumbs`.
    pub thumb_root: PathBuf,
    /// Target thumbnail height in pixels.
    pub target_dimension: u32,
    /// Thumbnail path policy.
    pub layout: LayoutMode,
    /// Whether the scanner and watcher descend into subdirectories. One flag
    /// for both, so the startup pass and the incremental pass always cover
    /// the same tree.
    pub recursive: bool,
    /// Lowercase extension allow-list.
    pub extensions: Vec<String>,
}

impl GalleryConfig {
    /// Build a config rooted at `image_root` with defaults.
    pub fn new(image_root: &Path) -> std::io::Result<Self> {
        let image_root = fs::canonicalize(image_root)?;
        let thumb_root = image_root.join("thumbs");
        Ok(Self {
            image_root,
            thumb_root,
            target_dimension: DEFAULT_TARGET_DIMENSION,
            layout: LayoutMode::Mirrored,
            recursive: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        })
    }

    /// Add `.gif` to the extension allow-list.
    pub fn with_gif(mut self) -> Self {
        self.extensions.push("gif".to_string());
        self
    }

    /// Whether `path` has an extension on the allow-list (case-insensitive).
    ///
    /// Non-eligible files are ignored everywhere: never scanned, never
    /// watched, never listed.
    pub fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Whether `path` lies inside the thumbnail output tree.
    ///
    /// Thumbnails are themselves eligible by extension, so both the scanner
    /// and the watcher must exclude this subtree or the gallery would start
    /// thumbnailing its own output.
    pub fn in_thumb_root(&self, path: &Path) -> bool {
        path.starts_with(&self.thumb_root)
    }
}
