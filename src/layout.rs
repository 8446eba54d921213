//! Thumbnail store layout.
//!
//! Maps an original image path to its thumbnail path, deterministically, so
//! the scanner, the watcher, and the gallery pages all agree on where a
//! thumbnail lives without talking to each other.
//!
//! Two policies (see [`LayoutMode`]):
//!
//! - **Mirrored**: `thumbs/<relative path>`, preserving subdirectories.
//! - **Flat**: `thumbs/<basename>`, collisions overwrite (last writer wins).
//!
//! The output filename always swaps the source extension for `.jpg`.

use crate::config::{GalleryConfig, LayoutMode};
use std::path::{Path, PathBuf};

/// Compute the thumbnail path for `image` under the configured layout.
///
/// `image` is expected to live under `config.image_root`. A path outside the
/// root (which only happens if a caller bypasses the scanner/watcher
/// filters) degrades to the basename key rather than escaping the thumb
/// root.
pub fn thumbnail_path(image: &Path, config: &GalleryConfig) -> PathBuf {
    let key = match config.layout {
        LayoutMode::Mirrored => image
            .strip_prefix(&config.image_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| basename(image)),
        LayoutMode::Flat => basename(image),
    };
    config.thumb_root.join(key).with_extension("jpg")
}

fn basename(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_config;
    use tempfile::TempDir;

    #[test]
    fn mirrored_preserves_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let image = config.image_root.join("vacation/beach/sunset.png");
        assert_eq!(
            thumbnail_path(&image, &config),
            config.thumb_root.join("vacation/beach/sunset.jpg")
        );
    }

    #[test]
    fn flat_keys_by_basename() {
        let tmp = TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.layout = LayoutMode::Flat;

        let image = config.image_root.join("vacation/beach/sunset.png");
        assert_eq!(
            thumbnail_path(&image, &config),
            config.thumb_root.join("sunset.jpg")
        );
    }

    #[test]
    fn flat_collides_on_same_basename() {
        let tmp = TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.layout = LayoutMode::Flat;

        let a = config.image_root.join("vacation/photo.png");
        let b = config.image_root.join("work/photo.png");
        assert_eq!(thumbnail_path(&a, &config), thumbnail_path(&b, &config));
    }

    #[test]
    fn extension_always_becomes_jpg() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        for name in ["a.jpeg", "b.png", "c.gif", "d.JPG"] {
            let thumb = thumbnail_path(&config.image_root.join(name), &config);
            assert_eq!(thumb.extension().unwrap(), "jpg", "for {name}");
        }
    }

    #[test]
    fn path_outside_root_falls_back_to_basename() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());

        let thumb = thumbnail_path(Path::new("/somewhere/else/pic.png"), &config);
        assert_eq!(thumb, config.thumb_root.join("pic.jpg"));
    }
}
