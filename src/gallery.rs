//! Read-only gallery view model.
//!
//! Everything here is a filtered directory listing computed per request —
//! no caching, so pages are always consistent with what the scanner and
//! watcher have produced on disk so far.
//!
//! Folder names arriving from URLs are validated as single path components:
//! anything containing a separator or starting with a dot is treated as not
//! found, never resolved.

use crate::config::{GalleryConfig, LayoutMode};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// Requested folder doesn't exist (surfaced to HTTP as 404).
    #[error("not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A thumbnail paired with its original, when one could be matched by stem.
///
/// A `None` source means a stale thumbnail whose original is gone (or, in
/// flat layout, a thumbnail keyed from another folder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub thumbnail: String,
    pub source: Option<String>,
}

/// View model for one folder's gallery page.
#[derive(Debug, Clone)]
pub struct FolderView {
    pub folder: String,
    pub entries: Vec<GalleryEntry>,
}

/// List gallery folders: the subdirectories of the image root, excluding
/// the thumbnail tree and hidden directories. Sorted by name.
pub fn list_folders(config: &GalleryConfig) -> Result<Vec<String>, GalleryError> {
    let mut folders: Vec<String> = fs::read_dir(&config.image_root)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir() && e.path() != config.thumb_root)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.'))
        .collect();
    folders.sort();
    Ok(folders)
}

/// List the current thumbnails for `folder`, sorted by name.
///
/// Not-found is keyed on the *source* folder: a folder that exists but has
/// no thumbnails yet yields an empty list, not an error.
pub fn list_thumbnails(config: &GalleryConfig, folder: &str) -> Result<Vec<String>, GalleryError> {
    validated_folder(config, folder)?;

    let thumb_dir = match config.layout {
        LayoutMode::Mirrored => config.thumb_root.join(folder),
        LayoutMode::Flat => config.thumb_root.clone(),
    };
    if !thumb_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut thumbs: Vec<String> = fs::read_dir(&thumb_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| Path::new(name).extension().is_some_and(|e| e == "jpg"))
        .collect();
    thumbs.sort();
    Ok(thumbs)
}

/// List the current eligible original images in `folder`, sorted by name.
pub fn list_images(config: &GalleryConfig, folder: &str) -> Result<Vec<String>, GalleryError> {
    let dir = validated_folder(config, folder)?;

    let mut images: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && config.is_eligible(&e.path()))
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    images.sort();
    Ok(images)
}

/// Build the gallery page view model: thumbnails matched to originals by
/// filename stem (the thumbnail swapped its extension for `.jpg`, so the
/// stem is the stable key).
pub fn folder_view(config: &GalleryConfig, folder: &str) -> Result<FolderView, GalleryError> {
    let images = list_images(config, folder)?;
    let thumbnails = list_thumbnails(config, folder)?;

    let by_stem: HashMap<OsString, &String> = images
        .iter()
        .filter_map(|name| Path::new(name).file_stem().map(|s| (s.to_os_string(), name)))
        .collect();

    let entries = thumbnails
        .into_iter()
        .map(|thumbnail| {
            let source = Path::new(&thumbnail)
                .file_stem()
                .and_then(|stem| by_stem.get(stem))
                .map(|name| (*name).clone());
            GalleryEntry { thumbnail, source }
        })
        .collect();

    Ok(FolderView {
        folder: folder.to_string(),
        entries,
    })
}

/// Resolve `folder` against the image root, rejecting traversal attempts
/// and the thumbnail directory itself.
fn validated_folder(config: &GalleryConfig, folder: &str) -> Result<PathBuf, GalleryError> {
    let plain_component =
        !folder.is_empty() && !folder.starts_with('.') && !folder.contains(['/', '\\']);
    if !plain_component {
        return Err(GalleryError::NotFound(folder.to_string()));
    }

    let dir = config.image_root.join(folder);
    if dir == config.thumb_root || !dir.is_dir() {
        return Err(GalleryError::NotFound(folder.to_string()));
    }
    Ok(dir)
}
