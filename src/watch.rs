//! Filesystem watching — incremental thumbnail generation.
//!
//! After the startup scan, a [`GalleryWatcher`] subscribes to creation
//! events on the image root and hands each new path to a [`CreatedHandler`].
//! The production handler, [`ThumbnailOnCreated`], filters for eligible
//! images and generates the thumbnail synchronously in the event-delivery
//! context — decode/resize/encode of one image is assumed fast enough that
//! the watcher never blocks indefinitely on a single event.
//!
//! Only creation events are handled. Moves, renames, deletions, and
//! modifications are ignored; a changed source image keeps its existing
//! thumbnail (content-unaware caching).
//!
//! Failure semantics: a generator error on one event is logged and the event
//! dropped — no retry, no dead-letter, and the watcher stays up.

use crate::config::GalleryConfig;
use crate::imaging::ThumbnailGenerator;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("watch subscription failed: {0}")]
    Subscribe(#[from] notify::Error),
}

/// Capability interface for reacting to file creation.
///
/// The watch subsystem is a collaborator behind this seam: tests drive a
/// handler directly instead of standing up an OS watcher.
pub trait CreatedHandler: Send + 'static {
    fn on_created(&self, path: &Path);
}

/// [`CreatedHandler`] that thumbnails newly created eligible images.
pub struct ThumbnailOnCreated<G> {
    config: Arc<GalleryConfig>,
    generator: G,
}

impl<G: ThumbnailGenerator> ThumbnailOnCreated<G> {
    pub fn new(config: Arc<GalleryConfig>, generator: G) -> Self {
        Self { config, generator }
    }
}

impl<G: ThumbnailGenerator + 'static> CreatedHandler for ThumbnailOnCreated<G> {
    fn on_created(&self, path: &Path) {
        // The thumbnail tree lives inside the watched root, so our own
        // writes come back as creation events. Drop them here.
        if self.config.in_thumb_root(path) || !self.config.is_eligible(path) {
            return;
        }
        debug!("new image: {}", path.display());
        match self.generator.generate(path) {
            Ok(thumb) => info!("thumbnailed {} -> {}", path.display(), thumb.display()),
            // Event is dropped after the failure; a later scan pass will
            // retry since the thumbnail is still missing.
            Err(e) => warn!("thumbnail failed for {}: {e}", path.display()),
        }
    }
}

/// Watcher lifecycle: `Idle -> Watching -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Constructed, not yet subscribed.
    Idle,
    /// Subscribed; events are being delivered.
    Watching,
    /// Unsubscribed; no further events. Terminal.
    Stopped,
}

/// Owns the OS watch subscription on the image root.
///
/// Dropping the watcher releases the subscription, so shutdown paths that
/// never call [`stop`](GalleryWatcher::stop) explicitly still clean up.
pub struct GalleryWatcher {
    root: PathBuf,
    recursive: bool,
    inner: Option<RecommendedWatcher>,
    state: WatchState,
}

impl GalleryWatcher {
    /// Build an idle watcher for the configured image root. Recursion
    /// follows the scanner's flag so the two can never disagree.
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            root: config.image_root.clone(),
            recursive: config.recursive,
            inner: None,
            state: WatchState::Idle,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Subscribe and start delivering creation events to `handler`.
    ///
    /// Events arrive on the notify backend's own thread; the handler runs
    /// synchronously there. Calling `start` on a non-idle watcher is a no-op.
    pub fn start<H: CreatedHandler>(&mut self, handler: H) -> Result<(), WatchError> {
        if self.state != WatchState::Idle {
            return Ok(());
        }

        let mut watcher = notify::recommended_watcher(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Create(_)) {
                        for path in &event.paths {
                            handler.on_created(path);
                        }
                    }
                }
                Err(e) => warn!("watch error: {e}"),
            },
        )?;

        let mode = if self.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&self.root, mode)?;

        self.inner = Some(watcher);
        self.state = WatchState::Watching;
        info!("watching {} for new images", self.root.display());
        Ok(())
    }

    /// Unsubscribe and release the OS watch handle.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.inner.take() {
            let _ = watcher.unwatch(&self.root);
            info!("stopped watching {}", self.root.display());
        }
        self.state = WatchState::Stopped;
    }
}

impl Drop for GalleryWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Thumbnailer;
    use crate::layout;
    use crate::test_helpers::{FailingGenerator, RecordingGenerator, test_config, write_png};
    use image::GenericImageView;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[test]
    fn lifecycle_idle_watching_stopped() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let mut watcher = GalleryWatcher::new(&config);
        assert_eq!(watcher.state(), WatchState::Idle);

        let generator = RecordingGenerator::new(Arc::new(config.clone()));
        watcher
            .start(ThumbnailOnCreated::new(Arc::new(config), generator))
            .unwrap();
        assert_eq!(watcher.state(), WatchState::Watching);

        watcher.stop();
        assert_eq!(watcher.state(), WatchState::Stopped);
    }

    #[test]
    fn handler_ignores_non_eligible_paths() {
        let tmp = TempDir::new().unwrap();
        let config = Arc::new(test_config(tmp.path()));
        let handler = ThumbnailOnCreated::new(
            Arc::clone(&config),
            RecordingGenerator::new(Arc::clone(&config)),
        );

        handler.on_created(&config.image_root.join("notes.txt"));
        handler.on_created(&config.image_root.join("archive.zip"));
        assert_eq!(handler.generator.call_count(), 0);

        handler.on_created(&config.image_root.join("photo.png"));
        assert_eq!(handler.generator.call_count(), 1);
    }

    #[test]
    fn handler_ignores_its_own_output_tree() {
        let tmp = TempDir::new().unwrap();
        let config = Arc::new(test_config(tmp.path()));
        let handler = ThumbnailOnCreated::new(
            Arc::clone(&config),
            RecordingGenerator::new(Arc::clone(&config)),
        );

        handler.on_created(&config.thumb_root.join("vacation/photo.jpg"));
        assert_eq!(handler.generator.call_count(), 0);
    }

    #[test]
    fn generator_failure_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = Arc::new(test_config(tmp.path()));
        let handler = ThumbnailOnCreated::new(Arc::clone(&config), FailingGenerator);

        // Must not panic; the event is simply dropped
        handler.on_created(&config.image_root.join("photo.png"));
    }

    #[test]
    fn created_file_is_thumbnailed_within_two_seconds() {
        let tmp = TempDir::new().unwrap();
        let config = Arc::new(test_config(tmp.path()));

        let mut watcher = GalleryWatcher::new(&config);
        watcher
            .start(ThumbnailOnCreated::new(
                Arc::clone(&config),
                Thumbnailer::new(Arc::clone(&config)),
            ))
            .unwrap();

        let photo = config.image_root.join("photo.png");
        write_png(&photo, 200, 100);

        let thumb = layout::thumbnail_path(&photo, &config);
        let deadline = Instant::now() + Duration::from_secs(2);
        while !thumb.exists() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(25));
        }
        assert!(thumb.exists(), "no thumbnail after 2s");

        let decoded = image::open(&thumb).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 400));
        watcher.stop();
    }
}
