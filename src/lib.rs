//! # PicQuick
//!
//! A self-hosted browsable image gallery server. Your filesystem is the data
//! source: a directory of folders full of images becomes a set of gallery
//! pages, with downscaled JPEG thumbnails generated on disk and kept up to
//! date as new images appear.
//!
//! # Architecture
//!
//! PicQuick runs three cooperating pieces over one shared resource — the
//! thumbnail directory:
//!
//! ```text
//! 1. Scan    image_root/  →  thumbs/     (startup pass, fills the gaps)
//! 2. Watch   fs events    →  thumbs/     (incremental, creation events only)
//! 3. Serve   HTTP         ←  image_root/ + thumbs/  (reads, never writes)
//! ```
//!
//! The scanner and watcher both funnel into the same [`imaging`] generator
//! and the same [`layout`] path convention, so a thumbnail lands in the same
//! place no matter which path produced it. Creation is at-least-once: the
//! check-then-write existence test is not atomic, and an image created during
//! the startup pass may be thumbnailed by both writers. Both produce the same
//! bytes for the same source, which keeps the race benign in practice.
//!
//! The server reads directory listings per request — no cached view models,
//! so pages are always consistent with what is on disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | [`GalleryConfig`](config::GalleryConfig) — one explicit struct built at startup and passed by reference everywhere; no module globals |
//! | [`layout`] | Deterministic source path → thumbnail path mapping (mirrored or flat) |
//! | [`imaging`] | Thumbnail generation: decode, Lanczos3 resize, JPEG re-encode |
//! | [`scan`] | Startup pass — walks the image root, generates missing thumbnails in parallel |
//! | [`watch`] | Filesystem watcher — thumbnails newly created files as they appear |
//! | [`gallery`] | Read-only view model: folders, thumbnails, and originals per folder |
//! | [`server`] | HTTP boundary — axum router, maud pages, static file serving |
//!
//! # Design Decisions
//!
//! ## Content-Unaware Caching
//!
//! A thumbnail's only cache key is its existence. If the source image changes
//! after the thumbnail was written, the stale thumbnail stays — re-running
//! the scan skips it. This is deliberate: the tool targets append-mostly
//! photo dumps, and "exists" is the cheapest check that makes re-scans
//! resumable after a partial failure.
//!
//! ## JPEG-Only Thumbnails
//!
//! Every thumbnail is re-encoded as JPEG regardless of source format, with
//! alpha flattened. One output format keeps the layout convention trivial
//! (swap the extension for `.jpg`) and the gallery pages format-agnostic.
//!
//! ## Maud Over Template Engines
//!
//! Gallery HTML is generated with [Maud](https://maud.lambda.xyz/):
//! compile-time checked, auto-escaped, and no template files to ship next to
//! the binary.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod layout;
pub mod scan;
pub mod server;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
