//! Thumbnail generation — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, GIF) | `image` crate (pure Rust decoders) |
//! | **Resize** | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math, testable without I/O
//! - **Thumbnail**: the [`ThumbnailGenerator`] trait and its production
//!   implementation, [`Thumbnailer`]

pub mod calculations;
pub mod thumbnail;

pub use calculations::scale_to_height;
pub use thumbnail::{ThumbnailError, ThumbnailGenerator, Thumbnailer};
