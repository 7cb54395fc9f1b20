//! The compression facade: one call from in-memory image to compressed PNG.
//!
//! Stateless request/response — no retries, no partial results, no shared
//! state between invocations. Safe to call from any worker; callers that
//! want the work off their main thread dispatch it themselves (the demo CLI
//! runs inputs on rayon workers).

use crate::transform::{PngTransform, Quality};
use image::DynamicImage;
use std::io::Cursor;
use thiserror::Error;

/// The two failure modes the boundary allows. Everything downstream of the
/// transform's zero-length signal — internal failure, unsupported input,
/// deliberate decline — lands in [`CompressError::Transform`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompressError {
    /// The source image could not be encoded to PNG bytes. The transform is
    /// never invoked in this case.
    #[error("source image could not be encoded as PNG")]
    Encode,
    /// The transform produced no output.
    #[error("transform produced no output")]
    Transform,
}

/// Canonical lossless PNG encoding of an in-memory image.
pub fn png_bytes(image: &DynamicImage) -> Option<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .ok()?;
    Some(bytes)
}

/// Compress `image` through `transform`.
///
/// Encodes the image to PNG bytes, delegates to the transform, and returns
/// its output unchanged — a complete byte sequence or an error, never a
/// partial buffer.
pub fn compress(
    image: &DynamicImage,
    quality: Quality,
    transform: &impl PngTransform,
) -> Result<Vec<u8>, CompressError> {
    let source = png_bytes(image).ok_or(CompressError::Encode)?;
    transform
        .transform(&source, quality)
        .ok_or(CompressError::Transform)
}

/// [`compress`] with the binary surface of the underlying boundary: bytes or
/// absence, no diagnostics.
pub fn compressed(
    image: &DynamicImage,
    quality: Quality,
    transform: &impl PngTransform,
) -> Option<Vec<u8>> {
    compress(image, quality, transform).ok()
}
