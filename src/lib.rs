//! # pngsnip
//!
//! Lossy PNG compression — palette quantization, pngquant-style — behind a
//! memory-safe transform boundary. One call takes an in-memory image and a
//! quality, and returns a complete compressed PNG or nothing.
//!
//! # Architecture: Two Layers, One Seam
//!
//! ```text
//! compress::compressed(image, quality, transform)
//!     │  encode image → PNG bytes (image crate)
//!     ▼
//! PngTransform::transform(png, quality)        ← the seam
//!     │                          │
//!     ▼                          ▼
//! QuantTransform            RawTransform
//! (imagequant, safe)        (C-ABI fn via bridge::invoke)
//! ```
//!
//! The compression engine is a pluggable collaborator behind the
//! [`PngTransform`](transform::PngTransform) trait. The crate ships a
//! production implementation built on the `imagequant` crate, and an adapter
//! for native libraries that expose the pngquant-style C contract: "write a
//! buffer you `malloc`'d into the slot I gave you, return its length, 0
//! means no output".
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bridge`] | The unsafe core — malloc/copy/free discipline around a C-ABI transform |
//! | [`transform`] | `PngTransform` trait, `Quality`, and the raw-function adapter |
//! | [`quantizer`] | Production transform: decode → quantize → indexed PNG |
//! | [`compress`] | Facade: image in, compressed bytes (or absence) out |
//! | [`output`] | CLI line formatting — pure `format_*` functions + print wrappers |
//!
//! # Design Decisions
//!
//! ## All `unsafe` Lives in `bridge`
//!
//! The C contract hands ownership of a callee-allocated buffer across the
//! call. [`bridge::invoke`] wraps both the input copy and the output slot in
//! RAII guards, so every exit path — decline, null pointer, success — frees
//! each allocation exactly once and never reads past the declared length.
//! Nothing above the bridge sees a raw pointer.
//!
//! ## Failure Is Binary at the Seam
//!
//! The C boundary reports failure as a zero length, conflating internal
//! errors, unsupported input, and deliberate declines. The seam preserves
//! that: [`PngTransform`](transform::PngTransform) returns `Option`. One
//! level up, [`compress::compress`] distinguishes the only thing it can —
//! "the image would not encode" from "the transform declined" — and
//! [`compress::compressed`] keeps the plain bytes-or-absence surface for
//! callers that don't care.
//!
//! ## Concurrency Is the Caller's Policy
//!
//! Every buffer is call-local and transforms are `Sync`, so invocations are
//! independent by construction. The library never spawns anything; the demo
//! CLI chooses to fan inputs out over rayon workers, and a caller that wants
//! the blocking call off its main thread dispatches it the same way.

pub mod bridge;
pub mod compress;
pub mod output;
pub mod quantizer;
pub mod transform;

pub use compress::{CompressError, compress, compressed, png_bytes};
pub use quantizer::QuantTransform;
pub use transform::{PngTransform, Quality, RawTransform};
