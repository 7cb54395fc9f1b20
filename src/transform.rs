//! The transform seam — the narrow interface the rest of the crate sees.
//!
//! [`PngTransform`] is the pluggable collaborator boundary: PNG bytes and a
//! quality in, a complete compressed PNG or a decline out. The production
//! implementation is [`QuantTransform`](crate::quantizer::QuantTransform);
//! [`RawTransform`] plugs in an actual C-ABI symbol through the
//! [`bridge`](crate::bridge).

use crate::bridge::{self, RawTransformFn};

/// Lossy-compression quality, nominally 0–100.
///
/// Deliberately neither validated nor clamped here: the value is part of the
/// transform's contract, and what an out-of-range value means is up to the
/// implementation behind the seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub i32);

impl Quality {
    pub fn value(self) -> i32 {
        self.0
    }
}

/// A PNG-in, PNG-out lossy transform.
///
/// Implementations receive already-encoded PNG bytes and either return a
/// complete compressed PNG or decline with `None`. Decline, unsupported
/// input, and internal failure are indistinguishable — that ambiguity is a
/// property of the underlying boundary, preserved here.
///
/// `Sync` so a single transform can serve rayon workers; implementations
/// must not carry per-call mutable state.
pub trait PngTransform: Sync {
    fn transform(&self, png: &[u8], quality: Quality) -> Option<Vec<u8>>;
}

/// Adapter plugging a C-ABI function into the seam.
///
/// This is the shape a native library slots into: declare the symbol with
/// [`RawTransformFn`]'s signature and wrap it here. All marshaling goes
/// through [`bridge::invoke`], so callers never see the callee-allocated
/// buffer.
pub struct RawTransform(RawTransformFn);

impl RawTransform {
    pub fn new(f: RawTransformFn) -> Self {
        Self(f)
    }
}

impl PngTransform for RawTransform {
    fn transform(&self, png: &[u8], quality: Quality) -> Option<Vec<u8>> {
        bridge::invoke(self.0, png, quality.value())
    }
}
