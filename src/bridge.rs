//! The marshaling boundary around a C-ABI PNG transform.
//!
//! The transform contract is the one pngquant-style native libraries expose:
//! the callee `malloc`s its own output buffer, writes the pointer into a slot
//! the caller provides, and returns the byte length. A return of 0 means "no
//! usable output" — internal failure, unsupported input, and a deliberate
//! decline are all reported the same way, with no further diagnostics.
//!
//! All the `unsafe` in this crate lives here. The discipline enforced on
//! every exit path, including early failure:
//!
//! - the input copy is freed exactly once
//! - the callee-allocated output buffer is freed exactly once, after its
//!   first `n` bytes have been copied into an owned `Vec`
//! - the output buffer is never read before the call returns, and never past
//!   the declared length

use std::ptr;

/// C-ABI transform signature.
///
/// On success the callee writes a `malloc`'d buffer into `out` and returns
/// its length; ownership of that buffer passes to the caller, which must
/// `free` it. The input pointer is mutable — the callee may use the buffer
/// as scratch — which is why [`invoke`] hands it a private copy rather than
/// a borrowed slice.
pub type RawTransformFn = unsafe extern "C" fn(
    out: *mut *mut u8,
    quality: i32,
    input: *mut u8,
    input_len: usize,
) -> usize;

/// Owns a `malloc`'d allocation and frees it when dropped.
///
/// `free(NULL)` is a no-op, so a guard wrapping an output slot the callee
/// never touched drops cleanly.
struct MallocBuf(*mut u8);

impl Drop for MallocBuf {
    fn drop(&mut self) {
        unsafe { libc::free(self.0.cast()) };
    }
}

/// Invoke `transform` over `source` and return an owned copy of its output.
///
/// An empty source never reaches the transform. A declared length of zero
/// (or a null output pointer despite a non-zero length) is the boundary's
/// only failure signal and maps to `None`. Quality is passed through
/// unvalidated; its meaning is the transform's contract.
pub fn invoke(transform: RawTransformFn, source: &[u8], quality: i32) -> Option<Vec<u8>> {
    if source.is_empty() {
        return None;
    }

    let input = MallocBuf(unsafe { libc::malloc(source.len()) }.cast());
    if input.0.is_null() {
        return None;
    }
    unsafe { ptr::copy_nonoverlapping(source.as_ptr(), input.0, source.len()) };

    let mut out = MallocBuf(ptr::null_mut());
    let n = unsafe { transform(&mut out.0, quality, input.0, source.len()) };
    if n == 0 || out.0.is_null() {
        return None;
    }

    // Exactly n bytes at out.0 are valid per the transform contract.
    let mut result = Vec::with_capacity(n);
    unsafe {
        ptr::copy_nonoverlapping(out.0, result.as_mut_ptr(), n);
        result.set_len(n);
    }
    Some(result)
}
