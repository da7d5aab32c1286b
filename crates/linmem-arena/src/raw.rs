//! Low-level primitives for arena memory operations.
//!
//! Every pointer operation the arena performs goes through this module so
//! the `unsafe` surface stays in one place. Callers in `linear.rs` are
//! responsible for the bounds checks described in each function's contract.

#![allow(unsafe_code)]

use std::ptr::{self, NonNull};

/// Pointer to byte `offset` of the buffer starting at `base`.
///
/// # Safety
///
/// `offset` must be at most the buffer length (one-past-the-end is allowed).
#[inline]
pub(crate) unsafe fn at_offset(base: NonNull<u8>, offset: usize) -> NonNull<u8> {
    // SAFETY: the caller keeps `offset` within the buffer (or one past its
    // end), so the addition stays inside the same allocated object and
    // cannot wrap to null.
    unsafe { NonNull::new_unchecked(base.as_ptr().add(offset)) }
}

/// Zero `len` bytes starting at `dst`.
///
/// # Safety
///
/// `dst..dst + len` must lie inside the arena buffer and must not overlap
/// any live allocation other than the one being initialised.
#[inline]
pub(crate) unsafe fn zero(dst: NonNull<u8>, len: usize) {
    // SAFETY: the range is valid for writes per the caller contract.
    unsafe { ptr::write_bytes(dst.as_ptr(), 0, len) }
}

/// Copy `len` bytes from `src` to `dst`. The ranges may overlap.
///
/// # Safety
///
/// Both ranges must lie inside the arena buffer.
#[inline]
pub(crate) unsafe fn copy(src: NonNull<u8>, dst: NonNull<u8>, len: usize) {
    // SAFETY: both ranges are in-bounds per the caller contract; `ptr::copy`
    // tolerates overlap.
    unsafe { ptr::copy(src.as_ptr(), dst.as_ptr(), len) }
}
