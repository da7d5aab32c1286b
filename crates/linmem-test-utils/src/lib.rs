//! Test utilities for linmem development.
//!
//! Provides over-aligned byte buffers ([`AlignedBuf`]) so address
//! arithmetic in arena tests is independent of where the stack puts a
//! `[u8; N]`, and element fixtures ([`fixtures`]) that count drops and
//! clones.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CloneBomb, DropLedger, Tracked};

/// Alignment guaranteed for the start of an [`AlignedBuf`].
pub const BUF_ALIGN: usize = 64;

/// A zeroed `N`-byte buffer whose first byte is 64-byte aligned.
#[repr(C, align(64))]
pub struct AlignedBuf<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> AlignedBuf<N> {
    pub fn new() -> Self {
        Self { bytes: [0; N] }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> Default for AlignedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
