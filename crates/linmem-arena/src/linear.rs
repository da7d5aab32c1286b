//! Bump-pointer allocation over a caller-owned byte buffer.
//!
//! [`LinearArena`] hands out monotonically increasing, zero-initialised
//! blocks from a fixed buffer. Individual blocks are never reclaimed; the
//! whole arena is reset with [`LinearArena::free_all`] or rolled back to a
//! [`ArenaCheckpoint`] (see [`crate::temp`]).
//!
//! ```text
//! base                 prev_offset      curr_offset             buffer_len
//!  │                        │                │                       │
//!  ▼                        ▼                ▼                       ▼
//!  ┌──────┬──────┬──────────┬────────────────┬───────────────────────┐
//!  │  A1  │ pad  │    A2    │       A3       │      free space       │
//!  └──────┴──────┴──────────┴────────────────┴───────────────────────┘
//!                            └─ most recent allocation, resizable in place
//! ```

#![allow(unsafe_code)]

use std::cell::Cell;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::align::{align_forward, is_power_of_two};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::raw;
use crate::temp::{ArenaCheckpoint, TempArena};

/// Linear (bump) allocator over a borrowed byte buffer.
///
/// Allocation takes `&self`, so any number of consumers (for example
/// several `DynArray`s) can draw from one arena at the same time.
/// Operations that invalidate earlier blocks ([`free_all`](Self::free_all),
/// [`restore`](Self::restore) and [`temp`](Self::temp)) take `&mut self`
/// and therefore cannot run while anything still borrows the arena.
///
/// The arena never owns its buffer: dropping it leaves the buffer intact.
///
/// Not thread-safe; the offsets are plain [`Cell`]s.
#[derive(Debug)]
pub struct LinearArena<'buf> {
    /// Start of the backing buffer.
    base: NonNull<u8>,
    /// Length of the backing buffer in bytes.
    len: usize,
    /// Start of the most recent allocation.
    prev_offset: Cell<usize>,
    /// Bump pointer: first byte past the most recent allocation.
    curr_offset: Cell<usize>,
    config: ArenaConfig,
    _buf: PhantomData<&'buf mut [u8]>,
}

impl<'buf> LinearArena<'buf> {
    /// Create an arena over `buffer` with the default configuration.
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        Self::from_parts(buffer, ArenaConfig::default())
    }

    /// Create an arena over `buffer` with a custom configuration.
    ///
    /// Fails with `InvalidAlignment` if the configured default alignment is
    /// not a power of two.
    pub fn with_config(buffer: &'buf mut [u8], config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::from_parts(buffer, config))
    }

    fn from_parts(buffer: &'buf mut [u8], config: ArenaConfig) -> Self {
        let len = buffer.len();
        Self {
            base: NonNull::from(buffer).cast(),
            len,
            prev_offset: Cell::new(0),
            curr_offset: Cell::new(0),
            config,
            _buf: PhantomData,
        }
    }

    /// Create an arena over a raw memory region.
    ///
    /// Returns `NullPointer` if `ptr` is null.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` bytes for `'buf`,
    /// nothing else may access the region while the arena is alive, and the
    /// bytes must be initialised (any value).
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize) -> Result<Self, ArenaError> {
        let base = NonNull::new(ptr).ok_or(ArenaError::NullPointer)?;
        Ok(Self {
            base,
            len,
            prev_offset: Cell::new(0),
            curr_offset: Cell::new(0),
            config: ArenaConfig::default(),
            _buf: PhantomData,
        })
    }

    /// Bump-allocate `size` bytes aligned to `align`.
    ///
    /// The returned block is zero-filled. Fails with `InvalidAlignment` if
    /// `align` is not a power of two and with `OutOfMemory` if the aligned
    /// block does not fit in the remaining buffer; the arena is unchanged
    /// on failure.
    pub fn alloc_align(&self, size: usize, align: usize) -> Result<NonNull<u8>, ArenaError> {
        let base_addr = self.base.as_ptr() as usize;
        let aligned = match align_forward(base_addr + self.curr_offset.get(), align) {
            Ok(aligned) => aligned,
            Err(ArenaError::OutOfMemory { .. }) => {
                return Err(ArenaError::OutOfMemory {
                    requested: size,
                    remaining: self.remaining(),
                });
            }
            Err(err) => return Err(err),
        };
        let offset = aligned - base_addr;

        let end = offset
            .checked_add(size)
            .filter(|&end| end <= self.len)
            .ok_or(ArenaError::OutOfMemory {
                requested: size,
                remaining: self.remaining(),
            })?;

        // SAFETY: offset <= end <= len, so the block is inside the buffer and
        // starts at or after curr_offset, past every live allocation.
        let ptr = unsafe {
            let ptr = raw::at_offset(self.base, offset);
            raw::zero(ptr, size);
            ptr
        };
        self.prev_offset.set(offset);
        self.curr_offset.set(end);
        Ok(ptr)
    }

    /// Bump-allocate `size` bytes at the configured default alignment.
    pub fn alloc(&self, size: usize) -> Result<NonNull<u8>, ArenaError> {
        self.alloc_align(size, self.config.default_alignment)
    }

    /// Allocate zeroed room for `count` values of `T`, aligned for `T`.
    ///
    /// A byte size that overflows `usize` is reported as `OutOfMemory`.
    pub fn alloc_array<T>(&self, count: usize) -> Result<NonNull<T>, ArenaError> {
        let size = mem::size_of::<T>()
            .checked_mul(count)
            .ok_or(ArenaError::OutOfMemory {
                requested: usize::MAX,
                remaining: self.remaining(),
            })?;
        self.alloc_align(size, mem::align_of::<T>())
            .map(NonNull::cast)
    }

    /// Resize a block previously returned by this arena.
    ///
    /// - A null `old_ptr` or zero `old_size` behaves like
    ///   [`alloc_align`](Self::alloc_align).
    /// - The most recent allocation is grown or shrunk in place and keeps
    ///   its address; added bytes are zeroed.
    /// - Any other block in the buffer is copied into a fresh allocation;
    ///   the old bytes are not reclaimed.
    /// - A pointer outside the buffer fails with `OutOfBounds`.
    ///
    /// `align` is validated before anything else.
    ///
    /// # Safety
    ///
    /// A non-null `old_ptr` must be the start of a live block handed out by
    /// this arena, `old_size` must not exceed that block's size, and the
    /// caller must hold the only reference to it. After a successful call,
    /// only the returned pointer may be used to access the block.
    pub unsafe fn resize_align(
        &self,
        old_ptr: *mut u8,
        old_size: usize,
        new_size: usize,
        align: usize,
    ) -> Result<NonNull<u8>, ArenaError> {
        if !is_power_of_two(align) {
            return Err(ArenaError::InvalidAlignment { align });
        }

        let old = match NonNull::new(old_ptr) {
            Some(old) if old_size != 0 => old,
            _ => return self.alloc_align(new_size, align),
        };

        let old_offset = self.offset_of(old.as_ptr()).ok_or(ArenaError::OutOfBounds {
            address: old_ptr as usize,
        })?;

        let prev = self.prev_offset.get();
        if old_offset == prev {
            let end = prev
                .checked_add(new_size)
                .filter(|&end| end <= self.len)
                .ok_or(ArenaError::OutOfMemory {
                    requested: new_size,
                    remaining: self.len - prev,
                })?;
            let kept = old_size.min(self.curr_offset.get() - prev);
            if new_size > kept {
                // SAFETY: prev + kept < end <= len; the range is the tail of
                // the block being resized, owned by the caller.
                unsafe { raw::zero(raw::at_offset(self.base, prev + kept), new_size - kept) };
            }
            self.curr_offset.set(end);
            return Ok(old);
        }

        let new = self.alloc_align(new_size, align)?;
        let copy_len = old_size.min(new_size).min(self.len - old_offset);
        // SAFETY: the source range is clamped to the buffer end; the
        // destination is the fresh block of new_size >= copy_len bytes.
        unsafe { raw::copy(old, new, copy_len) };
        Ok(new)
    }

    /// [`resize_align`](Self::resize_align) at the configured default alignment.
    ///
    /// # Safety
    ///
    /// Same contract as [`resize_align`](Self::resize_align).
    pub unsafe fn resize(
        &self,
        old_ptr: *mut u8,
        old_size: usize,
        new_size: usize,
    ) -> Result<NonNull<u8>, ArenaError> {
        // SAFETY: forwarded caller contract.
        unsafe { self.resize_align(old_ptr, old_size, new_size, self.config.default_alignment) }
    }

    /// Release a single block. Always succeeds and does nothing: a linear
    /// arena only reclaims memory in bulk.
    pub fn free(&self, _ptr: *mut u8) -> Result<(), ArenaError> {
        Ok(())
    }

    /// Reset both offsets to zero, invalidating every block handed out so far.
    ///
    /// Raw pointers obtained earlier must not be dereferenced afterwards.
    pub fn free_all(&mut self) {
        self.prev_offset.set(0);
        self.curr_offset.set(0);
    }

    /// Snapshot the current offsets (the "begin" half of a temporary scope).
    pub fn checkpoint(&self) -> ArenaCheckpoint {
        ArenaCheckpoint {
            prev_offset: self.prev_offset.get(),
            curr_offset: self.curr_offset.get(),
        }
    }

    /// Roll the offsets back to `checkpoint` (the "end" half of a temporary
    /// scope). Restoring the same checkpoint twice is harmless.
    ///
    /// Fails with `OutOfBounds` if the checkpoint does not describe a valid
    /// state of this arena. Checkpoints are not checked for LIFO order:
    /// restoring an outer checkpoint before an inner one is allowed and
    /// makes the inner one describe blocks that are no longer claimed.
    pub fn restore(&mut self, checkpoint: ArenaCheckpoint) -> Result<(), ArenaError> {
        if checkpoint.curr_offset > self.len {
            return Err(ArenaError::OutOfBounds {
                address: checkpoint.curr_offset,
            });
        }
        if checkpoint.prev_offset > checkpoint.curr_offset {
            return Err(ArenaError::OutOfBounds {
                address: checkpoint.prev_offset,
            });
        }
        self.restore_unchecked(checkpoint);
        Ok(())
    }

    pub(crate) fn restore_unchecked(&mut self, checkpoint: ArenaCheckpoint) {
        self.prev_offset.set(checkpoint.prev_offset);
        self.curr_offset.set(checkpoint.curr_offset);
    }

    /// Open a temporary scope; everything allocated through the returned
    /// guard is released when it ends.
    pub fn temp(&mut self) -> TempArena<'_, 'buf> {
        TempArena::begin(self)
    }

    /// Byte offset of `ptr` within the buffer, if it points inside it.
    pub fn offset_of(&self, ptr: *const u8) -> Option<usize> {
        let base = self.base.as_ptr() as usize;
        let addr = ptr as usize;
        (addr >= base && addr - base < self.len).then(|| addr - base)
    }

    /// Whether `ptr` points inside the buffer.
    pub fn contains(&self, ptr: *const u8) -> bool {
        self.offset_of(ptr).is_some()
    }

    /// Start of the backing buffer.
    pub fn base_ptr(&self) -> NonNull<u8> {
        self.base
    }

    /// Length of the backing buffer in bytes.
    pub fn buffer_len(&self) -> usize {
        self.len
    }

    /// Start offset of the most recent allocation.
    pub fn prev_offset(&self) -> usize {
        self.prev_offset.get()
    }

    /// Current bump offset.
    pub fn curr_offset(&self) -> usize {
        self.curr_offset.get()
    }

    /// Bytes claimed so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.curr_offset.get()
    }

    /// Bytes left past the bump offset (before alignment).
    pub fn remaining(&self) -> usize {
        self.len - self.curr_offset.get()
    }

    /// Alignment used by [`alloc`](Self::alloc) and [`resize`](Self::resize).
    pub fn default_alignment(&self) -> usize {
        self.config.default_alignment
    }
}
