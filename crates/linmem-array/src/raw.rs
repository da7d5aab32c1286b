//! Raw, uninitialised element storage.
//!
//! [`RawBuf`] is a pointer plus a capacity and nothing else: it never reads,
//! writes or drops elements. Which slots hold live values is tracked by the
//! owning [`DynArray`](crate::DynArray); everything else is treated as
//! uninitialised memory.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use linmem_arena::LinearArena;

use crate::error::ArrayError;

/// Storage for `cap` values of `T`, drawn from the heap or from an arena.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// No storage at all.
    pub(crate) fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocate room for exactly `cap` elements.
    ///
    /// With an arena the bytes come from it (zero-filled, never freed
    /// individually); otherwise from the global allocator. Zero-sized
    /// requests and zero-sized types never touch either.
    pub(crate) fn allocate(cap: usize, arena: Option<&LinearArena<'_>>) -> Result<Self, ArrayError> {
        let layout =
            Layout::array::<T>(cap).map_err(|_| ArrayError::InvalidCapacity { requested: cap })?;
        if cap == 0 || Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let ptr = match arena {
            Some(arena) => arena.alloc_align(layout.size(), layout.align())?.cast::<T>(),
            None => {
                // SAFETY: layout has non-zero size (cap > 0 and T is not a ZST).
                let raw = unsafe { alloc::alloc(layout) };
                NonNull::new(raw.cast::<T>()).ok_or(ArrayError::OutOfMemory {
                    requested_bytes: layout.size(),
                })?
            }
        };
        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    /// Give the storage back to the global allocator and become dangling.
    ///
    /// # Safety
    ///
    /// The storage must have been obtained from [`allocate`](Self::allocate)
    /// without an arena, and no live elements may remain in it.
    pub(crate) unsafe fn release_heap(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            if let Ok(layout) = Layout::array::<T>(self.cap) {
                // SAFETY: same pointer and layout as the matching `alloc`.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
        *self = Self::dangling();
    }

    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_dangling() {
        let buf = RawBuf::<u64>::allocate(0, None).unwrap();
        assert_eq!(buf.cap(), 0);
        assert_eq!(buf.ptr(), NonNull::<u64>::dangling().as_ptr());
    }

    #[test]
    fn heap_allocation_round_trip() {
        let mut buf = RawBuf::<u32>::allocate(16, None).unwrap();
        assert_eq!(buf.cap(), 16);
        assert_eq!(buf.ptr() as usize % mem::align_of::<u32>(), 0);
        unsafe { buf.release_heap() };
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn arena_allocation_comes_from_buffer() {
        let mut bytes = [0u8; 64];
        let arena = LinearArena::new(&mut bytes);
        let buf = RawBuf::<u16>::allocate(8, Some(&arena)).unwrap();
        assert!(arena.contains(buf.ptr().cast::<u8>()));
        assert!(arena.used() >= 16);
    }

    #[test]
    fn arena_exhaustion_is_out_of_memory() {
        let mut bytes = [0u8; 8];
        let arena = LinearArena::new(&mut bytes);
        let result = RawBuf::<u64>::allocate(4, Some(&arena));
        assert!(matches!(
            result,
            Err(ArrayError::OutOfMemory { requested_bytes: 32 })
        ));
    }

    #[test]
    fn overflowing_capacity_is_invalid() {
        let result = RawBuf::<u64>::allocate(usize::MAX, None);
        assert!(matches!(
            result,
            Err(ArrayError::InvalidCapacity { requested: usize::MAX })
        ));
    }

    #[test]
    fn zero_sized_types_never_allocate() {
        let mut bytes = [0u8; 0];
        let arena = LinearArena::new(&mut bytes);
        let buf = RawBuf::<()>::allocate(1000, Some(&arena)).unwrap();
        assert_eq!(buf.cap(), 1000);
        assert_eq!(arena.used(), 0);
    }
}
