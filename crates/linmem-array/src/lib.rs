//! Growable arrays that can live inside a linear arena.
//!
//! [`DynArray`] is a contiguous, index-addressable sequence with amortised
//! O(1) append. Its storage comes either from the global allocator or from
//! a [`LinearArena`](linmem_arena::LinearArena), chosen once at construction
//! through an [`ArenaHandle`]. Every operation that can fail reports an
//! [`ArrayError`]; a failed operation leaves the array as it was.
//!
//! # Storage
//!
//! ```text
//! DynArray
//! ├── RawBuf      (pointer + capacity, never touches elements)
//! ├── ArrayConfig (initial capacity, growth factor)
//! └── ArenaHandle (none / borrowed / owned)
//! ```
//!
//! Arena-backed arrays never free storage themselves. Buffers abandoned by
//! growth stay in the arena until it is reset, so a borrowed arena must
//! outlive every array drawing from it; the `'a` lifetime enforces that.
//!
//! ```
//! use linmem_arena::LinearArena;
//! use linmem_array::{ArenaHandle, ArrayError, DynArray};
//!
//! let mut buf = [0u8; 12];
//! let arena = LinearArena::new(&mut buf);
//! let mut a: DynArray<'_, u8> = DynArray::with_capacity_in(4, ArenaHandle::Borrowed(&arena)).unwrap();
//! let mut b: DynArray<'_, u8> = DynArray::with_capacity_in(4, ArenaHandle::Borrowed(&arena)).unwrap();
//! a.push_back(1).unwrap();
//! b.push_back(2).unwrap();
//! assert_eq!(arena.used(), 8);
//!
//! // The arena is full: growth fails and leaves `a` untouched.
//! a.resize(4, 0).unwrap();
//! assert!(matches!(a.push_back(9), Err(ArrayError::OutOfMemory { .. })));
//! assert_eq!(a.as_slice(), &[1, 0, 0, 0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod error;
pub mod handle;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use config::ArrayConfig;
pub use error::ArrayError;
pub use handle::ArenaHandle;
