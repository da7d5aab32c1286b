//! Linmem: linear arena allocation and arena-backed growable arrays.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the linmem sub-crates. For most users, adding `linmem` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use linmem::prelude::*;
//!
//! let mut buf = [0u8; 1024];
//! let mut arena = LinearArena::new(&mut buf);
//!
//! // Long-lived data allocated up front.
//! let header = arena.alloc(32).unwrap();
//! let used = arena.used();
//!
//! // Scratch work inside a temporary scope.
//! {
//!     let scope = arena.temp();
//!     let mut squares = DynArray::new_in(ArenaHandle::Borrowed(&*scope)).unwrap();
//!     for i in 0..20u64 {
//!         squares.push_back(i * i).unwrap();
//!     }
//!     assert_eq!(squares.back(), Ok(&361));
//! }
//!
//! // Everything after the header was reclaimed.
//! assert_eq!(arena.used(), used);
//! assert!(arena.contains(header.as_ptr()));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `linmem-arena` | `LinearArena`, checkpoints, temporary scopes, alignment helpers |
//! | [`array`] | `linmem-array` | `DynArray`, growth policy, arena handles |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bump-pointer arena over a caller-owned buffer (`linmem-arena`).
///
/// [`arena::LinearArena`] hands out aligned, zero-filled blocks;
/// [`arena::TempArena`] rolls it back when a scope ends.
pub use linmem_arena as arena;

/// Growable arrays with optional arena backing (`linmem-array`).
///
/// [`array::DynArray`] reports every failure as an [`array::ArrayError`]
/// and never frees arena storage itself.
pub use linmem_array as array;

/// Common imports for typical linmem usage.
///
/// ```rust
/// use linmem::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use linmem_arena::{ArenaCheckpoint, ArenaConfig, ArenaError, LinearArena, TempArena};

    // Array
    pub use linmem_array::{ArenaHandle, ArrayConfig, ArrayError, DynArray};
}
