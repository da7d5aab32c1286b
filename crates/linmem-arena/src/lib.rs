//! Bump-pointer arena allocation over caller-owned buffers.
//!
//! Provides a linear allocator with O(1) allocation, in-place resizing of
//! the most recent block, bulk reset, and save/restore scopes. This crate
//! is one of two that may contain `unsafe` code (along with
//! `linmem-array`); it is confined to `raw.rs` and `linear.rs`.
//!
//! # Architecture
//!
//! ```text
//! caller-owned &mut [u8]
//! └── LinearArena (borrows the buffer, tracks prev/curr offsets)
//!     ├── ArenaCheckpoint (Copy snapshot of the offsets)
//!     └── TempArena (guard: checkpoint on begin, restore on drop)
//! ```
//!
//! # Ownership
//!
//! The arena never owns its buffer. Allocation takes `&self` and returns
//! raw pointers; reading through them is the caller's `unsafe`
//! responsibility. Bulk release (`free_all`, `restore`, temporary scopes)
//! needs `&mut self`, so it cannot happen while another value still
//! borrows the arena.
//!
//! ```
//! use linmem_arena::{ArenaError, LinearArena};
//!
//! let mut buf = [0u8; 16];
//! let mut arena = LinearArena::new(&mut buf);
//! assert!(arena.alloc_align(10, 1).is_ok());
//! assert!(matches!(arena.alloc_align(10, 1), Err(ArenaError::OutOfMemory { .. })));
//!
//! arena.free_all();
//! assert_eq!(arena.alloc_align(16, 1).unwrap(), arena.base_ptr());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
pub mod config;
pub mod error;
pub mod linear;
mod raw;
pub mod temp;

// Public re-exports for the primary API surface.
pub use align::{align_forward, is_power_of_two};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use linear::LinearArena;
pub use temp::{ArenaCheckpoint, TempArena};
