//! Save/restore scopes over a [`LinearArena`].
//!
//! The primitive is a pair of calls: [`LinearArena::checkpoint`] to begin
//! and [`LinearArena::restore`] to end. [`TempArena`] wraps that pair in a
//! guard so the restore happens on every exit path, including early
//! returns and unwinding.
//!
//! ```
//! use linmem_arena::LinearArena;
//!
//! let mut buf = [0u8; 64];
//! let mut arena = LinearArena::new(&mut buf);
//! arena.alloc_align(8, 1).unwrap();
//!
//! {
//!     let scratch = arena.temp();
//!     scratch.alloc_align(32, 1).unwrap();
//!     assert_eq!(scratch.curr_offset(), 40);
//! }
//! assert_eq!(arena.curr_offset(), 8);
//! ```

use std::ops::Deref;

use crate::linear::LinearArena;

/// Snapshot of an arena's offsets.
///
/// Restoring a checkpoint releases everything allocated after it was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaCheckpoint {
    pub(crate) prev_offset: usize,
    pub(crate) curr_offset: usize,
}

impl ArenaCheckpoint {
    /// Saved start of the most recent allocation.
    pub fn prev_offset(&self) -> usize {
        self.prev_offset
    }

    /// Saved bump offset.
    pub fn curr_offset(&self) -> usize {
        self.curr_offset
    }
}

/// Temporary arena scope.
///
/// Created by [`TempArena::begin`] or [`LinearArena::temp`]. Derefs to the
/// underlying arena, so allocations are made through the guard. When the
/// guard ends (explicitly via [`end`](Self::end) or by going out of scope)
/// the arena's offsets are rolled back to their values at `begin`.
///
/// Scopes nest last-in-first-out: an inner scope is opened with
/// [`temp`](Self::temp) on the outer guard and mutably borrows it, so it
/// must end first.
///
/// The guard only hands out shared access to the arena. Replacing the
/// arena behind a live scope does not compile:
///
/// ```compile_fail
/// use linmem_arena::LinearArena;
///
/// let mut big = [0u8; 64];
/// let mut small = [0u8; 8];
/// let mut arena = LinearArena::new(&mut big);
/// let mut other = LinearArena::new(&mut small);
/// let mut scope = arena.temp();
/// std::mem::swap(&mut *scope, &mut other);
/// ```
#[must_use]
pub struct TempArena<'a, 'buf> {
    arena: &'a mut LinearArena<'buf>,
    checkpoint: ArenaCheckpoint,
}

impl<'a, 'buf> TempArena<'a, 'buf> {
    /// Open a scope over `arena`, snapshotting its offsets.
    pub fn begin(arena: &'a mut LinearArena<'buf>) -> Self {
        let checkpoint = arena.checkpoint();
        Self { arena, checkpoint }
    }

    /// The offsets this scope will restore.
    pub fn checkpoint(&self) -> ArenaCheckpoint {
        self.checkpoint
    }

    /// Release everything allocated in this scope so far, keeping the scope
    /// open. Calling it repeatedly is harmless.
    pub fn rewind(&mut self) {
        self.arena.restore_unchecked(self.checkpoint);
    }

    /// Open a nested scope. It must end before this one is used again.
    pub fn temp(&mut self) -> TempArena<'_, 'buf> {
        TempArena::begin(self.arena)
    }

    /// Close the scope, restoring the arena's offsets.
    pub fn end(self) {
        // Drop does the restore.
    }
}

impl<'buf> Deref for TempArena<'_, 'buf> {
    type Target = LinearArena<'buf>;

    fn deref(&self) -> &Self::Target {
        self.arena
    }
}

impl Drop for TempArena<'_, '_> {
    fn drop(&mut self) {
        self.arena.restore_unchecked(self.checkpoint);
    }
}
