//! How a [`DynArray`](crate::DynArray) reaches its arena.

use linmem_arena::LinearArena;

/// An arena attached to an array, either borrowed or owned.
///
/// - `Borrowed`: the arena is managed elsewhere and may be shared by
///   several arrays. The array never frees storage it drew from it.
/// - `Owned`: the array holds the arena value and drops it together with
///   itself. The arena's buffer is still owned by whoever lent it.
///
/// Either way, storage drawn from the arena is only reclaimed in bulk by
/// the arena.
#[derive(Debug)]
pub enum ArenaHandle<'a> {
    /// Reference to an externally managed arena.
    Borrowed(&'a LinearArena<'a>),
    /// Arena held by value.
    Owned(LinearArena<'a>),
}

impl<'a> ArenaHandle<'a> {
    /// The arena behind this handle.
    pub fn arena(&self) -> &LinearArena<'a> {
        match self {
            Self::Borrowed(arena) => arena,
            Self::Owned(arena) => arena,
        }
    }

    /// Whether dropping the handle drops the arena.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// A borrowed handle to the same arena, or `None` for an owned arena,
    /// which cannot be shared.
    pub(crate) fn share(&self) -> Option<Self> {
        match self {
            Self::Borrowed(arena) => Some(Self::Borrowed(*arena)),
            Self::Owned(_) => None,
        }
    }
}

impl<'a> From<&'a LinearArena<'a>> for ArenaHandle<'a> {
    fn from(arena: &'a LinearArena<'a>) -> Self {
        Self::Borrowed(arena)
    }
}

impl<'a> From<LinearArena<'a>> for ArenaHandle<'a> {
    fn from(arena: LinearArena<'a>) -> Self {
        Self::Owned(arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_handle_shares() {
        let mut buf = [0u8; 16];
        let arena = LinearArena::new(&mut buf);
        let handle = ArenaHandle::from(&arena);
        assert!(!handle.is_owned());
        let shared = handle.share().unwrap();
        assert_eq!(shared.arena().base_ptr(), arena.base_ptr());
    }

    #[test]
    fn owned_handle_does_not_share() {
        let mut buf = [0u8; 16];
        let handle = ArenaHandle::from(LinearArena::new(&mut buf));
        assert!(handle.is_owned());
        assert!(handle.share().is_none());
        assert_eq!(handle.arena().buffer_len(), 16);
    }
}
