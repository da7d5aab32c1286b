//! Reusable element fixtures for container tests.
//!
//! - [`DropLedger`]: shared counters for drops and clones.
//! - [`Tracked`]: a value that reports its drops and clones to a ledger.
//! - [`CloneBomb`]: clones successfully a fixed number of times, then panics.

use std::cell::Cell;
use std::rc::Rc;

/// Shared drop/clone counters.
///
/// Cloning the ledger shares the counters, so a test can keep one handle
/// while [`Tracked`] values carry the others.
#[derive(Clone, Debug, Default)]
pub struct DropLedger {
    drops: Rc<Cell<usize>>,
    clones: Rc<Cell<usize>>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked value reporting to this ledger.
    pub fn track(&self, value: i64) -> Tracked {
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    /// How many tracked values have been dropped.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    /// How many tracked values have been cloned.
    pub fn clones(&self) -> usize {
        self.clones.get()
    }

    /// Tracked values created by `track` or `clone` that are still alive,
    /// given how many were created with `track`.
    pub fn live(&self, tracked: usize) -> usize {
        tracked + self.clones() - self.drops()
    }
}

/// A value that counts its own drops and clones.
#[derive(Debug)]
pub struct Tracked {
    pub value: i64,
    ledger: DropLedger,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.clones.set(self.ledger.clones.get() + 1);
        Self {
            value: self.value,
            ledger: self.ledger.clone(),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.drops.set(self.ledger.drops.get() + 1);
    }
}

/// Clones successfully `fuse` times (shared across all copies), then panics.
///
/// Useful for checking that containers stay consistent when element
/// construction unwinds halfway through a bulk operation.
#[derive(Debug)]
pub struct CloneBomb {
    fuse: Rc<Cell<usize>>,
    ledger: DropLedger,
}

impl CloneBomb {
    pub fn new(fuse: usize, ledger: &DropLedger) -> Self {
        Self {
            fuse: Rc::new(Cell::new(fuse)),
            ledger: ledger.clone(),
        }
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let left = self.fuse.get();
        if left == 0 {
            panic!("CloneBomb fuse exhausted");
        }
        self.fuse.set(left - 1);
        self.ledger.clones.set(self.ledger.clones.get() + 1);
        Self {
            fuse: Rc::clone(&self.fuse),
            ledger: self.ledger.clone(),
        }
    }
}

impl Drop for CloneBomb {
    fn drop(&mut self) {
        self.ledger.drops.set(self.ledger.drops.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_counts_clones_and_drops() {
        let ledger = DropLedger::new();
        let a = ledger.track(1);
        let b = a.clone();
        assert_eq!(ledger.clones(), 1);
        drop(a);
        drop(b);
        assert_eq!(ledger.drops(), 2);
        assert_eq!(ledger.live(1), 0);
    }

    #[test]
    fn clone_bomb_panics_after_fuse() {
        let ledger = DropLedger::new();
        let bomb = CloneBomb::new(1, &ledger);
        let _first = bomb.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| bomb.clone()));
        assert!(result.is_err());
    }
}
