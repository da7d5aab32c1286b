//! Benchmark workloads for the linmem crates.
//!
//! Provides deterministic inputs shared by the criterion benches:
//!
//! - [`WorkloadProfile::reference`]: 64 KiB arena, 1K allocations
//! - [`WorkloadProfile::stress`]: 4 MiB arena, 64K allocations
//! - [`alloc_sizes`]: seeded block sizes for mixed-size allocation runs
//! - [`fill_array`]: push a counting sequence into an arena-backed array

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use linmem_arena::LinearArena;
use linmem_array::{ArenaHandle, ArrayError, DynArray};

/// Shape of a benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkloadProfile {
    /// Size of the arena's backing buffer in bytes.
    pub buffer_bytes: usize,
    /// Number of allocations or pushes per iteration.
    pub operations: usize,
    /// Largest single block requested, in bytes.
    pub max_block: usize,
    /// Seed for [`alloc_sizes`].
    pub seed: u64,
}

impl WorkloadProfile {
    /// Small profile that fits comfortably in L2.
    pub fn reference(seed: u64) -> Self {
        Self {
            buffer_bytes: 64 * 1024,
            operations: 1_000,
            max_block: 48,
            seed,
        }
    }

    /// Large profile for throughput under cache pressure.
    pub fn stress(seed: u64) -> Self {
        Self {
            buffer_bytes: 4 * 1024 * 1024,
            operations: 64 * 1024,
            max_block: 48,
            seed,
        }
    }

    /// A zeroed buffer of `buffer_bytes` for the arena to borrow.
    pub fn buffer(&self) -> Vec<u8> {
        vec![0; self.buffer_bytes]
    }

    /// Block sizes for one iteration of this profile.
    pub fn sizes(&self) -> Vec<usize> {
        alloc_sizes(self.operations, self.max_block, self.seed)
    }
}

/// Generate `count` deterministic block sizes in `1..=max`.
///
/// Uses a 64-bit LCG so runs are reproducible without a RNG dependency.
pub fn alloc_sizes(count: usize, max: usize, seed: u64) -> Vec<usize> {
    let max = max.max(1) as u64;
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % max + 1) as usize
        })
        .collect()
}

/// Push `0..n` into a fresh array drawing from `arena`.
pub fn fill_array<'a>(arena: &'a LinearArena<'a>, n: u64) -> Result<DynArray<'a, u64>, ArrayError> {
    let mut array = DynArray::new_in(ArenaHandle::Borrowed(arena))?;
    for i in 0..n {
        array.push_back(i)?;
    }
    Ok(array)
}
