//! Array-specific error types.

use std::error::Error;
use std::fmt;

use linmem_arena::ArenaError;

/// Errors that can occur during [`DynArray`](crate::DynArray) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// The heap or the backing arena could not supply the storage.
    OutOfMemory {
        /// Size of the failed request in bytes.
        requested_bytes: usize,
    },
    /// An index or range outside the live elements.
    OutOfRange {
        /// The offending index (or range bound).
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// A capacity whose byte size cannot be represented as a memory layout.
    InvalidCapacity {
        /// The requested capacity in elements.
        requested: usize,
    },
    /// A target length whose byte size cannot be represented as a memory layout.
    InvalidSize {
        /// The requested length in elements.
        requested: usize,
    },
    /// The operation needs at least one element.
    EmptyArray,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested_bytes } => {
                write!(f, "out of memory: failed to allocate {requested_bytes} bytes")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::InvalidCapacity { requested } => {
                write!(f, "capacity {requested} overflows the address space")
            }
            Self::InvalidSize { requested } => {
                write!(f, "size {requested} overflows the address space")
            }
            Self::EmptyArray => write!(f, "array is empty"),
        }
    }
}

impl Error for ArrayError {}

impl From<ArenaError> for ArrayError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::OutOfMemory { requested, .. } => Self::OutOfMemory {
                requested_bytes: requested,
            },
            // Element alignments are always powers of two and arena storage
            // is only ever requested fresh, so any other arena failure still
            // means the arena could not hand out the block.
            ArenaError::InvalidAlignment { .. }
            | ArenaError::NullPointer
            | ArenaError::OutOfBounds { .. } => Self::OutOfMemory { requested_bytes: 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_exhaustion_maps_to_out_of_memory() {
        let err: ArrayError = ArenaError::OutOfMemory {
            requested: 64,
            remaining: 8,
        }
        .into();
        assert_eq!(err, ArrayError::OutOfMemory { requested_bytes: 64 });
    }

    #[test]
    fn out_of_range_display() {
        let err = ArrayError::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for length 3");
    }
}
