//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The buffer has no room left for the requested block.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still unclaimed past the current offset.
        remaining: usize,
    },
    /// An alignment that is not a non-zero power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
    /// A null pointer was supplied where a buffer was required.
    NullPointer,
    /// A pointer or checkpoint that does not belong to this arena's buffer.
    OutOfBounds {
        /// The offending address (or offset, for checkpoints).
        address: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena out of memory: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "invalid alignment {align}: must be a power of two")
            }
            Self::NullPointer => write!(f, "null buffer pointer"),
            Self::OutOfBounds { address } => {
                write!(f, "address {address:#x} lies outside the arena buffer")
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_sizes() {
        let err = ArenaError::OutOfMemory {
            requested: 10,
            remaining: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("6"));
    }

    #[test]
    fn out_of_bounds_formats_hex() {
        let err = ArenaError::OutOfBounds { address: 255 };
        assert!(err.to_string().contains("0xff"));
    }
}
