//! Arena configuration parameters.

use crate::align::is_power_of_two;
use crate::error::ArenaError;

/// Configuration for a [`LinearArena`](crate::LinearArena).
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Alignment used by [`LinearArena::alloc`](crate::LinearArena::alloc)
    /// and [`LinearArena::resize`](crate::LinearArena::resize).
    ///
    /// Default: two pointer widths (16 bytes on 64-bit targets).
    /// Must be a power of two.
    pub default_alignment: usize,
}

impl ArenaConfig {
    /// Default alignment: enough for any scalar and most SIMD-free structs.
    pub const DEFAULT_ALIGNMENT: usize = 2 * std::mem::size_of::<usize>();

    /// Create a config with the given default alignment.
    pub fn new(default_alignment: usize) -> Self {
        Self { default_alignment }
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !is_power_of_two(self.default_alignment) {
            return Err(ArenaError::InvalidAlignment {
                align: self.default_alignment,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALIGNMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alignment_is_two_pointer_widths() {
        let config = ArenaConfig::default();
        assert_eq!(config.default_alignment, 2 * std::mem::size_of::<usize>());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_power_of_two_rejected() {
        let config = ArenaConfig::new(12);
        assert_eq!(
            config.validate(),
            Err(ArenaError::InvalidAlignment { align: 12 })
        );
        assert!(ArenaConfig::new(0).validate().is_err());
    }
}
