//! Growth policy for [`DynArray`](crate::DynArray).

/// Capacity policy for a growable array.
///
/// Controls the capacity of a freshly constructed array and how capacity
/// grows when an append finds the array full.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrayConfig {
    /// Capacity allocated by the default constructors, and the first
    /// capacity chosen when growing an array that has none.
    ///
    /// Default: 8.
    pub initial_capacity: usize,

    /// Multiplier applied to the current capacity when growing.
    ///
    /// Default: 1.5. The next capacity is `floor(capacity * factor) + 1`, so
    /// growth always makes progress even for factors at or below 1.
    pub growth_factor: f64,
}

impl ArrayConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Default growth factor.
    pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

    /// Create a config with the given policy.
    pub fn new(initial_capacity: usize, growth_factor: f64) -> Self {
        Self {
            initial_capacity,
            growth_factor,
        }
    }

    /// Capacity to grow to from `current` when at least `min_capacity`
    /// slots are needed.
    pub fn next_capacity(&self, current: usize, min_capacity: usize) -> usize {
        let candidate = if current == 0 {
            self.initial_capacity
        } else {
            // Float-to-int casts saturate, so huge or NaN products stay in range.
            ((current as f64 * self.growth_factor).floor() as usize).saturating_add(1)
        };
        candidate.max(min_capacity)
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY, Self::DEFAULT_GROWTH_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grows_to_initial_capacity() {
        let config = ArrayConfig::default();
        assert_eq!(config.next_capacity(0, 1), 8);
        assert_eq!(config.next_capacity(0, 20), 20);
    }

    #[test]
    fn growth_is_one_and_a_half_plus_one() {
        let config = ArrayConfig::default();
        assert_eq!(config.next_capacity(3, 4), 5);
        assert_eq!(config.next_capacity(8, 9), 13);
        assert_eq!(config.next_capacity(1, 2), 2);
    }

    #[test]
    fn min_capacity_wins_when_larger() {
        let config = ArrayConfig::default();
        assert_eq!(config.next_capacity(10, 100), 100);
    }

    #[test]
    fn degenerate_factor_still_progresses() {
        let config = ArrayConfig::new(0, 0.0);
        assert_eq!(config.next_capacity(0, 1), 1);
        assert_eq!(config.next_capacity(5, 6), 6);
        let nan = ArrayConfig::new(4, f64::NAN);
        assert_eq!(nan.next_capacity(4, 5), 5);
    }

    #[test]
    fn huge_capacity_saturates() {
        let config = ArrayConfig::default();
        assert_eq!(config.next_capacity(usize::MAX, 0), usize::MAX);
    }
}
