//! Address alignment helpers.

use crate::error::ArenaError;

/// Returns `true` if `x` is a non-zero power of two.
pub fn is_power_of_two(x: usize) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

/// Round `address` up to the next multiple of `align`.
///
/// Returns `InvalidAlignment` if `align` is not a power of two, and
/// `OutOfMemory` if the rounded address would not fit in a `usize`.
///
/// ```
/// use linmem_arena::align_forward;
///
/// assert_eq!(align_forward(13, 8), Ok(16));
/// assert_eq!(align_forward(16, 8), Ok(16));
/// assert!(align_forward(13, 6).is_err());
/// ```
pub fn align_forward(address: usize, align: usize) -> Result<usize, ArenaError> {
    if !is_power_of_two(align) {
        return Err(ArenaError::InvalidAlignment { align });
    }
    // Same as `address % align`, since align is a power of two.
    let modulo = address & (align - 1);
    if modulo == 0 {
        return Ok(address);
    }
    address
        .checked_add(align - modulo)
        .ok_or(ArenaError::OutOfMemory {
            requested: align - modulo,
            remaining: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_detection() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(2));
        assert!(!is_power_of_two(3));
        assert!(is_power_of_two(1 << 20));
        assert!(!is_power_of_two(usize::MAX));
    }

    #[test]
    fn word_alignment_ranges() {
        let word = std::mem::size_of::<usize>();
        for i in 0..10 {
            for address in (word * i + 1)..=(word * (i + 1)) {
                assert_eq!(align_forward(address, word), Ok(word * (i + 1)));
            }
        }
    }

    #[test]
    fn zero_alignment_rejected() {
        assert_eq!(
            align_forward(5, 0),
            Err(ArenaError::InvalidAlignment { align: 0 })
        );
    }

    #[test]
    fn overflow_reported_as_out_of_memory() {
        let result = align_forward(usize::MAX, 16);
        assert!(matches!(result, Err(ArenaError::OutOfMemory { .. })));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn result_is_smallest_aligned_address(
                address in 0usize..(1 << 40),
                shift in 0u32..12,
            ) {
                let align = 1usize << shift;
                let aligned = align_forward(address, align).unwrap();
                prop_assert_eq!(aligned % align, 0);
                prop_assert!(aligned >= address);
                prop_assert!(aligned - address < align);
            }
        }
    }
}
