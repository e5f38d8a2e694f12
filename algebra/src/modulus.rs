use serde::{Deserialize, Serialize};

use crate::UnsignedInteger;

/// A power-of-two modulus, reduced by masking.
///
/// The modulus value must be a power of two strictly between `1` and
/// `2^(C::BITS - 1)` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowOf2Modulus<C> {
    mask: C,
}

impl<C: UnsignedInteger> PowOf2Modulus<C> {
    /// Creates the modulus from its value.
    #[inline]
    pub fn new(value: C) -> Self {
        debug_assert!(value > C::ONE);
        debug_assert_eq!(value & (value.wrapping_sub(C::ONE)), C::ZERO);
        Self {
            mask: value.wrapping_sub(C::ONE),
        }
    }

    /// Returns the modulus value.
    #[inline]
    pub fn value(self) -> C {
        self.mask.wrapping_add(C::ONE)
    }

    /// Returns the reduction mask, `value - 1`.
    #[inline]
    pub fn mask(self) -> C {
        self.mask
    }

    /// Reduces `value` into `[0, modulus)`.
    #[inline]
    pub fn reduce(self, value: C) -> C {
        value & self.mask
    }

    /// Computes `a + b mod modulus`.
    #[inline]
    pub fn add_reduce(self, a: C, b: C) -> C {
        a.wrapping_add(b) & self.mask
    }

    /// Computes `a - b mod modulus`.
    #[inline]
    pub fn sub_reduce(self, a: C, b: C) -> C {
        a.wrapping_sub(b) & self.mask
    }

    /// Computes `-a mod modulus`.
    #[inline]
    pub fn neg_reduce(self, a: C) -> C {
        a.wrapping_neg() & self.mask
    }

    /// Computes `a * b mod modulus`.
    #[inline]
    pub fn mul_reduce(self, a: C, b: C) -> C {
        a.wrapping_mul(b) & self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_ops() {
        let modulus = PowOf2Modulus::<u16>::new(1 << 14);
        assert_eq!(modulus.value(), 1 << 14);
        assert_eq!(modulus.add_reduce(16000, 1000), (16000 + 1000) % (1 << 14));
        assert_eq!(modulus.sub_reduce(5, 10), (1 << 14) - 5);
        assert_eq!(modulus.neg_reduce(0), 0);
        assert_eq!(modulus.neg_reduce(1), (1 << 14) - 1);
        assert_eq!(modulus.mul_reduce(12345, 678), (12345u64 * 678 % (1 << 14)) as u16);
    }
}
