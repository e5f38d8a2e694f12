//! Power-of-two basis for gadget decomposition.

use serde::{Deserialize, Serialize};

/// A power-of-two decomposition basis.
///
/// A value modulo a `modulus_bits`-bit modulus is split into
/// `decompose_len` digits of `bits` bits each, least significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basis {
    bits: u32,
    decompose_len: usize,
}

impl Basis {
    /// Creates a new [`Basis`] with digit width `bits` for a modulus of
    /// `modulus_bits` bits.
    #[inline]
    pub fn new(bits: u32, modulus_bits: u32) -> Self {
        debug_assert!(bits > 0 && bits < 32);
        Self {
            bits,
            decompose_len: modulus_bits.div_ceil(bits) as usize,
        }
    }

    /// Returns the digit width in bits.
    #[inline]
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Returns the basis value `2^bits`.
    #[inline]
    pub fn value(self) -> u32 {
        1 << self.bits
    }

    /// Returns the digit mask `2^bits - 1`.
    #[inline]
    pub fn mask(self) -> u32 {
        self.value() - 1
    }

    /// Returns the number of digits in a full decomposition.
    #[inline]
    pub fn decompose_len(self) -> usize {
        self.decompose_len
    }
}
