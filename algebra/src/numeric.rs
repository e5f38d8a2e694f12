use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use num_traits::{ConstOne, ConstZero};

/// The backing integer type of LWE ciphertext components.
///
/// Implemented for the unsigned primitives; arithmetic is wrapping so a
/// power-of-two modulus can be applied with a plain mask afterwards.
pub trait UnsignedInteger:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + ConstZero
    + ConstOne
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    /// Bit width of the type.
    const BITS: u32;

    /// Wrapping addition.
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Wrapping subtraction.
    fn wrapping_sub(self, rhs: Self) -> Self;
    /// Wrapping multiplication.
    fn wrapping_mul(self, rhs: Self) -> Self;
    /// Wrapping negation.
    fn wrapping_neg(self) -> Self;

    /// Converts to `usize`, truncating if necessary.
    fn as_usize(self) -> usize;
    /// Converts to `u32`, truncating if necessary.
    fn as_u32(self) -> u32;
    /// Converts to `u64`.
    fn as_u64(self) -> u64;
    /// Converts to `f64`.
    fn as_f64(self) -> f64;
    /// Converts from `u64`, truncating if necessary.
    fn from_u64(value: u64) -> Self;
    /// Converts from a non-negative `f64`, truncating toward zero.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_unsigned_integer {
    ($($t:ty),*) => {$(
        impl UnsignedInteger for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }

            #[inline]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }

            #[inline]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn as_u32(self) -> u32 {
                self as u32
            }

            #[inline]
            fn as_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $t
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_unsigned_integer!(u8, u16, u32, u64);
