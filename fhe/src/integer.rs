use fhe_core::{encode, ConstParameters};
use lattice::Lwe;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::keys::{server_key, FheEvaluationKey};
use crate::{ClientKey, Error, FheBool, PublicKey, Result, ServerKey};

/// The bits of an encrypted word, least significant first.
///
/// All word types share this layout; the typed wrappers fix the width
/// and gate the operations on the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WordCiphertext {
    bits: Vec<Lwe<u16>>,
    parameters: ConstParameters<u16>,
}

impl WordCiphertext {
    fn with_capacity(width: usize) -> Result<Vec<Lwe<u16>>> {
        let mut bits = Vec::new();
        bits.try_reserve_exact(width)
            .map_err(|_| Error::AllocationFailure)?;
        Ok(bits)
    }

    fn encrypt(value: u64, width: usize, client_key: &ClientKey) -> Result<Self> {
        let mut bits = Self::with_capacity(width)?;
        for i in 0..width {
            bits.push(client_key.pack().encrypt(value >> i & 1 == 1));
        }
        Ok(Self {
            bits,
            parameters: client_key.const_parameters(),
        })
    }

    fn encrypt_with_public_key(value: u64, width: usize, public_key: &PublicKey) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let mut bits = Self::with_capacity(width)?;
        for i in 0..width {
            bits.push(public_key.key().encrypt(
                value >> i & 1 == 1,
                public_key.parameters(),
                &mut rng,
            ));
        }
        Ok(Self {
            bits,
            parameters: public_key.const_parameters(),
        })
    }

    fn trivial(value: u64, width: usize, parameters: ConstParameters<u16>) -> Result<Self> {
        let mut bits = Self::with_capacity(width)?;
        for i in 0..width {
            bits.push(trivial_bit(value >> i & 1 == 1, &parameters));
        }
        Ok(Self { bits, parameters })
    }

    fn decrypt(&self, client_key: &ClientKey) -> Result<u64> {
        if self.parameters != client_key.const_parameters() {
            return Err(Error::ParameterMismatch);
        }
        let mut value = 0u64;
        for (i, bit) in self.bits.iter().enumerate() {
            value |= u64::from(client_key.pack().decrypt(bit)) << i;
        }
        Ok(value)
    }

    #[inline]
    fn parameters(&self) -> ConstParameters<u16> {
        self.parameters
    }

    #[inline]
    fn width(&self) -> usize {
        self.bits.len()
    }

    fn check_compatible(&self, rhs: &Self) -> Result<()> {
        if self.parameters != rhs.parameters {
            return Err(Error::ParameterMismatch);
        }
        if self.width() != rhs.width() {
            return Err(Error::WidthMismatch {
                expected: self.width(),
                found: rhs.width(),
            });
        }
        Ok(())
    }

    /// Ripple-carry addition modulo `2^width`. With `carry_in` set and a
    /// complemented right operand this also computes subtraction.
    ///
    /// Each stage needs the carry of the previous one, but its sum bit
    /// and its outgoing carry are independent and bootstrap in parallel.
    fn add_with_carry(&self, rhs: &Self, carry_in: bool, evk: &FheEvaluationKey) -> Result<Self> {
        self.check_compatible(rhs)?;
        let mut bits = Self::with_capacity(self.width())?;
        let mut carry = trivial_bit(carry_in, &self.parameters);
        for (a, b) in self.bits.iter().zip(&rhs.bits) {
            let half = evk.xor(a, b);
            let (sum, next) = rayon::join(|| evk.xor(&half, &carry), || evk.majority(a, b, &carry));
            bits.push(sum);
            carry = next;
        }
        Ok(Self {
            bits,
            parameters: self.parameters,
        })
    }

    fn add(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Self> {
        self.add_with_carry(rhs, false, evk)
    }

    /// Wrapping subtraction as `self + !rhs + 1`.
    fn sub(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Self> {
        self.check_compatible(rhs)?;
        let mut complement = Self::with_capacity(rhs.width())?;
        complement.extend(rhs.bits.iter().map(|bit| evk.not(bit)));
        let complemented = Self {
            bits: complement,
            parameters: rhs.parameters,
        };
        self.add_with_carry(&complemented, true, evk)
    }

    /// One independent gate per bit pair; every bit bootstraps in
    /// parallel.
    fn bitwise(
        &self,
        rhs: &Self,
        evk: &FheEvaluationKey,
        gate: impl Fn(&FheEvaluationKey, &Lwe<u16>, &Lwe<u16>) -> Lwe<u16> + Sync,
    ) -> Result<Self> {
        self.check_compatible(rhs)?;
        let mut bits = Self::with_capacity(self.width())?;
        self.bits
            .par_iter()
            .zip(rhs.bits.par_iter())
            .map(|(a, b)| gate(evk, a, b))
            .collect_into_vec(&mut bits);
        Ok(Self {
            bits,
            parameters: self.parameters,
        })
    }

    /// Wrapping multiplication by shift-and-add: the `i`-th partial
    /// product is `self` shifted up by `i` with every bit gated on
    /// `rhs.bits[i]`, truncated to the word width.
    fn mul(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Self> {
        self.check_compatible(rhs)?;
        let width = self.width();
        let mut acc = Self::trivial(0, width, self.parameters)?;
        for (i, multiplier_bit) in rhs.bits.iter().enumerate() {
            let mut gated = Vec::new();
            gated
                .try_reserve_exact(width - i)
                .map_err(|_| Error::AllocationFailure)?;
            self.bits[..width - i]
                .par_iter()
                .map(|a| evk.and(a, multiplier_bit))
                .collect_into_vec(&mut gated);

            let mut bits = Self::with_capacity(width)?;
            bits.resize_with(i, || trivial_bit(false, &self.parameters));
            bits.append(&mut gated);
            let partial = Self {
                bits,
                parameters: self.parameters,
            };
            acc = acc.add(&partial, evk)?;
        }
        Ok(acc)
    }

    /// Bit-wise selection between two words by one encrypted condition.
    fn select(
        &self,
        rhs: &Self,
        condition: &Lwe<u16>,
        evk: &FheEvaluationKey,
    ) -> Result<Self> {
        let mut bits = Self::with_capacity(self.width())?;
        self.bits
            .par_iter()
            .zip(rhs.bits.par_iter())
            .map(|(a, b)| evk.mux(condition, a, b))
            .collect_into_vec(&mut bits);
        Ok(Self {
            bits,
            parameters: self.parameters,
        })
    }

    fn min(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Self> {
        let condition = self.lt(rhs, evk)?;
        self.select(rhs, &condition, evk)
    }

    fn max(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Self> {
        let condition = self.lt(rhs, evk)?;
        rhs.select(self, &condition, evk)
    }

    /// Bitwise equality: XNOR every pair, then AND the results together
    /// as a balanced tree.
    fn eq(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Lwe<u16>> {
        self.check_compatible(rhs)?;
        let pairs: Vec<Lwe<u16>> = self
            .bits
            .par_iter()
            .zip(rhs.bits.par_iter())
            .map(|(a, b)| evk.xnor(a, b))
            .collect();
        Ok(and_all(&pairs, evk))
    }

    /// Unsigned comparison `self < rhs` as the borrow bit of the
    /// subtraction.
    fn lt(&self, rhs: &Self, evk: &FheEvaluationKey) -> Result<Lwe<u16>> {
        self.check_compatible(rhs)?;
        let mut borrow = trivial_bit(false, &self.parameters);
        for (a, b) in self.bits.iter().zip(&rhs.bits) {
            borrow = evk.majority(&evk.not(a), b, &borrow);
        }
        Ok(borrow)
    }
}

fn trivial_bit(message: bool, parameters: &ConstParameters<u16>) -> Lwe<u16> {
    let encoded = encode::<u16>(message, parameters.lwe_cipher_modulus.trailing_zeros());
    Lwe::trivial(encoded, parameters.lwe_dimension)
}

fn and_all(bits: &[Lwe<u16>], evk: &FheEvaluationKey) -> Lwe<u16> {
    if bits.len() == 1 {
        return bits[0].clone();
    }
    let (lhs, rhs) = bits.split_at(bits.len() / 2);
    let (l, r) = rayon::join(|| and_all(lhs, evk), || and_all(rhs, evk));
    evk.and(&l, &r)
}

macro_rules! fhe_uint_impl {
    ($(#[$doc:meta])* $name:ident, $clear:ty, $width:expr, $flag:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $name {
            word: WordCiphertext,
        }

        impl $name {
            /// Number of encrypted bits.
            pub const WIDTH: usize = $width;

            /// Encrypts a clear value under the client key.
            pub fn try_encrypt(value: $clear, client_key: &ClientKey) -> Result<Self> {
                if !client_key.config().$flag {
                    return Err(Error::TypeNotEnabled);
                }
                Ok(Self {
                    word: WordCiphertext::encrypt(u64::from(value), $width, client_key)?,
                })
            }

            /// Encrypts a clear value with the public key.
            pub fn try_encrypt_with_public_key(
                value: $clear,
                public_key: &PublicKey,
            ) -> Result<Self> {
                if !public_key.config().$flag {
                    return Err(Error::TypeNotEnabled);
                }
                Ok(Self {
                    word: WordCiphertext::encrypt_with_public_key(
                        u64::from(value),
                        $width,
                        public_key,
                    )?,
                })
            }

            /// Embeds a clear value as a noiseless ciphertext compatible
            /// with the server key of the current thread.
            pub fn try_encrypt_trivial(value: $clear) -> Result<Self> {
                let key = server_key()?;
                if !key.config().$flag {
                    return Err(Error::TypeNotEnabled);
                }
                Ok(Self {
                    word: WordCiphertext::trivial(
                        u64::from(value),
                        $width,
                        key.const_parameters(),
                    )?,
                })
            }

            /// Decrypts under the client key.
            pub fn decrypt(&self, client_key: &ClientKey) -> Result<$clear> {
                Ok(self.word.decrypt(client_key)? as $clear)
            }

            fn op_key(&self) -> Result<ServerKey> {
                let key = server_key()?;
                if !key.config().$flag {
                    return Err(Error::TypeNotEnabled);
                }
                if self.word.parameters() != key.const_parameters() {
                    return Err(Error::ParameterMismatch);
                }
                Ok(key)
            }

            /// Wrapping addition.
            pub fn add(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.add(&rhs.word, key.evaluation_key())?,
                })
            }

            /// Wrapping subtraction.
            pub fn sub(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.sub(&rhs.word, key.evaluation_key())?,
                })
            }

            /// Wrapping multiplication.
            pub fn mul(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.mul(&rhs.word, key.evaluation_key())?,
                })
            }

            /// Bitwise AND.
            pub fn bitand(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.bitwise(
                        &rhs.word,
                        key.evaluation_key(),
                        FheEvaluationKey::and,
                    )?,
                })
            }

            /// Bitwise OR.
            pub fn bitor(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.bitwise(
                        &rhs.word,
                        key.evaluation_key(),
                        FheEvaluationKey::or,
                    )?,
                })
            }

            /// Bitwise XOR.
            pub fn bitxor(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.bitwise(
                        &rhs.word,
                        key.evaluation_key(),
                        FheEvaluationKey::xor,
                    )?,
                })
            }

            /// Encrypted minimum of the two operands.
            pub fn min(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.min(&rhs.word, key.evaluation_key())?,
                })
            }

            /// Encrypted maximum of the two operands.
            pub fn max(&self, rhs: &Self) -> Result<Self> {
                let key = self.op_key()?;
                Ok(Self {
                    word: self.word.max(&rhs.word, key.evaluation_key())?,
                })
            }

            /// Encrypted equality test.
            pub fn eq(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = self.word.eq(&rhs.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(bit, self.word.parameters()))
            }

            /// Encrypted inequality test.
            pub fn ne(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = self.word.eq(&rhs.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(
                    key.evaluation_key().not(&bit),
                    self.word.parameters(),
                ))
            }

            /// Encrypted `self < rhs`.
            pub fn lt(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = self.word.lt(&rhs.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(bit, self.word.parameters()))
            }

            /// Encrypted `self <= rhs`.
            pub fn le(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = rhs.word.lt(&self.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(
                    key.evaluation_key().not(&bit),
                    self.word.parameters(),
                ))
            }

            /// Encrypted `self > rhs`.
            pub fn gt(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = rhs.word.lt(&self.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(bit, self.word.parameters()))
            }

            /// Encrypted `self >= rhs`.
            pub fn ge(&self, rhs: &Self) -> Result<FheBool> {
                let key = self.op_key()?;
                let bit = self.word.lt(&rhs.word, key.evaluation_key())?;
                Ok(FheBool::from_parts(
                    key.evaluation_key().not(&bit),
                    self.word.parameters(),
                ))
            }
        }
    };
}

fhe_uint_impl!(
    /// An encrypted 8-bit unsigned integer.
    FheUint8,
    u8,
    8,
    uint8_enabled
);
fhe_uint_impl!(
    /// An encrypted 16-bit unsigned integer.
    FheUint16,
    u16,
    16,
    uint16_enabled
);
fhe_uint_impl!(
    /// An encrypted 32-bit unsigned integer.
    FheUint32,
    u32,
    32,
    uint32_enabled
);

#[cfg(test)]
mod tests {
    use super::*;
    use fhe_core::DEFAULT_128_BITS_PARAMETERS;

    fn zero_word(width: usize) -> WordCiphertext {
        let parameters = *DEFAULT_128_BITS_PARAMETERS.const_parameters();
        WordCiphertext {
            bits: vec![Lwe::zero(parameters.lwe_dimension); width],
            parameters,
        }
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let a = zero_word(8);
        let b = zero_word(16);
        assert_eq!(
            a.check_compatible(&b),
            Err(Error::WidthMismatch {
                expected: 8,
                found: 16
            })
        );
    }

    #[test]
    fn parameter_mismatch_is_rejected() {
        let a = zero_word(8);
        let mut b = zero_word(8);
        b.parameters.lwe_noise_std_dev += 1.0;
        assert_eq!(a.check_compatible(&b), Err(Error::ParameterMismatch));
    }
}
