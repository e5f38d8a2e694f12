use algebra::random::sample_uniform_pow2_values;
use algebra::{Basis, Fp, PowOf2Modulus, UnsignedInteger};
use lattice::Lwe;
use rand::distributions::Distribution;

use crate::SecretKeyPack;

/// LWE-to-LWE key switching key.
///
/// For every decomposition level `j`, ring coefficient `i` and non-zero
/// digit `v`, the key holds a fresh encryption of `v * B^j * z_i` under
/// the LWE secret key, where `z` is the ring secret key viewed modulo
/// `q`. Switching decomposes the mask of the input ciphertext and
/// accumulates the matching rows.
#[derive(Debug, Clone)]
pub struct LweKeySwitchingKey<C> {
    /// Indexed by `[level][ring_index][digit - 1]`.
    key: Vec<Vec<Vec<Lwe<C>>>>,
    basis: Basis,
}

impl<C: UnsignedInteger> LweKeySwitchingKey<C> {
    /// Generates the key switching key.
    pub fn generate<const P: u32>(secret_key_pack: &SecretKeyPack<C, P>) -> Self {
        let parameters = secret_key_pack.parameters();
        let basis = parameters.key_switching_basis();
        let modulus = parameters.lwe_cipher_modulus();
        let chi = parameters.key_switching_noise_distribution();
        let lwe_secret_key = secret_key_pack.lwe_secret_key();
        let lwe_dimension = parameters.lwe_dimension();
        let q = modulus.value().as_u64();
        let mut csrng = secret_key_pack.csrng_mut();

        // The ring secret key has coefficients in {-1, 0, 1}, which map
        // onto the LWE modulus domain directly.
        let z: Vec<C> = secret_key_pack
            .ring_secret_key()
            .iter()
            .map(|&coeff| {
                if coeff == Fp::ZERO {
                    C::ZERO
                } else if coeff == Fp::ONE {
                    C::ONE
                } else {
                    debug_assert_eq!(coeff, Fp::NEG_ONE);
                    modulus.neg_reduce(C::ONE)
                }
            })
            .collect();

        let key = (0..basis.decompose_len())
            .map(|level| {
                let shift = basis.bits() * level as u32;
                z.iter()
                    .map(|&z_i| {
                        (1..basis.value() as u64)
                            .map(|digit| {
                                let factor = C::from_u64((digit << shift) % q);
                                let a = sample_uniform_pow2_values(
                                    modulus.mask(),
                                    lwe_dimension,
                                    &mut *csrng,
                                );
                                let e: C = chi.sample(&mut *csrng);
                                let b = modulus.add_reduce(
                                    modulus.add_reduce(
                                        dot_product(&a, lwe_secret_key, modulus),
                                        e,
                                    ),
                                    modulus.mul_reduce(factor, z_i),
                                );
                                Lwe::new(a, b)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Self { key, basis }
    }

    /// Switches a ciphertext under the ring secret key (dimension `N`)
    /// to one under the LWE secret key (dimension `n`), same modulus.
    pub fn key_switch(
        &self,
        cipher: &Lwe<C>,
        lwe_dimension: usize,
        modulus: PowOf2Modulus<C>,
    ) -> Lwe<C> {
        let mask = C::from_u64(u64::from(self.basis.mask()));
        let bits = self.basis.bits();

        // result accumulates Σ Enc(digit * B^level * z_i); its negation
        // plus b is the switched ciphertext.
        let mut result = Lwe::zero(lwe_dimension);
        let mut a = cipher.a().to_vec();
        for level_key in &self.key {
            for (a_i, digit_rows) in a.iter_mut().zip(level_key) {
                let digit = (*a_i & mask).as_usize();
                *a_i = *a_i >> bits;
                if digit != 0 {
                    result.add_reduce_assign_component_wise(&digit_rows[digit - 1], modulus);
                }
            }
        }
        result.neg_reduce_assign(modulus);
        *result.b_mut() = modulus.add_reduce(result.b(), cipher.b());
        result
    }
}

#[inline]
fn dot_product<C: UnsignedInteger>(a: &[C], s: &[C], modulus: PowOf2Modulus<C>) -> C {
    debug_assert_eq!(a.len(), s.len());
    modulus.reduce(
        a.iter()
            .zip(s.iter())
            .fold(C::ZERO, |acc, (&x, &y)| acc.wrapping_add(x.wrapping_mul(y))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, DEFAULT_128_BITS_PARAMETERS};
    use std::sync::Arc;

    #[test]
    fn key_switch_preserves_phase() {
        let pack = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
        let parameters = pack.parameters();
        let modulus = parameters.lwe_cipher_modulus();
        let bits = parameters.lwe_cipher_modulus_bits();
        let ksk = LweKeySwitchingKey::generate(&pack);

        // Encrypt directly under the ring secret key seen as an LWE key.
        let z: Vec<u16> = pack
            .ring_secret_key()
            .iter()
            .map(|&c| {
                if c == Fp::ZERO {
                    0
                } else if c == Fp::ONE {
                    1
                } else {
                    modulus.neg_reduce(1)
                }
            })
            .collect();

        let mut rng = pack.csrng_mut();
        for message in [false, true] {
            let a: Vec<u16> = sample_uniform_pow2_values(
                modulus.mask(),
                parameters.ring_dimension(),
                &mut *rng,
            );
            let b = modulus.add_reduce(
                dot_product(&a, &z, modulus),
                encode::<u16>(message, bits),
            );
            let cipher = Lwe::new(a, b);

            let switched = ksk.key_switch(&cipher, parameters.lwe_dimension(), modulus);
            let phase = modulus.sub_reduce(
                switched.b(),
                dot_product(switched.a(), pack.lwe_secret_key(), modulus),
            );
            assert_eq!(decode(phase, bits), message);
        }
    }
}
