use std::cell::{RefCell, RefMut};
use std::sync::Arc;

use algebra::random::{sample_binary_values, sample_ternary_values, sample_uniform_pow2_values};
use algebra::{FieldNttPolynomial, FieldPolynomial, PowOf2Modulus, UnsignedInteger};
use lattice::Lwe;
use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::parameter::{LweSecretKeyType, RingSecretKeyType};
use crate::{decode, encode, Parameters};

/// The client's private key material: the LWE secret key, the ring
/// secret key used by the server-side bootstrap keys, and the
/// cryptographically secure generator all key derivation draws from.
pub struct SecretKeyPack<C: UnsignedInteger, const P: u32> {
    lwe_secret_key: Vec<C>,
    ring_secret_key: FieldPolynomial<P>,
    ntt_ring_secret_key: FieldNttPolynomial<P>,
    parameters: Arc<Parameters<C, P>>,
    csrng: RefCell<ChaCha12Rng>,
}

impl<C: UnsignedInteger, const P: u32> SecretKeyPack<C, P> {
    /// Samples fresh secret keys under `parameters`.
    ///
    /// The generator is seeded from operating system entropy; key
    /// generation is never reproducible across runs.
    pub fn new(parameters: Arc<Parameters<C, P>>) -> Self {
        let mut csrng = ChaCha12Rng::from_entropy();

        let lwe_secret_key = match parameters.lwe_secret_key_type() {
            LweSecretKeyType::Binary => {
                sample_binary_values(parameters.lwe_dimension(), &mut csrng)
            }
            LweSecretKeyType::Ternary => sample_ternary_values(
                parameters.lwe_cipher_modulus().value(),
                parameters.lwe_dimension(),
                &mut csrng,
            ),
        };

        let ring_secret_key = match parameters.ring_secret_key_type() {
            RingSecretKeyType::Binary => {
                FieldPolynomial::random_binary(parameters.ring_dimension(), &mut csrng)
            }
            RingSecretKeyType::Ternary => {
                FieldPolynomial::random_ternary(parameters.ring_dimension(), &mut csrng)
            }
        };
        let ntt_ring_secret_key = parameters.ntt_table().transform(&ring_secret_key);

        Self {
            lwe_secret_key,
            ring_secret_key,
            ntt_ring_secret_key,
            parameters,
            csrng: RefCell::new(csrng),
        }
    }

    /// Returns the parameters this key was generated under.
    #[inline]
    pub fn parameters(&self) -> &Arc<Parameters<C, P>> {
        &self.parameters
    }

    /// Returns the LWE secret key coefficients.
    #[inline]
    pub fn lwe_secret_key(&self) -> &[C] {
        &self.lwe_secret_key
    }

    /// Returns the ring secret key in coefficient form.
    #[inline]
    pub fn ring_secret_key(&self) -> &FieldPolynomial<P> {
        &self.ring_secret_key
    }

    /// Returns the ring secret key in evaluation form.
    #[inline]
    pub fn ntt_ring_secret_key(&self) -> &FieldNttPolynomial<P> {
        &self.ntt_ring_secret_key
    }

    /// Mutable access to the secure generator.
    #[inline]
    pub fn csrng_mut(&self) -> RefMut<'_, ChaCha12Rng> {
        self.csrng.borrow_mut()
    }

    /// Encrypts a boolean message with fresh noise.
    pub fn encrypt(&self, message: bool) -> Lwe<C> {
        let modulus = self.parameters.lwe_cipher_modulus();
        let chi = self.parameters.lwe_noise_distribution();
        let mut csrng = self.csrng.borrow_mut();

        let a = sample_uniform_pow2_values(
            modulus.mask(),
            self.parameters.lwe_dimension(),
            &mut *csrng,
        );
        let e: C = chi.sample(&mut *csrng);
        let encoded = encode(message, self.parameters.lwe_cipher_modulus_bits());
        let b = modulus.add_reduce(
            modulus.add_reduce(dot_product(&a, &self.lwe_secret_key, modulus), e),
            encoded,
        );

        Lwe::new(a, b)
    }

    /// Decrypts a ciphertext.
    ///
    /// A ciphertext whose noise grew past the budget decrypts to the
    /// wrong message without any indication; see [`decode`].
    pub fn decrypt(&self, ciphertext: &Lwe<C>) -> bool {
        let modulus = self.parameters.lwe_cipher_modulus();
        let phase = modulus.sub_reduce(
            ciphertext.b(),
            dot_product(ciphertext.a(), &self.lwe_secret_key, modulus),
        );
        decode(phase, self.parameters.lwe_cipher_modulus_bits())
    }

    /// Decrypts a ciphertext, also reporting the magnitude of its noise.
    pub fn decrypt_with_noise(&self, ciphertext: &Lwe<C>) -> (bool, C) {
        let modulus = self.parameters.lwe_cipher_modulus();
        let bits = self.parameters.lwe_cipher_modulus_bits();
        let phase = modulus.sub_reduce(
            ciphertext.b(),
            dot_product(ciphertext.a(), &self.lwe_secret_key, modulus),
        );
        let message = decode(phase, bits);
        let expected: C = encode(message, bits);
        let distance = modulus.sub_reduce(phase, expected);
        let noise = distance.min(modulus.neg_reduce(distance));
        (message, noise)
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
    use crate::DEFAULT_128_BITS_PARAMETERS;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let pack = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
        for _ in 0..50 {
            for message in [false, true] {
                let cipher = pack.encrypt(message);
                let (decrypted, noise) = pack.decrypt_with_noise(&cipher);
                assert_eq!(decrypted, message);
                assert!(noise < (1 << 14) / 8);
            }
        }
    }
}
