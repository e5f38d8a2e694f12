use algebra::UnsignedInteger;
use lattice::Lwe;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::{encode, Parameters, SecretKeyPack};

/// Public encryption key: a list of fresh encryptions of zero.
///
/// Encryption adds a random subset of the list, so the sample count is
/// chosen above `(n + 1) log2(q)` for leftover-hash security; the noise
/// of a public-key ciphertext is accordingly larger than a secret-key
/// one, but stays far below the decryption bound.
///
/// The key cannot decrypt and does not reveal the secret key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LwePublicKey<C> {
    key: Vec<Lwe<C>>,
}

impl<C: UnsignedInteger> LwePublicKey<C> {
    /// Derives a public key from the secret key pack.
    pub fn new<const P: u32>(secret_key_pack: &SecretKeyPack<C, P>) -> Self {
        let parameters = secret_key_pack.parameters();
        let count = (parameters.lwe_dimension() + 1)
            * parameters.lwe_cipher_modulus_bits() as usize
            + 128;
        Self {
            key: (0..count).map(|_| secret_key_pack.encrypt(false)).collect(),
        }
    }

    /// Returns the number of zero encryptions.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.key.len()
    }

    /// Encrypts a boolean message without the secret key.
    pub fn encrypt<const P: u32, R>(
        &self,
        message: bool,
        parameters: &Parameters<C, P>,
        rng: &mut R,
    ) -> Lwe<C>
    where
        R: Rng + CryptoRng,
    {
        let modulus = parameters.lwe_cipher_modulus();
        let mut cipher = Lwe::zero(parameters.lwe_dimension());
        for sample in &self.key {
            if rng.gen::<bool>() {
                cipher.add_reduce_assign_component_wise(sample, modulus);
            }
        }
        let encoded: C = encode(message, parameters.lwe_cipher_modulus_bits());
        *cipher.b_mut() = modulus.add_reduce(cipher.b(), encoded);
        cipher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_128_BITS_PARAMETERS;
    use std::sync::Arc;

    #[test]
    fn public_key_round_trip() {
        let pack = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
        let public_key = LwePublicKey::new(&pack);
        assert_eq!(public_key.sample_count(), (512 + 1) * 14 + 128);
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            for message in [false, true] {
                let cipher =
                    public_key.encrypt(message, pack.parameters(), &mut rng);
                let (decrypted, noise) = pack.decrypt_with_noise(&cipher);
                assert_eq!(decrypted, message);
                assert!(noise < (1 << 14) / 8);
            }
        }
    }
}
