use algebra::{FieldPolynomial, UnsignedInteger};
use lattice::{Lwe, Rlwe};

use crate::parameter::LweSecretKeyType;
use crate::{Parameters, SecretKeyPack};

mod binary;
mod ternary;

pub use binary::BinaryBlindRotationKey;
pub use ternary::TernaryBlindRotationKey;

/// Blind rotation key.
///
/// Bootstrapping refreshes a ciphertext by homomorphically evaluating
/// the decryption phase as a rotation exponent of an accumulator
/// polynomial; the key holds one RGSW encryption (or pair, for ternary
/// secrets) per LWE secret coefficient.
#[derive(Debug, Clone)]
pub enum BlindRotationKey<const P: u32> {
    /// Key for a binary LWE secret.
    Binary(BinaryBlindRotationKey<P>),
    /// Key for a ternary LWE secret.
    Ternary(TernaryBlindRotationKey<P>),
}

impl<const P: u32> BlindRotationKey<P> {
    /// Performs the blind rotation of `lut` by the phase of `lwe`.
    ///
    /// The mask and body of `lwe` must already live in the rotation
    /// index domain `[0, 2N)`.
    pub fn blind_rotate<C: UnsignedInteger>(
        &self,
        lut: FieldPolynomial<P>,
        lwe: &Lwe<C>,
        parameters: &Parameters<C, P>,
    ) -> Rlwe<P> {
        match self {
            BlindRotationKey::Binary(key) => key.blind_rotate(lut, lwe, parameters.ntt_table()),
            BlindRotationKey::Ternary(key) => key.blind_rotate(lut, lwe, parameters.ntt_table()),
        }
    }

    /// Generates the key matching the secret key distribution.
    pub fn generate<C: UnsignedInteger>(secret_key_pack: &SecretKeyPack<C, P>) -> Self {
        let parameters = secret_key_pack.parameters();
        let chi = parameters.ring_noise_distribution();
        let mut csrng = secret_key_pack.csrng_mut();

        match parameters.lwe_secret_key_type() {
            LweSecretKeyType::Binary => BlindRotationKey::Binary(BinaryBlindRotationKey::generate(
                secret_key_pack.lwe_secret_key(),
                secret_key_pack.ntt_ring_secret_key(),
                parameters.blind_rotation_basis(),
                chi,
                parameters.ntt_table(),
                &mut *csrng,
            )),
            LweSecretKeyType::Ternary => {
                BlindRotationKey::Ternary(TernaryBlindRotationKey::generate(
                    secret_key_pack.lwe_secret_key(),
                    secret_key_pack.ntt_ring_secret_key(),
                    parameters.blind_rotation_basis(),
                    parameters.lwe_cipher_modulus().value(),
                    chi,
                    parameters.ntt_table(),
                    &mut *csrng,
                ))
            }
        }
    }
}
