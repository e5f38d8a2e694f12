#![deny(missing_docs)]
//! Core of the boolean fully homomorphic encryption scheme: parameter
//! sets, secret/public/evaluation key material, the bootstrap pipeline
//! (blind rotation, sample extraction, modulus and key switching) and the
//! bootstrapped gate catalogue.

mod blind_rotation;
mod error;
mod evaluate;
mod key_switch;
mod modulus_switch;
mod parameter;
mod plaintext;
mod public_key;
mod secret_key;

pub use blind_rotation::BlindRotationKey;
pub use error::FheCoreError;
pub use evaluate::EvaluationKey;
pub use key_switch::LweKeySwitchingKey;
pub use modulus_switch::{
    lwe_modulus_switch, lwe_modulus_switch_field_to_pow2, ModulusSwitchRoundMethod,
};
pub use parameter::{
    ConstParameters, LweSecretKeyType, Parameters, RingSecretKeyType, DefaultFieldU32,
    DEFAULT_128_BITS_PARAMETERS, DEFAULT_RING_MODULUS,
};
pub use plaintext::{decode, encode};
pub use public_key::LwePublicKey;
pub use secret_key::SecretKeyPack;
