use algebra::AlgebraError;
use thiserror::Error;

/// Errors raised while validating a parameter set or deriving key
/// material from it.
#[derive(Debug, Error)]
pub enum FheCoreError {
    /// The LWE dimension is not a power of two.
    #[error("LWE dimension {0} is not a power of two")]
    LweDimensionInvalid(usize),
    /// The plaintext modulus is unusable.
    #[error("LWE plaintext modulus {0} must be a power of two of at least 2")]
    PlainModulusInvalid(u64),
    /// The ciphertext modulus is unusable.
    #[error("LWE ciphertext modulus {0} must be a power of two")]
    CipherModulusInvalid(u64),
    /// The plaintext modulus does not divide the ciphertext modulus.
    #[error("LWE plaintext modulus {plain} must divide the ciphertext modulus {cipher}")]
    ModuliMismatch {
        /// The plaintext modulus.
        plain: u64,
        /// The ciphertext modulus.
        cipher: u64,
    },
    /// The ring dimension is not a power of two.
    #[error("ring dimension {0} is not a power of two")]
    RingDimensionInvalid(usize),
    /// The parameter record names a ring modulus other than the field
    /// the scheme is instantiated with.
    #[error("ring modulus {found} does not match the scheme field modulus {expected}")]
    RingModulusMismatch {
        /// The field modulus of the instantiation.
        expected: u32,
        /// The modulus found in the parameter record.
        found: u32,
    },
    /// A decomposition basis is out of range.
    #[error("decomposition basis of {0} bits is out of range")]
    BasisInvalid(u32),
    /// An underlying algebraic setup step failed.
    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}
