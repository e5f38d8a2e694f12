use thiserror::Error;

/// Errors of the typed API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operands or keys were produced under different parameter sets.
    #[error("ciphertexts or keys belong to different parameter sets")]
    ParameterMismatch,
    /// The word operands carry different bit widths.
    #[error("word width mismatch: expected {expected} bits, found {found}")]
    WidthMismatch {
        /// Width of the left operand.
        expected: usize,
        /// Width of the right operand.
        found: usize,
    },
    /// No server key has been installed on the current thread.
    #[error("no server key set on the current thread")]
    NoServerKeySet,
    /// A ciphertext buffer could not be allocated.
    #[error("ciphertext buffer allocation failed")]
    AllocationFailure,
    /// The requested ciphertext type was not enabled in the
    /// configuration the keys were generated under.
    #[error("the requested type was not enabled when the keys were generated")]
    TypeNotEnabled,
}

/// Convenience alias for API results.
pub type Result<T> = core::result::Result<T, Error>;
