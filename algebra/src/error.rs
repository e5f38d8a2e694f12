use thiserror::Error;

/// Errors arising from algebraic setup.
#[derive(Debug, Error)]
pub enum AlgebraError {
    /// The standard deviation does not define a valid gaussian.
    #[error("invalid gaussian standard deviation: {0}")]
    InvalidStdDev(f64),
    /// The field has no primitive root of the requested order.
    #[error("no primitive {degree}-th root of unity modulo {modulus}")]
    NoPrimitiveRoot {
        /// The requested root order.
        degree: usize,
        /// The field modulus.
        modulus: u32,
    },
}
