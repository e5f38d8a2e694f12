#![deny(missing_docs)]
//! Arithmetic foundations for the lattice layers: a const-generic prime
//! field, negacyclic number theoretic transforms, polynomials in both
//! coefficient and evaluation form, gadget decomposition and the random
//! samplers used for secrets and noise.

mod basis;
mod error;
mod field;
mod modulus;
mod ntt;
mod numeric;
mod polynomial;
pub mod random;

pub use basis::Basis;
pub use error::AlgebraError;
pub use field::Fp;
pub use modulus::PowOf2Modulus;
pub use ntt::NttTable;
pub use numeric::UnsignedInteger;
pub use polynomial::{FieldNttPolynomial, FieldPolynomial};
