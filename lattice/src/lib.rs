#![deny(missing_docs)]
//! Lattice ciphertext structures and their homomorphic primitives: LWE
//! vectors over a power-of-two modulus, RLWE and RGSW over an NTT-friendly
//! prime field, the external product and sample extraction.

mod gadget;
mod lwe;
mod rgsw;
mod rlwe;

pub use gadget::NttGadgetRlwe;
pub use lwe::{linear_combination, Lwe};
pub use rgsw::NttRgsw;
pub use rlwe::{ExternalProductSpace, NttRlwe, Rlwe};
