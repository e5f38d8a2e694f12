use algebra::random::FieldDiscreteGaussian;
use algebra::{Basis, FieldNttPolynomial, FieldPolynomial, Fp, NttTable};
use rand::{CryptoRng, Rng};

use crate::NttRlwe;

/// A gadget RLWE ciphertext: one RLWE row per decomposition level, the
/// `k`-th row encrypting `m * B^k` in the evaluation domain.
#[derive(Debug, Clone)]
pub struct NttGadgetRlwe<const P: u32> {
    data: Vec<NttRlwe<P>>,
    basis: Basis,
}

impl<const P: u32> NttGadgetRlwe<P> {
    /// Creates a new [`NttGadgetRlwe<P>`].
    #[inline]
    pub fn new(data: Vec<NttRlwe<P>>, basis: Basis) -> Self {
        debug_assert_eq!(data.len(), basis.decompose_len());
        Self { data, basis }
    }

    /// Creates an all-zero gadget ciphertext.
    #[inline]
    pub fn zero(dimension: usize, basis: Basis) -> Self {
        Self {
            data: (0..basis.decompose_len())
                .map(|_| NttRlwe::zero(dimension))
                .collect(),
            basis,
        }
    }

    /// Returns the rows, one per decomposition level.
    #[inline]
    pub fn rows(&self) -> &[NttRlwe<P>] {
        &self.data
    }

    /// Returns the rows mutably.
    #[inline]
    pub fn rows_mut(&mut self) -> &mut [NttRlwe<P>] {
        &mut self.data
    }

    /// Returns the decomposition basis.
    #[inline]
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Generates a gadget ciphertext of zero: every row is a fresh RLWE
    /// sample `(a, a * s + e)`.
    pub fn generate_random_zero_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<P>,
        basis: Basis,
        gaussian: FieldDiscreteGaussian,
        table: &NttTable<P>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let dimension = ntt_secret_key.coeff_count();
        let data = (0..basis.decompose_len())
            .map(|_| {
                let a = FieldNttPolynomial::random(dimension, rng);
                let e = FieldPolynomial::random_gaussian(dimension, gaussian, rng);
                let mut b = table.transform(&e);
                b.add_mul_assign_pointwise(&a, ntt_secret_key);
                NttRlwe::new(a, b)
            })
            .collect();
        Self { data, basis }
    }

    /// Adds `B^k` to the body of the `k`-th row, turning a zero sample
    /// into an encryption of one.
    pub fn add_basis_powers_to_body(&mut self) {
        let bits = self.basis.bits();
        for (k, row) in self.data.iter_mut().enumerate() {
            row.b_mut()
                .add_scalar_assign(Fp::new(2).pow(bits * k as u32));
        }
    }

    /// Adds `B^k` to the mask of the `k`-th row, turning a zero sample
    /// into an encryption of `-s`.
    pub fn add_basis_powers_to_mask(&mut self) {
        let bits = self.basis.bits();
        for (k, row) in self.data.iter_mut().enumerate() {
            row.a_mut()
                .add_scalar_assign(Fp::new(2).pow(bits * k as u32));
        }
    }
}
