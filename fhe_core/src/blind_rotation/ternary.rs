use algebra::random::FieldDiscreteGaussian;
use algebra::{Basis, FieldNttPolynomial, FieldPolynomial, Fp, NttTable, UnsignedInteger};
use lattice::{ExternalProductSpace, Lwe, NttRgsw, Rlwe};
use rand::{CryptoRng, Rng};

/// Blind rotation key for a ternary LWE secret: per coefficient, RGSW
/// encryptions of the indicators `[s_i = 1]` and `[s_i = -1]`.
#[derive(Debug, Clone)]
pub struct TernaryBlindRotationKey<const P: u32> {
    key: Vec<(NttRgsw<P>, NttRgsw<P>)>,
}

impl<const P: u32> TernaryBlindRotationKey<P> {
    /// Creates a new [`TernaryBlindRotationKey<P>`].
    #[inline]
    pub fn new(key: Vec<(NttRgsw<P>, NttRgsw<P>)>) -> Self {
        Self { key }
    }

    /// Performs the blind rotation operation.
    ///
    /// Per step the two indicator encryptions combine into an evaluation
    /// key `RGSW([s_i = 1]) - RGSW([s_i = -1]) * X^{-a_i}`, after which
    /// the fold `ACC += (X^{a_i} - 1) * (ACC ⊠ ek)` rotates by
    /// `X^{a_i * s_i}` for all three secret values.
    pub fn blind_rotate<C: UnsignedInteger>(
        &self,
        mut lut: FieldPolynomial<P>,
        lwe: &Lwe<C>,
        table: &NttTable<P>,
    ) -> Rlwe<P> {
        let ring_dimension = lut.coeff_count();
        debug_assert_eq!(ring_dimension, table.dimension());
        let twice_ring_dimension = ring_dimension << 1;

        let basis = self.key[0].0.basis();
        let space = &mut ExternalProductSpace::new(ring_dimension);
        let external_product = &mut Rlwe::zero(ring_dimension);
        let evaluation_key = &mut NttRgsw::zero(ring_dimension, basis);

        // lut * X^{-b}
        let b = lwe.b().as_usize();
        if b != 0 {
            let neg_b = twice_ring_dimension - b;
            if neg_b <= ring_dimension {
                lut.as_mut_slice().rotate_right(neg_b);
                lut.as_mut_slice()[..neg_b]
                    .iter_mut()
                    .for_each(|v| *v = -*v);
            } else {
                let r = neg_b - ring_dimension;
                lut.as_mut_slice().rotate_right(r);
                lut.as_mut_slice()[r..].iter_mut().for_each(|v| *v = -*v);
            }
        }

        let acc = Rlwe::new(FieldPolynomial::zero(ring_dimension), lut);

        self.key
            .iter()
            .zip(lwe.a())
            .fold(acc, |mut acc, ((pos, neg), &a_i)| {
                let r = a_i.as_usize();
                if r != 0 {
                    // ek = RGSW([s_i = 1]) - RGSW([s_i = -1]) * X^{-a_i}
                    let monomial =
                        table.transform_monomial(Fp::NEG_ONE, twice_ring_dimension - r);
                    pos.add_rgsw_mul_ntt_monomial(neg, &monomial, evaluation_key);
                    // ACC = ACC + (X^{a_i} - 1) * ACC ⊠ ek
                    acc.mul_ntt_rgsw_inplace(evaluation_key, table, space, external_product);
                    acc.sub_assign_element_wise(external_product);
                    acc.add_assign_rhs_mul_monic_monomial(external_product, r);
                }
                acc
            })
    }

    /// Generates the [`TernaryBlindRotationKey<P>`].
    pub(crate) fn generate<C, R>(
        lwe_secret_key: &[C],
        ntt_ring_secret_key: &FieldNttPolynomial<P>,
        blind_rotation_basis: Basis,
        lwe_cipher_modulus_value: C,
        chi: FieldDiscreteGaussian,
        table: &NttTable<P>,
        rng: &mut R,
    ) -> Self
    where
        C: UnsignedInteger,
        R: Rng + CryptoRng,
    {
        let neg_one = lwe_cipher_modulus_value.wrapping_sub(C::ONE);
        let key = lwe_secret_key
            .iter()
            .map(|&s| {
                let pos = if s == C::ONE {
                    NttRgsw::generate_random_one_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                } else {
                    NttRgsw::generate_random_zero_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                };
                let neg = if s == neg_one {
                    NttRgsw::generate_random_one_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                } else {
                    NttRgsw::generate_random_zero_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                };
                (pos, neg)
            })
            .collect();
        Self { key }
    }
}
