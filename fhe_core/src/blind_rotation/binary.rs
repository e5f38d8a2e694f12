use algebra::random::FieldDiscreteGaussian;
use algebra::{Basis, FieldNttPolynomial, FieldPolynomial, NttTable, UnsignedInteger};
use lattice::{ExternalProductSpace, Lwe, NttRgsw, Rlwe};
use rand::{CryptoRng, Rng};

/// Blind rotation key for a binary LWE secret: one RGSW encryption of
/// each secret coefficient.
#[derive(Debug, Clone)]
pub struct BinaryBlindRotationKey<const P: u32> {
    key: Vec<NttRgsw<P>>,
}

impl<const P: u32> BinaryBlindRotationKey<P> {
    /// Creates a new [`BinaryBlindRotationKey<P>`].
    #[inline]
    pub fn new(key: Vec<NttRgsw<P>>) -> Self {
        Self { key }
    }

    /// Performs the blind rotation operation.
    ///
    /// Initializes the accumulator to `lut * X^{-b}` and then, for every
    /// mask component, folds in `ACC += (X^{a_i} - 1) * (ACC ⊠ RGSW(s_i))`,
    /// which rotates by `X^{a_i}` exactly when `s_i = 1`. The constant
    /// coefficient of the result evaluates the table at the phase.
    pub fn blind_rotate<C: UnsignedInteger>(
        &self,
        mut lut: FieldPolynomial<P>,
        lwe: &Lwe<C>,
        table: &NttTable<P>,
    ) -> Rlwe<P> {
        let ring_dimension = lut.coeff_count();
        debug_assert_eq!(ring_dimension, table.dimension());

        let space = &mut ExternalProductSpace::new(ring_dimension);
        let external_product = &mut Rlwe::zero(ring_dimension);

        // lut * X^{-b}
        let b = lwe.b().as_usize();
        if b != 0 {
            let neg_b = (ring_dimension << 1) - b;
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
            .fold(acc, |mut acc, (s_i, &a_i)| {
                let r = a_i.as_usize();
                if r != 0 {
                    // external_product = ACC ⊠ RGSW(s_i)
                    acc.mul_ntt_rgsw_inplace(s_i, table, space, external_product);
                    // ACC = ACC + (X^{a_i} - 1) * ACC ⊠ RGSW(s_i)
                    acc.sub_assign_element_wise(external_product);
                    acc.add_assign_rhs_mul_monic_monomial(external_product, r);
                }
                acc
            })
    }

    /// Generates the [`BinaryBlindRotationKey<P>`].
    pub(crate) fn generate<C, R>(
        lwe_secret_key: &[C],
        ntt_ring_secret_key: &FieldNttPolynomial<P>,
        blind_rotation_basis: Basis,
        chi: FieldDiscreteGaussian,
        table: &NttTable<P>,
        rng: &mut R,
    ) -> Self
    where
        C: UnsignedInteger,
        R: Rng + CryptoRng,
    {
        let key = lwe_secret_key
            .iter()
            .map(|&s| {
                if s == C::ZERO {
                    NttRgsw::generate_random_zero_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                } else {
                    NttRgsw::generate_random_one_sample(
                        ntt_ring_secret_key,
                        blind_rotation_basis,
                        chi,
                        table,
                        rng,
                    )
                }
            })
            .collect();
        Self { key }
    }
}
