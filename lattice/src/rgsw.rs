use algebra::random::FieldDiscreteGaussian;
use algebra::{Basis, FieldNttPolynomial, NttTable};
use rand::{CryptoRng, Rng};

use crate::NttGadgetRlwe;

/// An RGSW ciphertext in the evaluation domain: a gadget encryption of
/// `-s * m` and a gadget encryption of `m`.
///
/// The external product of an RLWE ciphertext with phase `φ` against an
/// RGSW encryption of `m` yields an RLWE ciphertext with phase `m * φ`
/// plus a small noise term.
#[derive(Debug, Clone)]
pub struct NttRgsw<const P: u32> {
    c_neg_s_m: NttGadgetRlwe<P>,
    c_m: NttGadgetRlwe<P>,
}

impl<const P: u32> NttRgsw<P> {
    /// Creates a new [`NttRgsw<P>`].
    #[inline]
    pub fn new(c_neg_s_m: NttGadgetRlwe<P>, c_m: NttGadgetRlwe<P>) -> Self {
        Self { c_neg_s_m, c_m }
    }

    /// Creates an all-zero ciphertext, useful as a scratch target.
    #[inline]
    pub fn zero(dimension: usize, basis: Basis) -> Self {
        Self {
            c_neg_s_m: NttGadgetRlwe::zero(dimension, basis),
            c_m: NttGadgetRlwe::zero(dimension, basis),
        }
    }

    /// Returns the gadget half encrypting `-s * m`.
    #[inline]
    pub fn c_neg_s_m(&self) -> &NttGadgetRlwe<P> {
        &self.c_neg_s_m
    }

    /// Returns the gadget half encrypting `m`.
    #[inline]
    pub fn c_m(&self) -> &NttGadgetRlwe<P> {
        &self.c_m
    }

    /// Returns the decomposition basis.
    #[inline]
    pub fn basis(&self) -> Basis {
        self.c_m.basis()
    }

    /// Generates an encryption of zero.
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
        Self {
            c_neg_s_m: NttGadgetRlwe::generate_random_zero_sample(
                ntt_secret_key,
                basis,
                gaussian,
                table,
                rng,
            ),
            c_m: NttGadgetRlwe::generate_random_zero_sample(
                ntt_secret_key,
                basis,
                gaussian,
                table,
                rng,
            ),
        }
    }

    /// Generates an encryption of one.
    pub fn generate_random_one_sample<R>(
        ntt_secret_key: &FieldNttPolynomial<P>,
        basis: Basis,
        gaussian: FieldDiscreteGaussian,
        table: &NttTable<P>,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + CryptoRng,
    {
        let mut rgsw =
            Self::generate_random_zero_sample(ntt_secret_key, basis, gaussian, table, rng);
        rgsw.c_m.add_basis_powers_to_body();
        rgsw.c_neg_s_m.add_basis_powers_to_mask();
        rgsw
    }

    /// Computes `destination = self + rhs ⊙ monomial`, all rows
    /// multiplied pointwise by the same NTT-domain monomial.
    pub fn add_rgsw_mul_ntt_monomial(
        &self,
        rhs: &Self,
        monomial: &FieldNttPolynomial<P>,
        destination: &mut Self,
    ) {
        let combine = |dst: &mut NttGadgetRlwe<P>, lhs: &NttGadgetRlwe<P>, other: &NttGadgetRlwe<P>| {
            dst.rows_mut()
                .iter_mut()
                .zip(lhs.rows().iter().zip(other.rows()))
                .for_each(|(out, (l, r))| {
                    out.a_mut().as_mut_slice().copy_from_slice(l.a().as_slice());
                    out.b_mut().as_mut_slice().copy_from_slice(l.b().as_slice());
                    out.a_mut().add_mul_assign_pointwise(r.a(), monomial);
                    out.b_mut().add_mul_assign_pointwise(r.b(), monomial);
                });
        };
        combine(&mut destination.c_neg_s_m, &self.c_neg_s_m, &rhs.c_neg_s_m);
        combine(&mut destination.c_m, &self.c_m, &rhs.c_m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExternalProductSpace, Rlwe};
    use algebra::{FieldPolynomial, Fp};

    const P: u32 = 132120577;

    // The accumulator encodes its message in eighths of the modulus, as
    // the blind rotation does.
    fn delta() -> Fp<P> {
        Fp::new(P >> 3)
    }

    #[test]
    fn external_product_scales_phase() {
        let mut rng = rand::thread_rng();
        let n = 1024;
        let table = NttTable::<P>::new(10).unwrap();
        let basis = Basis::new(7, 27);
        let gaussian = FieldDiscreteGaussian::new(0.0, 3.2).unwrap();

        let secret = FieldPolynomial::<P>::random_ternary(n, &mut rng);
        let ntt_secret = table.transform(&secret);

        // Trivial accumulator holding a 0/1 message polynomial.
        let message: Vec<u32> = (0..n).map(|_| rng.gen_range(0..2u32)).collect();
        let body = FieldPolynomial::new(
            message.iter().map(|&m| delta() * Fp::new(m)).collect(),
        );
        let acc = Rlwe::new(FieldPolynomial::zero(n), body);

        let rgsw = NttRgsw::generate_random_one_sample(&ntt_secret, basis, gaussian, &table, &mut rng);

        let space = &mut ExternalProductSpace::new(n);
        let mut product = Rlwe::zero(n);
        acc.mul_ntt_rgsw_inplace(&rgsw, &table, space, &mut product);

        // phase = b - a * s, decoded per coefficient by rounding to the
        // nearest multiple of P/8.
        let a_s = table.inverse_transform(&table.transform(product.a()).mul_pointwise(&ntt_secret));
        for i in 0..n {
            let phase = product.b()[i] - a_s[i];
            let decoded =
                ((u64::from(phase.value()) * 8 + u64::from(P) / 2) / u64::from(P)) % 8;
            assert_eq!(decoded as u32, message[i], "coefficient {i}");
        }
    }
}
