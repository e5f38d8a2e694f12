use algebra::{FieldNttPolynomial, FieldPolynomial, Fp, NttTable};

use crate::{Lwe, NttRgsw};

/// An RLWE ciphertext in coefficient form: `b = a * s + e + Δm` over
/// `Z_P[X]/(X^N + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rlwe<const P: u32> {
    a: FieldPolynomial<P>,
    b: FieldPolynomial<P>,
}

/// An RLWE ciphertext in evaluation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NttRlwe<const P: u32> {
    a: FieldNttPolynomial<P>,
    b: FieldNttPolynomial<P>,
}

/// Scratch buffers for the external product, reusable across the steps
/// of a blind rotation.
#[derive(Debug, Clone)]
pub struct ExternalProductSpace<const P: u32> {
    decompose: FieldPolynomial<P>,
    digit: FieldNttPolynomial<P>,
    acc: NttRlwe<P>,
}

impl<const P: u32> ExternalProductSpace<P> {
    /// Allocates scratch space for dimension `N`.
    #[inline]
    pub fn new(dimension: usize) -> Self {
        Self {
            decompose: FieldPolynomial::zero(dimension),
            digit: FieldNttPolynomial::zero(dimension),
            acc: NttRlwe::zero(dimension),
        }
    }
}

impl<const P: u32> Rlwe<P> {
    /// Creates a new [`Rlwe<P>`].
    #[inline]
    pub fn new(a: FieldPolynomial<P>, b: FieldPolynomial<P>) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a ciphertext with all-zero polynomials.
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: FieldPolynomial::zero(dimension),
            b: FieldPolynomial::zero(dimension),
        }
    }

    /// Returns a reference to the mask polynomial.
    #[inline]
    pub fn a(&self) -> &FieldPolynomial<P> {
        &self.a
    }

    /// Returns a reference to the body polynomial.
    #[inline]
    pub fn b(&self) -> &FieldPolynomial<P> {
        &self.b
    }

    /// Returns a mutable reference to the body polynomial.
    #[inline]
    pub fn b_mut(&mut self) -> &mut FieldPolynomial<P> {
        &mut self.b
    }

    /// Returns the ring dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.coeff_count()
    }

    /// Element-wise subtraction.
    #[inline]
    pub fn sub_assign_element_wise(&mut self, rhs: &Self) {
        self.a -= &rhs.a;
        self.b -= &rhs.b;
    }

    /// Computes `self += rhs * X^r` with `r` in `[0, 2N)`, using the
    /// negacyclic identity `X^N = -1`.
    pub fn add_assign_rhs_mul_monic_monomial(&mut self, rhs: &Self, r: usize) {
        let n = self.dimension();
        add_assign_monic_monomial_mul_slice(self.a.as_mut_slice(), rhs.a.as_slice(), n, r);
        add_assign_monic_monomial_mul_slice(self.b.as_mut_slice(), rhs.b.as_slice(), n, r);
    }

    /// External product `self ⊠ rgsw` into `destination`.
    ///
    /// Decomposes both polynomials of `self` in the gadget basis,
    /// multiplies the digits against the matching RGSW rows in the
    /// evaluation domain and transforms the accumulator back.
    pub fn mul_ntt_rgsw_inplace(
        &self,
        rgsw: &NttRgsw<P>,
        table: &NttTable<P>,
        space: &mut ExternalProductSpace<P>,
        destination: &mut Rlwe<P>,
    ) {
        let basis = rgsw.basis();
        space.acc.set_zero();

        space.decompose.copy_from(&self.a);
        for row in rgsw.c_neg_s_m().rows() {
            space
                .decompose
                .decompose_lsb_bits_inplace(basis, space.digit.as_mut_slice());
            table.transform_slice(space.digit.as_mut_slice());
            space.acc.add_ntt_rlwe_mul_ntt_polynomial_assign(row, &space.digit);
        }

        space.decompose.copy_from(&self.b);
        for row in rgsw.c_m().rows() {
            space
                .decompose
                .decompose_lsb_bits_inplace(basis, space.digit.as_mut_slice());
            table.transform_slice(space.digit.as_mut_slice());
            space.acc.add_ntt_rlwe_mul_ntt_polynomial_assign(row, &space.digit);
        }

        space.acc.inverse_transform_inplace(table, destination);
    }

    /// Extracts the LWE sample of the constant coefficient.
    ///
    /// The resulting ciphertext has dimension `N` and decrypts, under the
    /// ring secret key seen as a vector, to the constant coefficient of
    /// the phase of `self`.
    pub fn extract_lwe(&self) -> Lwe<u32> {
        let mut a: Vec<Fp<P>> = self.a.iter().map(|&v| -v).collect();
        a[1..].reverse();
        a[0] = -a[0];
        Lwe::new(a.iter().map(|v| v.value()).collect(), self.b[0].value())
    }
}

impl<const P: u32> NttRlwe<P> {
    /// Creates a new [`NttRlwe<P>`].
    #[inline]
    pub fn new(a: FieldNttPolynomial<P>, b: FieldNttPolynomial<P>) -> Self {
        debug_assert_eq!(a.coeff_count(), b.coeff_count());
        Self { a, b }
    }

    /// Creates a ciphertext with all-zero polynomials.
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: FieldNttPolynomial::zero(dimension),
            b: FieldNttPolynomial::zero(dimension),
        }
    }

    /// Returns a reference to the mask polynomial.
    #[inline]
    pub fn a(&self) -> &FieldNttPolynomial<P> {
        &self.a
    }

    /// Returns a mutable reference to the mask polynomial.
    #[inline]
    pub fn a_mut(&mut self) -> &mut FieldNttPolynomial<P> {
        &mut self.a
    }

    /// Returns a reference to the body polynomial.
    #[inline]
    pub fn b(&self) -> &FieldNttPolynomial<P> {
        &self.b
    }

    /// Returns a mutable reference to the body polynomial.
    #[inline]
    pub fn b_mut(&mut self) -> &mut FieldNttPolynomial<P> {
        &mut self.b
    }

    /// Sets both polynomials to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.a.set_zero();
        self.b.set_zero();
    }

    /// Pointwise multiply-accumulate against a shared polynomial,
    /// `self += rhs ⊙ polynomial` on both components.
    #[inline]
    pub fn add_ntt_rlwe_mul_ntt_polynomial_assign(
        &mut self,
        rhs: &Self,
        polynomial: &FieldNttPolynomial<P>,
    ) {
        self.a.add_mul_assign_pointwise(&rhs.a, polynomial);
        self.b.add_mul_assign_pointwise(&rhs.b, polynomial);
    }

    /// Inverse transform into a coefficient-form ciphertext.
    #[inline]
    pub fn inverse_transform_inplace(&self, table: &NttTable<P>, destination: &mut Rlwe<P>) {
        destination
            .a
            .as_mut_slice()
            .copy_from_slice(self.a.as_slice());
        destination
            .b
            .as_mut_slice()
            .copy_from_slice(self.b.as_slice());
        table.inverse_transform_slice(destination.a.as_mut_slice());
        table.inverse_transform_slice(destination.b.as_mut_slice());
    }
}

/// `x += y * X^r` on raw negacyclic coefficient slices, `r` in `[0, 2N)`.
fn add_assign_monic_monomial_mul_slice<const P: u32>(
    x: &mut [Fp<P>],
    y: &[Fp<P>],
    n: usize,
    r: usize,
) {
    if r <= n {
        let n_sub_r = n - r;
        x[..r]
            .iter_mut()
            .zip(&y[n_sub_r..])
            .for_each(|(a, &b)| *a -= b);
        x[r..]
            .iter_mut()
            .zip(&y[..n_sub_r])
            .for_each(|(a, &b)| *a += b);
    } else {
        let r = r - n;
        let n_sub_r = n - r;
        x[..r]
            .iter_mut()
            .zip(&y[n_sub_r..])
            .for_each(|(a, &b)| *a += b);
        x[r..]
            .iter_mut()
            .zip(&y[..n_sub_r])
            .for_each(|(a, &b)| *a -= b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u32 = 132120577;

    #[test]
    fn monomial_mul_matches_naive() {
        let mut rng = rand::thread_rng();
        let n = 32;
        let poly = FieldPolynomial::<P>::random(n, &mut rng);
        let rhs = Rlwe::new(FieldPolynomial::zero(n), poly.clone());

        for r in [0usize, 1, 15, 32, 33, 63] {
            let mut acc = Rlwe::zero(n);
            acc.add_assign_rhs_mul_monic_monomial(&rhs, r);

            let mut expected = vec![Fp::<P>::ZERO; n];
            for (j, &c) in poly.iter().enumerate() {
                let degree = (j + r) % (2 * n);
                if degree < n {
                    expected[degree] += c;
                } else {
                    expected[degree - n] -= c;
                }
            }
            assert_eq!(acc.b().as_slice(), expected.as_slice(), "r = {r}");
        }
    }

    #[test]
    fn extract_lwe_phase_matches() {
        // Phase of the extracted sample must equal the constant
        // coefficient of the RLWE phase.
        let mut rng = rand::thread_rng();
        let n = 32;
        let table = NttTable::<P>::new(5).unwrap();
        let secret = FieldPolynomial::<P>::random_ternary(n, &mut rng);
        let ntt_secret = table.transform(&secret);

        let a = FieldPolynomial::<P>::random(n, &mut rng);
        let b = table.inverse_transform(&table.transform(&a).mul_pointwise(&ntt_secret));
        let cipher = Rlwe::new(a, b.clone());
        // b = a * s exactly, so the phase is zero everywhere.

        let extracted = cipher.extract_lwe();
        let dot: Fp<P> = extracted
            .a()
            .iter()
            .zip(secret.iter())
            .fold(Fp::ZERO, |acc, (&x, &s)| acc + Fp::new(x) * s);
        let phase = Fp::<P>::new(extracted.b()) - dot;
        assert_eq!(phase, Fp::ZERO);
    }
}
