use std::ops::{AddAssign, Index, IndexMut, SubAssign};

use rand::distributions::Distribution;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::random::FieldDiscreteGaussian;
use crate::{Basis, Fp};

/// A polynomial over `Z_P[X]/(X^N + 1)` in coefficient form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPolynomial<const P: u32> {
    data: Vec<Fp<P>>,
}

impl<const P: u32> FieldPolynomial<P> {
    /// Creates a new [`FieldPolynomial<P>`] from its coefficients.
    #[inline]
    pub fn new(data: Vec<Fp<P>>) -> Self {
        Self { data }
    }

    /// Creates the zero polynomial with `coeff_count` coefficients.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            data: vec![Fp::ZERO; coeff_count],
        }
    }

    /// Returns the number of coefficients.
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the coefficients as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Fp<P>] {
        &self.data
    }

    /// Returns the coefficients as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Fp<P>] {
        &mut self.data
    }

    /// Returns an iterator over the coefficients.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Fp<P>> {
        self.data.iter()
    }

    /// Sets every coefficient to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(Fp::ZERO);
    }

    /// Copies the coefficients of `src` into `self`.
    #[inline]
    pub fn copy_from(&mut self, src: &Self) {
        self.data.copy_from_slice(&src.data);
    }

    /// Samples a uniformly random polynomial.
    #[inline]
    pub fn random<R: Rng + CryptoRng>(coeff_count: usize, rng: &mut R) -> Self {
        Self {
            data: (0..coeff_count).map(|_| rng.gen()).collect(),
        }
    }

    /// Samples a polynomial with binary coefficients.
    #[inline]
    pub fn random_binary<R: Rng + CryptoRng>(coeff_count: usize, rng: &mut R) -> Self {
        Self {
            data: (0..coeff_count)
                .map(|_| Fp::new(rng.next_u32() & 0b1))
                .collect(),
        }
    }

    /// Samples a polynomial with ternary coefficients `{-1, 0, 1}`, each
    /// non-zero value with probability `1/4`.
    #[inline]
    pub fn random_ternary<R: Rng + CryptoRng>(coeff_count: usize, rng: &mut R) -> Self {
        let s = [Fp::ZERO, Fp::ZERO, Fp::ONE, Fp::NEG_ONE];
        Self {
            data: (0..coeff_count)
                .map(|_| s[(rng.next_u32() & 0b11) as usize])
                .collect(),
        }
    }

    /// Samples a polynomial with gaussian coefficients.
    #[inline]
    pub fn random_gaussian<R: Rng + CryptoRng>(
        coeff_count: usize,
        gaussian: FieldDiscreteGaussian,
        rng: &mut R,
    ) -> Self {
        Self {
            data: gaussian.sample_iter(rng).take(coeff_count).collect(),
        }
    }

    /// Extracts the least significant digit of every coefficient into
    /// `destination` and shifts `self` one digit down.
    ///
    /// Repeated calls produce the unsigned base-`basis` decomposition,
    /// least significant digit first.
    #[inline]
    pub fn decompose_lsb_bits_inplace(&mut self, basis: Basis, destination: &mut [Fp<P>]) {
        debug_assert_eq!(self.coeff_count(), destination.len());
        let mask = basis.mask();
        let bits = basis.bits();
        self.data
            .iter_mut()
            .zip(destination.iter_mut())
            .for_each(|(coeff, digit)| {
                let value = coeff.value();
                *digit = Fp::new(value & mask);
                *coeff = Fp::new(value >> bits);
            });
    }
}

impl<const P: u32> Index<usize> for FieldPolynomial<P> {
    type Output = Fp<P>;

    #[inline]
    fn index(&self, index: usize) -> &Fp<P> {
        &self.data[index]
    }
}

impl<const P: u32> IndexMut<usize> for FieldPolynomial<P> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Fp<P> {
        &mut self.data[index]
    }
}

impl<const P: u32> AddAssign<&Self> for FieldPolynomial<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| *a += b);
    }
}

impl<const P: u32> SubAssign<&Self> for FieldPolynomial<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| *a -= b);
    }
}

/// A polynomial over `Z_P[X]/(X^N + 1)` in evaluation (NTT) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNttPolynomial<const P: u32> {
    data: Vec<Fp<P>>,
}

impl<const P: u32> FieldNttPolynomial<P> {
    /// Creates a new [`FieldNttPolynomial<P>`] from its evaluations.
    #[inline]
    pub fn new(data: Vec<Fp<P>>) -> Self {
        Self { data }
    }

    /// Creates the zero polynomial.
    #[inline]
    pub fn zero(coeff_count: usize) -> Self {
        Self {
            data: vec![Fp::ZERO; coeff_count],
        }
    }

    /// Returns the number of evaluations.
    #[inline]
    pub fn coeff_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the evaluations as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Fp<P>] {
        &self.data
    }

    /// Returns the evaluations as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Fp<P>] {
        &mut self.data
    }

    /// Returns an iterator over the evaluations.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Fp<P>> {
        self.data.iter()
    }

    /// Sets every evaluation to zero.
    #[inline]
    pub fn set_zero(&mut self) {
        self.data.fill(Fp::ZERO);
    }

    /// Samples a uniformly random element, which is also uniform in
    /// coefficient form.
    #[inline]
    pub fn random<R: Rng + CryptoRng>(coeff_count: usize, rng: &mut R) -> Self {
        Self {
            data: (0..coeff_count).map(|_| rng.gen()).collect(),
        }
    }

    /// Pointwise multiplication, `self[i] *= rhs[i]`.
    #[inline]
    pub fn mul_assign_pointwise(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| *a *= b);
    }

    /// Pointwise multiply-accumulate, `self[i] += a[i] * b[i]`.
    #[inline]
    pub fn add_mul_assign_pointwise(&mut self, a: &Self, b: &Self) {
        debug_assert_eq!(self.coeff_count(), a.coeff_count());
        debug_assert_eq!(self.coeff_count(), b.coeff_count());
        self.data
            .iter_mut()
            .zip(a.iter().zip(b.iter()))
            .for_each(|(acc, (&x, &y))| *acc += x * y);
    }

    /// Pointwise multiplication into a fresh polynomial.
    #[inline]
    pub fn mul_pointwise(&self, rhs: &Self) -> Self {
        let mut out = self.clone();
        out.mul_assign_pointwise(rhs);
        out
    }

    /// Adds `scalar` to every evaluation, the NTT image of adding a
    /// constant polynomial.
    #[inline]
    pub fn add_scalar_assign(&mut self, scalar: Fp<P>) {
        self.data.iter_mut().for_each(|v| *v += scalar);
    }
}

impl<const P: u32> Index<usize> for FieldNttPolynomial<P> {
    type Output = Fp<P>;

    #[inline]
    fn index(&self, index: usize) -> &Fp<P> {
        &self.data[index]
    }
}

impl<const P: u32> IndexMut<usize> for FieldNttPolynomial<P> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Fp<P> {
        &mut self.data[index]
    }
}

impl<const P: u32> AddAssign<&Self> for FieldNttPolynomial<P> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| *a += b);
    }
}

impl<const P: u32> SubAssign<&Self> for FieldNttPolynomial<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        debug_assert_eq!(self.coeff_count(), rhs.coeff_count());
        self.data
            .iter_mut()
            .zip(rhs.iter())
            .for_each(|(a, &b)| *a -= b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u32 = 132120577;
    type Poly = FieldPolynomial<P>;

    #[test]
    fn decompose_recompose() {
        let mut rng = rand::thread_rng();
        let basis = Basis::new(7, 27);
        let poly = Poly::random(64, &mut rng);

        let mut shifted = poly.clone();
        let mut digits = Vec::with_capacity(basis.decompose_len());
        for _ in 0..basis.decompose_len() {
            let mut digit = Poly::zero(64);
            shifted.decompose_lsb_bits_inplace(basis, digit.as_mut_slice());
            digits.push(digit);
        }

        for i in 0..64 {
            let mut acc: u64 = 0;
            for (k, digit) in digits.iter().enumerate() {
                acc += u64::from(digit[i].value()) << (k as u32 * basis.bits());
            }
            assert_eq!(acc, u64::from(poly[i].value()));
        }
    }
}
