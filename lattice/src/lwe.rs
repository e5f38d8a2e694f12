use algebra::{PowOf2Modulus, UnsignedInteger};
use serde::{Deserialize, Serialize};

/// An LWE ciphertext: a mask vector `a` and a body
/// `b = <a, s> + e + Δm`.
///
/// The structure itself carries no modulus; every reducing operation
/// receives the ciphertext modulus explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lwe<C> {
    a: Vec<C>,
    b: C,
}

impl<C: UnsignedInteger> Lwe<C> {
    /// Creates a new [`Lwe<C>`].
    #[inline]
    pub fn new(a: Vec<C>, b: C) -> Self {
        Self { a, b }
    }

    /// Creates a ciphertext of zero with an all-zero mask.
    #[inline]
    pub fn zero(dimension: usize) -> Self {
        Self {
            a: vec![C::ZERO; dimension],
            b: C::ZERO,
        }
    }

    /// Noiseless embedding of an already-encoded message. Decryptable
    /// under any secret key of the right dimension.
    #[inline]
    pub fn trivial(encoded: C, dimension: usize) -> Self {
        Self {
            a: vec![C::ZERO; dimension],
            b: encoded,
        }
    }

    /// Returns a reference to the mask.
    #[inline]
    pub fn a(&self) -> &[C] {
        &self.a
    }

    /// Returns the body.
    #[inline]
    pub fn b(&self) -> C {
        self.b
    }

    /// Returns a mutable reference to the body.
    #[inline]
    pub fn b_mut(&mut self) -> &mut C {
        &mut self.b
    }

    /// Returns the LWE dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.a.len()
    }

    /// Component-wise addition modulo `modulus`.
    #[inline]
    pub fn add_reduce_component_wise(&self, rhs: &Self, modulus: PowOf2Modulus<C>) -> Self {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        Self {
            a: self
                .a
                .iter()
                .zip(rhs.a.iter())
                .map(|(&x, &y)| modulus.add_reduce(x, y))
                .collect(),
            b: modulus.add_reduce(self.b, rhs.b),
        }
    }

    /// In-place component-wise addition modulo `modulus`.
    #[inline]
    pub fn add_reduce_assign_component_wise(&mut self, rhs: &Self, modulus: PowOf2Modulus<C>) {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        self.a
            .iter_mut()
            .zip(rhs.a.iter())
            .for_each(|(x, &y)| *x = modulus.add_reduce(*x, y));
        self.b = modulus.add_reduce(self.b, rhs.b);
    }

    /// Component-wise subtraction modulo `modulus`.
    #[inline]
    pub fn sub_reduce_component_wise(&self, rhs: &Self, modulus: PowOf2Modulus<C>) -> Self {
        debug_assert_eq!(self.dimension(), rhs.dimension());
        Self {
            a: self
                .a
                .iter()
                .zip(rhs.a.iter())
                .map(|(&x, &y)| modulus.sub_reduce(x, y))
                .collect(),
            b: modulus.sub_reduce(self.b, rhs.b),
        }
    }

    /// Component-wise negation modulo `modulus`.
    #[inline]
    pub fn neg_reduce(&self, modulus: PowOf2Modulus<C>) -> Self {
        Self {
            a: self.a.iter().map(|&x| modulus.neg_reduce(x)).collect(),
            b: modulus.neg_reduce(self.b),
        }
    }

    /// In-place component-wise negation modulo `modulus`.
    #[inline]
    pub fn neg_reduce_assign(&mut self, modulus: PowOf2Modulus<C>) {
        self.a.iter_mut().for_each(|x| *x = modulus.neg_reduce(*x));
        self.b = modulus.neg_reduce(self.b);
    }

    /// Multiplies every component by `scalar` modulo `modulus`.
    #[inline]
    pub fn scalar_mul_reduce(&self, scalar: C, modulus: PowOf2Modulus<C>) -> Self {
        Self {
            a: self
                .a
                .iter()
                .map(|&x| modulus.mul_reduce(x, scalar))
                .collect(),
            b: modulus.mul_reduce(self.b, scalar),
        }
    }
}

/// Homomorphic linear combination `Σ coefficients[i] * ciphertexts[i]`.
///
/// Noise grows with every term; the caller is responsible for
/// bootstrapping before the combination exceeds the noise budget.
pub fn linear_combination<C: UnsignedInteger>(
    coefficients: &[C],
    ciphertexts: &[Lwe<C>],
    modulus: PowOf2Modulus<C>,
) -> Lwe<C> {
    debug_assert_eq!(coefficients.len(), ciphertexts.len());
    debug_assert!(!ciphertexts.is_empty());
    let dimension = ciphertexts[0].dimension();
    let mut acc = Lwe::zero(dimension);
    for (&coeff, cipher) in coefficients.iter().zip(ciphertexts) {
        debug_assert_eq!(cipher.dimension(), dimension);
        if coeff == C::ZERO {
            continue;
        }
        acc.add_reduce_assign_component_wise(&cipher.scalar_mul_reduce(coeff, modulus), modulus);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_wise_ops() {
        let modulus = PowOf2Modulus::<u16>::new(1 << 14);
        let c0 = Lwe::new(vec![1, 16000, 8000], 4000);
        let c1 = Lwe::new(vec![2, 500, 16383], 300);

        let sum = c0.add_reduce_component_wise(&c1, modulus);
        assert_eq!(sum.a(), &[3, 116, 8000 + 16383 - (1 << 14)]);
        assert_eq!(sum.b(), 4300);

        let diff = sum.sub_reduce_component_wise(&c1, modulus);
        assert_eq!(diff, c0);

        let neg = c0.neg_reduce(modulus);
        let zero = c0.add_reduce_component_wise(&neg, modulus);
        assert!(zero.a().iter().all(|&v| v == 0) && zero.b() == 0);
    }

    #[test]
    fn linear_combination_matches_manual() {
        let modulus = PowOf2Modulus::<u16>::new(1 << 14);
        let c0 = Lwe::new(vec![11, 22], 33);
        let c1 = Lwe::new(vec![44, 55], 66);
        let combined = linear_combination(&[2, 3], &[c0.clone(), c1.clone()], modulus);
        let manual = c0
            .scalar_mul_reduce(2, modulus)
            .add_reduce_component_wise(&c1.scalar_mul_reduce(3, modulus), modulus);
        assert_eq!(combined, manual);
    }
}
