use crate::{AlgebraError, FieldNttPolynomial, FieldPolynomial, Fp};

/// Precomputed tables for the negacyclic number theoretic transform over
/// `Z_P[X]/(X^N + 1)`.
///
/// The forward transform is a Cooley-Tukey pass over powers of a
/// primitive `2N`-th root of unity stored in bit-reversed order, the
/// inverse a Gentleman-Sande pass folding in `N^{-1}`. Both leave their
/// output in an order consistent with pointwise multiplication.
#[derive(Debug, Clone)]
pub struct NttTable<const P: u32> {
    log_n: u32,
    n: usize,
    fwd_roots: Vec<Fp<P>>,
    inv_roots: Vec<Fp<P>>,
    inv_degree: Fp<P>,
}

impl<const P: u32> NttTable<P> {
    /// Creates the tables for transforms of dimension `2^log_n`.
    ///
    /// Fails when `2^(log_n + 1)` does not divide `P - 1`, since the
    /// field then has no primitive root of the required order.
    pub fn new(log_n: u32) -> Result<Self, AlgebraError> {
        let n = 1usize << log_n;
        let degree = n << 1;
        if (P - 1) % (degree as u32) != 0 {
            return Err(AlgebraError::NoPrimitiveRoot {
                degree,
                modulus: P,
            });
        }

        let generator = primitive_root::<P>()?;
        let psi = generator.pow((P - 1) / degree as u32);
        debug_assert_eq!(psi.pow(n as u32), Fp::NEG_ONE);
        let psi_inv = psi.inv();

        let mut fwd_roots = vec![Fp::ZERO; n];
        let mut inv_roots = vec![Fp::ZERO; n];
        let mut power = Fp::ONE;
        let mut inv_power = Fp::ONE;
        for i in 0..n {
            let r = bit_reverse(i, log_n);
            fwd_roots[r] = power;
            inv_roots[r] = inv_power;
            power *= psi;
            inv_power *= psi_inv;
        }

        let inv_degree = Fp::new(n as u32).inv();

        Ok(Self {
            log_n,
            n,
            fwd_roots,
            inv_roots,
            inv_degree,
        })
    }

    /// Returns the transform dimension `N`.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Forward transform of a coefficient slice, in place.
    pub fn transform_slice(&self, values: &mut [Fp<P>]) {
        debug_assert_eq!(values.len(), self.n);
        let n = self.n;
        let mut t = n;
        let mut m = 1;
        while m < n {
            t >>= 1;
            for i in 0..m {
                let j1 = 2 * i * t;
                let s = self.fwd_roots[m + i];
                for j in j1..j1 + t {
                    let u = values[j];
                    let v = values[j + t] * s;
                    values[j] = u + v;
                    values[j + t] = u - v;
                }
            }
            m <<= 1;
        }
    }

    /// Inverse transform of an evaluation slice, in place.
    pub fn inverse_transform_slice(&self, values: &mut [Fp<P>]) {
        debug_assert_eq!(values.len(), self.n);
        let n = self.n;
        let mut t = 1;
        let mut m = n;
        while m > 1 {
            let h = m >> 1;
            let mut j1 = 0;
            for i in 0..h {
                let s = self.inv_roots[h + i];
                for j in j1..j1 + t {
                    let u = values[j];
                    let v = values[j + t];
                    values[j] = u + v;
                    values[j + t] = (u - v) * s;
                }
                j1 += 2 * t;
            }
            t <<= 1;
            m = h;
        }
        values.iter_mut().for_each(|v| *v *= self.inv_degree);
    }

    /// Forward transform of a polynomial.
    #[inline]
    pub fn transform(&self, polynomial: &FieldPolynomial<P>) -> FieldNttPolynomial<P> {
        let mut values = polynomial.as_slice().to_vec();
        self.transform_slice(&mut values);
        FieldNttPolynomial::new(values)
    }

    /// Inverse transform of a polynomial.
    #[inline]
    pub fn inverse_transform(&self, polynomial: &FieldNttPolynomial<P>) -> FieldPolynomial<P> {
        let mut values = polynomial.as_slice().to_vec();
        self.inverse_transform_slice(&mut values);
        FieldPolynomial::new(values)
    }

    /// Returns the NTT image of the monomial `coeff * X^degree` with
    /// `degree` in `[0, 2N)`.
    pub fn transform_monomial(&self, coeff: Fp<P>, degree: usize) -> FieldNttPolynomial<P> {
        debug_assert!(degree < self.n << 1);
        let mut values = vec![Fp::ZERO; self.n];
        if degree < self.n {
            values[degree] = coeff;
        } else {
            values[degree - self.n] = -coeff;
        }
        self.transform_slice(&mut values);
        FieldNttPolynomial::new(values)
    }
}

#[inline]
fn bit_reverse(value: usize, bits: u32) -> usize {
    value.reverse_bits() >> (usize::BITS - bits)
}

/// Finds the smallest generator of the multiplicative group of `Z_P`.
fn primitive_root<const P: u32>() -> Result<Fp<P>, AlgebraError> {
    let order = P - 1;

    let mut factors = Vec::new();
    let mut rest = order;
    let mut divisor = 2u32;
    while divisor as u64 * divisor as u64 <= rest as u64 {
        if rest % divisor == 0 {
            factors.push(divisor);
            while rest % divisor == 0 {
                rest /= divisor;
            }
        }
        divisor += 1;
    }
    if rest > 1 {
        factors.push(rest);
    }

    for candidate in 2..P {
        let g = Fp::<P>::new(candidate);
        if factors.iter().all(|&f| g.pow(order / f) != Fp::ONE) {
            return Ok(g);
        }
    }
    Err(AlgebraError::NoPrimitiveRoot {
        degree: order as usize,
        modulus: P,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u32 = 132120577;
    type F = Fp<P>;

    fn naive_negacyclic_mul(a: &[F], b: &[F]) -> Vec<F> {
        let n = a.len();
        let mut out = vec![F::ZERO; n];
        for i in 0..n {
            for j in 0..n {
                let prod = a[i] * b[j];
                if i + j < n {
                    out[i + j] += prod;
                } else {
                    out[i + j - n] -= prod;
                }
            }
        }
        out
    }

    #[test]
    fn transform_round_trip() {
        let mut rng = rand::thread_rng();
        let table = NttTable::<P>::new(6).unwrap();
        let poly = FieldPolynomial::<P>::random(64, &mut rng);
        let back = table.inverse_transform(&table.transform(&poly));
        assert_eq!(back, poly);
    }

    #[test]
    fn transform_multiplies_negacyclically() {
        let mut rng = rand::thread_rng();
        let table = NttTable::<P>::new(6).unwrap();
        let a = FieldPolynomial::<P>::random(64, &mut rng);
        let b = FieldPolynomial::<P>::random(64, &mut rng);

        let expected = naive_negacyclic_mul(a.as_slice(), b.as_slice());

        let product = table.transform(&a).mul_pointwise(&table.transform(&b));
        let result = table.inverse_transform(&product);
        assert_eq!(result.as_slice(), expected.as_slice());
    }

    #[test]
    fn monomial_transform_matches_explicit() {
        let table = NttTable::<P>::new(5).unwrap();
        let coeff = F::new(12345);
        for degree in [0usize, 1, 17, 31, 32, 45, 63] {
            let mut explicit = FieldPolynomial::<P>::zero(32);
            if degree < 32 {
                explicit[degree] = coeff;
            } else {
                explicit[degree - 32] = -coeff;
            }
            assert_eq!(
                table.transform_monomial(coeff, degree),
                table.transform(&explicit)
            );
        }
    }
}
