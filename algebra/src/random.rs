//! Random samplers for secrets, masks and noise.

use rand::distributions::Distribution;
use rand::{CryptoRng, Rng};
use rand_distr::Normal;

use crate::{AlgebraError, Fp, UnsignedInteger};

/// Samples a vector of uniform values below the power-of-two bound
/// described by `mask`.
pub fn sample_uniform_pow2_values<C, R>(mask: C, length: usize, rng: &mut R) -> Vec<C>
where
    C: UnsignedInteger,
    R: Rng + CryptoRng,
{
    (0..length)
        .map(|_| C::from_u64(rng.gen::<u64>()) & mask)
        .collect()
}

/// Samples a binary vector whose values are `C`.
pub fn sample_binary_values<C, R>(length: usize, rng: &mut R) -> Vec<C>
where
    C: UnsignedInteger,
    R: Rng + CryptoRng,
{
    let mut v = vec![C::ZERO; length];
    let mut iter = v.chunks_exact_mut(32);
    for chunk in &mut iter {
        let mut r = rng.next_u32();
        for elem in chunk.iter_mut() {
            *elem = C::from_u64(u64::from(r & 0b1));
            r >>= 1;
        }
    }
    let mut r = rng.next_u32();
    for elem in iter.into_remainder() {
        *elem = C::from_u64(u64::from(r & 0b1));
        r >>= 1;
    }
    v
}

/// Samples a ternary vector with values `{0, 1, modulus - 1}`, each
/// non-zero value with probability `1/4`.
pub fn sample_ternary_values<C, R>(modulus: C, length: usize, rng: &mut R) -> Vec<C>
where
    C: UnsignedInteger,
    R: Rng + CryptoRng,
{
    let s = [C::ZERO, C::ZERO, C::ONE, modulus.wrapping_sub(C::ONE)];
    let mut v = vec![C::ZERO; length];
    let mut iter = v.chunks_exact_mut(16);
    for chunk in &mut iter {
        let mut r = rng.next_u32();
        for elem in chunk.iter_mut() {
            *elem = s[(r & 0b11) as usize];
            r >>= 2;
        }
    }
    let mut r = rng.next_u32();
    for elem in iter.into_remainder() {
        *elem = s[(r & 0b11) as usize];
        r >>= 2;
    }
    v
}

/// The rounded gaussian distribution over `Z_modulus`.
///
/// Samples beyond six standard deviations are rejected.
#[derive(Debug, Clone, Copy)]
pub struct DiscreteGaussian<C> {
    normal: Normal<f64>,
    max_deviation: f64,
    modulus: C,
}

impl<C: UnsignedInteger> DiscreteGaussian<C> {
    /// Creates a new [`DiscreteGaussian`] with the given `modulus`, `mean`
    /// and standard deviation.
    pub fn new(modulus: C, mean: f64, std_dev: f64) -> Result<Self, AlgebraError> {
        let normal = Normal::new(mean, std_dev).map_err(|_| AlgebraError::InvalidStdDev(std_dev))?;
        Ok(Self {
            normal,
            max_deviation: std_dev * 6.0,
            modulus,
        })
    }

    /// Returns the standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl<C: UnsignedInteger> Distribution<C> for DiscreteGaussian<C> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> C {
        loop {
            let value = self.normal.sample(rng);
            if (value - self.normal.mean()).abs() <= self.max_deviation {
                let rounded = value.round();
                return if rounded < 0.0 {
                    self.modulus.wrapping_sub(C::from_f64(-rounded))
                } else {
                    C::from_f64(rounded)
                };
            }
        }
    }
}

/// The rounded gaussian distribution over a prime field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDiscreteGaussian {
    normal: Normal<f64>,
    max_deviation: f64,
}

impl FieldDiscreteGaussian {
    /// Creates a new [`FieldDiscreteGaussian`] with the given `mean` and
    /// standard deviation.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, AlgebraError> {
        let normal = Normal::new(mean, std_dev).map_err(|_| AlgebraError::InvalidStdDev(std_dev))?;
        Ok(Self {
            normal,
            max_deviation: std_dev * 6.0,
        })
    }

    /// Returns the standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl<const P: u32> Distribution<Fp<P>> for FieldDiscreteGaussian {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        loop {
            let value = self.normal.sample(rng);
            if (value - self.normal.mean()).abs() <= self.max_deviation {
                let rounded = value.round();
                return if rounded < 0.0 {
                    -Fp::new((-rounded) as u32)
                } else {
                    Fp::new(rounded as u32)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn binary_and_ternary_ranges() {
        let mut rng = ChaCha12Rng::from_entropy();
        let bin: Vec<u16> = sample_binary_values(1000, &mut rng);
        assert!(bin.iter().all(|&v| v == 0 || v == 1));

        let q: u16 = 1 << 14;
        let ter: Vec<u16> = sample_ternary_values(q, 1000, &mut rng);
        assert!(ter.iter().all(|&v| v == 0 || v == 1 || v == q - 1));
    }

    #[test]
    fn gaussian_tail_cutoff() {
        let mut rng = ChaCha12Rng::from_entropy();
        let q: u16 = 1 << 14;
        let chi = DiscreteGaussian::new(q, 0.0, 3.2).unwrap();
        for _ in 0..1000 {
            let v: u16 = chi.sample(&mut rng);
            let centered = if v > q / 2 { i32::from(q) - i32::from(v) } else { i32::from(v) };
            assert!(centered.abs() <= 20);
        }
    }
}
