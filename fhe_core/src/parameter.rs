use std::sync::Arc;

use algebra::random::{DiscreteGaussian, FieldDiscreteGaussian};
use algebra::{Basis, Fp, NttTable, PowOf2Modulus, UnsignedInteger};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::FheCoreError;

/// The distribution of the LWE secret key coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LweSecretKeyType {
    /// Coefficients in `{0, 1}`.
    Binary,
    /// Coefficients in `{-1, 0, 1}`.
    Ternary,
}

/// The distribution of the ring secret key coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingSecretKeyType {
    /// Coefficients in `{0, 1}`.
    Binary,
    /// Coefficients in `{-1, 0, 1}`.
    Ternary,
}

/// The plain numeric record of a parameter set.
///
/// Two key or ciphertext objects interoperate exactly when their records
/// compare equal; the facade layers compare these before every
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstParameters<C> {
    /// LWE dimension `n`.
    pub lwe_dimension: usize,
    /// LWE plaintext modulus `t`, a power of two.
    pub lwe_plain_modulus: C,
    /// LWE ciphertext modulus `q`, a power of two.
    pub lwe_cipher_modulus: C,
    /// Standard deviation of the LWE encryption noise.
    pub lwe_noise_std_dev: f64,
    /// Distribution of the LWE secret key.
    pub lwe_secret_key_type: LweSecretKeyType,
    /// Ring dimension `N`, a power of two.
    pub ring_dimension: usize,
    /// Ring modulus `Q`, an NTT-friendly prime.
    pub ring_modulus: u32,
    /// Standard deviation of the ring encryption noise.
    pub ring_noise_std_dev: f64,
    /// Distribution of the ring secret key.
    pub ring_secret_key_type: RingSecretKeyType,
    /// Digit width of the blind rotation gadget basis.
    pub blind_rotation_basis_bits: u32,
    /// Digit width of the key switching decomposition basis.
    pub key_switching_basis_bits: u32,
    /// Standard deviation of the key switching noise.
    pub key_switching_noise_std_dev: f64,
}

/// A validated parameter set with its derived values and NTT tables.
#[derive(Debug, Clone)]
pub struct Parameters<C: UnsignedInteger, const P: u32> {
    params: ConstParameters<C>,
    lwe_cipher_modulus: PowOf2Modulus<C>,
    lwe_cipher_modulus_bits: u32,
    blind_rotation_basis: Basis,
    key_switching_basis: Basis,
    lwe_noise_distribution: DiscreteGaussian<C>,
    ring_noise_distribution: FieldDiscreteGaussian,
    key_switching_noise_distribution: DiscreteGaussian<C>,
    ntt_table: Arc<NttTable<P>>,
}

impl<C: UnsignedInteger, const P: u32> Parameters<C, P> {
    /// Validates the record and builds the derived values.
    pub fn new(params: ConstParameters<C>) -> Result<Self, FheCoreError> {
        let n = params.lwe_dimension;
        if !n.is_power_of_two() {
            return Err(FheCoreError::LweDimensionInvalid(n));
        }

        let t = params.lwe_plain_modulus.as_u64();
        if t < 2 || !t.is_power_of_two() {
            return Err(FheCoreError::PlainModulusInvalid(t));
        }

        let q = params.lwe_cipher_modulus.as_u64();
        if !q.is_power_of_two() || q >= 1u64 << (C::BITS - 1) {
            return Err(FheCoreError::CipherModulusInvalid(q));
        }
        if q % t != 0 {
            return Err(FheCoreError::ModuliMismatch { plain: t, cipher: q });
        }

        // Both q and 2N are powers of two, so modulus switching between
        // them always rounds onto a divisor or multiple.
        let ring_dimension = params.ring_dimension;
        if !ring_dimension.is_power_of_two() {
            return Err(FheCoreError::RingDimensionInvalid(ring_dimension));
        }

        if params.ring_modulus != P {
            return Err(FheCoreError::RingModulusMismatch {
                expected: P,
                found: params.ring_modulus,
            });
        }

        let q_bits = q.trailing_zeros();
        let ring_modulus_bits = 32 - P.leading_zeros();
        let br_bits = params.blind_rotation_basis_bits;
        if br_bits == 0 || br_bits >= ring_modulus_bits {
            return Err(FheCoreError::BasisInvalid(br_bits));
        }
        let ks_bits = params.key_switching_basis_bits;
        if ks_bits == 0 || ks_bits > q_bits {
            return Err(FheCoreError::BasisInvalid(ks_bits));
        }

        let lwe_cipher_modulus = PowOf2Modulus::new(params.lwe_cipher_modulus);
        let ntt_table = Arc::new(NttTable::new(ring_dimension.trailing_zeros())?);

        let lwe_noise_distribution =
            DiscreteGaussian::new(params.lwe_cipher_modulus, 0.0, params.lwe_noise_std_dev)?;
        let ring_noise_distribution = FieldDiscreteGaussian::new(0.0, params.ring_noise_std_dev)?;
        let key_switching_noise_distribution = DiscreteGaussian::new(
            params.lwe_cipher_modulus,
            0.0,
            params.key_switching_noise_std_dev,
        )?;

        Ok(Self {
            params,
            lwe_cipher_modulus,
            lwe_cipher_modulus_bits: q_bits,
            blind_rotation_basis: Basis::new(br_bits, ring_modulus_bits),
            key_switching_basis: Basis::new(ks_bits, q_bits),
            lwe_noise_distribution,
            ring_noise_distribution,
            key_switching_noise_distribution,
            ntt_table,
        })
    }

    /// Returns the plain numeric record.
    #[inline]
    pub fn const_parameters(&self) -> &ConstParameters<C> {
        &self.params
    }

    /// Returns the LWE dimension `n`.
    #[inline]
    pub fn lwe_dimension(&self) -> usize {
        self.params.lwe_dimension
    }

    /// Returns the LWE ciphertext modulus.
    #[inline]
    pub fn lwe_cipher_modulus(&self) -> PowOf2Modulus<C> {
        self.lwe_cipher_modulus
    }

    /// Returns `log2` of the LWE ciphertext modulus.
    #[inline]
    pub fn lwe_cipher_modulus_bits(&self) -> u32 {
        self.lwe_cipher_modulus_bits
    }

    /// Returns the distribution of the LWE secret key.
    #[inline]
    pub fn lwe_secret_key_type(&self) -> LweSecretKeyType {
        self.params.lwe_secret_key_type
    }

    /// Returns the ring dimension `N`.
    #[inline]
    pub fn ring_dimension(&self) -> usize {
        self.params.ring_dimension
    }

    /// Returns `2N`, the rotation index domain of the negacyclic ring.
    #[inline]
    pub fn twice_ring_dimension(&self) -> usize {
        self.params.ring_dimension << 1
    }

    /// Returns the distribution of the ring secret key.
    #[inline]
    pub fn ring_secret_key_type(&self) -> RingSecretKeyType {
        self.params.ring_secret_key_type
    }

    /// Returns the blind rotation gadget basis.
    #[inline]
    pub fn blind_rotation_basis(&self) -> Basis {
        self.blind_rotation_basis
    }

    /// Returns the key switching decomposition basis.
    #[inline]
    pub fn key_switching_basis(&self) -> Basis {
        self.key_switching_basis
    }

    /// Returns the LWE encryption noise distribution.
    #[inline]
    pub fn lwe_noise_distribution(&self) -> DiscreteGaussian<C> {
        self.lwe_noise_distribution
    }

    /// Returns the ring encryption noise distribution.
    #[inline]
    pub fn ring_noise_distribution(&self) -> FieldDiscreteGaussian {
        self.ring_noise_distribution
    }

    /// Returns the key switching noise distribution.
    #[inline]
    pub fn key_switching_noise_distribution(&self) -> DiscreteGaussian<C> {
        self.key_switching_noise_distribution
    }

    /// Returns the shared NTT tables of the ring.
    #[inline]
    pub fn ntt_table(&self) -> &Arc<NttTable<P>> {
        &self.ntt_table
    }
}

/// Modulus of the default NTT field, `63 * 2^21 + 1`.
pub const DEFAULT_RING_MODULUS: u32 = 132_120_577;

/// The default NTT field of the blind rotation accumulator.
pub type DefaultFieldU32 = Fp<DEFAULT_RING_MODULUS>;

/// Default parameter profile targeting 128-bit security.
pub static DEFAULT_128_BITS_PARAMETERS: Lazy<Arc<Parameters<u16, DEFAULT_RING_MODULUS>>> =
    Lazy::new(|| {
        Arc::new(
            Parameters::new(ConstParameters {
                lwe_dimension: 512,
                lwe_plain_modulus: 4,
                lwe_cipher_modulus: 1 << 14,
                lwe_noise_std_dev: 3.20,
                lwe_secret_key_type: LweSecretKeyType::Binary,
                ring_dimension: 1024,
                ring_modulus: DEFAULT_RING_MODULUS,
                ring_noise_std_dev: 3.20 * 2.175,
                ring_secret_key_type: RingSecretKeyType::Ternary,
                blind_rotation_basis_bits: 7,
                key_switching_basis_bits: 3,
                key_switching_noise_std_dev: 3.20,
            })
            .expect("the default parameter set is valid"),
        )
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_validate() {
        let params = &*DEFAULT_128_BITS_PARAMETERS;
        assert_eq!(params.lwe_dimension(), 512);
        assert_eq!(params.lwe_cipher_modulus_bits(), 14);
        assert_eq!(params.blind_rotation_basis().decompose_len(), 4);
        assert_eq!(params.key_switching_basis().decompose_len(), 5);
        assert_eq!(params.ntt_table().dimension(), 1024);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let valid = *DEFAULT_128_BITS_PARAMETERS.const_parameters();

        let mut bad = valid;
        bad.lwe_dimension = 500;
        assert!(matches!(
            Parameters::<u16, DEFAULT_RING_MODULUS>::new(bad),
            Err(FheCoreError::LweDimensionInvalid(500))
        ));

        let mut bad = valid;
        bad.lwe_cipher_modulus = 3000;
        assert!(matches!(
            Parameters::<u16, DEFAULT_RING_MODULUS>::new(bad),
            Err(FheCoreError::CipherModulusInvalid(3000))
        ));

        let mut bad = valid;
        bad.ring_modulus = 12289;
        assert!(matches!(
            Parameters::<u16, DEFAULT_RING_MODULUS>::new(bad),
            Err(FheCoreError::RingModulusMismatch { .. })
        ));

        let mut bad = valid;
        bad.key_switching_basis_bits = 0;
        assert!(matches!(
            Parameters::<u16, DEFAULT_RING_MODULUS>::new(bad),
            Err(FheCoreError::BasisInvalid(0))
        ));

        let mut bad = valid;
        bad.lwe_plain_modulus = 3;
        assert!(matches!(
            Parameters::<u16, DEFAULT_RING_MODULUS>::new(bad),
            Err(FheCoreError::PlainModulusInvalid(3))
        ));
    }
}
