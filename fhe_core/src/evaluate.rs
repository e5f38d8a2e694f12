use std::sync::Arc;

use algebra::{FieldPolynomial, Fp, UnsignedInteger};
use lattice::Lwe;

use crate::{
    encode, lwe_modulus_switch, lwe_modulus_switch_field_to_pow2, BlindRotationKey,
    LweKeySwitchingKey, ModulusSwitchRoundMethod, Parameters, SecretKeyPack,
};

/// The server-side evaluation key: blind rotation key, key switching key
/// and the parameters they were derived under.
///
/// Cheap to share and safe to use from several threads at once; gate
/// evaluation never mutates the key or its inputs.
#[derive(Debug, Clone)]
pub struct EvaluationKey<C: UnsignedInteger, const P: u32> {
    blind_rotation_key: BlindRotationKey<P>,
    key_switching_key: LweKeySwitchingKey<C>,
    parameters: Arc<Parameters<C, P>>,
}

impl<C: UnsignedInteger, const P: u32> EvaluationKey<C, P> {
    /// Derives the evaluation key from the secret key pack with fresh
    /// randomness.
    pub fn new(secret_key_pack: &SecretKeyPack<C, P>) -> Self {
        let blind_rotation_key = BlindRotationKey::generate(secret_key_pack);
        let key_switching_key = LweKeySwitchingKey::generate(secret_key_pack);
        Self {
            blind_rotation_key,
            key_switching_key,
            parameters: Arc::clone(secret_key_pack.parameters()),
        }
    }

    /// Returns the parameters of this key.
    #[inline]
    pub fn parameters(&self) -> &Arc<Parameters<C, P>> {
        &self.parameters
    }

    /// Runs the full bootstrap pipeline on `cipher`, evaluating `lut`
    /// at its phase.
    ///
    /// The output noise is a fixed baseline independent of the input
    /// noise. The steps: switch the ciphertext onto the rotation domain
    /// `[0, 2N)`, blind rotate the table, shift by half an encoding gap
    /// so rounding lands on the message lattice, extract the constant
    /// coefficient, switch back to `q` and key switch to dimension `n`.
    pub fn bootstrap(&self, lut: FieldPolynomial<P>, cipher: &Lwe<C>) -> Lwe<C> {
        let parameters = self.parameters.as_ref();

        let rotated = lwe_modulus_switch(
            cipher,
            parameters.lwe_cipher_modulus().value().as_u64(),
            parameters.twice_ring_dimension() as u64,
            ModulusSwitchRoundMethod::Round,
        );

        let mut acc = self
            .blind_rotation_key
            .blind_rotate(lut, &rotated, parameters);

        acc.b_mut()[0] += Fp::new(P >> 3);

        let extracted = acc.extract_lwe();
        let switched: Lwe<C> = lwe_modulus_switch_field_to_pow2(
            &extracted,
            P,
            parameters.lwe_cipher_modulus().value().as_u64(),
            ModulusSwitchRoundMethod::Round,
        );

        self.key_switching_key.key_switch(
            &switched,
            parameters.lwe_dimension(),
            parameters.lwe_cipher_modulus(),
        )
    }

    /// Homomorphic NAND.
    pub fn nand(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let add = c0.add_reduce_component_wise(c1, self.parameters.lwe_cipher_modulus());
        self.bootstrap(self.nand_lut(), &add)
    }

    /// Homomorphic AND.
    pub fn and(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let add = c0.add_reduce_component_wise(c1, self.parameters.lwe_cipher_modulus());
        self.bootstrap(self.and_majority_lut(), &add)
    }

    /// Homomorphic OR.
    pub fn or(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let add = c0.add_reduce_component_wise(c1, self.parameters.lwe_cipher_modulus());
        self.bootstrap(self.or_lut(), &add)
    }

    /// Homomorphic NOR.
    pub fn nor(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let add = c0.add_reduce_component_wise(c1, self.parameters.lwe_cipher_modulus());
        self.bootstrap(self.nor_lut(), &add)
    }

    /// Homomorphic XOR, combining the operands as `2 * (c0 - c1)`.
    pub fn xor(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let modulus = self.parameters.lwe_cipher_modulus();
        let two = C::ONE << 1;
        let combined = c0
            .sub_reduce_component_wise(c1, modulus)
            .scalar_mul_reduce(two, modulus);
        self.bootstrap(self.xor_lut(), &combined)
    }

    /// Homomorphic XNOR.
    pub fn xnor(&self, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let modulus = self.parameters.lwe_cipher_modulus();
        let two = C::ONE << 1;
        let combined = c0
            .sub_reduce_component_wise(c1, modulus)
            .scalar_mul_reduce(two, modulus);
        self.bootstrap(self.xnor_lut(), &combined)
    }

    /// Homomorphic majority of three inputs, the carry function of a
    /// full adder.
    pub fn majority(&self, c0: &Lwe<C>, c1: &Lwe<C>, c2: &Lwe<C>) -> Lwe<C> {
        let modulus = self.parameters.lwe_cipher_modulus();
        let add = c0
            .add_reduce_component_wise(c1, modulus)
            .add_reduce_component_wise(c2, modulus);
        self.bootstrap(self.and_majority_lut(), &add)
    }

    /// Homomorphic NOT. Purely linear: negate and re-center, no
    /// bootstrap and no noise growth.
    pub fn not(&self, cipher: &Lwe<C>) -> Lwe<C> {
        let modulus = self.parameters.lwe_cipher_modulus();
        let mut neg = cipher.neg_reduce(modulus);
        let encoded_true: C = encode(true, self.parameters.lwe_cipher_modulus_bits());
        *neg.b_mut() = modulus.add_reduce(neg.b(), encoded_true);
        neg
    }

    /// Homomorphic multiplexer, `if select { c0 } else { c1 }`,
    /// evaluated as `OR(AND(select, c0), AND(NOT select, c1))`. The two
    /// inner gates bootstrap in parallel.
    pub fn mux(&self, select: &Lwe<C>, c0: &Lwe<C>, c1: &Lwe<C>) -> Lwe<C> {
        let not_select = self.not(select);
        let (lhs, rhs) = rayon::join(|| self.and(select, c0), || self.and(&not_select, c1));
        self.or(&lhs, &rhs)
    }

    /// Re-bootstraps a ciphertext without changing its message,
    /// resetting its noise to the baseline.
    pub fn refresh(&self, cipher: &Lwe<C>) -> Lwe<C> {
        self.bootstrap(self.or_lut(), cipher)
    }

    // The gate tables below are the frozen catalogue of the scheme. The
    // combined phase lives in blocks of `2N/t` rotation steps; a table
    // entry of `±Q/8` becomes, after the half-gap shift and the final
    // modulus switch, an encoding of true (`q/4`) or false (`0`).

    fn and_majority_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, (n >> 1) + (n >> 2), -Fp::new(P >> 3), Fp::new(P >> 3))
    }

    fn nand_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, (n >> 1) + (n >> 2), Fp::new(P >> 3), -Fp::new(P >> 3))
    }

    fn or_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, n >> 2, -Fp::new(P >> 3), Fp::new(P >> 3))
    }

    fn nor_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, n >> 2, Fp::new(P >> 3), -Fp::new(P >> 3))
    }

    fn xor_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, n >> 1, -Fp::new(P >> 3), Fp::new(P >> 3))
    }

    fn xnor_lut(&self) -> FieldPolynomial<P> {
        let n = self.parameters.ring_dimension();
        init_lut(n, n >> 1, Fp::new(P >> 3), -Fp::new(P >> 3))
    }
}

/// A negacyclic lookup table constant on `[0, mid)` and `[mid, n)`.
fn init_lut<const P: u32>(n: usize, mid: usize, low: Fp<P>, high: Fp<P>) -> FieldPolynomial<P> {
    let mut lut = FieldPolynomial::zero(n);
    lut.as_mut_slice()[..mid].fill(low);
    lut.as_mut_slice()[mid..].fill(high);
    lut
}
