use fhe_core::{encode, ConstParameters};
use lattice::Lwe;
use serde::{Deserialize, Serialize};

use crate::keys::{server_key, FheEvaluationKey};
use crate::{ClientKey, Error, PublicKey, Result, ServerKey};

/// An encrypted boolean.
///
/// Every ciphertext carries the numeric record of the parameter set it
/// was produced under; operations refuse to mix ciphertexts or keys
/// from different sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FheBool {
    pub(crate) ciphertext: Lwe<u16>,
    pub(crate) parameters: ConstParameters<u16>,
}

impl FheBool {
    pub(crate) fn from_parts(ciphertext: Lwe<u16>, parameters: ConstParameters<u16>) -> Self {
        Self {
            ciphertext,
            parameters,
        }
    }

    /// Encrypts a boolean under the client key.
    pub fn try_encrypt(message: bool, client_key: &ClientKey) -> Result<Self> {
        if !client_key.config().bool_enabled {
            return Err(Error::TypeNotEnabled);
        }
        Ok(Self {
            ciphertext: client_key.pack().encrypt(message),
            parameters: client_key.const_parameters(),
        })
    }

    /// Encrypts a boolean with the public key.
    pub fn try_encrypt_with_public_key(message: bool, public_key: &PublicKey) -> Result<Self> {
        if !public_key.config().bool_enabled {
            return Err(Error::TypeNotEnabled);
        }
        let mut rng = rand::thread_rng();
        Ok(Self {
            ciphertext: public_key
                .key()
                .encrypt(message, public_key.parameters(), &mut rng),
            parameters: public_key.const_parameters(),
        })
    }

    /// Embeds a clear boolean as a noiseless ciphertext compatible with
    /// the server key of the current thread.
    pub fn try_encrypt_trivial(message: bool) -> Result<Self> {
        let key = server_key()?;
        if !key.config().bool_enabled {
            return Err(Error::TypeNotEnabled);
        }
        let parameters = key.const_parameters();
        let encoded = encode::<u16>(message, parameters.lwe_cipher_modulus.trailing_zeros());
        Ok(Self {
            ciphertext: Lwe::trivial(encoded, parameters.lwe_dimension),
            parameters,
        })
    }

    /// Decrypts under the client key.
    pub fn decrypt(&self, client_key: &ClientKey) -> Result<bool> {
        if self.parameters != client_key.const_parameters() {
            return Err(Error::ParameterMismatch);
        }
        Ok(client_key.pack().decrypt(&self.ciphertext))
    }

    fn binary_gate(
        &self,
        rhs: &Self,
        gate: impl Fn(&FheEvaluationKey, &Lwe<u16>, &Lwe<u16>) -> Lwe<u16>,
    ) -> Result<Self> {
        let key = server_key()?;
        check_compatible(&key, &[self, rhs])?;
        Ok(Self {
            ciphertext: gate(key.evaluation_key(), &self.ciphertext, &rhs.ciphertext),
            parameters: self.parameters,
        })
    }

    /// Homomorphic AND.
    pub fn and(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::and)
    }

    /// Homomorphic NAND.
    pub fn nand(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::nand)
    }

    /// Homomorphic OR.
    pub fn or(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::or)
    }

    /// Homomorphic NOR.
    pub fn nor(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::nor)
    }

    /// Homomorphic XOR.
    pub fn xor(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::xor)
    }

    /// Homomorphic XNOR.
    pub fn xnor(&self, rhs: &Self) -> Result<Self> {
        self.binary_gate(rhs, FheEvaluationKey::xnor)
    }

    /// Homomorphic NOT. Linear, so it neither bootstraps nor grows the
    /// noise.
    pub fn not(&self) -> Result<Self> {
        let key = server_key()?;
        check_compatible(&key, &[self])?;
        Ok(Self {
            ciphertext: key.evaluation_key().not(&self.ciphertext),
            parameters: self.parameters,
        })
    }

    /// Homomorphic selection: `if self { on_true } else { on_false }`.
    pub fn select(&self, on_true: &Self, on_false: &Self) -> Result<Self> {
        let key = server_key()?;
        check_compatible(&key, &[self, on_true, on_false])?;
        Ok(Self {
            ciphertext: key.evaluation_key().mux(
                &self.ciphertext,
                &on_true.ciphertext,
                &on_false.ciphertext,
            ),
            parameters: self.parameters,
        })
    }
}

fn check_compatible(key: &ServerKey, operands: &[&FheBool]) -> Result<()> {
    let expected = key.const_parameters();
    if operands.iter().any(|c| c.parameters != expected) {
        return Err(Error::ParameterMismatch);
    }
    Ok(())
}
