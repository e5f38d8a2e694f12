use std::cell::RefCell;
use std::sync::Arc;

use fhe_core::{
    ConstParameters, EvaluationKey, LwePublicKey, Parameters, SecretKeyPack,
    DEFAULT_128_BITS_PARAMETERS, DEFAULT_RING_MODULUS,
};

use crate::{Config, Error, Result};

pub(crate) type FheParameters = Parameters<u16, DEFAULT_RING_MODULUS>;
pub(crate) type FheEvaluationKey = EvaluationKey<u16, DEFAULT_RING_MODULUS>;

/// Client-side key material: the secret keys and the configuration they
/// were generated under. Never leaves the client.
pub struct ClientKey {
    pack: SecretKeyPack<u16, DEFAULT_RING_MODULUS>,
    config: Config,
}

impl ClientKey {
    #[inline]
    pub(crate) fn pack(&self) -> &SecretKeyPack<u16, DEFAULT_RING_MODULUS> {
        &self.pack
    }

    #[inline]
    pub(crate) fn config(&self) -> Config {
        self.config
    }

    #[inline]
    pub(crate) fn const_parameters(&self) -> ConstParameters<u16> {
        *self.pack.parameters().const_parameters()
    }

    /// Derives a public encryption key. The public key can encrypt but
    /// not decrypt, and may be shared freely.
    pub fn generate_public_key(&self) -> PublicKey {
        PublicKey {
            key: LwePublicKey::new(&self.pack),
            parameters: Arc::clone(self.pack.parameters()),
            config: self.config,
        }
    }
}

/// Server-side key material: the evaluation key behind an [`Arc`], so
/// cloning is cheap and clones share the underlying material.
#[derive(Clone)]
pub struct ServerKey {
    evaluation_key: Arc<FheEvaluationKey>,
    config: Config,
}

impl ServerKey {
    #[inline]
    pub(crate) fn evaluation_key(&self) -> &FheEvaluationKey {
        &self.evaluation_key
    }

    #[inline]
    pub(crate) fn config(&self) -> Config {
        self.config
    }

    #[inline]
    pub(crate) fn const_parameters(&self) -> ConstParameters<u16> {
        *self.evaluation_key.parameters().const_parameters()
    }
}

/// Public encryption key derived from a [`ClientKey`].
pub struct PublicKey {
    key: LwePublicKey<u16>,
    parameters: Arc<FheParameters>,
    config: Config,
}

impl PublicKey {
    #[inline]
    pub(crate) fn key(&self) -> &LwePublicKey<u16> {
        &self.key
    }

    #[inline]
    pub(crate) fn parameters(&self) -> &FheParameters {
        &self.parameters
    }

    #[inline]
    pub(crate) fn config(&self) -> Config {
        self.config
    }

    #[inline]
    pub(crate) fn const_parameters(&self) -> ConstParameters<u16> {
        *self.parameters.const_parameters()
    }
}

/// Generates a fresh client/server key pair under the default parameter
/// set, supporting the types enabled in `config`.
pub fn generate_keys(config: Config) -> (ClientKey, ServerKey) {
    let pack = SecretKeyPack::new(Arc::clone(&DEFAULT_128_BITS_PARAMETERS));
    let evaluation_key = Arc::new(EvaluationKey::new(&pack));
    (
        ClientKey { pack, config },
        ServerKey {
            evaluation_key,
            config,
        },
    )
}

thread_local! {
    static SERVER_KEY: RefCell<Option<ServerKey>> = const { RefCell::new(None) };
}

/// Installs `key` as the server key of the current thread. Homomorphic
/// operations on this thread use it until it is replaced or unset;
/// other threads are unaffected.
pub fn set_server_key(key: ServerKey) {
    SERVER_KEY.with(|slot| *slot.borrow_mut() = Some(key));
}

/// Removes the server key of the current thread, if any.
pub fn unset_server_key() {
    SERVER_KEY.with(|slot| *slot.borrow_mut() = None);
}

/// Resolves the server key of the current thread.
pub(crate) fn server_key() -> Result<ServerKey> {
    SERVER_KEY.with(|slot| slot.borrow().clone().ok_or(Error::NoServerKeySet))
}
