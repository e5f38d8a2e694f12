#![deny(missing_docs)]
//! Typed client/server API over the bootstrapped boolean scheme.
//!
//! The client generates a key pair with [`generate_keys`], keeps the
//! [`ClientKey`] and hands the [`ServerKey`] to the evaluating party,
//! which installs it per thread with [`set_server_key`]. Encrypted
//! booleans ([`FheBool`]) and fixed-width words ([`FheUint8`],
//! [`FheUint16`], [`FheUint32`]) then compute through their methods,
//! every one returning a [`Result`].

mod boolean;
mod config;
mod error;
mod integer;
mod keys;

pub use boolean::FheBool;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use integer::{FheUint16, FheUint32, FheUint8};
pub use keys::{
    generate_keys, set_server_key, unset_server_key, ClientKey, PublicKey, ServerKey,
};
