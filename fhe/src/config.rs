/// The set of ciphertext types a key pair supports.
///
/// A key pair only carries material for the types enabled at
/// generation; encrypting or operating on a disabled type fails with
/// [`Error::TypeNotEnabled`](crate::Error::TypeNotEnabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub(crate) bool_enabled: bool,
    pub(crate) uint8_enabled: bool,
    pub(crate) uint16_enabled: bool,
    pub(crate) uint32_enabled: bool,
}

/// Builder for a [`Config`], starting from everything disabled.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Starts a configuration with no type enabled.
    #[inline]
    pub fn all_disabled() -> Self {
        Self {
            config: Config {
                bool_enabled: false,
                uint8_enabled: false,
                uint16_enabled: false,
                uint32_enabled: false,
            },
        }
    }

    /// Enables encrypted booleans under the default parameter set.
    #[inline]
    pub fn enable_default_bool(mut self) -> Self {
        self.config.bool_enabled = true;
        self
    }

    /// Enables 8-bit encrypted words under the default parameter set.
    #[inline]
    pub fn enable_default_uint8(mut self) -> Self {
        self.config.uint8_enabled = true;
        self
    }

    /// Enables 16-bit encrypted words under the default parameter set.
    #[inline]
    pub fn enable_default_uint16(mut self) -> Self {
        self.config.uint16_enabled = true;
        self
    }

    /// Enables 32-bit encrypted words under the default parameter set.
    #[inline]
    pub fn enable_default_uint32(mut self) -> Self {
        self.config.uint32_enabled = true;
        self
    }

    /// Finishes the configuration.
    #[inline]
    pub fn build(self) -> Config {
        self.config
    }
}
