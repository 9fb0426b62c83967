//! Configuration for key generation, key loading and signing.

use crate::keys::{EncryptedKeyLoader, KeyLoader, PlaintextKeyLoader};

/// Default RSA modulus size for newly generated key pairs.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Default raw capacity of the /Contents placeholder, in bytes.
pub const DEFAULT_SIGNATURE_CAPACITY: usize = 8192;

/// How private keys are protected at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyProtection {
    /// Private key is AES-wrapped under a PIN-derived key
    #[default]
    Encrypted,
    /// Private key is stored as plain PEM (development only, PIN is ignored)
    Plaintext,
}

impl KeyProtection {
    /// Build the key loader matching this protection scheme.
    pub fn key_loader(&self) -> Box<dyn KeyLoader> {
        match self {
            KeyProtection::Encrypted => Box::new(EncryptedKeyLoader::new()),
            KeyProtection::Plaintext => Box::new(PlaintextKeyLoader::new()),
        }
    }
}

/// Signing configuration.
#[derive(Debug, Clone)]
pub struct SealConfig {
    /// RSA modulus size used when generating key pairs.
    pub key_bits: usize,

    /// Raw byte capacity reserved for the signature value.
    pub signature_capacity: usize,

    /// Protection scheme of private key files.
    pub key_protection: KeyProtection,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SealConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            signature_capacity: DEFAULT_SIGNATURE_CAPACITY,
            key_protection: KeyProtection::Encrypted,
        }
    }

    /// Set the RSA modulus size for generated keys.
    pub fn with_key_bits(mut self, bits: usize) -> Self {
        self.key_bits = bits;
        self
    }

    /// Set the reserved signature capacity in bytes.
    pub fn with_signature_capacity(mut self, capacity: usize) -> Self {
        self.signature_capacity = capacity;
        self
    }

    /// Select how private keys are protected.
    pub fn with_key_protection(mut self, protection: KeyProtection) -> Self {
        self.key_protection = protection;
        self
    }

    /// Key loader for the configured protection scheme.
    pub fn key_loader(&self) -> Box<dyn KeyLoader> {
        self.key_protection.key_loader()
    }
}
