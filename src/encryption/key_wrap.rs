//! PIN-based wrapping of private key text.
//!
//! The wrapping key is `SHA-256(UTF-8 PIN)` used directly as an AES-256 key.
//! There is no salt, no iteration count and no integrity tag. This keeps key
//! files compatible with the existing on-disk format
//! `AES(SHA256(PIN), Base64(PKCS#8 DER))`; it is not a password-hardening KDF
//! and offers no protection against offline guessing of short PINs.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::aes::{aes256_ecb_decrypt, aes256_ecb_encrypt};
use crate::error::{Error, Result};

/// Symmetric key derived from a PIN, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PinKey([u8; 32]);

impl PinKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for PinKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PinKey([REDACTED])")
    }
}

/// Derive the AES-256 wrapping key from a PIN.
pub fn derive_key(pin: &str) -> PinKey {
    let digest = Sha256::digest(pin.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    PinKey(key)
}

/// Encrypt Base64 key text under a PIN.
///
/// Deterministic: wrapping the same text under the same PIN twice yields the
/// same ciphertext.
pub fn wrap(key_text: &str, pin: &str) -> Result<Vec<u8>> {
    if pin.is_empty() {
        return Err(Error::EmptyPin);
    }
    let key = derive_key(pin);
    Ok(aes256_ecb_encrypt(key.as_bytes(), key_text.as_bytes()))
}

/// Decrypt key text previously produced by [`wrap`].
///
/// A wrong PIN usually fails the padding check; when it happens to pass, the
/// result is unrelated bytes that fail later key parsing. The returned text
/// is wiped when dropped.
pub fn unwrap(ciphertext: &[u8], pin: &str) -> Result<Zeroizing<String>> {
    if pin.is_empty() {
        return Err(Error::EmptyPin);
    }
    let key = derive_key(pin);
    let mut plaintext = aes256_ecb_decrypt(key.as_bytes(), ciphertext).map_err(|e| {
        log::debug!("Key unwrap rejected: {}", e);
        Error::KeyUnwrapFailure
    })?;
    match String::from_utf8(std::mem::take(&mut *plaintext)) {
        Ok(text) => Ok(Zeroizing::new(text)),
        Err(e) => {
            drop(Zeroizing::new(e.into_bytes()));
            Err(Error::KeyUnwrapFailure)
        },
    }
}
