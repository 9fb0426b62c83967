//! AES-256 encryption/decryption for PIN-wrapped private keys.
//!
//! Key files use the JCE default `"AES"` transform, which is AES in ECB mode
//! with PKCS#7 (a.k.a. PKCS#5) padding. There is no IV: the same key and
//! plaintext always produce the same ciphertext.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use zeroize::Zeroizing;

/// AES block size in bytes.
const BLOCK_SIZE: usize = 16;

/// Encrypt data using AES-256 in ECB mode with PKCS#7 padding.
///
/// # Arguments
///
/// * `key` - The 32-byte encryption key
/// * `data` - The data to encrypt
///
/// # Returns
///
/// The encrypted data with PKCS#7 padding (always at least one block)
pub fn aes256_ecb_encrypt(key: &[u8; 32], data: &[u8]) -> Vec<u8> {
    // Apply PKCS#7 padding manually
    let mut padded = data.to_vec();
    let padding_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    padded.extend(std::iter::repeat(padding_len as u8).take(padding_len));

    let cipher = Aes256::new(GenericArray::from_slice(key));
    for block in padded.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }

    padded
}

/// Decrypt data using AES-256 in ECB mode and remove PKCS#7 padding.
///
/// # Arguments
///
/// * `key` - The 32-byte encryption key
/// * `data` - The encrypted data
///
/// # Returns
///
/// The decrypted data with padding removed, or an error if the length or
/// padding is invalid. The plaintext buffer is wiped on drop on every path.
pub fn aes256_ecb_decrypt(
    key: &[u8; 32],
    data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, &'static str> {
    if data.is_empty() {
        return Err("Encrypted data must not be empty");
    }
    if data.len() % BLOCK_SIZE != 0 {
        return Err("Encrypted data length must be multiple of 16");
    }

    let mut buffer = Zeroizing::new(data.to_vec());
    let cipher = Aes256::new(GenericArray::from_slice(key));
    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }

    // Remove PKCS#7 padding manually
    let padding_len = buffer[buffer.len() - 1] as usize;
    if padding_len == 0 || padding_len > BLOCK_SIZE {
        return Err("Invalid PKCS#7 padding");
    }

    // Verify padding
    let data_len = buffer.len() - padding_len;
    if buffer[data_len..].iter().any(|&byte| byte != padding_len as u8) {
        return Err("Invalid PKCS#7 padding");
    }

    buffer.truncate(data_len);
    Ok(buffer)
}
