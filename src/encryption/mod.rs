//! At-rest protection of private keys.
//!
//! Private keys are wrapped with AES-256 under a key derived from a
//! human-memorable PIN:
//!
//! - [`key_wrap::derive_key`]: `SHA-256(PIN)` used as the AES-256 key
//! - [`key_wrap::wrap`] / [`key_wrap::unwrap`]: AES-256-ECB with PKCS#7 padding
//!
//! # Security Considerations
//!
//! - The derivation is unsalted and single-pass; short PINs can be brute-forced
//!   offline from a stolen key file
//! - There is no authentication tag; a wrong PIN is only detected through the
//!   padding check or subsequent key parsing
//! - Changing either point changes the on-disk format of existing key files

mod aes;
pub mod key_wrap;

pub use key_wrap::{derive_key, unwrap, wrap, PinKey};
