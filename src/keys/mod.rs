//! RSA key handling.
//!
//! - [`codec`]: Base64/PEM text transport of DER keys
//! - [`store`]: loading keys from files, PIN-protected or plaintext
//! - [`generator`]: key pair generation and export

pub mod codec;
pub mod generator;
pub mod store;

pub use codec::KeyKind;
pub use generator::{
    generate_key_pair, ExportedKeys, KeyPair, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};
pub use store::{
    EncryptedKeyLoader, KeyLoader, PlaintextKeyLoader, PrivateKeyHandle, PublicKeyHandle,
};
