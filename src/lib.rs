// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]

//! # PDF Seal
//!
//! Detached RSA signatures for PDF documents, with PIN-protected private keys.
//!
//! ## Core Features
//!
//! - **Key Protection**: private keys wrapped with AES-256 under a PIN-derived key
//! - **Key Formats**: bare Base64 or PEM text of PKCS#8 / SubjectPublicKeyInfo DER
//! - **Signing**: SHA-256 with RSASSA-PKCS1-v1_5 over the document's byte range,
//!   embedded through an append-only incremental update
//! - **Verification**: re-reads the signed byte range and checks it against a public key
//!
//! ## Architecture
//!
//! ```text
//! keys::codec + encryption::key_wrap
//!     ↓
//! keys::store (KeyLoader: encrypted | plaintext)
//!     ↓
//! signatures::{PdfSigner, SignatureVerifier}
//!     ↓
//! document::PdfDocument (lopdf parsing + writer::IncrementalUpdate)
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_seal::keys::{generate_key_pair, KeyLoader};
//! use pdf_seal::signatures::{PdfSigner, SignRequest, SignatureDescriptor, SignatureVerifier};
//! use pdf_seal::SealConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SealConfig::default();
//!
//! // Generate and store a key pair protected by a PIN
//! let pair = generate_key_pair(config.key_bits)?;
//! let (private_path, public_path) = pair.export_protected("1234")?.write_to_dir(Path::new("keys"))?;
//!
//! // Load the keys back and sign
//! let loader = config.key_loader();
//! let private_key = loader.load_private_key_file(&private_path, "1234")?;
//! PdfSigner::with_config(&config).sign(
//!     SignRequest::new()
//!         .input("document.pdf")
//!         .output("signed.pdf")
//!         .key(&private_key)
//!         .descriptor(SignatureDescriptor::new("SIG TEST")),
//! )?;
//!
//! // Verify
//! let public_key = loader.load_public_key_file(&public_path)?;
//! assert!(SignatureVerifier::new().verify("signed.pdf", &public_key)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Key protection at rest
pub mod encryption;

// Key codec, loading and generation
pub mod keys;

// PDF document access
pub mod document;

// Incremental update writing
pub mod writer;

// Digital signatures
pub mod signatures;

// Re-exports
pub use config::{KeyProtection, SealConfig};
pub use document::{PdfDocument, SignatureSlot};
pub use error::{Error, Result};
pub use keys::{
    generate_key_pair, EncryptedKeyLoader, KeyLoader, KeyPair, PlaintextKeyLoader,
    PrivateKeyHandle, PublicKeyHandle,
};
pub use signatures::{
    PdfSigner, SignRequest, SignatureDescriptor, SignatureVerifier, VerificationReport,
};
