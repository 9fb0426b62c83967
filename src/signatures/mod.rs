//! PDF Digital Signatures module.
//!
//! Creates and verifies detached RSA signatures embedded in PDF documents.
//!
//! ## Signature Format
//!
//! - `/Filter /Adobe.PPKLite`, `/SubFilter /adbe.pkcs7.detached`
//! - `/Contents` holds the raw RSASSA-PKCS1-v1_5 signature over the SHA-256
//!   digest of the byte range, zero-padded to the reserved capacity
//! - One signature per document
//!
//! ## Example
//!
//! ```no_run
//! use pdf_seal::keys::{EncryptedKeyLoader, KeyLoader};
//! use pdf_seal::signatures::{PdfSigner, SignRequest, SignatureDescriptor, SignatureVerifier};
//! use std::path::Path;
//!
//! let loader = EncryptedKeyLoader::new();
//! let private_key = loader.load_private_key_file(Path::new("private_key.txt"), "1234")?;
//! let public_key = loader.load_public_key_file(Path::new("public_key.txt"))?;
//!
//! PdfSigner::new().sign(
//!     SignRequest::new()
//!         .input("document.pdf")
//!         .output("signed.pdf")
//!         .key(&private_key)
//!         .descriptor(SignatureDescriptor::new("SIG TEST")),
//! )?;
//!
//! assert!(SignatureVerifier::new().verify("signed.pdf", &public_key)?);
//! # Ok::<(), pdf_seal::Error>(())
//! ```
//!
//! ## PDF Specification Reference
//!
//! - ISO 32000-1:2008 Section 12.8 - Digital Signatures

pub mod byterange;
mod signer;
pub mod types;
mod verifier;

pub use byterange::{ByteRange, ContentsPlaceholder};
pub use signer::{compute_signature, PdfSigner, SignRequest, SignatureFn};
pub use types::{SignatureDescriptor, SignatureInfo, VerificationReport};
pub use verifier::SignatureVerifier;
