//! PDF signature verification.
//!
//! Verification re-reads the document's bytes from their source, extracts
//! the signed byte range and checks the embedded RSA PKCS#1 v1.5 / SHA-256
//! signature against a public key.

use std::path::Path;

use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use super::byterange::ByteRange;
use super::types::VerificationReport;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::keys::PublicKeyHandle;

/// Verifier for PDF digital signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Create a new signature verifier.
    pub fn new() -> Self {
        Self
    }

    /// Open the PDF at `path` and verify its signature.
    ///
    /// The document is closed before this returns.
    pub fn verify(&self, path: impl AsRef<Path>, key: &PublicKeyHandle) -> Result<bool> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidOperation("no input document given".to_string()));
        }
        let document = PdfDocument::open(path)?;
        self.verify_document(&document, key)
    }

    /// Verify the first signature of an open document.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSignaturePresent`] if the document has no signature
    /// - [`Error::DocumentReadFailure`] if the document bytes cannot be re-read
    /// - [`Error::VerificationFailure`] if the byte range or signature value is
    ///   malformed
    pub fn verify_document(&self, document: &PdfDocument, key: &PublicKeyHandle) -> Result<bool> {
        Ok(self.verify_detailed(document, key)?.valid)
    }

    /// Verify the first signature of an open document and describe it.
    pub fn verify_detailed(
        &self,
        document: &PdfDocument,
        key: &PublicKeyHandle,
    ) -> Result<VerificationReport> {
        let signature = document
            .first_signature()
            .ok_or(Error::NoSignaturePresent)?;

        let data = document.read_source()?;
        let byte_range = ByteRange::from_values(&signature.byte_range)?;
        let signed_content = byte_range.extract(&data)?;

        let covers_whole_file = byte_range.covers_whole_file(data.len());
        if !covers_whole_file {
            log::warn!(
                "Signature covers {} of {} bytes; content was appended after signing",
                byte_range.end(),
                data.len()
            );
        }

        // /Contents is zero-padded past the signature; only the first
        // modulus-length bytes are the signature value
        let signature_len = key.size_bytes();
        if signature.contents.len() < signature_len {
            return Err(Error::VerificationFailure(format!(
                "signature value is {} bytes, expected at least {}",
                signature.contents.len(),
                signature_len
            )));
        }

        let digest = Sha256::digest(&signed_content);
        let valid = key
            .rsa()
            .verify(
                Pkcs1v15Sign::new::<Sha256>(),
                &digest,
                &signature.contents[..signature_len],
            )
            .is_ok();

        log::debug!(
            "Verified {} signed bytes against {}-bit key: {}",
            signed_content.len(),
            key.size_bits(),
            if valid { "valid" } else { "invalid" }
        );

        Ok(VerificationReport {
            valid,
            signature,
            covers_whole_file,
            file_size: data.len(),
            key_bits: key.size_bits(),
        })
    }
}
