//! PDF signing implementation.
//!
//! Signing appends a signature slot to the document as an incremental
//! update, computes an RSA PKCS#1 v1.5 / SHA-256 signature over the slot's
//! byte range and embeds the raw signature bytes in the `/Contents`
//! placeholder.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rsa::rand_core::OsRng;
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};

use super::byterange::ContentsPlaceholder;
use super::types::SignatureDescriptor;
use crate::config::{SealConfig, DEFAULT_SIGNATURE_CAPACITY};
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::keys::PrivateKeyHandle;

/// Computes the signature value over the signed content.
///
/// Receives exactly the bytes covered by the byte range and the key to sign
/// with; nothing else reaches it.
pub type SignatureFn = fn(&[u8], &PrivateKeyHandle) -> Result<Vec<u8>>;

/// SHA-256 with RSASSA-PKCS1-v1_5 over `content`.
///
/// The private key operation is blinded.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the key cannot produce the signature
/// (for example, a modulus too small for a SHA-256 DigestInfo).
pub fn compute_signature(content: &[u8], key: &PrivateKeyHandle) -> Result<Vec<u8>> {
    let digest = Sha256::digest(content);
    key.rsa()
        .sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| Error::InvalidKey(e.to_string()))
}

/// PDF signer that creates detached RSA signatures.
#[derive(Clone)]
pub struct PdfSigner {
    placeholder: ContentsPlaceholder,
    signature_fn: SignatureFn,
}

impl std::fmt::Debug for PdfSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSigner")
            .field("signature_capacity", &self.placeholder.capacity())
            .finish_non_exhaustive()
    }
}

impl Default for PdfSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSigner {
    /// Create a signer with the default placeholder capacity.
    pub fn new() -> Self {
        Self {
            placeholder: ContentsPlaceholder::new(DEFAULT_SIGNATURE_CAPACITY),
            signature_fn: compute_signature,
        }
    }

    /// Create a signer from configuration.
    pub fn with_config(config: &SealConfig) -> Self {
        Self {
            placeholder: ContentsPlaceholder::new(config.signature_capacity),
            signature_fn: compute_signature,
        }
    }

    /// Replace the signature function.
    pub fn with_signature_fn(mut self, signature_fn: SignatureFn) -> Self {
        self.signature_fn = signature_fn;
        self
    }

    /// Raw byte capacity reserved for the signature value.
    pub fn signature_capacity(&self) -> usize {
        self.placeholder.capacity()
    }

    /// Sign an open document and return the signed file.
    ///
    /// The result starts with the document's original bytes, unchanged.
    pub fn sign_to_bytes(
        &self,
        document: &PdfDocument,
        key: &PrivateKeyHandle,
        descriptor: &SignatureDescriptor,
    ) -> Result<Vec<u8>> {
        let slot = document.prepare_signature(descriptor, self.placeholder, &Utc::now())?;
        let content = slot.signed_content()?;

        let signature = (self.signature_fn)(&content, key)?;
        log::debug!(
            "Signed {} bytes with {}-bit key, ByteRange {}",
            content.len(),
            key.size_bits(),
            slot.byte_range()
        );

        slot.fill(&signature)
    }

    /// Sign an open document, writing the signed file to `out`.
    ///
    /// Nothing is written unless signing succeeds.
    pub fn sign_document<W: Write>(
        &self,
        document: &PdfDocument,
        key: &PrivateKeyHandle,
        descriptor: &SignatureDescriptor,
        out: &mut W,
    ) -> Result<()> {
        let signed = self.sign_to_bytes(document, key, descriptor)?;
        out.write_all(&signed).map_err(Error::OutputWriteFailure)?;
        out.flush().map_err(Error::OutputWriteFailure)
    }

    /// Sign the file named by `request.input` into `request.output`.
    ///
    /// The input is opened and closed before the output is created, so an
    /// error (including [`Error::AlreadySigned`]) leaves any existing output
    /// untouched, and input and output may be the same path.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if the request is incomplete
    /// - [`Error::DocumentOpenFailure`] if the input cannot be opened
    /// - [`Error::AlreadySigned`] if the input already carries a signature
    /// - [`Error::InvalidKey`] if the key cannot sign
    /// - [`Error::OutputWriteFailure`] if the output cannot be written
    pub fn sign(&self, request: SignRequest<'_>) -> Result<()> {
        let SignRequest {
            input,
            output,
            key,
            descriptor,
        } = request;

        let input = input.ok_or_else(|| missing("input document"))?;
        let output = output.ok_or_else(|| missing("output path"))?;
        let key = key.ok_or_else(|| missing("private key"))?;
        let descriptor = descriptor.ok_or_else(|| missing("signature descriptor"))?;

        let signed = {
            let document = PdfDocument::open(&input)?;
            self.sign_to_bytes(&document, key, &descriptor)?
        };

        let mut file = File::create(&output).map_err(Error::OutputWriteFailure)?;
        file.write_all(&signed).map_err(Error::OutputWriteFailure)?;
        file.sync_all().map_err(Error::OutputWriteFailure)?;

        log::info!(
            "Signed {} as \"{}\" -> {}",
            input.display(),
            descriptor.name,
            output.display()
        );
        Ok(())
    }
}

fn missing(what: &str) -> Error {
    Error::InvalidOperation(format!("no {} given", what))
}

/// Everything [`PdfSigner::sign`] needs, assembled by the caller.
#[derive(Debug, Default)]
pub struct SignRequest<'a> {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    key: Option<&'a PrivateKeyHandle>,
    descriptor: Option<SignatureDescriptor>,
}

impl<'a> SignRequest<'a> {
    /// Start an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document to sign.
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = Some(path.as_ref().to_path_buf());
        self
    }

    /// Where the signed document is written.
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Key to sign with.
    pub fn key(mut self, key: &'a PrivateKeyHandle) -> Self {
        self.key = Some(key);
        self
    }

    /// Signature metadata.
    pub fn descriptor(mut self, descriptor: SignatureDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}
