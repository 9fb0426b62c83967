//! Digital signature types and data structures.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Signature handler name written to `/Filter`.
pub const FILTER_ADOBE_PPKLITE: &str = "Adobe.PPKLite";

/// Signature format written to `/SubFilter`.
pub const SUBFILTER_PKCS7_DETACHED: &str = "adbe.pkcs7.detached";

/// Metadata attached to the signature slot of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureDescriptor {
    /// Name of the signer (`/Name`)
    pub name: String,
    /// Signature handler (`/Filter`)
    pub filter: String,
    /// Signature format (`/SubFilter`)
    pub sub_filter: String,
    /// Reason for signing
    pub reason: Option<String>,
    /// Location where the document was signed
    pub location: Option<String>,
    /// Contact information
    pub contact_info: Option<String>,
}

impl SignatureDescriptor {
    /// Create a descriptor for a detached signature with the given signer name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: FILTER_ADOBE_PPKLITE.to_string(),
            sub_filter: SUBFILTER_PKCS7_DETACHED.to_string(),
            reason: None,
            location: None,
            contact_info: None,
        }
    }

    /// Set the reason for signing.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the signing location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the contact information.
    pub fn with_contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = Some(contact_info.into());
        self
    }
}

/// Information about an existing signature in a PDF.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignatureInfo {
    /// Object holding the signature dictionary, when indirect
    pub object_id: Option<(u32, u16)>,
    /// Fully qualified name of the signature field, if found through one
    pub field_name: Option<String>,
    /// Name of the signer
    pub signer_name: Option<String>,
    /// Signing time as written in `/M`
    pub signing_time: Option<String>,
    /// Reason for signing
    pub reason: Option<String>,
    /// Signing location
    pub location: Option<String>,
    /// Contact information
    pub contact_info: Option<String>,
    /// Signature handler
    pub filter: Option<String>,
    /// Signature format
    pub sub_filter: Option<String>,
    /// Raw `/ByteRange` values
    pub byte_range: Vec<i64>,
    /// Raw `/Contents` bytes, including any zero padding
    #[serde(skip)]
    pub contents: Vec<u8>,
}

/// Outcome of verifying a document's signature.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Whether the signature matches the signed content and key
    pub valid: bool,
    /// The signature that was checked
    pub signature: SignatureInfo,
    /// Whether the byte range reaches the end of the file
    pub covers_whole_file: bool,
    /// Size of the file that was verified
    pub file_size: usize,
    /// Modulus size of the verifying key
    pub key_bits: usize,
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSS+00'00'`).
pub fn format_pdf_date(time: &DateTime<Utc>) -> String {
    time.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}
