//! Error types for signing, verification and key handling.
//!
//! Failures are grouped by origin: caller mistakes, key material, document I/O
//! and protocol invariants of the single-signature design.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while protecting keys, signing or verifying.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// A required argument was not supplied (programming error)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The PIN protecting a private key was empty
    #[error("PIN must not be empty")]
    EmptyPin,

    /// Key text is not valid Base64 (after PEM markers and line breaks are removed)
    #[error("Malformed key text: {0}")]
    MalformedKeyText(String),

    /// The wrapped private key could not be decrypted
    #[error("Could not unwrap private key")]
    KeyUnwrapFailure,

    /// Key material could not be loaded.
    ///
    /// Wrong PIN, corrupt file and non-RSA keys all end up here on purpose.
    #[error("Invalid key file: {0}")]
    InvalidKeyFile(String),

    /// The private key was rejected while computing a signature
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The document could not be opened or parsed
    #[error("Couldn't open document: {0}")]
    DocumentOpenFailure(String),

    /// The document bytes could not be read back for verification
    #[error("Couldn't read document: {0}")]
    DocumentReadFailure(#[source] std::io::Error),

    /// The signed output could not be created or written
    #[error("Couldn't save signed document: {0}")]
    OutputWriteFailure(#[source] std::io::Error),

    /// The document already carries a signature
    #[error("A signature is already present in this document; documents can only have one signature")]
    AlreadySigned,

    /// Verification was requested on a document without a signature dictionary
    #[error("Signature verification failed: no signature found")]
    NoSignaturePresent,

    /// The embedded signature is structurally unusable
    #[error("Signature verification failed: {0}")]
    VerificationFailure(String),

    /// The computed signature does not fit the reserved /Contents placeholder
    #[error("Signature ({size} bytes) exceeds placeholder capacity ({capacity} bytes)")]
    SignatureTooLarge {
        /// Size of the raw signature in bytes
        size: usize,
        /// Reserved capacity in bytes
        capacity: usize,
    },

    /// RSA key pair generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error belongs to the unified "invalid key material" class.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedKeyText(_)
                | Error::KeyUnwrapFailure
                | Error::InvalidKeyFile(_)
                | Error::InvalidKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_signature_reads_as_verification_failure() {
        let msg = format!("{}", Error::NoSignaturePresent);
        assert!(msg.contains("Signature verification failed"));
        assert!(msg.contains("no signature found"));
    }

    #[test]
    fn test_invalid_key_file_message() {
        let err = Error::InvalidKeyFile("private key could not be recovered".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid key file"));
        assert!(msg.contains("could not be recovered"));
    }

    #[test]
    fn test_signature_too_large_message() {
        let err = Error::SignatureTooLarge {
            size: 512,
            capacity: 256,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("512"));
        assert!(msg.contains("256"));
    }

    #[test]
    fn test_key_error_class() {
        assert!(Error::KeyUnwrapFailure.is_key_error());
        assert!(Error::InvalidKeyFile(String::new()).is_key_error());
        assert!(!Error::AlreadySigned.is_key_error());
        assert!(!Error::NoSignaturePresent.is_key_error());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
