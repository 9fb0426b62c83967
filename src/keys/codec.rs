//! Text transport encoding of RSA keys.
//!
//! Keys travel as Base64 of their DER encoding, either bare or wrapped in
//! PEM-style `-----BEGIN PUBLIC KEY-----` / `-----END PUBLIC KEY-----`
//! markers. Line separators are ignored when decoding. PEM output is
//! produced by the `pkcs8`/`spki` encoders on the key handles.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Kind of key carried by a key text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// X.509 SubjectPublicKeyInfo
    Public,
    /// PKCS#8 PrivateKeyInfo
    Private,
}

impl KeyKind {
    /// Label used in PEM markers.
    pub fn label(&self) -> &'static str {
        match self {
            KeyKind::Public => "PUBLIC",
            KeyKind::Private => "PRIVATE",
        }
    }

    /// Opening PEM marker, e.g. `-----BEGIN PUBLIC KEY-----`.
    pub fn begin_marker(&self) -> String {
        format!("-----BEGIN {} KEY-----", self.label())
    }

    /// Closing PEM marker, e.g. `-----END PUBLIC KEY-----`.
    pub fn end_marker(&self) -> String {
        format!("-----END {} KEY-----", self.label())
    }
}

/// Decode key text into raw DER bytes.
///
/// Line separators are removed, then the markers for `kind` if present, then
/// the remainder is decoded as standard padded Base64. The intermediate copy
/// of the text is wiped when dropped.
pub fn decode(text: &str, kind: KeyKind) -> Result<Vec<u8>> {
    let joined: Zeroizing<String> = Zeroizing::new(
        text.chars()
            .filter(|&c| c != '\n' && c != '\r')
            .collect(),
    );

    let mut body = joined.trim();
    body = body.strip_prefix(kind.begin_marker().as_str()).unwrap_or(body);
    body = body.strip_suffix(kind.end_marker().as_str()).unwrap_or(body);

    STANDARD
        .decode(body.trim())
        .map_err(|e| Error::MalformedKeyText(e.to_string()))
}

/// Decode key text given as raw bytes (e.g. a file's contents).
pub fn decode_bytes(source: &[u8], kind: KeyKind) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(source)
        .map_err(|_| Error::MalformedKeyText("key text is not valid UTF-8".to_string()))?;
    decode(text, kind)
}

/// Encode raw key bytes as bare Base64 (no markers, no line breaks).
pub fn encode(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}
