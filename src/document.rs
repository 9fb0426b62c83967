//! PDF document access for signing and verification.
//!
//! [`PdfDocument`] wraps a parsed PDF together with the exact bytes it was
//! parsed from. It answers three questions for the signer and verifier:
//!
//! - which signature dictionaries the document carries ([`PdfDocument::signatures`])
//! - what the bytes on disk currently are ([`PdfDocument::read_source`])
//! - what the document looks like with a signature slot appended
//!   ([`PdfDocument::prepare_signature`])
//!
//! Parsing is delegated to `lopdf`; writing is an append-only incremental
//! update, so the original bytes are always a prefix of the signed output.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use crate::error::{Error, Result};
use crate::signatures::byterange::{ByteRange, ContentsPlaceholder, BYTE_RANGE_RESERVATION};
use crate::signatures::types::{format_pdf_date, SignatureDescriptor, SignatureInfo};
use crate::writer::{IncrementalUpdate, ObjectSerializer};

/// Widget annotation flags: Print | Locked.
const SIGNATURE_WIDGET_FLAGS: i64 = 132;

/// AcroForm flags: SignaturesExist | AppendOnly.
const SIG_FLAGS: i64 = 3;

/// Maximum nesting of form field `/Kids` searched for signatures.
const MAX_FIELD_DEPTH: usize = 16;

/// Trailer entries carried over into an incremental update.
const TRAILER_KEYS: [&[u8]; 4] = [b"Root", b"Info", b"ID", b"Size"];

/// An open PDF document.
///
/// When opened from a path the file handle is held for the lifetime of the
/// value and released when it is dropped, on every exit path.
///
/// # Example
///
/// ```no_run
/// use pdf_seal::PdfDocument;
///
/// let doc = PdfDocument::open("contract.pdf")?;
/// println!("{} pages, signed: {}", doc.page_count(), doc.is_signed());
/// # Ok::<(), pdf_seal::Error>(())
/// ```
pub struct PdfDocument {
    /// Source path, if opened from a file
    path: Option<PathBuf>,
    /// Open handle on the source file
    file: Option<File>,
    /// Bytes the document was parsed from
    bytes: Vec<u8>,
    /// Parsed object graph
    doc: Document,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("path", &self.path)
            .field("size", &self.bytes.len())
            .field("objects", &self.doc.objects.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentOpenFailure`] if the file cannot be opened or
    /// read, or does not parse as a PDF.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_failure = |e: std::io::Error| {
            Error::DocumentOpenFailure(format!("{}: {}", path.display(), e))
        };

        let mut file = File::open(path).map_err(open_failure)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(open_failure)?;

        let doc = parse(&bytes)?;
        log::debug!(
            "Opened {} ({} bytes, {} objects)",
            path.display(),
            bytes.len(),
            doc.objects.len()
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            file: Some(file),
            bytes,
            doc,
        })
    }

    /// Build a document from in-memory bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let doc = parse(&bytes)?;
        Ok(Self {
            path: None,
            file: None,
            bytes,
            doc,
        })
    }

    /// Whether `path` names a loadable PDF: it has a `.pdf` extension and parses.
    pub fn probe(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let has_pdf_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        has_pdf_extension && Self::open(path).is_ok()
    }

    /// Source path, if opened from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The bytes the document was parsed from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Read the document's bytes again from their source.
    ///
    /// For file-backed documents this reads through the held file handle, so
    /// the result reflects what is on disk now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentReadFailure`] if the file cannot be read.
    pub fn read_source(&self) -> Result<Vec<u8>> {
        match &self.file {
            Some(file) => {
                let mut reader: &File = file;
                reader
                    .seek(SeekFrom::Start(0))
                    .map_err(Error::DocumentReadFailure)?;
                let mut data = Vec::with_capacity(self.bytes.len());
                reader
                    .read_to_end(&mut data)
                    .map_err(Error::DocumentReadFailure)?;
                Ok(data)
            },
            None => Ok(self.bytes.clone()),
        }
    }

    /// All signature dictionaries holding a value, in discovery order.
    ///
    /// Signature fields reachable from the AcroForm come first, in field
    /// order; any other `/Type /Sig` dictionaries follow.
    pub fn signatures(&self) -> Vec<SignatureInfo> {
        let mut scan = SignatureScan::new(&self.doc);

        if let Some(fields) = self.acroform_fields() {
            for field in fields {
                scan.visit_field(field, None, false, 0);
            }
        }

        for (&id, obj) in &self.doc.objects {
            if let Object::Dictionary(dict) = obj {
                if has_name(dict, b"Type", b"Sig") && dict.has(b"Contents") {
                    scan.push(Some(id), None, dict);
                }
            }
        }

        scan.found
    }

    /// The first signature dictionary, if any.
    pub fn first_signature(&self) -> Option<SignatureInfo> {
        self.signatures().into_iter().next()
    }

    /// Whether the document already carries a signature.
    pub fn is_signed(&self) -> bool {
        !self.signatures().is_empty()
    }

    /// Append a signature slot to the document.
    ///
    /// The returned slot holds the complete new file: the original bytes
    /// followed by an incremental update adding the signature dictionary (with
    /// a zeroed `/Contents` placeholder and final `/ByteRange`), a signature
    /// field widget on the first page, and the updated AcroForm.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadySigned`] if the document carries a signature
    /// - [`Error::DocumentOpenFailure`] if the document is encrypted or its
    ///   structure (catalog, pages) is unusable
    pub fn prepare_signature(
        &self,
        descriptor: &SignatureDescriptor,
        placeholder: ContentsPlaceholder,
        signing_time: &DateTime<Utc>,
    ) -> Result<SignatureSlot> {
        if self.is_signed() {
            return Err(Error::AlreadySigned);
        }
        if self.doc.trailer.has(b"Encrypt") {
            return Err(structure_error("encrypted documents can't be signed"));
        }

        let doc = &self.doc;
        let catalog_id = doc
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|_| structure_error("trailer has no /Root reference"))?;
        let mut catalog = doc
            .get_dictionary(catalog_id)
            .map_err(|_| structure_error("catalog is not a dictionary"))?
            .clone();
        let page_id = doc
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or_else(|| structure_error("document has no pages"))?;

        let base_id = self.max_object_id();
        let sig_id: ObjectId = (base_id + 1, 0);
        let field_id: ObjectId = (base_id + 2, 0);
        let new_acroform_id: ObjectId = (base_id + 3, 0);

        let mut update = IncrementalUpdate::new(self.trailer_entries());
        let field_ref = Object::Reference(field_id);

        let field_count = match catalog.get(b"AcroForm").ok().cloned() {
            Some(Object::Reference(acroform_id)) => {
                let mut acroform = doc
                    .get_dictionary(acroform_id)
                    .map_err(|_| structure_error("/AcroForm is not a dictionary"))?
                    .clone();
                let count = self.append_field(&mut acroform, field_ref);
                update.add_object(acroform_id, &Object::Dictionary(acroform));
                count
            },
            Some(Object::Dictionary(mut acroform)) => {
                let count = self.append_field(&mut acroform, field_ref);
                catalog.set("AcroForm", Object::Dictionary(acroform));
                update.add_object(catalog_id, &Object::Dictionary(catalog));
                count
            },
            _ => {
                let mut acroform = Dictionary::new();
                let count = self.append_field(&mut acroform, field_ref);
                update.add_object(new_acroform_id, &Object::Dictionary(acroform));
                catalog.set("AcroForm", Object::Reference(new_acroform_id));
                update.add_object(catalog_id, &Object::Dictionary(catalog));
                count
            },
        };

        let mut field = Dictionary::new();
        field.set("Type", Object::Name(b"Annot".to_vec()));
        field.set("Subtype", Object::Name(b"Widget".to_vec()));
        field.set("FT", Object::Name(b"Sig".to_vec()));
        field.set("T", text_object(&format!("Signature{}", field_count)));
        field.set("V", Object::Reference(sig_id));
        field.set("Rect", Object::Array(vec![Object::Integer(0); 4]));
        field.set("F", Object::Integer(SIGNATURE_WIDGET_FLAGS));
        field.set("P", Object::Reference(page_id));
        update.add_object(field_id, &Object::Dictionary(field));

        self.add_page_annotation(&mut update, page_id, field_id)?;

        let body = SignatureBody::build(descriptor, placeholder, signing_time);
        update.add_raw(sig_id, body.bytes);

        let written = update.write(&self.bytes)?;
        let body_offset = written
            .body_offsets
            .get(&sig_id)
            .copied()
            .ok_or_else(|| Error::InvalidOperation("signature object was not written".to_string()))?;

        let contents_offset = body_offset + body.contents_pos;
        let byte_range_offset = body_offset + body.byte_range_pos;

        let mut data = written.data;
        let byte_range = ByteRange::around(
            contents_offset..contents_offset + placeholder.placeholder_size(),
            data.len(),
        );
        let padded = byte_range.to_padded_string(BYTE_RANGE_RESERVATION.len())?;
        data[byte_range_offset..byte_range_offset + padded.len()].copy_from_slice(padded.as_bytes());

        log::debug!(
            "Reserved signature slot {} {} R, ByteRange {}",
            sig_id.0,
            sig_id.1,
            byte_range
        );

        Ok(SignatureSlot {
            data,
            byte_range,
            contents_offset,
            placeholder,
        })
    }

    /// Entries of the AcroForm `/Fields` array.
    fn acroform_fields(&self) -> Option<&Vec<Object>> {
        let catalog = self.doc.catalog().ok()?;
        let acroform = self.resolve(catalog.get(b"AcroForm").ok()?)?.as_dict().ok()?;
        self.resolve(acroform.get(b"Fields").ok()?)?.as_array().ok()
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        self.doc.dereference(obj).ok().map(|(_, resolved)| resolved)
    }

    /// Append `field` to the AcroForm's `/Fields`; returns the new field count.
    fn append_field(&self, acroform: &mut Dictionary, field: Object) -> usize {
        let mut fields = acroform
            .get(b"Fields")
            .ok()
            .and_then(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_array().ok())
            .cloned()
            .unwrap_or_default();

        fields.push(field);
        let count = fields.len();
        acroform.set("Fields", Object::Array(fields));
        acroform.set("SigFlags", Object::Integer(SIG_FLAGS));
        count
    }

    /// Add the widget to the page's `/Annots`, rewriting whichever object holds it.
    fn add_page_annotation(
        &self,
        update: &mut IncrementalUpdate,
        page_id: ObjectId,
        field_id: ObjectId,
    ) -> Result<()> {
        let page = self
            .doc
            .get_dictionary(page_id)
            .map_err(|_| structure_error("page is not a dictionary"))?;

        match page.get(b"Annots") {
            Ok(Object::Reference(annots_id)) => {
                let mut annots = self
                    .doc
                    .get_object(*annots_id)
                    .and_then(Object::as_array)
                    .cloned()
                    .unwrap_or_default();
                annots.push(Object::Reference(field_id));
                update.add_object(*annots_id, &Object::Array(annots));
            },
            existing => {
                let mut annots = match existing {
                    Ok(Object::Array(annots)) => annots.clone(),
                    _ => Vec::new(),
                };
                annots.push(Object::Reference(field_id));

                let mut page = page.clone();
                page.set("Annots", Object::Array(annots));
                update.add_object(page_id, &Object::Dictionary(page));
            },
        }
        Ok(())
    }

    fn trailer_entries(&self) -> Dictionary {
        let mut trailer = Dictionary::new();
        for key in TRAILER_KEYS {
            if let Ok(value) = self.doc.trailer.get(key) {
                trailer.set(key.to_vec(), value.clone());
            }
        }
        trailer
    }

    /// Highest object number in use, by object table, `max_id` or `/Size`.
    fn max_object_id(&self) -> u32 {
        let from_objects = self.doc.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
        let from_size = self
            .doc
            .trailer
            .get(b"Size")
            .and_then(Object::as_i64)
            .map(|size| u32::try_from(size.saturating_sub(1)).unwrap_or(0))
            .unwrap_or(0);

        from_objects.max(self.doc.max_id).max(from_size)
    }
}

impl PdfDocument {
    /// Release the held file handle. Later reads use the parsed bytes.
    fn close(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            if let Some(path) = &self.path {
                log::debug!("Closed {}", path.display());
            }
        }
    }
}

impl Drop for PdfDocument {
    fn drop(&mut self) {
        self.close();
    }
}

/// A document with a signature slot appended, awaiting its signature value.
pub struct SignatureSlot {
    data: Vec<u8>,
    byte_range: ByteRange,
    contents_offset: usize,
    placeholder: ContentsPlaceholder,
}

impl SignatureSlot {
    /// The byte range the signature will cover.
    pub fn byte_range(&self) -> ByteRange {
        self.byte_range
    }

    /// Offset of the `<` opening the `/Contents` placeholder.
    pub fn contents_offset(&self) -> usize {
        self.contents_offset
    }

    /// The prepared file, placeholder still zeroed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The bytes the signature must cover.
    pub fn signed_content(&self) -> Result<Vec<u8>> {
        self.byte_range.extract(&self.data)
    }

    /// Embed the signature value, returning the finished file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureTooLarge`] if the signature exceeds the
    /// placeholder capacity.
    pub fn fill(mut self, signature: &[u8]) -> Result<Vec<u8>> {
        self.placeholder
            .insert_signature(&mut self.data, self.contents_offset, signature)?;
        Ok(self.data)
    }
}

impl std::fmt::Debug for SignatureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSlot")
            .field("size", &self.data.len())
            .field("byte_range", &self.byte_range)
            .field("contents_offset", &self.contents_offset)
            .field("capacity", &self.placeholder.capacity())
            .finish()
    }
}

/// Serialized signature dictionary with the positions of its reserved values.
struct SignatureBody {
    bytes: Vec<u8>,
    contents_pos: usize,
    byte_range_pos: usize,
}

impl SignatureBody {
    /// Lay out `/Contents` and `/ByteRange` first so their positions are known.
    fn build(
        descriptor: &SignatureDescriptor,
        placeholder: ContentsPlaceholder,
        signing_time: &DateTime<Utc>,
    ) -> Self {
        let mut entries = Dictionary::new();
        entries.set("Type", Object::Name(b"Sig".to_vec()));
        entries.set("Filter", Object::Name(descriptor.filter.as_bytes().to_vec()));
        entries.set("SubFilter", Object::Name(descriptor.sub_filter.as_bytes().to_vec()));
        entries.set("Name", text_object(&descriptor.name));
        if let Some(reason) = &descriptor.reason {
            entries.set("Reason", text_object(reason));
        }
        if let Some(location) = &descriptor.location {
            entries.set("Location", text_object(location));
        }
        if let Some(contact_info) = &descriptor.contact_info {
            entries.set("ContactInfo", text_object(contact_info));
        }
        entries.set("M", text_object(&format_pdf_date(signing_time)));

        let mut bytes = b"<</Contents ".to_vec();
        let contents_pos = bytes.len();
        bytes.extend_from_slice(placeholder.generate().as_bytes());
        bytes.extend_from_slice(b" /ByteRange ");
        let byte_range_pos = bytes.len();
        bytes.extend_from_slice(BYTE_RANGE_RESERVATION.as_bytes());
        ObjectSerializer::compact().write_entries(&mut bytes, &entries);
        bytes.extend_from_slice(b">>");

        Self {
            bytes,
            contents_pos,
            byte_range_pos,
        }
    }
}

/// Walk over form fields collecting filled signature fields.
struct SignatureScan<'a> {
    doc: &'a Document,
    visited_fields: HashSet<ObjectId>,
    seen_signatures: HashSet<ObjectId>,
    found: Vec<SignatureInfo>,
}

impl<'a> SignatureScan<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            visited_fields: HashSet::new(),
            seen_signatures: HashSet::new(),
            found: Vec::new(),
        }
    }

    fn visit_field(
        &mut self,
        obj: &'a Object,
        parent_name: Option<&str>,
        inherited_sig: bool,
        depth: usize,
    ) {
        if depth > MAX_FIELD_DEPTH {
            return;
        }
        let doc = self.doc;
        let Ok((id, Object::Dictionary(field))) = doc.dereference(obj) else {
            return;
        };
        if let Some(id) = id {
            if !self.visited_fields.insert(id) {
                return;
            }
        }

        let partial = text_entry(field, b"T");
        let name = match (parent_name, partial) {
            (Some(parent), Some(partial)) => Some(format!("{}.{}", parent, partial)),
            (None, Some(partial)) => Some(partial),
            (parent, None) => parent.map(str::to_string),
        };

        // /FT is inheritable
        let is_sig = match field.get(b"FT") {
            Ok(Object::Name(ft)) => ft == b"Sig",
            _ => inherited_sig,
        };

        if is_sig {
            if let Ok(value) = field.get(b"V") {
                if let Ok((sig_id, Object::Dictionary(sig))) = doc.dereference(value) {
                    self.push(sig_id, name.clone(), sig);
                }
            }
        }

        let kids = field
            .get(b"Kids")
            .and_then(|kids| doc.dereference(kids))
            .and_then(|(_, kids)| kids.as_array());
        if let Ok(kids) = kids {
            for kid in kids {
                self.visit_field(kid, name.as_deref(), is_sig, depth + 1);
            }
        }
    }

    fn push(&mut self, id: Option<ObjectId>, field_name: Option<String>, dict: &Dictionary) {
        if let Some(id) = id {
            if !self.seen_signatures.insert(id) {
                return;
            }
        }
        self.found.push(signature_info(id, field_name, dict));
    }
}

fn signature_info(id: Option<ObjectId>, field_name: Option<String>, dict: &Dictionary) -> SignatureInfo {
    let byte_range = match dict.get(b"ByteRange") {
        Ok(Object::Array(values)) => values
            .iter()
            .map(|v| v.as_i64().ok())
            .collect::<Option<Vec<i64>>>()
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let contents = match dict.get(b"Contents") {
        Ok(Object::String(bytes, _)) => bytes.clone(),
        _ => Vec::new(),
    };

    SignatureInfo {
        object_id: id,
        field_name,
        signer_name: text_entry(dict, b"Name"),
        signing_time: text_entry(dict, b"M"),
        reason: text_entry(dict, b"Reason"),
        location: text_entry(dict, b"Location"),
        contact_info: text_entry(dict, b"ContactInfo"),
        filter: name_entry(dict, b"Filter"),
        sub_filter: name_entry(dict, b"SubFilter"),
        byte_range,
        contents,
    }
}

fn parse(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| Error::DocumentOpenFailure(e.to_string()))
}

fn structure_error(msg: &str) -> Error {
    Error::DocumentOpenFailure(msg.to_string())
}

fn has_name(dict: &Dictionary, key: &[u8], expected: &[u8]) -> bool {
    matches!(dict.get(key), Ok(Object::Name(name)) if name == expected)
}

fn name_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).to_string()),
        _ => None,
    }
}

fn text_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else single-byte.
fn decode_text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        },
        None => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode a PDF text string: ASCII as a literal, anything else as UTF-16BE.
fn text_object(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_text_string_round_trip() {
        for text in ["Plain ASCII", "Grüße aus Köln", "署名"] {
            let Object::String(bytes, _) = text_object(text) else {
                panic!("expected string object");
            };
            assert_eq!(decode_text_string(&bytes), text);
        }
    }

    #[test]
    fn test_signature_info_from_dictionary() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Sig".to_vec()));
        dict.set("Filter", Object::Name(b"Adobe.PPKLite".to_vec()));
        dict.set("SubFilter", Object::Name(b"adbe.pkcs7.detached".to_vec()));
        dict.set("Name", text_object("Test Signer"));
        dict.set("Reason", text_object("Testing"));
        dict.set(
            "ByteRange",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(100),
                Object::Integer(200),
                Object::Integer(50),
            ]),
        );
        dict.set("Contents", Object::String(vec![1, 2, 3], StringFormat::Hexadecimal));

        let info = signature_info(Some((9, 0)), Some("Sig1".to_string()), &dict);

        assert_eq!(info.object_id, Some((9, 0)));
        assert_eq!(info.field_name.as_deref(), Some("Sig1"));
        assert_eq!(info.signer_name.as_deref(), Some("Test Signer"));
        assert_eq!(info.reason.as_deref(), Some("Testing"));
        assert_eq!(info.filter.as_deref(), Some("Adobe.PPKLite"));
        assert_eq!(info.sub_filter.as_deref(), Some("adbe.pkcs7.detached"));
        assert_eq!(info.byte_range, vec![0, 100, 200, 50]);
        assert_eq!(info.contents, vec![1, 2, 3]);
    }

    #[test]
    fn test_byte_range_with_non_integers_is_dropped() {
        let mut dict = Dictionary::new();
        dict.set(
            "ByteRange",
            Object::Array(vec![Object::Integer(0), Object::Real(1.5), Object::Integer(2)]),
        );
        assert!(signature_info(None, None, &dict).byte_range.is_empty());
    }

    #[test]
    fn test_signature_body_layout() {
        let descriptor = SignatureDescriptor::new("SIG TEST").with_reason("Because (really)");
        let placeholder = ContentsPlaceholder::new(8);
        let time = Utc::now();
        let body = SignatureBody::build(&descriptor, placeholder, &time);

        let placeholder_text = placeholder.generate();
        assert_eq!(
            &body.bytes[body.contents_pos..body.contents_pos + placeholder_text.len()],
            placeholder_text.as_bytes()
        );
        assert_eq!(
            &body.bytes[body.byte_range_pos..body.byte_range_pos + BYTE_RANGE_RESERVATION.len()],
            BYTE_RANGE_RESERVATION.as_bytes()
        );

        let text = String::from_utf8_lossy(&body.bytes).to_string();
        assert!(text.starts_with("<</Contents <"));
        assert!(text.contains("/Filter /Adobe.PPKLite"));
        assert!(text.contains("/SubFilter /adbe.pkcs7.detached"));
        assert!(text.contains("/Name (SIG TEST)"));
        assert!(text.contains("/Reason (Because \\(really\\))"));
        assert!(text.contains("/M (D:"));
        assert!(text.ends_with(">>"));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = PdfDocument::from_bytes(b"definitely not a pdf".to_vec());
        assert!(matches!(result, Err(Error::DocumentOpenFailure(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = PdfDocument::open("/nonexistent/pdf_seal/input.pdf");
        assert!(matches!(result, Err(Error::DocumentOpenFailure(_))));
    }

    fn saved_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.add_object(lopdf::dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(lopdf::dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_close_releases_file_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, saved_pdf()).unwrap();

        let mut doc = PdfDocument::open(&path).unwrap();
        assert!(doc.file.is_some());
        assert_eq!(doc.read_source().unwrap(), doc.bytes);

        doc.close();
        assert!(doc.file.is_none());
        assert_eq!(doc.read_source().unwrap(), doc.bytes);

        // Second close (from Drop) is a no-op
        doc.close();
        drop(doc);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_probe_requires_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"%PDF-1.4\n").unwrap();
        assert!(!PdfDocument::probe(&path));
        assert!(!PdfDocument::probe(dir.path().join("missing.pdf")));
    }
}
