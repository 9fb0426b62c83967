//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pdf_seal::keys::{generate_key_pair, KeyPair};

/// Text drawn on the fixture page.
pub const PAGE_TEXT: &str = "Hello World";

/// Assemble a PDF from numbered object bodies with a correct xref table.
///
/// `objects[0]` becomes object 1 and must be the catalog.
pub fn build_pdf(objects: &[String]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn page_objects(catalog_extra: &str) -> Vec<String> {
    let content = format!("BT /F1 24 Tf 72 720 Td ({}) Tj ET", PAGE_TEXT);
    vec![
        format!("<< /Type /Catalog /Pages 2 0 R{} >>", catalog_extra),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ]
}

/// One-page document drawing [`PAGE_TEXT`].
pub fn minimal_pdf() -> Vec<u8> {
    build_pdf(&page_objects(""))
}

/// One-page document whose catalog carries an inline, empty AcroForm.
pub fn pdf_with_inline_acroform() -> Vec<u8> {
    build_pdf(&page_objects(" /AcroForm << /Fields [] >>"))
}

/// One-page document whose AcroForm is an indirect object holding a text field.
pub fn pdf_with_referenced_acroform() -> Vec<u8> {
    let mut objects = page_objects(" /AcroForm 6 0 R");
    objects.push("<< /Fields [7 0 R] >>".to_string());
    objects.push("<< /FT /Tx /T (Comment) /V (none) >>".to_string());
    build_pdf(&objects)
}

/// One-page document carrying a hand-written signature dictionary.
///
/// `byte_range` is the text inside `[...]`, `contents_hex` the text inside `<...>`.
pub fn pdf_with_signature(byte_range: &str, contents_hex: &str) -> Vec<u8> {
    let mut objects = page_objects("");
    objects.push(format!(
        "<< /Type /Sig /Filter /Adobe.PPKLite /SubFilter /adbe.pkcs7.detached \
         /ByteRange [{}] /Contents <{}> >>",
        byte_range, contents_hex
    ));
    build_pdf(&objects)
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Small key pair; large enough for a SHA-256 DigestInfo, fast to generate.
pub fn test_key_pair() -> KeyPair {
    generate_key_pair(1024).unwrap()
}

/// Position of the first occurrence of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
