//! PDF object serialization.
//!
//! Serializes `lopdf` objects to their byte representation according to
//! PDF specification ISO 32000-1:2008, Section 7.3.

use lopdf::{Dictionary, Object, ObjectId, StringFormat};

/// Serializer for PDF objects.
///
/// Converts PDF objects to their byte representation following
/// the PDF specification syntax rules. Output uses minimal whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a compact serializer (minimal whitespace).
    pub fn compact() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj);
        buf
    }

    /// Write the entries of a dictionary without the enclosing `<<` `>>`.
    ///
    /// Used when part of a dictionary has to be laid out by hand.
    pub fn write_entries(&self, out: &mut Vec<u8>, dict: &Dictionary) {
        // Sort keys for deterministic output
        let mut entries: Vec<(&Vec<u8>, &Object)> = dict.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in entries {
            out.push(b' ');
            self.write_name(out, key);
            out.push(b' ');
            self.write_object(out, value);
        }
    }

    /// Write an object to a buffer.
    fn write_object(&self, out: &mut Vec<u8>, obj: &Object) {
        match obj {
            Object::Null => out.extend_from_slice(b"null"),
            Object::Boolean(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => out.extend_from_slice(i.to_string().as_bytes()),
            Object::Real(r) => self.write_real(out, f64::from(*r)),
            Object::Name(n) => self.write_name(out, n),
            Object::String(s, format) => self.write_string(out, s, *format),
            Object::Array(arr) => self.write_array(out, arr),
            Object::Dictionary(dict) => self.write_dictionary(out, dict),
            Object::Stream(stream) => self.write_stream(out, &stream.dict, &stream.content),
            Object::Reference((id, gen)) => {
                out.extend_from_slice(format!("{} {} R", id, gen).as_bytes())
            },
        }
    }

    /// Write a real number with appropriate precision.
    fn write_real(&self, out: &mut Vec<u8>, value: f64) {
        // Remove trailing zeros for compact output
        let formatted = if value.fract() == 0.0 {
            format!("{}", value as i64)
        } else {
            let formatted = format!("{:.5}", value);
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        };
        out.extend_from_slice(formatted.as_bytes());
    }

    /// Write a PDF string.
    ///
    /// Hexadecimal strings keep their form. Literal strings use `(...)` with
    /// escaping when printable, hex syntax `<...>` otherwise.
    fn write_string(&self, out: &mut Vec<u8>, data: &[u8], format: StringFormat) {
        let is_printable = data
            .iter()
            .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..=0x7E).contains(&b));

        if matches!(format, StringFormat::Literal) && is_printable {
            out.push(b'(');
            for &byte in data {
                match byte {
                    b'(' => out.extend_from_slice(b"\\("),
                    b')' => out.extend_from_slice(b"\\)"),
                    b'\\' => out.extend_from_slice(b"\\\\"),
                    b'\n' => out.extend_from_slice(b"\\n"),
                    b'\r' => out.extend_from_slice(b"\\r"),
                    b'\t' => out.extend_from_slice(b"\\t"),
                    _ => out.push(byte),
                }
            }
            out.push(b')');
        } else {
            out.push(b'<');
            out.extend_from_slice(hex_upper(data).as_bytes());
            out.push(b'>');
        }
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape special characters with `#xx`.
    fn write_name(&self, out: &mut Vec<u8>, name: &[u8]) {
        out.push(b'/');
        for &byte in name {
            match byte {
                // Regular characters (no escaping needed)
                b'!'
                | b'"'
                | b'$'
                | b'&'
                | b'\''
                | b'*'..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'='
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'\\'
                | b'^'..=b'z'
                | b'|'
                | b'~' => out.push(byte),
                // Delimiters, whitespace and '#'
                _ => out.extend_from_slice(format!("#{:02X}", byte).as_bytes()),
            }
        }
    }

    /// Write a PDF array.
    fn write_array(&self, out: &mut Vec<u8>, arr: &[Object]) {
        out.push(b'[');
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            self.write_object(out, obj);
        }
        out.push(b']');
    }

    /// Write a PDF dictionary.
    fn write_dictionary(&self, out: &mut Vec<u8>, dict: &Dictionary) {
        out.extend_from_slice(b"<<");
        self.write_entries(out, dict);
        out.extend_from_slice(b">>");
    }

    /// Write a PDF stream.
    fn write_stream(&self, out: &mut Vec<u8>, dict: &Dictionary, data: &[u8]) {
        let mut dict_with_length = dict.clone();
        dict_with_length.set("Length", Object::Integer(data.len() as i64));

        self.write_dictionary(out, &dict_with_length);
        out.extend_from_slice(b"\nstream\n");
        out.extend_from_slice(data);
        out.extend_from_slice(b"\nendstream");
    }
}

/// The `{id} {gen} obj\n` line opening an indirect object.
pub fn indirect_header(id: ObjectId) -> String {
    format!("{} {} obj\n", id.0, id.1)
}

/// Convert bytes to an uppercase hex string.
pub fn hex_upper(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8] = b"0123456789ABCDEF";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        hex.push(HEX_CHARS[(byte >> 4) as usize] as char);
        hex.push(HEX_CHARS[(byte & 0x0F) as usize] as char);
    }
    hex
}
