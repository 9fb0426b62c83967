//! Incremental update writer.
//!
//! An incremental update appends new and replacement objects after the
//! original bytes, followed by a cross-reference section covering only those
//! objects and a trailer whose `/Prev` points at the previous cross-reference
//! section (ISO 32000-1:2008, Section 7.5.6). The original bytes are never
//! modified, which keeps any byte range computed over them valid.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Object, ObjectId};

use super::object_serializer::{indirect_header, ObjectSerializer};
use crate::error::{Error, Result};

/// How far back from the end of the file `startxref` is searched for.
const STARTXREF_SEARCH_WINDOW: usize = 1024;

/// Builder for an append-only update section.
#[derive(Debug, Clone)]
pub struct IncrementalUpdate {
    /// Serialized object bodies, keyed by object id
    objects: BTreeMap<ObjectId, Vec<u8>>,
    /// Trailer entries besides `/Size` and `/Prev`
    trailer: Dictionary,
    serializer: ObjectSerializer,
}

/// Result of writing an update: the full file and where each object landed.
#[derive(Debug, Clone)]
pub struct WrittenUpdate {
    /// Original bytes followed by the update section
    pub data: Vec<u8>,
    /// Absolute offset of each written object's body (after `obj\n`)
    pub body_offsets: BTreeMap<ObjectId, usize>,
}

impl IncrementalUpdate {
    /// Start an update whose trailer carries the given entries.
    pub fn new(trailer: Dictionary) -> Self {
        Self {
            objects: BTreeMap::new(),
            trailer,
            serializer: ObjectSerializer::compact(),
        }
    }

    /// Add (or replace) an object.
    pub fn add_object(&mut self, id: ObjectId, obj: &Object) {
        let body = self.serializer.serialize(obj);
        self.objects.insert(id, body);
    }

    /// Add an object whose body was serialized by the caller.
    pub fn add_raw(&mut self, id: ObjectId, body: Vec<u8>) {
        self.objects.insert(id, body);
    }

    /// Append the update to `original`.
    pub fn write(&self, original: &[u8]) -> Result<WrittenUpdate> {
        let prev = find_prev_xref_offset(original)?;

        let mut data = Vec::with_capacity(original.len() + 4096);
        data.extend_from_slice(original);
        if !matches!(data.last(), Some(b'\n') | Some(b'\r')) {
            data.push(b'\n');
        }

        let mut xref_entries: Vec<(ObjectId, usize)> = Vec::with_capacity(self.objects.len());
        let mut body_offsets = BTreeMap::new();

        for (&id, body) in &self.objects {
            let offset = data.len();
            let header = indirect_header(id);
            data.extend_from_slice(header.as_bytes());
            body_offsets.insert(id, offset + header.len());
            data.extend_from_slice(body);
            data.extend_from_slice(b"\nendobj\n");
            xref_entries.push((id, offset));
        }

        // Write each entry as its own subsection
        let xref_offset = data.len();
        data.extend_from_slice(b"xref\n");
        for ((obj_id, gen), offset) in &xref_entries {
            data.extend_from_slice(format!("{} 1\n", obj_id).as_bytes());
            data.extend_from_slice(format!("{:010} {:05} n \n", offset, gen).as_bytes());
        }

        let max_new_id = self.objects.keys().map(|(id, _)| *id).max().unwrap_or(0);
        let previous_size = self
            .trailer
            .get(b"Size")
            .and_then(Object::as_i64)
            .unwrap_or(0);
        let size = previous_size.max(i64::from(max_new_id) + 1);

        let mut trailer = self.trailer.clone();
        trailer.set("Size", Object::Integer(size));
        trailer.set("Prev", Object::Integer(prev as i64));

        data.extend_from_slice(b"trailer\n");
        data.extend_from_slice(&self.serializer.serialize(&Object::Dictionary(trailer)));
        data.extend_from_slice(format!("\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes());

        log::debug!(
            "Appended {} objects after byte {} (xref at {})",
            xref_entries.len(),
            original.len(),
            xref_offset
        );

        Ok(WrittenUpdate { data, body_offsets })
    }
}

/// Find the offset of the last cross-reference section in a PDF.
pub fn find_prev_xref_offset(bytes: &[u8]) -> Result<u64> {
    let search = b"startxref";
    let window_start = bytes.len().saturating_sub(STARTXREF_SEARCH_WINDOW);
    let window = &bytes[window_start..];

    let pos = window
        .windows(search.len())
        .rposition(|w| w == search)
        .ok_or_else(|| Error::DocumentOpenFailure("startxref not found".to_string()))?;

    let offset_str: String = window[pos + search.len()..]
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();

    offset_str
        .parse::<u64>()
        .map_err(|_| Error::DocumentOpenFailure("malformed startxref offset".to_string()))
}
