//! ByteRange handling for PDF signatures.
//!
//! PDF digital signatures use a ByteRange array to specify which portions
//! of the document are covered by the signature. The signature itself is
//! stored in a placeholder that is excluded from the signed bytes.
//!
//! ## ByteRange Format
//!
//! The ByteRange is an array of four integers:
//! `[offset1, length1, offset2, length2]`
//!
//! Where:
//! - `offset1` = 0 (start of file)
//! - `length1` = byte offset where the signature value begins
//! - `offset2` = byte offset where the signature value ends
//! - `length2` = remaining bytes to end of file
//!
//! The signature value is a hex-encoded string within `<` and `>` delimiters.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::writer::hex_upper;

/// Fixed-width `/ByteRange` written before offsets are known.
///
/// Overwritten in place by [`ByteRange::to_padded_string`] of the same width.
pub const BYTE_RANGE_RESERVATION: &str = "[0 0000000000 0000000000 0000000000]";

/// The two signed extents of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    values: [i64; 4],
    gap_start: usize,
    gap_end: usize,
    end: usize,
}

impl ByteRange {
    /// Build the range that excludes `gap` from a file of `file_size` bytes.
    pub fn around(gap: Range<usize>, file_size: usize) -> Self {
        let end = file_size.max(gap.end);
        Self {
            values: [0, gap.start as i64, gap.end as i64, (end - gap.end) as i64],
            gap_start: gap.start,
            gap_end: gap.end,
            end,
        }
    }

    /// Parse raw `/ByteRange` values.
    ///
    /// Requires exactly four non-negative integers, a first range starting at
    /// 0, a second range starting after the first one ends, and an end offset
    /// that fits in memory.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        let values: [i64; 4] = values.try_into().map_err(|_| {
            Error::VerificationFailure(format!(
                "ByteRange must have 4 elements, got {}",
                values.len()
            ))
        })?;

        if values.iter().any(|&v| v < 0) {
            return Err(Error::VerificationFailure(format!(
                "ByteRange has negative values: {:?}",
                values
            )));
        }
        if values[0] != 0 {
            return Err(Error::VerificationFailure(format!(
                "ByteRange must start at 0, got {}",
                values[0]
            )));
        }
        if values[1] > values[2] {
            return Err(Error::VerificationFailure(format!(
                "ByteRange first range ({}) overlaps with second range start ({})",
                values[1], values[2]
            )));
        }

        let out_of_range =
            || Error::VerificationFailure(format!("ByteRange {:?} is out of range", values));
        let offset = |v: i64| usize::try_from(v).map_err(|_| out_of_range());

        let end = values[2].checked_add(values[3]).ok_or_else(out_of_range)?;

        Ok(Self {
            values,
            gap_start: offset(values[1])?,
            gap_end: offset(values[2])?,
            end: offset(end)?,
        })
    }

    /// The raw `[offset1, length1, offset2, length2]` values.
    pub fn values(&self) -> [i64; 4] {
        self.values
    }

    /// Byte span excluded from signing (the `/Contents` value).
    pub fn gap(&self) -> Range<usize> {
        self.gap_start..self.gap_end
    }

    /// Offset one past the last signed byte.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Total number of signed bytes.
    pub fn signed_len(&self) -> usize {
        self.gap_start + (self.end - self.gap_end)
    }

    /// Check that both ranges lie inside a file of `file_size` bytes.
    pub fn validate(&self, file_size: usize) -> Result<()> {
        if self.end() > file_size {
            return Err(Error::VerificationFailure(format!(
                "ByteRange second range exceeds file size: {} > {}",
                self.end(),
                file_size
            )));
        }
        Ok(())
    }

    /// Whether the second range ends exactly at the end of the file.
    pub fn covers_whole_file(&self, file_size: usize) -> bool {
        self.end() == file_size
    }

    /// Extract the bytes covered by this range.
    pub fn extract(&self, pdf_data: &[u8]) -> Result<Vec<u8>> {
        self.validate(pdf_data.len())?;

        let gap = self.gap();
        let mut signed_bytes = Vec::with_capacity(self.signed_len());
        signed_bytes.extend_from_slice(&pdf_data[..gap.start]);
        signed_bytes.extend_from_slice(&pdf_data[gap.end..self.end()]);
        Ok(signed_bytes)
    }

    /// Format as a PDF array, padded with spaces to `width` characters.
    pub fn to_padded_string(&self, width: usize) -> Result<String> {
        let formatted = self.to_string();
        if formatted.len() > width {
            return Err(Error::InvalidOperation(format!(
                "ByteRange {} does not fit its {}-byte reservation",
                formatted, width
            )));
        }
        Ok(format!("{:<width$}", formatted, width = width))
    }
}

impl std::fmt::Display for ByteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.values;
        write!(f, "[{} {} {} {}]", a, b, c, d)
    }
}

/// The zero-filled `/Contents` hex string reserved for a signature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentsPlaceholder {
    /// Raw byte capacity of the signature value
    capacity: usize,
}

impl ContentsPlaceholder {
    /// Create a placeholder able to hold `capacity` raw signature bytes.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Raw byte capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size in the file: each byte becomes 2 hex characters, plus `<` and `>`.
    pub fn placeholder_size(&self) -> usize {
        self.capacity * 2 + 2
    }

    /// The placeholder text, `<000...000>`.
    pub fn generate(&self) -> String {
        format!("<{}>", "0".repeat(self.capacity * 2))
    }

    /// Overwrite the placeholder at `contents_offset` with `signature`.
    ///
    /// The signature is hex-encoded and right-padded with `0` to fill the
    /// placeholder.
    pub fn insert_signature(
        &self,
        pdf_data: &mut [u8],
        contents_offset: usize,
        signature: &[u8],
    ) -> Result<()> {
        if signature.len() > self.capacity {
            return Err(Error::SignatureTooLarge {
                size: signature.len(),
                capacity: self.capacity,
            });
        }

        let end = contents_offset + self.placeholder_size();
        if end > pdf_data.len() {
            return Err(Error::InvalidOperation(
                "Signature insertion would exceed file bounds".to_string(),
            ));
        }

        let mut sig_value = String::with_capacity(self.placeholder_size());
        sig_value.push('<');
        sig_value.push_str(&hex_upper(signature));
        let padding_needed = (self.capacity - signature.len()) * 2;
        sig_value.extend(std::iter::repeat('0').take(padding_needed));
        sig_value.push('>');

        pdf_data[contents_offset..end].copy_from_slice(sig_value.as_bytes());
        Ok(())
    }
}
