//! Symbol table record decoder
//!
//! A listing response is a run of back-to-back variable-length entries:
//!
//! ```text
//! u32  instance_id     increasing but not contiguous
//! u16  symbol_type     type/attribute bits
//! u16  element_length  bytes per array element
//! u32  array_dims[3]   array dimensions
//! u16  name_length     byte count of the name
//! u8   name[name_length]
//! ```
//!
//! All integers are little-endian. The buffer comes from the device and is
//! untrusted: a declared name length is clamped to the bytes actually
//! present and no read ever goes past the end of the buffer.

use crate::symbol::SymbolRecord;
use bytes::Buf;
use std::iter::FusedIterator;

/// Fixed-size part of a symbol entry preceding the name bytes
pub const SYMBOL_HEADER_LENGTH: usize = 4 + 2 + 2 + 4 * 3 + 2;

/// Decode a listing response buffer into symbol records
pub fn decode(buffer: &[u8]) -> SymbolDecoder<'_> {
    SymbolDecoder::new(buffer)
}

/// Lazy iterator over the symbol records of one listing response
///
/// The sequence ends at the end of the buffer, when less than a full header
/// remains, or right after a record whose name had to be clamped. Once
/// ended it stays ended.
#[derive(Debug, Clone)]
pub struct SymbolDecoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    done: bool,
    truncated: bool,
}

impl<'a> SymbolDecoder<'a> {
    /// Create a decoder positioned at the start of `buffer`
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            done: buffer.is_empty(),
            truncated: false,
        }
    }

    /// Current cursor position in the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the sequence ended on a partial header or a clamped name
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn finish_truncated(&mut self, reason: &str) {
        log::debug!(
            "Symbol listing ends with a truncated record at offset {} of {}: {}",
            self.offset,
            self.buffer.len(),
            reason
        );
        self.truncated = true;
        self.done = true;
    }
}

impl Iterator for SymbolDecoder<'_> {
    type Item = SymbolRecord;

    fn next(&mut self) -> Option<SymbolRecord> {
        if self.done {
            return None;
        }

        let mut rest = &self.buffer[self.offset..];
        if rest.len() < SYMBOL_HEADER_LENGTH {
            self.finish_truncated("partial header");
            return None;
        }

        let instance_id = rest.get_u32_le();
        let symbol_type = rest.get_u16_le();
        let element_length = rest.get_u16_le();
        let array_dims = [rest.get_u32_le(), rest.get_u32_le(), rest.get_u32_le()];
        let declared = rest.get_u16_le() as usize;

        let name_length = declared.min(rest.remaining());
        let name = String::from_utf8_lossy(&rest[..name_length]).into_owned();
        let record_start = self.offset;
        self.offset += SYMBOL_HEADER_LENGTH + name_length;

        if name_length < declared {
            self.finish_truncated(&format!(
                "name of record at offset {} declares {} bytes, {} available",
                record_start, declared, name_length
            ));
        } else if self.offset >= self.buffer.len() {
            self.done = true;
        }

        Some(SymbolRecord {
            instance_id,
            symbol_type,
            element_length,
            array_dims,
            name,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.buffer.len() - self.offset;
        (0, Some(remaining / SYMBOL_HEADER_LENGTH))
    }
}

impl FusedIterator for SymbolDecoder<'_> {}
