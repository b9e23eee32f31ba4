//! Bit packing of encoded text
//!
//! Codes are concatenated in text order and written most significant bit
//! first. A final partial byte is padded with zero bits.

use crate::codes::CodeTable;
use crate::error::{CompressError, MissingCode, Result};
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use std::io::Write;

/// Packed payload plus what a decoder needs to stop at the right place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub bytes: Vec<u8>,
    /// Number of meaningful bits; the rest of the last byte is padding.
    pub bit_length: u64,
    pub symbol_count: u64,
}

/// Counters returned by [`encode_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    pub bit_length: u64,
    pub symbol_count: u64,
    pub bytes_written: u64,
}

/// Encode `text` into a fresh byte vector.
pub fn encode(text: &str, codes: &CodeTable) -> Result<EncodedText> {
    let mut bytes = Vec::new();
    let summary = encode_to(text, codes, &mut bytes)?;
    Ok(EncodedText {
        bytes,
        bit_length: summary.bit_length,
        symbol_count: summary.symbol_count,
    })
}

/// Encode `text` into any byte sink.
///
/// Fails with [`MissingCode::Symbol`] if the table lacks one of the text's
/// symbols. Bytes already handed to the sink are not rolled back.
pub fn encode_to<W: Write>(text: &str, codes: &CodeTable, sink: W) -> Result<PackSummary> {
    let mut writer = BitWriter::endian(sink, BigEndian);
    let mut bit_length = 0u64;
    let mut symbol_count = 0u64;

    for c in text.chars() {
        let code = codes
            .get(c)
            .ok_or(CompressError::MissingCode(MissingCode::Symbol(c)))?;
        for &bit in code.bits() {
            writer.write_bit(bit)?;
        }
        bit_length += code.len() as u64;
        symbol_count += 1;
    }

    writer.byte_align()?;
    writer.into_writer().flush()?;

    Ok(PackSummary {
        bit_length,
        symbol_count,
        bytes_written: bit_length.div_ceil(8),
    })
}

/// Render the encoded text as a string of `0`/`1` characters.
pub fn encode_bit_text(text: &str, codes: &CodeTable) -> Result<String> {
    let mut out = String::new();
    for c in text.chars() {
        let code = codes
            .get(c)
            .ok_or(CompressError::MissingCode(MissingCode::Symbol(c)))?;
        out.push_str(&code.to_string());
    }
    Ok(out)
}
