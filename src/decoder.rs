//! Prefix-code decoding
//!
//! Bits are read most significant first and accumulated until they equal a
//! code. The table is prefix-free, so the first match is the only one.
//! Decoding stops after exactly the requested number of symbols, which makes
//! the zero padding of the last byte irrelevant.

use crate::codes::{BitString, CodeTable};
use crate::error::{CompressError, MissingCode, Result};
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Decoder {
    symbols: HashMap<BitString, char>,
    max_code_len: usize,
}

impl Decoder {
    pub fn new(codes: &CodeTable) -> Self {
        Self {
            symbols: codes.iter().map(|(c, code)| (code.clone(), c)).collect(),
            max_code_len: codes.max_code_len(),
        }
    }

    /// Decode `symbol_count` symbols from `bytes`.
    pub fn decode(&self, bytes: &[u8], symbol_count: u64) -> Result<String> {
        let total_bits = bytes.len() as u64 * 8;
        let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
        let mut output = String::with_capacity(symbol_count.min(total_bits) as usize);
        let mut current = BitString::new();
        let mut consumed = 0u64;
        let mut code_start = 0u64;
        let mut decoded = 0u64;

        while decoded < symbol_count {
            if consumed == total_bits {
                return Err(CompressError::TruncatedStream {
                    decoded: decoded as usize,
                    expected: symbol_count as usize,
                });
            }
            current.push(reader.read_bit()?);
            consumed += 1;

            if let Some(&symbol) = self.symbols.get(&current) {
                output.push(symbol);
                decoded += 1;
                current.clear();
                code_start = consumed;
            } else if current.len() >= self.max_code_len {
                return Err(CompressError::MissingCode(MissingCode::Bits {
                    offset: code_start as usize,
                    bits: current.to_string(),
                }));
            }
        }

        let unused = total_bits - consumed;
        if unused >= 8 {
            warn!(
                unused_bytes = unused / 8,
                "payload has whole bytes past the last symbol"
            );
        }
        Ok(output)
    }
}
