//! Self-contained packed archive
//!
//! Format: `HFPK` magic followed by a bincode-encoded [`PackedArchive`]. The
//! header carries the symbol count and exact bit length, so the decoder never
//! has to guess where the zero padding starts.

use crate::bitpack::EncodedText;
use crate::config::TreeStrategy;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanCodec;
use serde::{Deserialize, Serialize};

pub const MAGIC: &[u8; 4] = b"HFPK";
pub const FORMAT_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedArchive {
    pub version: u8,
    pub symbol_count: u64,
    pub bit_length: u64,
    /// Symbol counts, enough to rebuild the identical code table.
    pub frequencies: Vec<(char, u64)>,
    pub payload: Vec<u8>,
}

impl PackedArchive {
    pub fn new(frequencies: &FrequencyTable, encoded: EncodedText) -> Self {
        Self {
            version: FORMAT_VERSION,
            symbol_count: encoded.symbol_count,
            bit_length: encoded.bit_length,
            frequencies: frequencies.iter().collect(),
            payload: encoded.bytes,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = MAGIC.to_vec();
        out.extend(bincode::serialize(self)?);
        Ok(out)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let body = data
            .strip_prefix(MAGIC.as_slice())
            .ok_or_else(|| CompressError::InvalidArchive("bad magic".into()))?;
        let archive: PackedArchive = bincode::deserialize(body)?;
        archive.validate()?;
        Ok(archive)
    }

    fn validate(&self) -> Result<()> {
        if self.version != FORMAT_VERSION {
            return Err(CompressError::InvalidArchive(format!(
                "unsupported version {}",
                self.version
            )));
        }
        let expected_len = self.bit_length.div_ceil(8);
        if self.payload.len() as u64 != expected_len {
            return Err(CompressError::InvalidArchive(format!(
                "payload is {} bytes, header implies {}",
                self.payload.len(),
                expected_len
            )));
        }
        let total = self
            .frequencies
            .iter()
            .try_fold(0u64, |acc, &(_, n)| acc.checked_add(n))
            .ok_or_else(|| CompressError::InvalidArchive("frequencies overflow u64".into()))?;
        if total != self.symbol_count {
            return Err(CompressError::InvalidArchive(format!(
                "frequencies sum to {}, header says {} symbols",
                total, self.symbol_count
            )));
        }
        Ok(())
    }

    pub fn frequency_table(&self) -> FrequencyTable {
        FrequencyTable::from_counts(self.frequencies.iter().copied())
    }

    /// Rebuild the code table and decode the payload.
    pub fn decode(&self, strategy: TreeStrategy) -> Result<String> {
        let codec = HuffmanCodec::from_frequencies(self.frequency_table(), strategy)?;
        codec.decode_symbols(&self.payload, self.symbol_count)
    }
}
