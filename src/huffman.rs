//! Huffman codec
//!
//! Ties frequency analysis, tree construction and code assignment together,
//! and exposes encode/decode over the resulting code table.

use crate::bitpack::{self, EncodedText};
use crate::codes::CodeTable;
use crate::config::TreeStrategy;
use crate::decoder::Decoder;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;
use crate::tree::HuffmanTree;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
}

impl HuffmanCodec {
    /// Derive the code table from the text itself.
    pub fn from_text(text: &str, strategy: TreeStrategy) -> Result<Self> {
        Self::from_frequencies(FrequencyTable::from_text(text), strategy)
    }

    /// Rebuild the code table from previously recorded frequencies.
    pub fn from_frequencies(frequencies: FrequencyTable, strategy: TreeStrategy) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies, strategy)?;
        let codes = CodeTable::from_tree(&tree);
        debug!(
            symbols = codes.len(),
            max_code_len = codes.max_code_len(),
            "assigned codes"
        );
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn encode(&self, text: &str) -> Result<EncodedText> {
        bitpack::encode(text, &self.codes)
    }

    /// Decode a payload of the text these frequencies were counted from.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.decode_symbols(bytes, self.frequencies.total())
    }

    pub fn decode_symbols(&self, bytes: &[u8], symbol_count: u64) -> Result<String> {
        Decoder::new(&self.codes).decode(bytes, symbol_count)
    }

    pub fn stats(&self, original_size: u64, encoded_size: u64) -> CompressionStats {
        CompressionStats::compute(original_size, encoded_size, &self.frequencies, &self.codes)
    }
}
