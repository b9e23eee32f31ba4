//! Compression statistics

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    /// Size of the source text in bytes.
    pub original_size: u64,
    /// Size of the packed output in bytes.
    pub encoded_size: u64,
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    pub bit_length: u64,
    /// `1 - encoded_size / original_size`; positive means the output shrank.
    pub ratio: f64,
    pub average_bits_per_symbol: f64,
    /// Shannon entropy of the symbol distribution, in bits per symbol.
    pub entropy_bits: f64,
}

impl CompressionStats {
    pub fn compute(
        original_size: u64,
        encoded_size: u64,
        frequencies: &FrequencyTable,
        codes: &CodeTable,
    ) -> Self {
        let symbol_count = frequencies.total();
        let bit_length = codes.encoded_bit_length(frequencies);
        let ratio = if original_size == 0 {
            0.0
        } else {
            1.0 - encoded_size as f64 / original_size as f64
        };
        let average_bits_per_symbol = if symbol_count == 0 {
            0.0
        } else {
            bit_length as f64 / symbol_count as f64
        };

        Self {
            original_size,
            encoded_size,
            symbol_count,
            distinct_symbols: frequencies.len(),
            bit_length,
            ratio,
            average_bits_per_symbol,
            entropy_bits: entropy(frequencies),
        }
    }
}

/// Shannon entropy of the distribution in bits per symbol
pub fn entropy(frequencies: &FrequencyTable) -> f64 {
    let total = frequencies.total();
    if total == 0 {
        return 0.0;
    }
    let len = total as f64;
    let mut entropy = 0.0;
    for (_, f) in frequencies.iter() {
        let p = f as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original Size: {} bytes", self.original_size)?;
        writeln!(f, "Encoded Size: {} bytes", self.encoded_size)?;
        writeln!(
            f,
            "Symbols: {} ({} distinct)",
            self.symbol_count, self.distinct_symbols
        )?;
        writeln!(f, "Compression Ratio: {:.6}", self.ratio)?;
        writeln!(
            f,
            "Average Size: {:.5} bits/chr",
            self.average_bits_per_symbol
        )?;
        write!(f, "Entropy: {:.5} bits/chr", self.entropy_bits)
    }
}
