//! huffpack: Huffman compression for text files.
//!
//! The pipeline:
//! - frequency analysis of every `char` in the text
//! - canonical ordering of symbols so the tree shape is reproducible
//! - binary-merge tree construction and prefix code assignment
//! - MSB-first bit packing, and prefix-match decoding that stops after a
//!   known number of symbols
//!
//! A raw packed file is decoded with its companion frequency table, whose
//! counts also give the symbol count. An archive carries both in its header.

pub mod archive;
pub mod batch;
pub mod bitpack;
pub mod canonical;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod stats;
pub mod table;
pub mod tree;

use crate::archive::PackedArchive;
use crate::config::{CompressionConfig, ContainerFormat};
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanCodec;
use crate::stats::CompressionStats;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use crate::codes::{BitString, CodeTable};
pub use crate::error::MissingCode;

/// Compressed text held in memory
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompressedOutput {
    pub original_size: usize,
    pub compressed_size: usize,
    pub symbol_count: u64,
    pub bit_length: u64,
    pub data: Vec<u8>,
    pub frequencies: Vec<(char, u64)>,
    pub stats: CompressionStats,
}

/// Files written by [`Compressor::compress_file`]
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub companions: Vec<PathBuf>,
    pub stats: CompressionStats,
}

/// Paths of the text files written next to a packed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub frequency_table: PathBuf,
    pub code_table: PathBuf,
    pub bit_text: PathBuf,
}

impl ArtifactPaths {
    /// `dir/alice_comp.bin` yields `dir/alice_freq.txt`, `dir/alice_bin.txt`
    /// and `dir/alice_bits.txt`.
    pub fn for_output(output: &Path) -> Self {
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let base = stem.strip_suffix("_comp").unwrap_or(stem);
        let dir = output.parent().unwrap_or_else(|| Path::new(""));
        Self {
            frequency_table: dir.join(format!("{}_freq.txt", base)),
            code_table: dir.join(format!("{}_bin.txt", base)),
            bit_text: dir.join(format!("{}_bits.txt", base)),
        }
    }
}

/// `dir/<input stem>_comp.bin`
pub fn default_output_path(input: &Path, dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    dir.join(format!("{}_comp.bin", stem))
}

/// The main compressor engine
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.config.max_input_size {
            return Err(CompressError::InputTooLarge {
                size,
                limit: self.config.max_input_size,
            });
        }
        Ok(())
    }

    pub fn codec_for(&self, text: &str) -> Result<HuffmanCodec> {
        HuffmanCodec::from_text(text, self.config.tree_strategy)
    }

    /// Compress a text in memory
    pub fn compress_text(&self, text: &str) -> Result<CompressedOutput> {
        if text.is_empty() {
            return Err(CompressError::EmptyInput);
        }
        self.check_size(text.len() as u64)?;

        let codec = self.codec_for(text)?;
        let encoded = codec.encode(text)?;
        let stats = codec.stats(text.len() as u64, encoded.bytes.len() as u64);

        Ok(CompressedOutput {
            original_size: text.len(),
            compressed_size: encoded.bytes.len(),
            symbol_count: encoded.symbol_count,
            bit_length: encoded.bit_length,
            data: encoded.bytes,
            frequencies: codec.frequencies().iter().collect(),
            stats,
        })
    }

    /// Decompress an in-memory output
    pub fn decompress(&self, output: &CompressedOutput) -> Result<String> {
        let frequencies = FrequencyTable::from_counts(output.frequencies.iter().copied());
        let codec = HuffmanCodec::from_frequencies(frequencies, self.config.tree_strategy)?;
        codec.decode_symbols(&output.data, output.symbol_count)
    }

    /// Compress `input` into `output`, plus the configured companion files.
    pub fn compress_file(&self, input: &Path, output: &Path) -> Result<CompressionReport> {
        self.check_size(fs::metadata(input)?.len())?;
        let text = fs::read_to_string(input)?;
        if text.is_empty() {
            return Err(CompressError::EmptyInput);
        }

        let codec = self.codec_for(&text)?;
        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let encoded_size = match self.config.container {
            ContainerFormat::Raw => {
                let mut sink = BufWriter::new(File::create(output)?);
                let summary = bitpack::encode_to(&text, codec.codes(), &mut sink)?;
                sink.flush()?;
                summary.bytes_written
            }
            ContainerFormat::Archive => {
                let encoded = codec.encode(&text)?;
                let bytes = PackedArchive::new(codec.frequencies(), encoded).to_bytes()?;
                fs::write(output, &bytes)?;
                bytes.len() as u64
            }
        };

        let companions = self.write_companions(&codec, &text, output)?;
        let stats = codec.stats(text.len() as u64, encoded_size);
        info!(
            input = %input.display(),
            output = %output.display(),
            ratio = stats.ratio,
            bits_per_symbol = stats.average_bits_per_symbol,
            "compressed file"
        );

        Ok(CompressionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            companions,
            stats,
        })
    }

    fn write_companions(&self, codec: &HuffmanCodec, text: &str, output: &Path) -> Result<Vec<PathBuf>> {
        let paths = ArtifactPaths::for_output(output);
        let mut written = Vec::new();
        if self.config.export_frequency_table {
            fs::write(&paths.frequency_table, table::write_frequency_table(codec.frequencies()))?;
            written.push(paths.frequency_table);
        }
        if self.config.export_code_table {
            fs::write(
                &paths.code_table,
                table::write_code_table(codec.frequencies(), codec.codes()),
            )?;
            written.push(paths.code_table);
        }
        if self.config.export_bit_text {
            fs::write(&paths.bit_text, bitpack::encode_bit_text(text, codec.codes())?)?;
            written.push(paths.bit_text);
        }
        debug!(count = written.len(), "wrote companion files");
        Ok(written)
    }

    /// Decode a raw packed file using its persisted frequency table.
    ///
    /// Returns the number of symbols written to `destination`.
    pub fn decompress_file(&self, encoded: &Path, frequency_table: &Path, destination: &Path) -> Result<u64> {
        let frequencies = table::parse_frequency_table(&fs::read_to_string(frequency_table)?)?;
        let codec = HuffmanCodec::from_frequencies(frequencies, self.config.tree_strategy)?;
        let text = codec.decode(&fs::read(encoded)?)?;
        fs::write(destination, &text)?;
        info!(destination = %destination.display(), symbols = codec.frequencies().total(), "decompressed file");
        Ok(codec.frequencies().total())
    }

    /// Decode a raw packed file using a persisted code table.
    ///
    /// The symbol count comes from the table's header line. Returns the
    /// number of symbols written to `destination`.
    pub fn decompress_file_with_codes(&self, encoded: &Path, code_table: &Path, destination: &Path) -> Result<u64> {
        let persisted = table::parse_code_table(&fs::read_to_string(code_table)?)?;
        let text = decoder::Decoder::new(&persisted.codes).decode(&fs::read(encoded)?, persisted.symbol_count)?;
        fs::write(destination, &text)?;
        info!(destination = %destination.display(), symbols = persisted.symbol_count, "decompressed file");
        Ok(persisted.symbol_count)
    }

    /// Decode a self-contained archive.
    pub fn decompress_archive_file(&self, archive: &Path, destination: &Path) -> Result<u64> {
        let archive = PackedArchive::from_bytes(&fs::read(archive)?)?;
        let text = archive.decode(self.config.tree_strategy)?;
        fs::write(destination, &text)?;
        info!(destination = %destination.display(), symbols = archive.symbol_count, "unpacked archive");
        Ok(archive.symbol_count)
    }
}
