//! Integration tests for huffpack

use huffpack::archive::PackedArchive;
use huffpack::bitpack;
use huffpack::config::{CompressionConfig, ContainerFormat, TreeStrategy};
use huffpack::error::CompressError;
use huffpack::frequency::FrequencyTable;
use huffpack::huffman::HuffmanCodec;
use huffpack::table;
use huffpack::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;

const SAMPLE: &str = "Alice was beginning to get very tired of sitting by her sister on the bank,\n\
and of having nothing to do: once or twice she had peeped into the book her sister was reading,\n\
\tbut it had no pictures or conversations in it.\n";

#[test]
fn test_full_file_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alice.txt");
    fs::write(&input, SAMPLE).unwrap();

    let compressor = Compressor::new(CompressionConfig {
        export_code_table: true,
        export_bit_text: true,
        ..CompressionConfig::default()
    });
    let output = default_output_path(&input, &dir.path().join("encoded"));
    let report = compressor.compress_file(&input, &output).unwrap();

    let paths = ArtifactPaths::for_output(&output);
    assert_eq!(
        report.companions,
        vec![
            paths.frequency_table.clone(),
            paths.code_table.clone(),
            paths.bit_text.clone()
        ]
    );
    assert_eq!(report.stats.encoded_size, fs::metadata(&output).unwrap().len());
    assert!(report.stats.ratio > 0.0);

    let bit_text = fs::read_to_string(&paths.bit_text).unwrap();
    assert_eq!(bit_text.len() as u64, report.stats.bit_length);

    let restored = dir.path().join("decode.txt");
    let symbols = compressor
        .decompress_file(&output, &paths.frequency_table, &restored)
        .unwrap();
    assert_eq!(symbols, SAMPLE.chars().count() as u64);
    assert_eq!(fs::read_to_string(&restored).unwrap(), SAMPLE);

    let via_codes = dir.path().join("decode_codes.txt");
    let from_codes = compressor
        .decompress_file_with_codes(&output, &paths.code_table, &via_codes)
        .unwrap();
    assert_eq!(from_codes, symbols);
    assert_eq!(fs::read_to_string(&via_codes).unwrap(), SAMPLE);
}

#[test]
fn test_archive_file_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "ab").unwrap();

    let compressor = Compressor::new(CompressionConfig {
        container: ContainerFormat::Archive,
        export_frequency_table: false,
        ..CompressionConfig::default()
    });
    let output = dir.path().join("notes_comp.bin");
    let report = compressor.compress_file(&input, &output).unwrap();
    assert!(report.companions.is_empty());

    let restored = dir.path().join("notes.out");
    compressor.decompress_archive_file(&output, &restored).unwrap();
    assert_eq!(fs::read_to_string(&restored).unwrap(), "ab");
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let compressor = Compressor::default();
    let result = compressor.compress_file(&dir.path().join("nope.txt"), &dir.path().join("x.bin"));
    assert!(matches!(result, Err(CompressError::IoError(_))));
}

#[test]
fn test_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("src.txt");
    fs::write(&input, SAMPLE).unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "plain file").unwrap();

    let compressor = Compressor::default();
    let result = compressor.compress_file(&input, &blocker.join("out_comp.bin"));
    assert!(matches!(result, Err(CompressError::IoError(_))));

    let archive = Compressor::new(CompressionConfig {
        container: ContainerFormat::Archive,
        ..CompressionConfig::default()
    });
    let result = archive.compress_file(&input, &blocker.join("out_comp.bin"));
    assert!(matches!(result, Err(CompressError::IoError(_))));
}

#[test]
fn test_overflowing_frequency_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("x_comp.bin");
    let freq = dir.path().join("x_freq.txt");
    fs::write(&packed, [0u8]).unwrap();
    fs::write(&freq, "3\na\t18446744073709551615\nb\t1\nc\t1\n").unwrap();

    let result = Compressor::default().decompress_file(&packed, &freq, &dir.path().join("x.out"));
    assert!(matches!(result, Err(CompressError::TableFormat { line: 3, .. })));
    assert!(!dir.path().join("x.out").exists());
}

#[test]
fn test_empty_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();
    let result = Compressor::default().compress_file(&input, &dir.path().join("empty.bin"));
    assert!(matches!(result, Err(CompressError::EmptyInput)));
    assert!(!dir.path().join("empty.bin").exists());
}

#[test]
fn test_truncated_raw_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("t.txt");
    fs::write(&input, SAMPLE).unwrap();
    let output = dir.path().join("t_comp.bin");
    let compressor = Compressor::default();
    compressor.compress_file(&input, &output).unwrap();

    let mut bytes = fs::read(&output).unwrap();
    bytes.truncate(bytes.len() - 2);
    fs::write(&output, &bytes).unwrap();

    let result = compressor.decompress_file(
        &output,
        &dir.path().join("t_freq.txt"),
        &dir.path().join("t.out"),
    );
    assert!(matches!(result, Err(CompressError::TruncatedStream { .. })));
}

#[test]
fn test_random_texts_roundtrip() {
    let alphabet: Vec<char> = "abcdefghij \n\tXYZ0123é€ß".chars().collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let len = rng.gen_range(1..400);
        let width = rng.gen_range(1..=alphabet.len());
        let text: String = (0..len)
            .map(|_| *alphabet[..width].choose(&mut rng).unwrap())
            .collect();
        for strategy in [TreeStrategy::Resort, TreeStrategy::Heap] {
            let codec = HuffmanCodec::from_text(&text, strategy).unwrap();
            let encoded = codec.encode(&text).unwrap();
            assert_eq!(codec.decode(&encoded.bytes).unwrap(), text);
            assert!(codec.codes().is_prefix_free());
            assert_eq!(encoded.bytes.len() as u64, encoded.bit_length.div_ceil(8));
        }
    }
}

#[test]
fn test_persisted_table_reproduces_codes() {
    let codec = HuffmanCodec::from_text(SAMPLE, TreeStrategy::Resort).unwrap();
    let persisted = table::write_frequency_table(codec.frequencies());
    let loaded = table::parse_frequency_table(&persisted).unwrap();
    let rebuilt = HuffmanCodec::from_frequencies(loaded, TreeStrategy::Resort).unwrap();
    assert_eq!(codec.codes(), rebuilt.codes());
}

#[test]
fn test_determinism() {
    let a = HuffmanCodec::from_text(SAMPLE, TreeStrategy::Resort).unwrap();
    let b = HuffmanCodec::from_text(SAMPLE, TreeStrategy::Resort).unwrap();
    assert_eq!(
        table::write_code_table(a.frequencies(), a.codes()),
        table::write_code_table(b.frequencies(), b.codes())
    );
}

#[test]
fn test_tie_break_order() {
    let frequencies = FrequencyTable::from_counts(vec![('a', 3), ('b', 3), ('c', 1)]);
    let order: Vec<char> = table::canonical_symbols(&frequencies)
        .into_iter()
        .map(|(c, _)| c)
        .collect();
    assert_eq!(order, vec!['b', 'a', 'c']);
}

#[test]
fn test_single_symbol_alphabet() {
    let codec = HuffmanCodec::from_text("aaaa", TreeStrategy::Resort).unwrap();
    assert_eq!(codec.codes().len(), 1);
    let encoded = codec.encode("aaaa").unwrap();
    assert_eq!(codec.decode(&encoded.bytes).unwrap(), "aaaa");
}

#[test]
fn test_skewed_text_compresses() {
    let output = Compressor::default().compress_text("aaaaaaaab").unwrap();
    assert!(output.stats.average_bits_per_symbol < 8.0);
    assert!(output.stats.ratio > 0.0);
}

#[test]
fn test_foreign_table_reports_missing_symbol() {
    let codec = HuffmanCodec::from_text("abc", TreeStrategy::Resort).unwrap();
    let err = bitpack::encode("abcd", codec.codes()).unwrap_err();
    assert!(matches!(err, CompressError::MissingCode(MissingCode::Symbol('d'))));
}

#[test]
fn test_archive_bytes_in_memory() {
    let codec = HuffmanCodec::from_text(SAMPLE, TreeStrategy::Heap).unwrap();
    let archive = PackedArchive::new(codec.frequencies(), codec.encode(SAMPLE).unwrap());
    let parsed = PackedArchive::from_bytes(&archive.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed, archive);
    assert_eq!(parsed.decode(TreeStrategy::Resort).unwrap(), SAMPLE);
}

#[test]
fn test_compression_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"container": "archive", "export_code_table": true}"#).unwrap();
    let config = CompressionConfig::from_json_file(&path).unwrap();
    assert_eq!(config.container, ContainerFormat::Archive);
    assert!(config.export_code_table);
    assert_eq!(config.tree_strategy, TreeStrategy::Resort);
}
