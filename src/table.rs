//! Human-readable frequency and code tables
//!
//! Frequency table layout:
//!
//! ```text
//! 3
//! c	1
//! a	3
//! b	3
//! ```
//!
//! The first line is the number of distinct symbols. Each following line is
//! `<symbol>\t<count>`, in the reverse of the canonical order (rarest
//! first). Whitespace symbols are written as `[enter]`, `[tab]`, `[space]`
//! and `[return]` so every record stays on one line.
//!
//! The code table starts with the number of symbols in the encoded text,
//! so a packed file can be decoded from it alone, then lists
//! `<symbol>\t<bits>` with the same symbol tokens in canonical order.

use crate::canonical::{sort_canonical, Entry, EntryKey};
use crate::codes::{BitString, CodeTable};
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use std::collections::HashSet;

const ESCAPES: [(char, &str); 4] = [
    ('\n', "[enter]"),
    ('\t', "[tab]"),
    (' ', "[space]"),
    ('\r', "[return]"),
];

pub fn escape_symbol(symbol: char) -> String {
    ESCAPES
        .iter()
        .find(|(c, _)| *c == symbol)
        .map(|(_, token)| token.to_string())
        .unwrap_or_else(|| symbol.to_string())
}

pub fn unescape_symbol(token: &str) -> Option<char> {
    if let Some((c, _)) = ESCAPES.iter().find(|(_, t)| *t == token) {
        return Some(*c);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Symbols with their counts in canonical order.
pub fn canonical_symbols(frequencies: &FrequencyTable) -> Vec<(char, u64)> {
    let mut entries: Vec<Entry> = frequencies
        .iter()
        .enumerate()
        .map(|(i, (c, n))| Entry::leaf(i, c, n))
        .collect();
    sort_canonical(&mut entries);
    entries
        .into_iter()
        .filter_map(|e| match e.key {
            EntryKey::Leaf(c) => Some((c, e.count)),
            EntryKey::Group(_) => None,
        })
        .collect()
}

pub fn write_frequency_table(frequencies: &FrequencyTable) -> String {
    let mut out = format!("{}\n", frequencies.len());
    for (symbol, count) in canonical_symbols(frequencies).into_iter().rev() {
        out.push_str(&format!("{}\t{}\n", escape_symbol(symbol), count));
    }
    out
}

pub fn parse_frequency_table(text: &str) -> Result<FrequencyTable> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (header_line, header) = lines.next().ok_or_else(|| format_error(1, "missing header"))?;
    let declared: usize = header
        .trim()
        .parse()
        .map_err(|_| format_error(header_line, format!("bad symbol count {:?}", header)))?;

    let mut seen = HashSet::new();
    let mut pairs = Vec::with_capacity(declared);
    let mut total = 0u64;
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (token, value) = split_record(line_no, line)?;
        let symbol = parse_token(line_no, token)?;
        let count: u64 = value
            .trim()
            .parse()
            .map_err(|_| format_error(line_no, format!("bad frequency {:?}", value)))?;
        if count == 0 {
            return Err(format_error(line_no, "frequency must be positive"));
        }
        if !seen.insert(symbol) {
            return Err(format_error(line_no, format!("duplicate symbol {:?}", symbol)));
        }
        total = total
            .checked_add(count)
            .ok_or_else(|| format_error(line_no, "total frequency overflows u64"))?;
        pairs.push((symbol, count));
    }

    if pairs.len() != declared {
        return Err(format_error(
            header_line,
            format!("header declares {} symbols, found {}", declared, pairs.len()),
        ));
    }
    Ok(FrequencyTable::from_counts(pairs))
}

/// Codes loaded from a persisted code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCodes {
    pub codes: CodeTable,
    /// Number of symbols in the encoded text.
    pub symbol_count: u64,
}

pub fn write_code_table(frequencies: &FrequencyTable, codes: &CodeTable) -> String {
    let mut out = format!("{}\n", frequencies.total());
    for (symbol, _) in canonical_symbols(frequencies) {
        if let Some(code) = codes.get(symbol) {
            out.push_str(&format!("{}\t{}\n", escape_symbol(symbol), code));
        }
    }
    out
}

pub fn parse_code_table(text: &str) -> Result<PersistedCodes> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (header_line, header) = lines.next().ok_or_else(|| format_error(1, "missing header"))?;
    let symbol_count: u64 = header
        .trim()
        .parse()
        .map_err(|_| format_error(header_line, format!("bad symbol count {:?}", header)))?;

    let mut pairs = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (token, value) = split_record(line_no, line)?;
        let symbol = parse_token(line_no, token)?;
        let code: BitString = value
            .trim()
            .parse()
            .map_err(|e| format_error(line_no, format!("bad code: {}", e)))?;
        pairs.push((symbol, code));
    }
    Ok(PersistedCodes {
        codes: CodeTable::from_codes(pairs)?,
        symbol_count,
    })
}

fn split_record(line_no: usize, line: &str) -> Result<(&str, &str)> {
    line.rsplit_once('\t')
        .ok_or_else(|| format_error(line_no, "expected <symbol>\\t<value>"))
}

fn parse_token(line_no: usize, token: &str) -> Result<char> {
    unescape_symbol(token).ok_or_else(|| format_error(line_no, format!("bad symbol {:?}", token)))
}

fn format_error(line: usize, reason: impl Into<String>) -> CompressError {
    CompressError::TableFormat {
        line,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeStrategy;
    use crate::huffman::HuffmanCodec;

    #[test]
    fn test_frequency_table_layout() {
        let table = FrequencyTable::from_text("aaabbbc");
        assert_eq!(write_frequency_table(&table), "3\nc\t1\na\t3\nb\t3\n");
    }

    #[test]
    fn test_whitespace_escaped() {
        let table = FrequencyTable::from_text("a a\n\t\r");
        let written = write_frequency_table(&table);
        assert!(written.contains("[space]\t1\n"));
        assert!(written.contains("[enter]\t1\n"));
        assert!(written.contains("[tab]\t1\n"));
        assert!(written.contains("[return]\t1\n"));
        assert_eq!(parse_frequency_table(&written).unwrap(), table);
    }

    #[test]
    fn test_bracket_symbol_is_not_an_escape() {
        let table = FrequencyTable::from_text("[[]");
        let written = write_frequency_table(&table);
        assert_eq!(parse_frequency_table(&written).unwrap(), table);
    }

    #[test]
    fn test_header_mismatch() {
        let err = parse_frequency_table("3\na\t1\nb\t2\n").unwrap_err();
        assert!(matches!(err, CompressError::TableFormat { line: 1, .. }));
    }

    #[test]
    fn test_bad_records() {
        let cases = [
            ("1\nab\t1\n", 2),
            ("1\na\tx\n", 2),
            ("1\na\t0\n", 2),
            ("1\na 1\n", 2),
            ("2\na\t1\na\t2\n", 3),
            ("many\n", 1),
        ];
        for (input, line) in cases {
            match parse_frequency_table(input) {
                Err(CompressError::TableFormat { line: got, .. }) => {
                    assert_eq!(got, line, "wrong line for {:?}", input)
                }
                other => panic!("expected format error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_code_table_roundtrip() {
        let text = "code tables\tsurvive\nrewrites";
        let codec = HuffmanCodec::from_text(text, TreeStrategy::Resort).unwrap();
        let written = write_code_table(codec.frequencies(), codec.codes());
        assert_eq!(written.lines().count(), codec.codes().len() + 1);
        assert!(written.starts_with(&format!("{}\n", text.chars().count())));

        let loaded = parse_code_table(&written).unwrap();
        assert_eq!(&loaded.codes, codec.codes());
        assert_eq!(loaded.symbol_count, text.chars().count() as u64);
    }

    #[test]
    fn test_code_table_rejects_bad_bits() {
        let err = parse_code_table("4\na\t1\nb\t02\n").unwrap_err();
        assert!(matches!(err, CompressError::TableFormat { line: 3, .. }));
    }

    #[test]
    fn test_code_table_requires_symbol_count() {
        let err = parse_code_table("a\t1\nb\t0\n").unwrap_err();
        assert!(matches!(err, CompressError::TableFormat { line: 1, .. }));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let err = parse_frequency_table("3\na\t18446744073709551615\nb\t1\nc\t1\n").unwrap_err();
        assert!(matches!(err, CompressError::TableFormat { line: 3, .. }));
    }

    #[test]
    fn test_largest_total_accepted() {
        let table = parse_frequency_table("2\na\t18446744073709551614\nb\t1\n").unwrap();
        assert_eq!(table.total(), u64::MAX);
    }
}
