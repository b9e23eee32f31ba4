//! Code assignment: one prefix-free bit string per symbol

use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A sequence of bits, written most significant first as `0`/`1` text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString(Vec<bool>);

impl BitString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.0.starts_with(&prefix.0)
    }

    fn with(&self, bit: bool) -> Self {
        let mut next = self.clone();
        next.push(bit);
        next
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid bit {found:?} at position {position}")]
pub struct ParseBitStringError {
    pub position: usize,
    pub found: char,
}

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseBitStringError { position, found }),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(BitString)
    }
}

/// Mapping from symbol to its code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, BitString>,
}

impl CodeTable {
    /// Assign codes by walking every root-to-leaf path.
    ///
    /// Within a group the first child extends the path with `1` and the
    /// second with `0`. A tree that is a single leaf gets the code `1`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = tree.node(tree.root()) {
            codes.insert(*symbol, BitString::from(vec![true]));
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), BitString::new())];
        while let Some((id, prefix)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, prefix);
                }
                Node::Group { children, .. } => {
                    stack.push((children[1], prefix.with(false)));
                    stack.push((children[0], prefix.with(true)));
                }
            }
        }
        Self { codes }
    }

    /// Build from explicit codes, rejecting empty or overlapping ones.
    pub fn from_codes<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, BitString)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(CompressError::InvalidCode {
                    symbol,
                    reason: "empty code".into(),
                });
            }
            if codes.insert(symbol, code).is_some() {
                return Err(CompressError::InvalidCode {
                    symbol,
                    reason: "symbol listed twice".into(),
                });
            }
        }
        let table = Self { codes };
        table.check_prefix_free()?;
        Ok(table)
    }

    pub fn get(&self, symbol: char) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &BitString)> + '_ {
        self.codes.iter().map(|(&c, code)| (c, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Total payload bits for a text with these frequencies, saturating at `u64::MAX`.
    pub fn encoded_bit_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(c, n)| self.get(c).map(|code| (code.len() as u64).saturating_mul(n)))
            .fold(0u64, u64::saturating_add)
    }

    pub fn is_prefix_free(&self) -> bool {
        self.check_prefix_free().is_ok()
    }

    /// In sorted order a code that prefixes another also prefixes its successor,
    /// so only neighbours need comparing.
    fn check_prefix_free(&self) -> Result<()> {
        let mut sorted: Vec<&BitString> = self.codes.values().collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            if pair[1].starts_with(pair[0]) {
                return Err(CompressError::NotPrefixFree {
                    shorter: pair[0].to_string(),
                    longer: pair[1].to_string(),
                });
            }
        }
        Ok(())
    }
}
