//! Symbol frequency analysis

use std::collections::BTreeMap;

/// Occurrence count of every symbol present in a text.
///
/// Symbols absent from the text never appear, so every stored count is at
/// least one when built with [`FrequencyTable::from_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every `char` of the text. No case folding, whitespace included.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for c in text.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Build from explicit pairs. Later duplicates add to earlier ones,
    /// saturating at `u64::MAX`; loaders reject such totals before calling this.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let mut counts = BTreeMap::new();
        for (c, n) in pairs {
            let slot = counts.entry(c).or_insert(0u64);
            *slot = slot.saturating_add(n);
        }
        Self { counts }
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols in the analyzed text, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &n| acc.saturating_add(n))
    }

    /// Pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}
