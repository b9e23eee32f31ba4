//! Canonical ordering of priority list entries
//!
//! The shape of the Huffman tree, and therefore every code, depends on how
//! entries of equal count are ordered. The order is:
//!
//! 1. count, descending
//! 2. leaves before groups
//! 3. leaves by code point, descending
//! 4. groups by creation order, ascending
//!
//! Rule 4 gives the same sequence a stable sort would, since a new group is
//! always appended after every existing group.

use crate::tree::NodeId;
use std::cmp::Ordering;

/// What an entry stands for, used only for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    Leaf(char),
    /// Creation sequence number of the group.
    Group(usize),
}

/// A live entry of the priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub node: NodeId,
    pub count: u64,
    pub key: EntryKey,
}

impl Entry {
    pub fn leaf(node: NodeId, symbol: char, count: u64) -> Self {
        Self {
            node,
            count,
            key: EntryKey::Leaf(symbol),
        }
    }

    pub fn group(node: NodeId, seq: usize, count: u64) -> Self {
        Self {
            node,
            count,
            key: EntryKey::Group(seq),
        }
    }
}

/// Compare two entries under the canonical order. `Less` means `a` sorts first.
pub fn canonical_cmp(a: &Entry, b: &Entry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| match (a.key, b.key) {
        (EntryKey::Leaf(x), EntryKey::Leaf(y)) => y.cmp(&x),
        (EntryKey::Leaf(_), EntryKey::Group(_)) => Ordering::Less,
        (EntryKey::Group(_), EntryKey::Leaf(_)) => Ordering::Greater,
        (EntryKey::Group(x), EntryKey::Group(y)) => x.cmp(&y),
    })
}

/// Stable sort of entries into canonical order.
pub fn sort_canonical(entries: &mut [Entry]) {
    entries.sort_by(canonical_cmp);
}
