//! Huffman tree construction
//!
//! Nodes live in an arena and refer to each other by index. Construction
//! repeatedly merges the two lowest-priority entries of the canonically
//! ordered priority list (its last two) into a group until two entries are
//! left, which become the children of the root.

use crate::canonical::{canonical_cmp, sort_canonical, Entry};
use crate::config::TreeStrategy;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

pub type NodeId = usize;

/// Count carried by the root group. The root is never merged again.
pub const ROOT_COUNT: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: char, count: u64 },
    /// Children keep the order they had in the priority list.
    Group { count: u64, children: [NodeId; 2] },
}

impl Node {
    pub fn count(&self) -> u64 {
        match self {
            Node::Leaf { count, .. } | Node::Group { count, .. } => *count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// An alphabet of one symbol yields a tree whose root is that leaf.
    pub fn build(frequencies: &FrequencyTable, strategy: TreeStrategy) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(CompressError::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(frequencies.len() * 2);
        let mut entries: Vec<Entry> = frequencies
            .iter()
            .map(|(symbol, count)| {
                let id = nodes.len();
                nodes.push(Node::Leaf { symbol, count });
                Entry::leaf(id, symbol, count)
            })
            .collect();
        sort_canonical(&mut entries);

        let remaining = match strategy {
            TreeStrategy::Resort => merge_by_resort(&mut nodes, entries),
            TreeStrategy::Heap => merge_by_heap(&mut nodes, entries),
        };

        let root = match remaining.as_slice() {
            [only] => only.node,
            [first, second] => {
                nodes.push(Node::Group {
                    count: ROOT_COUNT,
                    children: [first.node, second.node],
                });
                nodes.len() - 1
            }
            _ => return Err(CompressError::EmptyInput),
        };

        debug!(
            symbols = frequencies.len(),
            nodes = nodes.len(),
            ?strategy,
            "built huffman tree"
        );
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of leaves, equal to the alphabet size.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Sum of all leaf counts, saturating at `u64::MAX`.
    pub fn weight(&self) -> u64 {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Leaf { count, .. } => Some(*count),
                Node::Group { .. } => None,
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Group { children, .. } => {
                    stack.extend(children.iter().map(|&c| (c, depth + 1)));
                }
            }
        }
        deepest
    }
}

fn push_group(nodes: &mut Vec<Node>, first: &Entry, second: &Entry, seq: usize) -> Entry {
    let count = first.count.saturating_add(second.count);
    nodes.push(Node::Group {
        count,
        children: [first.node, second.node],
    });
    Entry::group(nodes.len() - 1, seq, count)
}

/// Merge the tail of the list and re-sort the whole list after every step.
fn merge_by_resort(nodes: &mut Vec<Node>, mut list: Vec<Entry>) -> Vec<Entry> {
    let mut seq = 0;
    while list.len() > 2 {
        let tail = list.split_off(list.len() - 2);
        let group = push_group(nodes, &tail[0], &tail[1], seq);
        seq += 1;
        list.push(group);
        sort_canonical(&mut list);
    }
    list
}

/// Max-heap whose greatest element is the last entry in canonical order.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry(Entry);

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(&self.0, &other.0)
    }
}

fn merge_by_heap(nodes: &mut Vec<Node>, list: Vec<Entry>) -> Vec<Entry> {
    let mut heap: BinaryHeap<HeapEntry> = list.into_iter().map(HeapEntry).collect();
    let mut seq = 0;
    while heap.len() > 2 {
        let (Some(HeapEntry(last)), Some(HeapEntry(first))) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(HeapEntry(push_group(nodes, &first, &last, seq)));
        seq += 1;
    }
    heap.into_sorted_vec().into_iter().map(|e| e.0).collect()
}
