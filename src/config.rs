//! Configuration for huffpack

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the Tree Builder keeps its priority list ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeStrategy {
    /// Re-sort the whole list after every merge.
    #[default]
    Resort,
    /// Binary heap with the same comparator.
    Heap,
}

/// Layout of the packed output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFormat {
    /// Bare packed bits; decoding needs the companion frequency table.
    #[default]
    Raw,
    /// Self-contained archive with header, frequencies and payload.
    Archive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub tree_strategy: TreeStrategy,
    pub container: ContainerFormat,
    pub export_frequency_table: bool,
    pub export_code_table: bool,
    pub export_bit_text: bool,
    pub max_input_size: u64,
    pub batch_concurrency: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            tree_strategy: TreeStrategy::Resort,
            container: ContainerFormat::Raw,
            export_frequency_table: true,
            export_code_table: false,
            export_bit_text: false,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            batch_concurrency: 4,
        }
    }
}

impl CompressionConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
