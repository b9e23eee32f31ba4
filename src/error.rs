//! Error types for huffpack

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("empty input")]
    EmptyInput,

    #[error("missing code: {0}")]
    MissingCode(MissingCode),

    #[error("stream truncated: decoded {decoded} of {expected} symbols")]
    TruncatedStream { decoded: usize, expected: usize },

    #[error("malformed table at line {line}: {reason}")]
    TableFormat { line: usize, reason: String },

    #[error("code table is not prefix-free: {shorter} is a prefix of {longer}")]
    NotPrefixFree { shorter: String, longer: String },

    #[error("invalid code for {symbol:?}: {reason}")]
    InvalidCode { symbol: char, reason: String },

    #[error("input too large: {size} bytes exceeds limit of {limit}")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    #[error("batch task failed: {0}")]
    BatchError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Which side of the code table lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingCode {
    /// A text symbol has no entry while encoding.
    Symbol(char),
    /// A run of bits matches no code while decoding.
    Bits { offset: usize, bits: String },
}

impl fmt::Display for MissingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingCode::Symbol(c) => write!(f, "symbol {:?} has no code", c),
            MissingCode::Bits { offset, bits } => {
                write!(f, "bits {} at offset {} match no code", bits, offset)
            }
        }
    }
}

impl From<bincode::Error> for CompressError {
    fn from(e: bincode::Error) -> Self {
        CompressError::SerializationError(e.to_string())
    }
}

impl From<serde_json::Error> for CompressError {
    fn from(e: serde_json::Error) -> Self {
        CompressError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
