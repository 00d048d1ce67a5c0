//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! Every variant is fatal: the pipeline stages all artifacts in memory and
//! only writes once the whole reconciliation has succeeded, so an error here
//! means nothing was written.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for paramerge operations
#[derive(Error, Debug)]
pub enum ParamergeError {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text errors raised by the `csv` reader/writer
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A gene in the unsplit clustering has no owning split cluster
    #[error("Unknown gene '{gene}': not present in any split cluster")]
    UnknownGene { gene: String },

    /// The same gene was found under two different split clusters
    #[error("Duplicate gene '{gene}': found in split clusters '{first}' and '{second}'")]
    DuplicateGene {
        gene: String,
        first: String,
        second: String,
    },

    /// The split table names the same cluster twice
    #[error("Duplicate split cluster name '{name}'")]
    DuplicateCluster { name: String },

    /// Paralog groups are not a partition of the split clusters
    #[error(
        "Paralog groups do not partition the split clusters: {total} memberships, \
         {covered} distinct clusters covered, {expected} expected \
         (in several groups: [{}]; in no group: [{}])",
        .overlapping.join(", "),
        .missing.join(", ")
    )]
    PartitionInvariant {
        total: usize,
        covered: usize,
        expected: usize,
        overlapping: Vec<String>,
        missing: Vec<String>,
    },

    /// Invalid data errors (empty table, inconsistent layout)
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Configuration errors (invalid CLI arguments)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File not found errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Parse errors
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Type alias for Results using ParamergeError
pub type Result<T> = std::result::Result<T, ParamergeError>;

impl ParamergeError {
    /// Create an unknown gene error
    pub fn unknown_gene(gene: impl Into<String>) -> Self {
        Self::UnknownGene { gene: gene.into() }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether this error reports inconsistent clusterings rather than I/O or usage problems
    pub fn is_consistency_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownGene { .. }
                | Self::DuplicateGene { .. }
                | Self::DuplicateCluster { .. }
                | Self::PartitionInvariant { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_message_lists_offenders() {
        let err = ParamergeError::PartitionInvariant {
            total: 4,
            covered: 3,
            expected: 3,
            overlapping: vec!["C1".to_string()],
            missing: vec![],
        };
        let msg = err.to_string();
        assert!(msg.contains("in several groups: [C1]"), "{}", msg);
        assert!(msg.contains("in no group: []"), "{}", msg);
        assert!(err.is_consistency_error());
    }

    #[test]
    fn test_io_is_not_consistency_error() {
        let err: ParamergeError = std::io::Error::new(std::io::ErrorKind::NotFound, "x").into();
        assert!(!err.is_consistency_error());
    }
}
