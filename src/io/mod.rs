//! # I/O Module
//!
//! File reading/writing boundaries. The engine only sees the two traits below;
//! `RoaryDir` and `OutputDir` are the on-disk implementations and
//! `MemorySink` keeps artifacts in memory.

pub mod roary;
pub mod writer;

pub use roary::RoaryDir;
pub use writer::{MemorySink, OutputDir};

use crate::data::{ClusterTable, Table, UnsplitCluster};
use crate::error::Result;

/// Source of the split table and the unsplit clustering
pub trait ClusteringSource {
    /// Split-cluster table, rows in file order
    fn split_table(&self) -> Result<ClusterTable>;

    /// Unsplit clusters in file order, blank lines skipped
    fn unsplit_clusters(&self) -> Result<Vec<UnsplitCluster>>;
}

/// Destination for staged artifacts, addressed by artifact file name
pub trait ArtifactSink {
    /// Quoted, comma separated, `\n` terminated records; header first
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()>;

    /// Plain text written as is
    fn write_text(&mut self, name: &str, text: &str) -> Result<()>;
}
