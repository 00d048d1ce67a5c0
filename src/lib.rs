//! # Paramerge Library
//!
//! Reconciles the split and unsplit gene clusterings of a Roary pan-genome
//! run: recovers paralog groups, checks they partition the split clusters,
//! merges each group into one row and summarizes the collapsed table.
//!
//! ## Modules
//! - `config`: CLI argument parsing and validation
//! - `data`: Tables, schemas, paralog groups, presence matrix
//! - `error`: Error types and result aliases
//! - `io`: Roary input reader and artifact writers
//! - `model`: The reconciliation stages and summary analyses
//! - `pipelines`: High-level workflow orchestration
//! - `utils`: Threading and logging setup

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod model;
pub mod pipelines;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use data::{
    ClusterRow, ClusterTable, ParalogGroup, ParalogGroups, PresenceMatrix, RowIdx, Table,
    TableLayout, TableSchema, UnsplitCluster,
};
pub use error::{ParamergeError, Result};
pub use io::{ArtifactSink, ClusteringSource, MemorySink, OutputDir, RoaryDir};
pub use model::{FrequencyClass, FrequencyCutoffs, GeneIndex, PairwiseReport, PanGenomeSummary};
pub use pipelines::{reconcile, run_reconcile, ReconcileOptions, ReconcileOutputs, ReconcilePipeline};
