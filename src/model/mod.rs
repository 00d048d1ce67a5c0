//! # Model Module
//!
//! The reconciliation engine. Stages run in dependency order, each consuming
//! the previous stage's immutable output:
//!
//! 1. `index`: gene identifier -> owning split cluster
//! 2. `grouper`: unsplit clusters -> paralog groups
//! 3. `partition`: groups must partition the split clusters
//! 4. `annotation`: per-cluster group size and member list
//! 5. `merge`: collapse each group into one row
//! 6. `assemble`: annotated, lookup and collapsed tables
//! 7. `summary` / `frequency`: presence matrix, frequency classes, reports
//!
//! `pairwise` holds the strain-pair analyses that run on the presence matrix.

pub mod annotation;
pub mod assemble;
pub mod frequency;
pub mod grouper;
pub mod index;
pub mod merge;
pub mod pairwise;
pub mod partition;
pub mod summary;

pub use annotation::{build_annotations, ParalogAnnotation};
pub use assemble::{assemble_tables, AssembledTables};
pub use frequency::{FrequencyClass, FrequencyCounts, FrequencyCutoffs};
pub use grouper::group_paralogs;
pub use index::GeneIndex;
pub use merge::{merge_all, merge_group, MergedRow};
pub use pairwise::{PairwiseComparison, PairwiseReport};
pub use partition::validate_partition;
pub use summary::PanGenomeSummary;
