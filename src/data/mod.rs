//! # Data Module
//!
//! In-memory representations of the pan-genome tables. This is the core "Model" layer.
//!
//! ## Design Philosophy
//! - **Schema-driven rows:** `ClusterRow` keeps the name, metadata and strain
//!   cells as named fields; `TableSchema` owns the column names and the
//!   position of the first strain column.
//! - **Zero-cost newtypes:** `RowIdx` identifies a split cluster by its original
//!   row position, which is also what orders merged output.
//! - **Type state:** `ParalogGroups<Unchecked>` only becomes
//!   `ParalogGroups<Validated>` through the partition check.

pub mod paralog;
pub mod partition_state;
pub mod presence;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use paralog::{ParalogGroup, ParalogGroups, UnsplitCluster};
pub use partition_state::{PartitionState, Unchecked, Validated};
pub use presence::PresenceMatrix;
pub use schema::{RoaryVersion, TableLayout, TableSchema};
pub use table::{ClusterRow, ClusterTable, Table};

/// Original data-row position of a split cluster (0-based, header excluded)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RowIdx(pub u32);

impl RowIdx {
    pub fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RowIdx {
    fn from(idx: u32) -> Self {
        Self(idx)
    }
}

impl From<usize> for RowIdx {
    fn from(idx: usize) -> Self {
        Self(idx as u32)
    }
}

impl From<RowIdx> for usize {
    fn from(idx: RowIdx) -> usize {
        idx.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_idx_ordering() {
        let mut rows = vec![RowIdx::new(7), RowIdx::from(2usize), RowIdx::new(4)];
        rows.sort();
        assert_eq!(rows, vec![RowIdx::new(2), RowIdx::new(4), RowIdx::new(7)]);
        assert_eq!(usize::from(rows[2]), 7);
    }
}
