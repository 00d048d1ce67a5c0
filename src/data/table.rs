//! # Cluster Tables
//!
//! The split-cluster table as loaded from Roary, plus the plain `Table` used
//! for staged output artifacts.

use std::collections::HashMap;

use crate::data::schema::TableSchema;
use crate::data::RowIdx;
use crate::error::{ParamergeError, Result};

/// Sub-delimiter joining values inside a merged cell
pub const MERGE_DELIMITER: char = '\t';

/// One split-cluster row with named fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterRow {
    /// Cluster name (first column)
    pub name: String,
    /// Metadata cells between the name and the first strain column
    pub metadata: Vec<String>,
    /// One cell per strain; empty when the strain lacks the cluster
    pub strains: Vec<String>,
}

impl ClusterRow {
    /// Split a full record into named fields according to `schema`
    pub fn from_cells(mut cells: Vec<String>, schema: &TableSchema) -> Result<Self> {
        if cells.len() != schema.n_columns() {
            return Err(ParamergeError::invalid_data(format!(
                "row has {} cells but the header has {} columns",
                cells.len(),
                schema.n_columns()
            )));
        }
        let strains = cells.split_off(schema.first_strain());
        let metadata = cells.split_off(1);
        let name = cells.pop().unwrap_or_default();
        Ok(Self {
            name,
            metadata,
            strains,
        })
    }

    /// All cells in column order
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.metadata.iter().map(String::as_str))
            .chain(self.strains.iter().map(String::as_str))
    }

    pub fn n_cells(&self) -> usize {
        1 + self.metadata.len() + self.strains.len()
    }

    /// Flatten back into a record
    pub fn into_cells(self) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.n_cells());
        cells.push(self.name);
        cells.extend(self.metadata);
        cells.extend(self.strains);
        cells
    }

    /// Gene identifiers across all strain cells
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.strains.iter().flat_map(|cell| cell.split_whitespace())
    }

    /// Whether the cluster has at least one gene in `strain`
    #[inline]
    pub fn is_present(&self, strain: usize) -> bool {
        !self.strains[strain].is_empty()
    }
}

/// Split-cluster table in original row order
#[derive(Clone, Debug)]
pub struct ClusterTable {
    schema: TableSchema,
    rows: Vec<ClusterRow>,
    by_name: HashMap<String, RowIdx>,
}

impl ClusterTable {
    /// Create a table, rejecting rows that do not match the schema or reuse a name
    pub fn new(schema: TableSchema, rows: Vec<ClusterRow>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.n_cells() != schema.n_columns() {
                return Err(ParamergeError::invalid_data(format!(
                    "cluster '{}' has {} cells but the header has {} columns",
                    row.name,
                    row.n_cells(),
                    schema.n_columns()
                )));
            }
            if by_name.insert(row.name.clone(), RowIdx::from(i)).is_some() {
                return Err(ParamergeError::DuplicateCluster {
                    name: row.name.clone(),
                });
            }
        }
        Ok(Self {
            schema,
            rows,
            by_name,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of split clusters
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ClusterRow] {
        &self.rows
    }

    pub fn row(&self, idx: RowIdx) -> &ClusterRow {
        &self.rows[idx.as_usize()]
    }

    pub fn name(&self, idx: RowIdx) -> &str {
        &self.rows[idx.as_usize()].name
    }

    /// Row position of a cluster name
    pub fn index_of(&self, name: &str) -> Option<RowIdx> {
        self.by_name.get(name).copied()
    }

    /// Cluster names in original order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }
}

/// Header plus rows of string cells, ready for a writer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Data rows, header excluded
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Header followed by data rows
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}
