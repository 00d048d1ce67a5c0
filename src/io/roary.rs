//! # Roary Output Reader
//!
//! Reads the two Roary files the engine needs:
//! - `gene_presence_absence.csv`: fully quoted CSV, annotations may contain
//!   commas, parsed with the `csv` crate
//! - `_inflated_unsplit_mcl_groups`: one unsplit cluster per line, genes
//!   separated by whitespace
//!
//! The header decides the Roary layout; 3.5.1 extra columns are dropped here
//! when the layout asks for normalization, so later stages never see them.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span};

use crate::data::schema::ResolvedLayout;
use crate::data::{ClusterRow, ClusterTable, RoaryVersion, TableLayout, TableSchema, UnsplitCluster};
use crate::error::{ParamergeError, Result};
use crate::io::ClusteringSource;

/// Split table file name inside a Roary output directory
pub const GENE_PRESENCE_ABSENCE: &str = "gene_presence_absence.csv";

/// Unsplit clustering file name inside a Roary output directory
pub const UNSPLIT_GROUPS: &str = "_inflated_unsplit_mcl_groups";

/// A Roary output directory, with optionally overridden input paths
#[derive(Clone, Debug)]
pub struct RoaryDir {
    gpa: PathBuf,
    unsplit: PathBuf,
    layout: TableLayout,
}

impl RoaryDir {
    pub fn new(dir: impl AsRef<Path>, layout: TableLayout) -> Self {
        let dir = dir.as_ref();
        Self {
            gpa: dir.join(GENE_PRESENCE_ABSENCE),
            unsplit: dir.join(UNSPLIT_GROUPS),
            layout,
        }
    }

    /// Read the split table from `path` instead
    pub fn with_gpa(mut self, path: impl Into<PathBuf>) -> Self {
        self.gpa = path.into();
        self
    }

    /// Read the unsplit clustering from `path` instead
    pub fn with_unsplit(mut self, path: impl Into<PathBuf>) -> Self {
        self.unsplit = path.into();
        self
    }

    pub fn gpa_path(&self) -> &Path {
        &self.gpa
    }

    pub fn unsplit_path(&self) -> &Path {
        &self.unsplit
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(ParamergeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

impl ClusteringSource for RoaryDir {
    fn split_table(&self) -> Result<ClusterTable> {
        info_span!("read_split_table", path = ?self.gpa).in_scope(|| {
            let file = open(&self.gpa)?;
            let (table, version) = read_split_table(BufReader::new(file), &self.layout)?;
            info!(
                n_clusters = table.len(),
                n_strains = table.schema().n_strains(),
                roary_version = version.as_str(),
                "loaded split table"
            );
            Ok(table)
        })
    }

    fn unsplit_clusters(&self) -> Result<Vec<UnsplitCluster>> {
        info_span!("read_unsplit", path = ?self.unsplit).in_scope(|| {
            let file = open(&self.unsplit)?;
            let clusters = read_unsplit(BufReader::new(file))?;
            info!(n_unsplit = clusters.len(), "loaded unsplit clusters");
            Ok(clusters)
        })
    }
}

/// Parse a gene presence/absence table.
///
/// Returns the table and the Roary layout detected from its header.
pub fn read_split_table<R: Read>(reader: R, layout: &TableLayout) -> Result<(ClusterTable, RoaryVersion)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(ParamergeError::invalid_data("split table is empty")),
    };
    let ResolvedLayout {
        schema,
        keep,
        version,
    } = TableSchema::resolve(&header, layout)?;
    debug!(
        roary_version = version.as_str(),
        n_columns = schema.n_columns(),
        first_strain = schema.first_strain(),
        normalized = keep.is_some(),
        "resolved table layout"
    );

    let mut rows = Vec::new();
    for (i, record) in records.enumerate() {
        let record = record?;
        // Header is line 1
        let line = i + 2;
        if record.len() != header.len() {
            return Err(ParamergeError::parse(
                line,
                format!("{} fields, header has {}", record.len(), header.len()),
            ));
        }
        let cells: Vec<String> = match &keep {
            Some(keep) => keep.iter().map(|&c| record[c].to_string()).collect(),
            None => record.iter().map(str::to_string).collect(),
        };
        rows.push(ClusterRow::from_cells(cells, &schema)?);
    }

    Ok((ClusterTable::new(schema, rows)?, version))
}

/// Parse an unsplit clustering, one cluster per non-blank line
pub fn read_unsplit<R: BufRead>(reader: R) -> Result<Vec<UnsplitCluster>> {
    let mut clusters = Vec::new();
    for line in reader.lines() {
        if let Some(cluster) = UnsplitCluster::from_line(&line?) {
            clusters.push(cluster);
        }
    }
    Ok(clusters)
}
