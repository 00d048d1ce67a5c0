//! # Table Schema
//!
//! ## Role
//! Explicit column layout of a Roary `gene_presence_absence.csv` table:
//! the ordered column names, where the strain columns begin, and where the
//! paralog annotation columns get inserted.
//!
//! ## Roary Versions
//! Roary 3.2.5 writes 11 metadata columns (`Gene` through `QC`) before the
//! strain columns. Roary 3.5.1 appends `Min group size nuc`,
//! `Max group size nuc` and `Avg group size nuc` to that prefix. Tables from
//! 3.5.1 are normalized to the 3.2.5 layout unless `normalize_legacy` is off.

use crate::error::{ParamergeError, Result};

/// Metadata columns written by Roary 3.2.5, in order
pub const ROARY_325_METADATA: [&str; 11] = [
    "Gene",
    "Non-unique Gene name",
    "Annotation",
    "No. isolates",
    "No. sequences",
    "Avg sequences per isolate",
    "Genome Fragment",
    "Order within Fragment",
    "Accessory Fragment",
    "Accessory Order with Fragment",
    "QC",
];

/// Extra metadata columns appended by Roary 3.5.1
pub const ROARY_351_EXTRA: [&str; 3] = [
    "Min group size nuc",
    "Max group size nuc",
    "Avg group size nuc",
];

/// Header of the paralog group size column
pub const NUM_PARALOGS_COLUMN: &str = "num_paralogs";

/// Header of the paralog group member list column
pub const PARALOG_GROUP_COLUMN: &str = "paralog_group";

/// Roary release whose table layout a header matches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoaryVersion {
    V3_2_5,
    V3_5_1,
}

impl RoaryVersion {
    /// Detect the layout from a header row.
    ///
    /// Anything that does not start with the 3.5.1 metadata prefix is treated as 3.2.5.
    pub fn detect(header: &[String]) -> Self {
        let prefix = ROARY_325_METADATA.iter().chain(ROARY_351_EXTRA.iter());
        let n_prefix = ROARY_325_METADATA.len() + ROARY_351_EXTRA.len();
        if header.len() >= n_prefix && header.iter().zip(prefix).all(|(h, p)| h == p) {
            RoaryVersion::V3_5_1
        } else {
            RoaryVersion::V3_2_5
        }
    }

    /// Number of leading metadata columns (including the cluster name)
    pub fn metadata_columns(self) -> usize {
        match self {
            RoaryVersion::V3_2_5 => ROARY_325_METADATA.len(),
            RoaryVersion::V3_5_1 => ROARY_325_METADATA.len() + ROARY_351_EXTRA.len(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoaryVersion::V3_2_5 => "3.2.5",
            RoaryVersion::V3_5_1 => "3.5.1",
        }
    }
}

/// Layout configuration handed to the reader and the table assembler
#[derive(Clone, Debug, PartialEq)]
pub struct TableLayout {
    /// Leading non-strain columns including the name; `None` detects from the header
    pub metadata_columns: Option<usize>,
    /// Number of columns kept before the inserted paralog annotation
    pub annotation_prefix: usize,
    /// Drop the Roary 3.5.1 extra columns so output matches the 3.2.5 layout
    pub normalize_legacy: bool,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            metadata_columns: None,
            annotation_prefix: 2,
            normalize_legacy: true,
        }
    }
}

/// A schema resolved against an actual header
#[derive(Clone, Debug)]
pub struct ResolvedLayout {
    pub schema: TableSchema,
    /// Source column indices to keep, `None` keeps every column
    pub keep: Option<Vec<usize>>,
    /// Layout detected from the source header
    pub version: RoaryVersion,
}

/// Ordered column names with explicit markers for the strain block and the annotation slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<String>,
    /// Index of the first strain column; column 0 is the cluster name
    first_strain: usize,
    /// Index at which `num_paralogs` / `paralog_group` are inserted
    annotation_at: usize,
}

impl TableSchema {
    /// Create a schema.
    ///
    /// Requires at least one metadata column (the name), at least one strain
    /// column, and an annotation slot inside the metadata block.
    pub fn new(columns: Vec<String>, first_strain: usize, annotation_at: usize) -> Result<Self> {
        if first_strain == 0 || first_strain >= columns.len() {
            return Err(ParamergeError::invalid_data(format!(
                "table has {} columns; {} metadata columns leaves no strain columns",
                columns.len(),
                first_strain
            )));
        }
        if annotation_at == 0 || annotation_at > first_strain {
            return Err(ParamergeError::config(format!(
                "annotation prefix must be between 1 and {} (metadata columns), got {}",
                first_strain, annotation_at
            )));
        }
        Ok(Self {
            columns,
            first_strain,
            annotation_at,
        })
    }

    /// Resolve the layout of a raw header row
    pub fn resolve(header: &[String], layout: &TableLayout) -> Result<ResolvedLayout> {
        if header.is_empty() {
            return Err(ParamergeError::invalid_data("split table has an empty header"));
        }

        let version = RoaryVersion::detect(header);
        let normalize = version == RoaryVersion::V3_5_1 && layout.normalize_legacy;

        let (columns, keep) = if normalize {
            let keep: Vec<usize> = header
                .iter()
                .enumerate()
                .filter(|(_, c)| !ROARY_351_EXTRA.contains(&c.as_str()))
                .map(|(i, _)| i)
                .collect();
            let columns = keep.iter().map(|&i| header[i].clone()).collect();
            (columns, Some(keep))
        } else {
            (header.to_vec(), None)
        };

        let metadata = layout.metadata_columns.unwrap_or(if normalize {
            RoaryVersion::V3_2_5.metadata_columns()
        } else {
            version.metadata_columns()
        });

        let schema = TableSchema::new(columns, metadata, layout.annotation_prefix)?;
        Ok(ResolvedLayout {
            schema,
            keep,
            version,
        })
    }

    /// All column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Header of the cluster name column
    pub fn name_column(&self) -> &str {
        &self.columns[0]
    }

    /// Metadata column names, excluding the cluster name
    pub fn metadata_columns(&self) -> &[String] {
        &self.columns[1..self.first_strain]
    }

    /// Strain column names
    pub fn strain_names(&self) -> &[String] {
        &self.columns[self.first_strain..]
    }

    pub fn n_strains(&self) -> usize {
        self.columns.len() - self.first_strain
    }

    pub fn first_strain(&self) -> usize {
        self.first_strain
    }

    pub fn annotation_at(&self) -> usize {
        self.annotation_at
    }

    /// Header of the annotated table: annotation columns spliced in at `annotation_at`
    pub fn annotated_header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns.len() + 2);
        header.extend_from_slice(&self.columns[..self.annotation_at]);
        header.push(NUM_PARALOGS_COLUMN.to_string());
        header.push(PARALOG_GROUP_COLUMN.to_string());
        header.extend_from_slice(&self.columns[self.annotation_at..]);
        header
    }

    /// Header of the paralog lookup table
    pub fn lookup_header(&self) -> Vec<String> {
        let mut header = self.columns[..self.annotation_at].to_vec();
        header.push(NUM_PARALOGS_COLUMN.to_string());
        header.push(PARALOG_GROUP_COLUMN.to_string());
        header
    }
}
