//! # Pan-Genome Summary
//!
//! ## Role
//! Everything derived from the presence matrix of the collapsed table:
//! frequency-class counts, the summary report, the binary `.Rtab` matrix,
//! the core gene list and the FSGM input line.
//!
//! ## Output Formats
//! - Summary: one `<class> (<range>):\t<count>` line per class, then the total.
//! - Rtab: tab-delimited, header `Gene` + strain names, `1`/`0` cells. Merged
//!   cluster names have their internal tabs rewritten to commas.
//! - Core list: names of clusters present in every strain, comma-joined.
//! - FSGM: for k = 1..=n, clusters present in exactly k strains, space-joined.

use crate::data::table::MERGE_DELIMITER;
use crate::data::{ClusterRow, PresenceMatrix};
use crate::model::frequency::{FrequencyClass, FrequencyCounts, FrequencyCutoffs};

/// Presence matrix and frequency statistics of the collapsed table
#[derive(Clone, Debug)]
pub struct PanGenomeSummary {
    matrix: PresenceMatrix,
    names: Vec<String>,
    strain_names: Vec<String>,
    cutoffs: FrequencyCutoffs,
    counts: FrequencyCounts,
}

impl PanGenomeSummary {
    /// Summarize collapsed rows; every row must have one cell per strain
    pub fn from_rows(rows: &[ClusterRow], strain_names: &[String], cutoffs: FrequencyCutoffs) -> Self {
        let n_strains = strain_names.len();
        let matrix = PresenceMatrix::from_rows(rows, n_strains);
        let counts = FrequencyCounts::tally(matrix.row_counts(), n_strains, &cutoffs);
        Self {
            matrix,
            names: rows.iter().map(|r| r.name.clone()).collect(),
            strain_names: strain_names.to_vec(),
            cutoffs,
            counts,
        }
    }

    pub fn matrix(&self) -> &PresenceMatrix {
        &self.matrix
    }

    pub fn strain_names(&self) -> &[String] {
        &self.strain_names
    }

    pub fn counts(&self) -> &FrequencyCounts {
        &self.counts
    }

    /// Number of collapsed clusters
    pub fn total_genes(&self) -> usize {
        self.names.len()
    }

    /// Frequency class of one collapsed row
    pub fn class_of(&self, row: usize) -> FrequencyClass {
        self.cutoffs
            .classify(self.matrix.row_count(row), self.matrix.n_strains())
    }

    /// Summary statistics report
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        for class in FrequencyClass::ALL {
            out.push_str(&format!(
                "{} ({}):\t{}\n",
                class.label(),
                self.cutoffs.describe(class),
                self.counts.get(class)
            ));
        }
        out.push_str(&format!(
            "Total genes (0% <= strains <= 100%):\t{}\n",
            self.total_genes()
        ));
        out
    }

    /// Binary presence/absence matrix in Rtab format
    pub fn render_rtab(&self) -> String {
        let mut out = String::from("Gene");
        for strain in &self.strain_names {
            out.push('\t');
            out.push_str(strain);
        }
        out.push('\n');

        for (r, name) in self.names.iter().enumerate() {
            out.push_str(&name.replace(MERGE_DELIMITER, ","));
            for s in 0..self.matrix.n_strains() {
                out.push_str(if self.matrix.get(r, s) { "\t1" } else { "\t0" });
            }
            out.push('\n');
        }
        out
    }

    /// Names of clusters present in every strain, in collapsed order
    pub fn core_genes(&self) -> Vec<&str> {
        self.matrix
            .core_rows()
            .map(|r| self.names[r].as_str())
            .collect()
    }

    pub fn render_core_list(&self) -> String {
        self.core_genes().join(",")
    }

    /// Clusters present in exactly k strains, k = 1..=n
    pub fn strain_count_histogram(&self) -> Vec<usize> {
        let n = self.matrix.n_strains();
        let mut histogram = vec![0usize; n + 1];
        for count in self.matrix.row_counts() {
            histogram[count] += 1;
        }
        histogram.into_iter().skip(1).collect()
    }

    /// Input line for the finite supragenome model
    pub fn render_fsgm(&self) -> String {
        self.strain_count_histogram()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
