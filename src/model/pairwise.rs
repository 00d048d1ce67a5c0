//! # Pairwise Strain Comparison
//!
//! ## Role
//! Counts, for every unordered strain pair `(i, j)` with `i < j`:
//! - similarity: clusters present in both strains
//! - difference: clusters present in exactly one of the two
//! - comparison: similarity minus difference
//! - pair unique: clusters present in exactly these two strains and no other
//!
//! Counting works on whole `u64` words of the presence matrix columns, and
//! pairs are spread over rayon. Results are collected in `(i, j)` order.
//!
//! ## Outliers
//! For similarity, difference and pair unique, the global median and MAD are
//! taken over all pair values. Each strain's median over its own pairs is
//! flagged `low` when `strain_median + k * MAD < global_median` and `high`
//! when `strain_median - k * MAD > global_median`.

use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use crate::data::PresenceMatrix;
use crate::error::{ParamergeError, Result};

/// Counts for one strain pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairwiseComparison {
    pub first: usize,
    pub second: usize,
    pub similarity: u64,
    pub difference: u64,
    pub pair_unique: u64,
}

impl PairwiseComparison {
    pub fn comparison(&self) -> i64 {
        self.similarity as i64 - self.difference as i64
    }

    pub fn value(&self, measure: PairMeasure) -> i64 {
        match measure {
            PairMeasure::Similarity => self.similarity as i64,
            PairMeasure::Difference => self.difference as i64,
            PairMeasure::Comparison => self.comparison(),
            PairMeasure::PairUnique => self.pair_unique as i64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairMeasure {
    Similarity,
    Difference,
    Comparison,
    PairUnique,
}

impl PairMeasure {
    pub const ALL: [PairMeasure; 4] = [
        PairMeasure::Similarity,
        PairMeasure::Difference,
        PairMeasure::Comparison,
        PairMeasure::PairUnique,
    ];

    /// Measures written as standalone tables and screened for outliers
    pub const SINGLE: [PairMeasure; 3] = [
        PairMeasure::Similarity,
        PairMeasure::Difference,
        PairMeasure::PairUnique,
    ];

    /// Row label in the combined and stats tables
    pub fn label(self) -> &'static str {
        match self {
            PairMeasure::Similarity => "Similarity",
            PairMeasure::Difference => "Difference",
            PairMeasure::Comparison => "Comparison",
            PairMeasure::PairUnique => "PairUnique",
        }
    }

    /// Key used in file names and the outlier report
    pub fn key(self) -> &'static str {
        match self {
            PairMeasure::Similarity => "similarity",
            PairMeasure::Difference => "difference",
            PairMeasure::Comparison => "comparison",
            PairMeasure::PairUnique => "pair_unique",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlierDirection {
    Low,
    High,
}

impl fmt::Display for OutlierDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierDirection::Low => f.write_str("low"),
            OutlierDirection::High => f.write_str("high"),
        }
    }
}

/// A strain whose pair values sit far from the pan-genome median
#[derive(Clone, Debug, PartialEq)]
pub struct StrainOutlier {
    pub strain: String,
    pub measure: PairMeasure,
    pub direction: OutlierDirection,
    pub strain_median: f64,
    pub pan_genome_median: f64,
}

/// Min, max, mean and population standard deviation of one measure
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureStats {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub std_dev: f64,
}

/// All pair comparisons of a presence matrix
#[derive(Clone, Debug)]
pub struct PairwiseReport {
    strain_names: Vec<String>,
    /// Ordered by `(first, second)`
    pairs: Vec<PairwiseComparison>,
}

impl PairwiseReport {
    /// Compare every strain pair; needs at least two strains
    pub fn compute(matrix: &PresenceMatrix, strain_names: &[String]) -> Result<Self> {
        let n = matrix.n_strains();
        if n < 2 {
            return Err(ParamergeError::invalid_data(format!(
                "pairwise comparison needs at least two strains, found {}",
                n
            )));
        }
        if strain_names.len() != n {
            return Err(ParamergeError::invalid_data(format!(
                "{} strain names for {} matrix columns",
                strain_names.len(),
                n
            )));
        }

        let pair_mask = matrix.rows_with_count(2);
        let pair_mask = pair_mask.as_raw_slice();

        let pairs: Vec<PairwiseComparison> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
            .map(|(i, j)| compare_pair(matrix, pair_mask, i, j))
            .collect();

        debug!(n_strains = n, n_pairs = pairs.len(), "compared strain pairs");
        Ok(Self {
            strain_names: strain_names.to_vec(),
            pairs,
        })
    }

    pub fn n_strains(&self) -> usize {
        self.strain_names.len()
    }

    pub fn pairs(&self) -> &[PairwiseComparison] {
        &self.pairs
    }

    /// Comparison of strains `i < j`
    pub fn pair(&self, i: usize, j: usize) -> &PairwiseComparison {
        debug_assert!(i < j);
        let n = self.n_strains();
        &self.pairs[i * n - i * (i + 1) / 2 + (j - i - 1)]
    }

    /// Values of one measure over all pairs
    pub fn values(&self, measure: PairMeasure) -> Vec<i64> {
        self.pairs.iter().map(|p| p.value(measure)).collect()
    }

    /// Values of one measure over all pairs involving `strain`
    pub fn strain_values(&self, measure: PairMeasure, strain: usize) -> Vec<i64> {
        self.pairs
            .iter()
            .filter(|p| p.first == strain || p.second == strain)
            .map(|p| p.value(measure))
            .collect()
    }

    pub fn stats(&self, measure: PairMeasure) -> MeasureStats {
        let values = self.values(measure);
        let count = values.len() as f64;
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / count;
        let variance = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / count;
        MeasureStats {
            min: values.iter().copied().min().unwrap_or(0),
            max: values.iter().copied().max().unwrap_or(0),
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Strains whose median is more than `k` MADs from the global median
    pub fn outliers(&self, k: f64) -> Vec<StrainOutlier> {
        let mut outliers = Vec::new();
        for measure in PairMeasure::SINGLE {
            let values: Vec<f64> = self.values(measure).into_iter().map(|v| v as f64).collect();
            let global = median(&values);
            let deviations: Vec<f64> = values.iter().map(|v| (v - global).abs()).collect();
            let threshold = k * median(&deviations);
            if threshold <= 0.0 {
                continue;
            }

            for (s, strain) in self.strain_names.iter().enumerate() {
                let own: Vec<f64> = self
                    .strain_values(measure, s)
                    .into_iter()
                    .map(|v| v as f64)
                    .collect();
                let strain_median = median(&own);
                let direction = if strain_median + threshold < global {
                    Some(OutlierDirection::Low)
                } else if strain_median - threshold > global {
                    Some(OutlierDirection::High)
                } else {
                    None
                };
                if let Some(direction) = direction {
                    outliers.push(StrainOutlier {
                        strain: strain.clone(),
                        measure,
                        direction,
                        strain_median,
                        pan_genome_median: global,
                    });
                }
            }
        }
        outliers
    }

    /// Staircase table with all four measures, one line per (strain, measure)
    pub fn render_combined(&self) -> String {
        let n = self.n_strains();
        let mut out = format!("Strain\t{}\n", self.strain_names[1..].join("\t"));
        for row in 0..n - 1 {
            for measure in PairMeasure::ALL {
                out.push_str(&"\t".repeat(row));
                out.push_str(&self.strain_names[row]);
                for col in row + 1..n {
                    out.push('\t');
                    out.push_str(&self.pair(row, col).value(measure).to_string());
                }
                out.push('\t');
                out.push_str(measure.label());
                out.push('\n');
            }
        }
        out
    }

    /// Upper-triangular table of one measure, columns in reverse strain order
    pub fn render_single(&self, measure: PairMeasure) -> String {
        let n = self.n_strains();
        let reversed: Vec<&str> = self.strain_names[1..].iter().rev().map(String::as_str).collect();
        let mut out = format!("Strain\t{}\n", reversed.join("\t"));
        for row in 0..n - 1 {
            out.push_str(&self.strain_names[row]);
            for col in (row + 1..n).rev() {
                out.push('\t');
                out.push_str(&self.pair(row, col).value(measure).to_string());
            }
            out.push('\n');
        }
        out
    }

    pub fn render_stats(&self) -> String {
        let mut out = String::from("\tMin\tMax\tMean\tStdDev\n");
        for measure in PairMeasure::ALL {
            let stats = self.stats(measure);
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                measure.label(),
                stats.min,
                stats.max,
                stats.mean,
                stats.std_dev
            ));
        }
        out
    }

    pub fn render_outliers(&self, k: f64) -> String {
        let mut out = String::from("strain\tcomparison_type\tdirection\tstrain_median\tpan_genome_median\n");
        for o in self.outliers(k) {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                o.strain,
                o.measure.key(),
                o.direction,
                o.strain_median,
                o.pan_genome_median
            ));
        }
        out
    }
}

fn compare_pair(matrix: &PresenceMatrix, pair_mask: &[u64], i: usize, j: usize) -> PairwiseComparison {
    let a = matrix.column_words(i);
    let b = matrix.column_words(j);
    let mut similarity = 0u64;
    let mut difference = 0u64;
    let mut pair_unique = 0u64;
    for ((&wa, &wb), &wm) in a.iter().zip(b).zip(pair_mask) {
        similarity += (wa & wb).count_ones() as u64;
        difference += (wa ^ wb).count_ones() as u64;
        pair_unique += (wa & wb & wm).count_ones() as u64;
    }
    PairwiseComparison {
        first: i,
        second: j,
        similarity,
        difference,
        pair_unique,
    }
}

/// Median with the mean of the two middle values for even lengths; 0 when empty
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
