//! # Configuration Logic
//!
//! ## Role
//! CLI argument parsing and validation.
//!
//! ## Validation
//! - Input files must exist (`FileNotFound`)
//! - Frequency cutoffs must satisfy `0 < shell < soft_core < core <= 1`
//! - The outlier MAD multiplier must be positive
//!
//! ## Example CLI
//! ```bash
//! paramerge --roary roary_out --out merged --nickname copd --pairwise --nthreads 8
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::data::TableLayout;
use crate::error::{ParamergeError, Result};
use crate::io::roary::{GENE_PRESENCE_ABSENCE, UNSPLIT_GROUPS};
use crate::model::FrequencyCutoffs;

/// Merge paralogous Roary clusters and summarize the collapsed pan-genome
#[derive(Parser, Debug, Clone)]
#[command(name = "paramerge", version, about)]
pub struct Config {
    /// Roary output directory
    #[arg(long)]
    pub roary: PathBuf,

    /// Split table [default: <roary>/gene_presence_absence.csv]
    #[arg(long)]
    pub gpa: Option<PathBuf>,

    /// Unsplit clustering [default: <roary>/_inflated_unsplit_mcl_groups]
    #[arg(long)]
    pub unsplit: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(long)]
    pub out: PathBuf,

    /// Prefix of every output file name
    #[arg(long)]
    pub nickname: String,

    /// Leading non-strain columns, including the cluster name [default: detected]
    #[arg(long)]
    pub metadata_columns: Option<usize>,

    /// Columns kept before the inserted num_paralogs/paralog_group columns
    #[arg(long, default_value_t = 2)]
    pub annotation_prefix: usize,

    /// Keep the extra metadata columns of Roary >= 3.5 instead of dropping them
    #[arg(long)]
    pub keep_extra_columns: bool,

    /// Lower cutoff of the core class, as a fraction of strains
    #[arg(long, default_value_t = 0.99)]
    pub core: f64,

    /// Lower cutoff of the soft core class
    #[arg(long, default_value_t = 0.95)]
    pub soft_core: f64,

    /// Lower cutoff of the shell class
    #[arg(long, default_value_t = 0.15)]
    pub shell: f64,

    /// Write pairwise strain comparison tables and outliers
    #[arg(long)]
    pub pairwise: bool,

    /// Outlier threshold in median absolute deviations
    #[arg(long, default_value_t = 2.0)]
    pub outlier_mads: f64,

    /// Number of threads [default: all cores]
    #[arg(long)]
    pub nthreads: Option<usize>,

    /// Report span timings
    #[arg(long)]
    pub profile: bool,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,
}

impl Config {
    /// Parse command line arguments and validate them
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for path in [self.gpa_path(), self.unsplit_path()] {
            if !path.exists() {
                return Err(ParamergeError::FileNotFound { path });
            }
        }

        self.cutoffs().validate()?;

        if !(self.outlier_mads > 0.0) {
            return Err(ParamergeError::config(format!(
                "--outlier-mads must be positive, got {}",
                self.outlier_mads
            )));
        }
        if self.nthreads == Some(0) {
            return Err(ParamergeError::config("--nthreads must be at least 1"));
        }
        if self.nickname.is_empty() || self.nickname.contains(std::path::is_separator) {
            return Err(ParamergeError::config(format!(
                "--nickname must be a non-empty file name prefix, got '{}'",
                self.nickname
            )));
        }
        Ok(())
    }

    pub fn gpa_path(&self) -> PathBuf {
        self.gpa
            .clone()
            .unwrap_or_else(|| self.roary.join(GENE_PRESENCE_ABSENCE))
    }

    pub fn unsplit_path(&self) -> PathBuf {
        self.unsplit
            .clone()
            .unwrap_or_else(|| self.roary.join(UNSPLIT_GROUPS))
    }

    pub fn out_dir(&self) -> &Path {
        &self.out
    }

    /// Get number of threads to use
    pub fn nthreads(&self) -> usize {
        self.nthreads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn layout(&self) -> TableLayout {
        TableLayout {
            metadata_columns: self.metadata_columns,
            annotation_prefix: self.annotation_prefix,
            normalize_legacy: !self.keep_extra_columns,
        }
    }

    pub fn cutoffs(&self) -> FrequencyCutoffs {
        FrequencyCutoffs {
            core: self.core,
            soft_core: self.soft_core,
            shell: self.shell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn roary_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(GENE_PRESENCE_ABSENCE), "").unwrap();
        fs::write(dir.path().join(UNSPLIT_GROUPS), "").unwrap();
        dir
    }

    fn parse(dir: &Path, extra: &[&str]) -> Config {
        let roary = dir.to_string_lossy().to_string();
        let mut args = vec!["paramerge", "--roary", roary.as_str(), "--out", "out", "--nickname", "run"];
        args.extend_from_slice(extra);
        Config::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let dir = roary_dir();
        let config = parse(dir.path(), &[]);
        assert!(config.validate().is_ok());
        assert_eq!(config.cutoffs(), FrequencyCutoffs::default());
        assert_eq!(config.layout(), TableLayout::default());
        assert_eq!(config.gpa_path(), dir.path().join(GENE_PRESENCE_ABSENCE));
        assert!(!config.pairwise);
    }

    #[test]
    fn test_overrides() {
        let dir = roary_dir();
        let config = parse(
            dir.path(),
            &["--keep-extra-columns", "--metadata-columns", "14", "--annotation-prefix", "1"],
        );
        let layout = config.layout();
        assert!(!layout.normalize_legacy);
        assert_eq!(layout.metadata_columns, Some(14));
        assert_eq!(layout.annotation_prefix, 1);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(dir.path(), &[]);
        assert!(matches!(config.validate(), Err(ParamergeError::FileNotFound { .. })));
    }

    #[test]
    fn test_unordered_cutoffs_rejected() {
        let dir = roary_dir();
        let config = parse(dir.path(), &["--shell", "0.96"]);
        assert!(matches!(config.validate(), Err(ParamergeError::Config { .. })));
    }

    #[test]
    fn test_non_positive_mads_rejected() {
        let dir = roary_dir();
        let config = parse(dir.path(), &["--outlier-mads", "0"]);
        assert!(matches!(config.validate(), Err(ParamergeError::Config { .. })));
    }
}
