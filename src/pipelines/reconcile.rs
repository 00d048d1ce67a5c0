//! # Reconciliation Pipeline
//!
//! Orchestrates the full run:
//! 1. Load the split table and the unsplit clustering
//! 2. Index genes, group paralogs, validate the partition
//! 3. Annotate, merge and assemble the tables
//! 4. Summarize the collapsed table (and optionally compare strain pairs)
//! 5. Write every artifact
//!
//! Steps 2-4 are pure and stage everything in `ReconcileOutputs`; nothing is
//! written until they have all succeeded.

use tracing::{info, info_span, instrument, warn};

use crate::config::Config;
use crate::data::{ClusterTable, UnsplitCluster};
use crate::error::Result;
use crate::io::{ArtifactSink, ClusteringSource, OutputDir, RoaryDir};
use crate::model::pairwise::PairMeasure;
use crate::model::{
    assemble_tables, build_annotations, group_paralogs, merge_all, validate_partition,
    AssembledTables, FrequencyCutoffs, GeneIndex, PairwiseReport, PanGenomeSummary,
};
use crate::utils::threading::build_thread_pool;

pub const ANNOTATED_TABLE: &str = "gene_presence_absence_paralogs_annotated.csv";
pub const PARALOG_TABLE: &str = "paralog_table.csv";
pub const MERGED_TABLE: &str = "gene_presence_absence_paralogs_merged.csv";
pub const SUMMARY_STATISTICS: &str = "summary_statistics_merged.txt";
pub const BINARY_MATRIX: &str = "gene_presence_absence_merged.Rtab";
pub const CORE_GENES: &str = "core_genes_list_merged.txt";
pub const FSGM_INPUT: &str = "fsgm_input.txt";
pub const PAIRWISE_TABLE: &str = "pairwise_table.txt";
pub const PAIRWISE_STATS: &str = "pairwise_table_stats.txt";
pub const PAIRWISE_OUTLIERS: &str = "pairwise_outliers.tsv";

/// File name of a single-measure pairwise table
pub fn pairwise_single_table(measure: PairMeasure) -> String {
    format!("pairwise_{}_table.txt", measure.key())
}

/// Engine settings that do not come from the input files
#[derive(Clone, Debug, PartialEq)]
pub struct ReconcileOptions {
    pub cutoffs: FrequencyCutoffs,
    pub pairwise: bool,
    pub outlier_mads: f64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            cutoffs: FrequencyCutoffs::default(),
            pairwise: false,
            outlier_mads: 2.0,
        }
    }
}

impl From<&Config> for ReconcileOptions {
    fn from(config: &Config) -> Self {
        Self {
            cutoffs: config.cutoffs(),
            pairwise: config.pairwise,
            outlier_mads: config.outlier_mads,
        }
    }
}

/// Every staged artifact of one run
#[derive(Clone, Debug)]
pub struct ReconcileOutputs {
    pub tables: AssembledTables,
    pub summary: PanGenomeSummary,
    pub pairwise: Option<PairwiseReport>,
    pub n_groups: usize,
    pub n_multi_member: usize,
    outlier_mads: f64,
}

impl ReconcileOutputs {
    /// Write all artifacts in a fixed order
    pub fn write_to<K: ArtifactSink>(&self, sink: &mut K) -> Result<()> {
        sink.write_table(ANNOTATED_TABLE, &self.tables.annotated)?;
        sink.write_table(PARALOG_TABLE, &self.tables.lookup)?;
        sink.write_table(MERGED_TABLE, &self.tables.collapsed)?;
        sink.write_text(SUMMARY_STATISTICS, &self.summary.render_summary())?;
        sink.write_text(BINARY_MATRIX, &self.summary.render_rtab())?;
        sink.write_text(CORE_GENES, &self.summary.render_core_list())?;
        sink.write_text(FSGM_INPUT, &self.summary.render_fsgm())?;

        if let Some(report) = &self.pairwise {
            sink.write_text(PAIRWISE_TABLE, &report.render_combined())?;
            for measure in PairMeasure::SINGLE {
                sink.write_text(&pairwise_single_table(measure), &report.render_single(measure))?;
            }
            sink.write_text(PAIRWISE_STATS, &report.render_stats())?;
            sink.write_text(PAIRWISE_OUTLIERS, &report.render_outliers(self.outlier_mads))?;
        }
        Ok(())
    }
}

/// Run every engine stage on loaded inputs
#[instrument(name = "reconcile", skip_all, fields(n_clusters = table.len(), n_unsplit = unsplit.len()))]
pub fn reconcile(
    table: &ClusterTable,
    unsplit: &[UnsplitCluster],
    options: &ReconcileOptions,
) -> Result<ReconcileOutputs> {
    let index = info_span!("index_genes").in_scope(|| GeneIndex::from_table(table))?;
    info!(n_genes = index.len(), n_clusters = index.n_clusters(), "indexed genes");

    let groups = info_span!("group_paralogs").in_scope(|| group_paralogs(&index, unsplit))?;
    let groups = info_span!("validate_partition").in_scope(|| validate_partition(groups, table))?;
    let n_groups = groups.len();
    let n_multi_member = groups.n_multi_member();
    info!(n_groups, n_multi_member, "paralog groups partition the split clusters");

    let tables = info_span!("assemble_tables").in_scope(|| {
        let annotations = build_annotations(&groups, table);
        let merged = merge_all(&groups, table);
        assemble_tables(table, &annotations, merged)
    })?;

    let summary = info_span!("summarize").in_scope(|| {
        PanGenomeSummary::from_rows(
            &tables.collapsed_rows,
            table.schema().strain_names(),
            options.cutoffs,
        )
    });
    info!(
        total = summary.total_genes(),
        core = summary.counts().core,
        soft_core = summary.counts().soft_core,
        shell = summary.counts().shell,
        cloud = summary.counts().cloud,
        "summarized collapsed table"
    );

    let pairwise = if !options.pairwise {
        None
    } else if summary.matrix().n_strains() < 2 {
        warn!(
            n_strains = summary.matrix().n_strains(),
            "pairwise comparison needs at least two strains, skipping"
        );
        None
    } else {
        let report = info_span!("pairwise").in_scope(|| {
            PairwiseReport::compute(summary.matrix(), summary.strain_names())
        })?;
        Some(report)
    };

    Ok(ReconcileOutputs {
        tables,
        summary,
        pairwise,
        n_groups,
        n_multi_member,
        outlier_mads: options.outlier_mads,
    })
}

/// Load from `source`, reconcile, then write to `sink`
pub fn run_reconcile<S, K>(source: &S, sink: &mut K, options: &ReconcileOptions) -> Result<ReconcileOutputs>
where
    S: ClusteringSource,
    K: ArtifactSink,
{
    let table = source.split_table()?;
    let unsplit = source.unsplit_clusters()?;
    let outputs = reconcile(&table, &unsplit, options)?;
    info_span!("write_artifacts").in_scope(|| outputs.write_to(sink))?;
    Ok(outputs)
}

/// Command line entry: Roary directory in, output directory out
pub struct ReconcilePipeline {
    config: Config,
}

impl ReconcilePipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[instrument(name = "reconcile_pipeline", skip(self))]
    pub fn run(&mut self) -> Result<ReconcileOutputs> {
        let source = RoaryDir::new(&self.config.roary, self.config.layout())
            .with_gpa(self.config.gpa_path())
            .with_unsplit(self.config.unsplit_path());
        let mut sink = OutputDir::new(&self.config.out, self.config.nickname.clone());
        let options = ReconcileOptions::from(&self.config);

        eprintln!("Split table: {:?}", source.gpa_path());
        eprintln!("Unsplit clusters: {:?}", source.unsplit_path());

        let pool = build_thread_pool(self.config.nthreads())?;
        let outputs = pool.install(|| run_reconcile(&source, &mut sink, &options))?;

        eprintln!(
            "Merged {} split clusters into {} rows ({} paralog groups with several members)",
            outputs.tables.annotated.n_rows(),
            outputs.n_groups,
            outputs.n_multi_member
        );
        eprintln!("Wrote {} files to {:?}", sink.written().len(), sink.dir());
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClusterRow, TableSchema};
    use crate::error::ParamergeError;
    use crate::io::MemorySink;

    fn table(rows: &[(&str, [&str; 2])]) -> ClusterTable {
        let schema = TableSchema::new(
            vec!["Gene", "Non-unique Gene name", "s1", "s2"]
                .into_iter()
                .map(String::from)
                .collect(),
            2,
            2,
        )
        .unwrap();
        let rows = rows
            .iter()
            .map(|(name, strains)| ClusterRow {
                name: name.to_string(),
                metadata: vec![String::new()],
                strains: strains.iter().map(|s| s.to_string()).collect(),
            })
            .collect();
        ClusterTable::new(schema, rows).unwrap()
    }

    fn unsplit(lines: &[&str]) -> Vec<UnsplitCluster> {
        lines.iter().filter_map(|l| UnsplitCluster::from_line(l)).collect()
    }

    #[test]
    fn test_valid_scenario() {
        let t = table(&[("C1", ["g1", ""]), ("C2", ["", "g2"]), ("C3", ["g3", ""])]);
        let outputs = reconcile(&t, &unsplit(&["g1 g2", "g3"]), &ReconcileOptions::default()).unwrap();

        assert_eq!(outputs.n_groups, 2);
        assert_eq!(outputs.tables.collapsed.n_rows(), 2);
        assert_eq!(outputs.tables.annotated.n_rows(), 3);
        for row in &outputs.tables.annotated.rows[..2] {
            assert_eq!(row[2], "2");
            assert_eq!(row[3], "C1\tC2");
        }
        assert_eq!(outputs.tables.collapsed.rows[0], vec!["C1\tC2", "", "g1", "g2"]);
        assert!(outputs.pairwise.is_none());
    }

    #[test]
    fn test_overlap_scenario() {
        let t = table(&[("C1", ["g1", "g2"]), ("C2", ["g3", ""]), ("C3", ["", "g4"])]);
        let result = reconcile(&t, &unsplit(&["g1 g3", "g2 g4"]), &ReconcileOptions::default());
        assert!(matches!(result, Err(ParamergeError::PartitionInvariant { .. })));
    }

    #[test]
    fn test_writes_every_artifact() {
        let t = table(&[("C1", ["g1", "g2"]), ("C2", ["g3", ""])]);
        let options = ReconcileOptions {
            pairwise: true,
            ..ReconcileOptions::default()
        };
        let outputs = reconcile(&t, &unsplit(&["g1 g2", "g3"]), &options).unwrap();
        let mut sink = MemorySink::new();
        outputs.write_to(&mut sink).unwrap();

        assert_eq!(sink.len(), 13);
        assert_eq!(sink.get(FSGM_INPUT), Some("1 1"));
        assert_eq!(sink.get(CORE_GENES), Some("C1"));
        assert!(sink.get(&pairwise_single_table(PairMeasure::PairUnique)).is_some());
    }

    #[test]
    fn test_pairwise_skipped_for_single_strain() {
        let schema = TableSchema::new(
            vec!["Gene", "Annotation", "s1"].into_iter().map(String::from).collect(),
            2,
            1,
        )
        .unwrap();
        let rows = vec![ClusterRow {
            name: "C1".to_string(),
            metadata: vec![String::new()],
            strains: vec!["g1".to_string()],
        }];
        let t = ClusterTable::new(schema, rows).unwrap();
        let options = ReconcileOptions {
            pairwise: true,
            ..ReconcileOptions::default()
        };
        let outputs = reconcile(&t, &unsplit(&["g1"]), &options).unwrap();
        assert!(outputs.pairwise.is_none());
    }
}
