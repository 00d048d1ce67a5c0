//! # Gene Index
//!
//! Inverted index from gene identifier to the split cluster that owns it.
//! Built in a single pass over the split table; a gene claimed by two
//! different clusters means the inputs are corrupt.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::data::{ClusterTable, RowIdx};
use crate::error::{ParamergeError, Result};

/// Gene identifier -> owning split cluster
#[derive(Clone, Debug, Default)]
pub struct GeneIndex {
    owners: HashMap<String, RowIdx>,
    /// Cluster names by row, for diagnostics
    names: Vec<String>,
}

impl GeneIndex {
    /// Build from ordered (cluster name, genes) pairs; pair `i` becomes `RowIdx(i)`
    pub fn build<I, N, G, S>(clusters: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, G)>,
        N: AsRef<str>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = GeneIndex::default();

        for (i, (name, genes)) in clusters.into_iter().enumerate() {
            let row = RowIdx::from(i);
            index.names.push(name.as_ref().to_string());

            for gene in genes {
                let gene = gene.as_ref();
                match index.owners.entry(gene.to_string()) {
                    Entry::Vacant(slot) => {
                        slot.insert(row);
                    }
                    Entry::Occupied(slot) => {
                        let first = *slot.get();
                        if first != row {
                            return Err(ParamergeError::DuplicateGene {
                                gene: gene.to_string(),
                                first: index.names[first.as_usize()].clone(),
                                second: index.names[row.as_usize()].clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(index)
    }

    /// Build from the split table in its original row order
    pub fn from_table(table: &ClusterTable) -> Result<Self> {
        Self::build(table.rows().iter().map(|r| (r.name.as_str(), r.genes())))
    }

    /// Owning row of a gene
    #[inline]
    pub fn owner(&self, gene: &str) -> Option<RowIdx> {
        self.owners.get(gene).copied()
    }

    /// Owning cluster name of a gene
    pub fn owner_name(&self, gene: &str) -> Option<&str> {
        self.owner(gene).map(|row| self.names[row.as_usize()].as_str())
    }

    /// Number of indexed genes
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Number of clusters the index was built from
    pub fn n_clusters(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_index() {
        let index = GeneIndex::build(vec![
            ("C1", vec!["g1", "g2"]),
            ("C2", vec!["g3"]),
            ("C3", vec![]),
        ])
        .unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.n_clusters(), 3);
        assert_eq!(index.owner("g2"), Some(RowIdx::new(0)));
        assert_eq!(index.owner_name("g3"), Some("C2"));
        assert_eq!(index.owner("g4"), None);
    }

    #[test]
    fn test_repeat_within_cluster_is_allowed() {
        let index = GeneIndex::build(vec![("C1", vec!["g1", "g1"])]).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicate_gene_across_clusters() {
        let result = GeneIndex::build(vec![("C1", vec!["g1"]), ("C2", vec!["g2", "g1"])]);
        match result {
            Err(ParamergeError::DuplicateGene { gene, first, second }) => {
                assert_eq!(gene, "g1");
                assert_eq!(first, "C1");
                assert_eq!(second, "C2");
            }
            other => panic!("expected DuplicateGene, got {:?}", other),
        }
    }
}
