//! # Paralog Grouper
//!
//! Maps every gene of every unsplit cluster through the gene index. The split
//! clusters reached from one unsplit cluster form one paralog group; several
//! genes from the same split cluster collapse to a single member.

use tracing::debug;

use crate::data::{ParalogGroup, ParalogGroups, UnsplitCluster, Unchecked};
use crate::error::{ParamergeError, Result};
use crate::model::index::GeneIndex;

/// One group per unsplit cluster, in input order
pub fn group_paralogs(
    index: &GeneIndex,
    unsplit: &[UnsplitCluster],
) -> Result<ParalogGroups<Unchecked>> {
    let mut groups = Vec::with_capacity(unsplit.len());

    for (i, cluster) in unsplit.iter().enumerate() {
        let members = cluster
            .genes()
            .iter()
            .map(|gene| index.owner(gene).ok_or_else(|| ParamergeError::unknown_gene(gene)))
            .collect::<Result<Vec<_>>>()?;

        let group = ParalogGroup::from_members(members).ok_or_else(|| {
            ParamergeError::invalid_data(format!("unsplit cluster {} has no genes", i + 1))
        })?;
        groups.push(group);
    }

    let groups = ParalogGroups::new_unchecked(groups);
    debug!(
        n_groups = groups.len(),
        n_multi_member = groups.n_multi_member(),
        "grouped unsplit clusters"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RowIdx;

    fn unsplit(lines: &[&str]) -> Vec<UnsplitCluster> {
        lines.iter().filter_map(|l| UnsplitCluster::from_line(l)).collect()
    }

    #[test]
    fn test_groups_follow_unsplit_order() {
        let index = GeneIndex::build(vec![
            ("C1", vec!["g1", "g2"]),
            ("C2", vec!["g3"]),
            ("C3", vec!["g4"]),
        ])
        .unwrap();
        let groups = group_paralogs(&index, &unsplit(&["g4", "g3 g1 g2"])).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.groups()[0].members(), &[RowIdx::new(2)]);
        assert_eq!(
            groups.groups()[1].members(),
            &[RowIdx::new(0), RowIdx::new(1)]
        );
    }

    #[test]
    fn test_unknown_gene() {
        let index = GeneIndex::build(vec![("C1", vec!["g1"])]).unwrap();
        let result = group_paralogs(&index, &unsplit(&["g1 gX"]));
        assert!(matches!(result, Err(ParamergeError::UnknownGene { ref gene }) if gene == "gX"));
    }

    #[test]
    fn test_empty_unsplit_cluster_rejected() {
        let index = GeneIndex::build(vec![("C1", vec!["g1"])]).unwrap();
        let result = group_paralogs(&index, &[UnsplitCluster::new(vec![])]);
        assert!(matches!(result, Err(ParamergeError::InvalidData { .. })));
    }
}
