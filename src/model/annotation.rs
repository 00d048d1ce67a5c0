//! # Annotation Builder
//!
//! Per split cluster, the size of its paralog group and the tab-joined member
//! list. Every member of a group gets the same annotation.

use crate::data::{ClusterTable, ParalogGroups, RowIdx, Validated};

/// Group size and member list attached to one split cluster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParalogAnnotation {
    pub size: usize,
    /// Member names in ascending original row order, tab-joined
    pub members: String,
}

impl ParalogAnnotation {
    /// `num_paralogs` cell
    pub fn size_cell(&self) -> String {
        self.size.to_string()
    }
}

/// One annotation per split cluster, indexed by `RowIdx`.
///
/// Requires a validated partition so every row receives exactly one annotation.
pub fn build_annotations(
    groups: &ParalogGroups<Validated>,
    table: &ClusterTable,
) -> Vec<ParalogAnnotation> {
    let mut slots: Vec<Option<ParalogAnnotation>> = vec![None; table.len()];

    for group in groups {
        let annotation = ParalogAnnotation {
            size: group.len(),
            members: group.joined_names(table),
        };
        for &member in group.members() {
            slots[member.as_usize()] = Some(annotation.clone());
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            // Unreachable for a validated partition; fall back to a singleton.
            slot.unwrap_or_else(|| ParalogAnnotation {
                size: 1,
                members: table.name(RowIdx::from(i)).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClusterRow, ParalogGroup, TableSchema};
    use crate::model::partition::validate_partition;

    fn table(names: &[&str]) -> ClusterTable {
        let schema = TableSchema::new(
            vec!["Gene".to_string(), "Annotation".to_string(), "s1".to_string()],
            2,
            1,
        )
        .unwrap();
        let rows = names
            .iter()
            .map(|n| ClusterRow {
                name: n.to_string(),
                metadata: vec![String::new()],
                strains: vec![String::new()],
            })
            .collect();
        ClusterTable::new(schema, rows).unwrap()
    }

    #[test]
    fn test_members_share_annotation() {
        let t = table(&["C1", "C2", "C3"]);
        let groups = ParalogGroups::new_unchecked(vec![
            ParalogGroup::from_members([RowIdx::new(1), RowIdx::new(0)]).unwrap(),
            ParalogGroup::from_members([RowIdx::new(2)]).unwrap(),
        ]);
        let groups = validate_partition(groups, &t).unwrap();
        let annotations = build_annotations(&groups, &t);

        assert_eq!(annotations.len(), 3);
        assert_eq!(annotations[0], annotations[1]);
        assert_eq!(annotations[0].size_cell(), "2");
        assert_eq!(annotations[0].members, "C1\tC2");
        assert_eq!(annotations[2].size, 1);
        assert_eq!(annotations[2].members, "C3");
    }
}
