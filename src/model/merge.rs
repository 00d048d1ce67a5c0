//! # Row Merger
//!
//! ## Role
//! Collapse the rows of each paralog group into one row.
//!
//! ## Rules
//! - A singleton group yields its original row untouched.
//! - Otherwise every column is the tab-join of the non-empty member values,
//!   visiting members in ascending original row position. A column empty in
//!   every member stays empty.
//! - The merged row takes the position of its anchor (earliest member).
//!
//! Groups merge independently, so `merge_all` fans out over rayon and sorts by
//! anchor afterwards. The result is identical to a sequential run.

use rayon::prelude::*;
use tracing::debug;

use crate::data::table::MERGE_DELIMITER;
use crate::data::{ClusterRow, ClusterTable, ParalogGroup, ParalogGroups, RowIdx, Validated};

/// A collapsed row together with the original position it sorts by
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedRow {
    pub anchor: RowIdx,
    pub row: ClusterRow,
}

/// Append `value` to `cell` unless it is empty
#[inline]
fn push_value(cell: &mut String, value: &str) {
    if value.is_empty() {
        return;
    }
    if !cell.is_empty() {
        cell.push(MERGE_DELIMITER);
    }
    cell.push_str(value);
}

/// Merge one group's rows
pub fn merge_group(group: &ParalogGroup, table: &ClusterTable) -> MergedRow {
    let anchor = group.anchor();
    if group.is_singleton() {
        return MergedRow {
            anchor,
            row: table.row(anchor).clone(),
        };
    }

    let first = table.row(anchor);
    let mut merged = ClusterRow {
        name: String::new(),
        metadata: vec![String::new(); first.metadata.len()],
        strains: vec![String::new(); first.strains.len()],
    };

    for &member in group.members() {
        let row = table.row(member);
        push_value(&mut merged.name, &row.name);
        for (cell, value) in merged.metadata.iter_mut().zip(&row.metadata) {
            push_value(cell, value);
        }
        for (cell, value) in merged.strains.iter_mut().zip(&row.strains) {
            push_value(cell, value);
        }
    }

    MergedRow {
        anchor,
        row: merged,
    }
}

/// Merge every group, ordered by anchor ascending
pub fn merge_all(groups: &ParalogGroups<Validated>, table: &ClusterTable) -> Vec<MergedRow> {
    let mut merged: Vec<MergedRow> = groups
        .groups()
        .par_iter()
        .map(|group| merge_group(group, table))
        .collect();
    merged.sort_unstable_by_key(|m| m.anchor);

    debug!(
        n_merged = merged.len(),
        n_source = table.len(),
        "merged paralog groups"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableSchema;
    use crate::model::partition::validate_partition;

    fn table(rows: &[[&str; 4]]) -> ClusterTable {
        let schema = TableSchema::new(
            vec!["Gene", "Annotation", "s1", "s2"]
                .into_iter()
                .map(String::from)
                .collect(),
            2,
            1,
        )
        .unwrap();
        let rows = rows
            .iter()
            .map(|r| {
                ClusterRow::from_cells(r.iter().map(|c| c.to_string()).collect(), &schema).unwrap()
            })
            .collect();
        ClusterTable::new(schema, rows).unwrap()
    }

    fn group(members: &[u32]) -> ParalogGroup {
        ParalogGroup::from_members(members.iter().map(|&m| RowIdx::new(m))).unwrap()
    }

    #[test]
    fn test_singleton_is_identity() {
        let t = table(&[["C1", "", "g1", ""], ["C2", "kinase", "", "g2\tg3"]]);
        let merged = merge_group(&group(&[1]), &t);
        assert_eq!(merged.anchor, RowIdx::new(1));
        assert_eq!(&merged.row, t.row(RowIdx::new(1)));
    }

    #[test]
    fn test_column_merge_skips_empty_values() {
        let t = table(&[["A", "", "x", ""], ["", "B", "y\tz", ""]]);
        let merged = merge_group(&group(&[0, 1]), &t);
        assert_eq!(merged.row.name, "A");
        assert_eq!(merged.row.metadata, vec!["B"]);
        assert_eq!(merged.row.strains, vec!["x\ty\tz", ""]);
        assert_eq!(merged.anchor, RowIdx::new(0));
    }

    #[test]
    fn test_merge_order_follows_row_position() {
        let t = table(&[
            ["C1", "a", "g1", ""],
            ["C2", "b", "", ""],
            ["C3", "c", "g3", "g4"],
        ]);
        let forward = merge_group(&group(&[0, 2]), &t);
        let backward = merge_group(&group(&[2, 0]), &t);
        assert_eq!(forward, backward);
        assert_eq!(forward.row.name, "C1\tC3");
        assert_eq!(forward.row.metadata, vec!["a\tc"]);
        assert_eq!(forward.row.strains, vec!["g1\tg3", "g4"]);
    }

    #[test]
    fn test_merge_all_sorted_by_anchor() {
        let t = table(&[
            ["C1", "", "g1", ""],
            ["C2", "", "g2", ""],
            ["C3", "", "", "g3"],
            ["C4", "", "", "g4"],
        ]);
        let groups = ParalogGroups::new_unchecked(vec![group(&[3, 1]), group(&[2]), group(&[0])]);
        let groups = validate_partition(groups, &t).unwrap();
        let merged = merge_all(&groups, &t);

        let anchors: Vec<u32> = merged.iter().map(|m| m.anchor.0).collect();
        assert_eq!(anchors, vec![0, 1, 2]);
        assert_eq!(merged[1].row.name, "C2\tC4");
        assert_eq!(merged[1].row.strains, vec!["g2", "g4"]);
    }
}
