//! # Table Assembler
//!
//! Builds the three table artifacts from the split table, the annotations and
//! the merged rows:
//!
//! 1. annotated table: every split cluster, `num_paralogs` and `paralog_group`
//!    spliced in at the schema's annotation slot
//! 2. paralog lookup table: the annotation prefix plus the two inserted columns
//! 3. collapsed table: original header, one row per group in anchor order

use crate::data::{ClusterRow, ClusterTable, Table};
use crate::error::{ParamergeError, Result};
use crate::model::annotation::ParalogAnnotation;
use crate::model::merge::MergedRow;

/// The staged table artifacts
#[derive(Clone, Debug)]
pub struct AssembledTables {
    pub annotated: Table,
    pub lookup: Table,
    pub collapsed: Table,
    /// Collapsed rows with named fields, input to the summary stage
    pub collapsed_rows: Vec<ClusterRow>,
}

/// Assemble annotated, lookup and collapsed tables.
///
/// `annotations` is indexed by row position and must cover the whole table;
/// `merged` must already be in anchor order.
pub fn assemble_tables(
    table: &ClusterTable,
    annotations: &[ParalogAnnotation],
    merged: Vec<MergedRow>,
) -> Result<AssembledTables> {
    if annotations.len() != table.len() {
        return Err(ParamergeError::invalid_data(format!(
            "{} annotations for {} split clusters",
            annotations.len(),
            table.len()
        )));
    }

    let schema = table.schema();
    let split_at = schema.annotation_at();

    let mut annotated_rows = Vec::with_capacity(table.len());
    let mut lookup_rows = Vec::with_capacity(table.len());
    for (row, annotation) in table.rows().iter().zip(annotations) {
        let mut cells: Vec<String> = Vec::with_capacity(row.n_cells() + 2);
        let mut source = row.cells();
        cells.extend(source.by_ref().take(split_at).map(str::to_string));

        let mut lookup = cells.clone();
        lookup.push(annotation.size_cell());
        lookup.push(annotation.members.clone());
        lookup_rows.push(lookup);

        cells.push(annotation.size_cell());
        cells.push(annotation.members.clone());
        cells.extend(source.map(str::to_string));
        annotated_rows.push(cells);
    }

    let collapsed_rows: Vec<ClusterRow> = merged.into_iter().map(|m| m.row).collect();
    let collapsed = Table::new(
        schema.columns().to_vec(),
        collapsed_rows
            .iter()
            .map(|r| r.cells().map(str::to_string).collect())
            .collect(),
    );

    Ok(AssembledTables {
        annotated: Table::new(schema.annotated_header(), annotated_rows),
        lookup: Table::new(schema.lookup_header(), lookup_rows),
        collapsed,
        collapsed_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ParalogGroup, ParalogGroups, RowIdx, TableSchema};
    use crate::model::annotation::build_annotations;
    use crate::model::merge::merge_all;
    use crate::model::partition::validate_partition;

    fn table() -> ClusterTable {
        let schema = TableSchema::new(
            vec!["Gene", "Non-unique", "Annotation", "s1", "s2"]
                .into_iter()
                .map(String::from)
                .collect(),
            3,
            2,
        )
        .unwrap();
        let rows = [
            ["C1", "", "kinase", "g1", ""],
            ["C2", "", "", "", "g2"],
            ["C3", "nu", "", "g3", "g4"],
        ]
        .iter()
        .map(|r| ClusterRow::from_cells(r.iter().map(|c| c.to_string()).collect(), &schema).unwrap())
        .collect();
        ClusterTable::new(schema, rows).unwrap()
    }

    fn assembled(t: &ClusterTable) -> AssembledTables {
        let groups = ParalogGroups::new_unchecked(vec![
            ParalogGroup::from_members([RowIdx::new(0), RowIdx::new(1)]).unwrap(),
            ParalogGroup::from_members([RowIdx::new(2)]).unwrap(),
        ]);
        let groups = validate_partition(groups, t).unwrap();
        let annotations = build_annotations(&groups, t);
        assemble_tables(t, &annotations, merge_all(&groups, t)).unwrap()
    }

    #[test]
    fn test_row_counts() {
        let t = table();
        let tables = assembled(&t);
        assert_eq!(tables.annotated.n_rows(), 3);
        assert_eq!(tables.lookup.n_rows(), 3);
        assert_eq!(tables.collapsed.n_rows(), 2);
        assert_eq!(tables.collapsed_rows.len(), 2);
    }

    #[test]
    fn test_annotation_columns_inserted() {
        let t = table();
        let tables = assembled(&t);
        assert_eq!(
            tables.annotated.header,
            vec!["Gene", "Non-unique", "num_paralogs", "paralog_group", "Annotation", "s1", "s2"]
        );
        assert_eq!(
            tables.annotated.rows[1],
            vec!["C2", "", "2", "C1\tC2", "", "", "g2"]
        );
        assert_eq!(tables.lookup.rows[2], vec!["C3", "nu", "1", "C3"]);
    }

    #[test]
    fn test_collapsed_keeps_original_header() {
        let t = table();
        let tables = assembled(&t);
        assert_eq!(tables.collapsed.header, t.schema().columns());
        assert_eq!(tables.collapsed.rows[0], vec!["C1\tC2", "", "kinase", "g1", "g2"]);
        assert_eq!(tables.collapsed.rows[1], vec!["C3", "nu", "", "g3", "g4"]);
    }

    #[test]
    fn test_annotation_count_mismatch() {
        let t = table();
        let result = assemble_tables(&t, &[], Vec::new());
        assert!(matches!(result, Err(ParamergeError::InvalidData { .. })));
    }
}
