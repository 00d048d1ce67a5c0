//! # Presence/Absence Matrix
//!
//! Bit-packed clusters x strains possession matrix derived from the collapsed
//! table. Stored one bit column per strain so pairwise strain comparisons are
//! word-wide AND/XOR operations.

use bitvec::prelude::*;

use crate::data::table::ClusterRow;

/// Boolean possession matrix: bit set iff the strain cell is non-empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresenceMatrix {
    /// One bit vector per strain, `n_rows` bits each
    columns: Vec<BitVec<u64, Lsb0>>,
    /// Number of strains possessing each row
    row_counts: Vec<u32>,
    n_rows: usize,
}

impl PresenceMatrix {
    /// Build from rows; every row must have `n_strains` strain cells
    pub fn from_rows(rows: &[ClusterRow], n_strains: usize) -> Self {
        let n_rows = rows.len();
        let mut columns = vec![bitvec![u64, Lsb0; 0; n_rows]; n_strains];
        let mut row_counts = vec![0u32; n_rows];

        for (r, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.strains.len(), n_strains);
            for (s, column) in columns.iter_mut().enumerate() {
                if row.is_present(s) {
                    column.set(r, true);
                    row_counts[r] += 1;
                }
            }
        }

        Self {
            columns,
            row_counts,
            n_rows,
        }
    }

    /// Build from explicit booleans, `cells[row][strain]`
    pub fn from_bools(cells: &[Vec<bool>], n_strains: usize) -> Self {
        let n_rows = cells.len();
        let mut columns = vec![bitvec![u64, Lsb0; 0; n_rows]; n_strains];
        let mut row_counts = vec![0u32; n_rows];
        for (r, row) in cells.iter().enumerate() {
            for (s, &present) in row.iter().enumerate().take(n_strains) {
                if present {
                    columns[s].set(r, true);
                    row_counts[r] += 1;
                }
            }
        }
        Self {
            columns,
            row_counts,
            n_rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_strains(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn get(&self, row: usize, strain: usize) -> bool {
        self.columns[strain][row]
    }

    /// Number of strains possessing `row`
    #[inline]
    pub fn row_count(&self, row: usize) -> usize {
        self.row_counts[row] as usize
    }

    /// Row-wise sums
    pub fn row_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.row_counts.iter().map(|&c| c as usize)
    }

    /// Bit column of one strain
    pub fn column(&self, strain: usize) -> &BitSlice<u64, Lsb0> {
        &self.columns[strain]
    }

    /// Backing words of one strain column; bits past `n_rows` are zero
    pub fn column_words(&self, strain: usize) -> &[u64] {
        self.columns[strain].as_raw_slice()
    }

    /// Rows possessed by exactly `k` strains, as a bit mask
    pub fn rows_with_count(&self, k: usize) -> BitVec<u64, Lsb0> {
        let mut mask = bitvec![u64, Lsb0; 0; self.n_rows];
        for (r, &c) in self.row_counts.iter().enumerate() {
            if c as usize == k {
                mask.set(r, true);
            }
        }
        mask
    }

    /// Rows possessed by every strain
    pub fn core_rows(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.n_strains();
        self.row_counts
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c as usize == n)
            .map(|(r, _)| r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, strains: &[&str]) -> ClusterRow {
        ClusterRow {
            name: name.to_string(),
            metadata: vec![],
            strains: strains.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![row("C1", &["g1", "", "g3\tg4"]), row("C2", &["", "", ""])];
        let m = PresenceMatrix::from_rows(&rows, 3);
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_strains(), 3);
        assert!(m.get(0, 0));
        assert!(!m.get(0, 1));
        assert!(m.get(0, 2));
        assert_eq!(m.row_count(0), 2);
        assert_eq!(m.row_count(1), 0);
        assert_eq!(m.row_counts().collect::<Vec<_>>(), vec![2, 0]);
    }

    #[test]
    fn test_core_rows_and_count_mask() {
        let m = PresenceMatrix::from_bools(
            &[vec![true, true], vec![true, false], vec![false, false]],
            2,
        );
        assert_eq!(m.core_rows().collect::<Vec<_>>(), vec![0]);
        let mask = m.rows_with_count(1);
        assert_eq!(mask.iter_ones().collect::<Vec<_>>(), vec![1]);
        assert_eq!(m.column(0).count_ones(), 2);
        assert_eq!(m.column_words(0), &[0b011u64]);
    }
}
