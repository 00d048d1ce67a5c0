//! # Partition Validator
//!
//! ## Role
//! Guarantee that paralog groups form an exact partition of the split
//! clusters before anything is merged.
//!
//! ## Invariant
//! With `total = sum |group|` and `union = U groups`:
//! - `|union| == total` (no cluster in two groups)
//! - `|union| == |split clusters|` (every cluster in some group)
//!
//! A violation is fatal. The error names the clusters involved.

use bitvec::prelude::*;
use tracing::{debug, error};

use crate::data::{ClusterTable, ParalogGroups, RowIdx, Unchecked, Validated};
use crate::error::{ParamergeError, Result};

/// Promote groups to `Validated`, or fail with `PartitionInvariant`
pub fn validate_partition(
    groups: ParalogGroups<Unchecked>,
    table: &ClusterTable,
) -> Result<ParalogGroups<Validated>> {
    let n_clusters = table.len();
    let mut seen = bitvec![u64, Lsb0; 0; n_clusters];
    let mut repeated = bitvec![u64, Lsb0; 0; n_clusters];
    let mut total = 0usize;

    for group in &groups {
        for &member in group.members() {
            let m = member.as_usize();
            total += 1;
            if m >= n_clusters {
                return Err(ParamergeError::invalid_data(format!(
                    "paralog group references row {} but the table has {} clusters",
                    m, n_clusters
                )));
            }
            if seen[m] {
                repeated.set(m, true);
            } else {
                seen.set(m, true);
            }
        }
    }

    let covered = seen.count_ones();
    if covered != total || covered != n_clusters {
        let names = |bits: &BitSlice<u64, Lsb0>| -> Vec<String> {
            bits.iter_ones()
                .map(|i| table.name(RowIdx::from(i)).to_string())
                .collect()
        };
        let overlapping = names(repeated.as_bitslice());
        let missing = names((!seen).as_bitslice());
        error!(
            total,
            covered,
            expected = n_clusters,
            n_overlapping = overlapping.len(),
            n_missing = missing.len(),
            "paralog groups are not a partition"
        );
        return Err(ParamergeError::PartitionInvariant {
            total,
            covered,
            expected: n_clusters,
            overlapping,
            missing,
        });
    }

    debug!(n_groups = groups.len(), n_clusters, "partition check passed");
    Ok(groups.into_validated())
}
