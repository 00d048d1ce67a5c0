//! # Partition State Marker Types
//!
//! Zero-sized marker types for compile-time tracking of whether a set of
//! paralog groups has passed the partition check.
//!
//! # Example
//!
//! ```ignore
//! // The grouper produces unchecked groups
//! let groups: ParalogGroups<Unchecked> = group_paralogs(&index, &unsplit)?;
//!
//! // Validation transforms Unchecked -> Validated
//! let groups: ParalogGroups<Validated> = validate_partition(groups, &table)?;
//!
//! // Annotation and merging require a validated partition
//! let annotations = build_annotations(&groups, &table);
//!
//! // This would NOT compile:
//! // build_annotations(&unchecked, &table);  // expected Validated, found Unchecked
//! ```

use std::fmt::Debug;

/// Marker trait for partition states.
///
/// Sealed: only `Unchecked` and `Validated` can be used as state parameters.
pub trait PartitionState: Copy + Clone + Default + Debug + private::Sealed {
    /// Whether groups in this state are known to partition the split clusters
    const IS_VALIDATED: bool;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Validated {}
    impl Sealed for super::Unchecked {}
}

/// Type state marker: groups are pairwise disjoint and cover every split cluster.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Validated;

impl PartitionState for Validated {
    const IS_VALIDATED: bool = true;
}

/// Type state marker: groups straight from the grouper, not yet checked.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Unchecked;

impl PartitionState for Unchecked {
    const IS_VALIDATED: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_state_constants() {
        assert!(Validated::IS_VALIDATED);
        assert!(!Unchecked::IS_VALIDATED);
    }

    #[test]
    fn test_zero_sized() {
        assert_eq!(std::mem::size_of::<Validated>(), 0);
        assert_eq!(std::mem::size_of::<Unchecked>(), 0);
    }
}
