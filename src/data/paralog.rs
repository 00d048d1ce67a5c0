//! # Paralog Groups
//!
//! Unsplit clusters as read from the MCL output, and the paralog groups
//! derived from them. A group stores its members as row positions sorted
//! ascending, so iterating a group always visits members in original table
//! order no matter how the unsplit cluster listed its genes.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use crate::data::partition_state::{PartitionState, Unchecked, Validated};
use crate::data::table::{ClusterTable, MERGE_DELIMITER};
use crate::data::RowIdx;

/// One line of the unsplit clustering: gene identifiers believed to be one family
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsplitCluster {
    genes: Vec<String>,
}

impl UnsplitCluster {
    pub fn new(genes: Vec<String>) -> Self {
        Self { genes }
    }

    /// Parse a whitespace separated line, `None` for a blank line
    pub fn from_line(line: &str) -> Option<Self> {
        let genes: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if genes.is_empty() {
            None
        } else {
            Some(Self { genes })
        }
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Split clusters that are mutual paralogs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParalogGroup {
    /// Sorted ascending, no duplicates, never empty
    members: Vec<RowIdx>,
}

impl ParalogGroup {
    /// Build a group from member rows in any order; `None` if there are no members
    pub fn from_members(members: impl IntoIterator<Item = RowIdx>) -> Option<Self> {
        let members: Vec<RowIdx> = members
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if members.is_empty() {
            None
        } else {
            Some(Self { members })
        }
    }

    /// Member rows in ascending original position
    pub fn members(&self) -> &[RowIdx] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Earliest original row among the members
    pub fn anchor(&self) -> RowIdx {
        self.members[0]
    }

    /// Member names in group-iteration order
    pub fn member_names<'a>(&'a self, table: &'a ClusterTable) -> impl Iterator<Item = &'a str> {
        self.members.iter().map(move |&m| table.name(m))
    }

    /// Tab-joined member names
    pub fn joined_names(&self, table: &ClusterTable) -> String {
        let mut joined = String::new();
        for (i, name) in self.member_names(table).enumerate() {
            if i > 0 {
                joined.push(MERGE_DELIMITER);
            }
            joined.push_str(name);
        }
        joined
    }
}

/// All paralog groups, tagged with whether they passed the partition check
#[derive(Clone, Debug)]
pub struct ParalogGroups<S: PartitionState = Unchecked> {
    groups: Vec<ParalogGroup>,
    _state: PhantomData<S>,
}

impl<S: PartitionState> ParalogGroups<S> {
    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[ParalogGroup] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParalogGroup> {
        self.groups.iter()
    }

    /// Sum of group sizes
    pub fn total_memberships(&self) -> usize {
        self.groups.iter().map(ParalogGroup::len).sum()
    }

    /// Groups with more than one member
    pub fn n_multi_member(&self) -> usize {
        self.groups.iter().filter(|g| !g.is_singleton()).count()
    }

    pub const fn is_validated() -> bool {
        S::IS_VALIDATED
    }
}

impl ParalogGroups<Unchecked> {
    pub fn new_unchecked(groups: Vec<ParalogGroup>) -> Self {
        Self {
            groups,
            _state: PhantomData,
        }
    }

    /// Only the partition validator may promote groups
    pub(crate) fn into_validated(self) -> ParalogGroups<Validated> {
        ParalogGroups {
            groups: self.groups,
            _state: PhantomData,
        }
    }
}

impl<'a, S: PartitionState> IntoIterator for &'a ParalogGroups<S> {
    type Item = &'a ParalogGroup;
    type IntoIter = std::slice::Iter<'a, ParalogGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsplit_from_line() {
        assert_eq!(UnsplitCluster::from_line("   \t "), None);
        let cluster = UnsplitCluster::from_line("g1 g2\tg3").unwrap();
        assert_eq!(cluster.genes(), &["g1", "g2", "g3"]);
        assert_eq!(cluster.len(), 3);
    }

    #[test]
    fn test_group_sorted_and_deduplicated() {
        let group =
            ParalogGroup::from_members([RowIdx::new(5), RowIdx::new(2), RowIdx::new(5)]).unwrap();
        assert_eq!(group.members(), &[RowIdx::new(2), RowIdx::new(5)]);
        assert_eq!(group.anchor(), RowIdx::new(2));
        assert!(!group.is_singleton());
    }

    #[test]
    fn test_empty_group_rejected() {
        assert!(ParalogGroup::from_members(std::iter::empty()).is_none());
    }

    #[test]
    fn test_anchor_independent_of_member_order() {
        let a = ParalogGroup::from_members([RowIdx::new(3), RowIdx::new(1), RowIdx::new(9)]).unwrap();
        let b = ParalogGroup::from_members([RowIdx::new(9), RowIdx::new(3), RowIdx::new(1)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.anchor(), RowIdx::new(1));
    }

    #[test]
    fn test_groups_counts() {
        let groups = ParalogGroups::new_unchecked(vec![
            ParalogGroup::from_members([RowIdx::new(0), RowIdx::new(1)]).unwrap(),
            ParalogGroup::from_members([RowIdx::new(2)]).unwrap(),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.total_memberships(), 3);
        assert_eq!(groups.n_multi_member(), 1);
        assert!(!ParalogGroups::<Unchecked>::is_validated());
    }
}
