use std::collections::{BTreeMap, BTreeSet};

use petgraph::unionfind::UnionFind;

use crate::process_tree::process_tree_struct::OperatorType;

/// A group of activities of a [`Partition`]
pub type Group<'a> = BTreeSet<&'a str>;

/// Partition of an alphabet found by one of the cut candidates
///
/// The order of `groups` is meaningful for sequence and loop cuts (the first group of a loop
/// partition is the do-part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Operator of the cut
    pub operator: OperatorType,
    /// Disjoint activity groups, covering the whole alphabet
    pub groups: Vec<Group<'a>>,
}

impl<'a> Partition<'a> {
    /// Create a new [`Partition`]
    pub fn new(operator: OperatorType, groups: Vec<Group<'a>>) -> Self {
        Self { operator, groups }
    }
}

/// Index of the group containing each activity
pub fn group_index<'a>(groups: &[Group<'a>]) -> BTreeMap<&'a str, usize> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.iter().map(move |a| (*a, i)))
        .collect()
}

/// Union-find over a sorted alphabet, addressed by activity label
#[derive(Debug)]
pub struct ActivityUnionFind<'a> {
    activities: Vec<&'a str>,
    index: BTreeMap<&'a str, usize>,
    uf: UnionFind<usize>,
}

impl<'a> ActivityUnionFind<'a> {
    /// Every activity of `alphabet` starts in its own set
    pub fn new(alphabet: &BTreeSet<&'a str>) -> Self {
        let activities: Vec<&'a str> = alphabet.iter().copied().collect();
        let index = activities.iter().enumerate().map(|(i, a)| (*a, i)).collect();
        let uf = UnionFind::new(activities.len());
        Self {
            activities,
            index,
            uf,
        }
    }

    /// Merge the sets of `a` and `b`; unknown activities are ignored
    pub fn union(&mut self, a: &str, b: &str) {
        if let (Some(ia), Some(ib)) = (self.index.get(a), self.index.get(b)) {
            self.uf.union(*ia, *ib);
        }
    }

    /// Resulting groups, ordered by their smallest activity
    pub fn into_groups(self) -> Vec<Group<'a>> {
        let labels = self.uf.into_labeling();
        let mut by_rep: BTreeMap<usize, Group<'a>> = BTreeMap::new();
        for (i, rep) in labels.into_iter().enumerate() {
            by_rep.entry(rep).or_default().insert(self.activities[i]);
        }
        let mut groups: Vec<Group<'a>> = by_rep.into_values().collect();
        groups.sort_by(|g1, g2| g1.first().cmp(&g2.first()));
        groups
    }
}

/// Merge the groups at indices `i` and `j` into the position of the smaller index
pub fn merge_groups(groups: &mut Vec<Group<'_>>, i: usize, j: usize) {
    if i == j {
        return;
    }
    let (keep, remove) = if i < j { (i, j) } else { (j, i) };
    let removed = groups.remove(remove);
    groups[keep].extend(removed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find_groups_are_sorted() {
        let alphabet: BTreeSet<&str> = vec!["a", "b", "c", "d"].into_iter().collect();
        let mut uf = ActivityUnionFind::new(&alphabet);
        uf.union("d", "b");
        uf.union("x", "a");
        let groups = uf.into_groups();
        assert_eq!(
            groups,
            vec![
                vec!["a"].into_iter().collect::<Group<'_>>(),
                vec!["b", "d"].into_iter().collect(),
                vec!["c"].into_iter().collect(),
            ]
        );
        assert_eq!(group_index(&groups).get("d"), Some(&1));
    }

    #[test]
    fn merging_groups() {
        let mut groups: Vec<Group<'_>> = vec![
            vec!["a"].into_iter().collect(),
            vec!["b"].into_iter().collect(),
            vec!["c"].into_iter().collect(),
        ];
        merge_groups(&mut groups, 2, 0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec!["a", "c"].into_iter().collect());
        assert_eq!(groups[1], vec!["b"].into_iter().collect());
    }
}
