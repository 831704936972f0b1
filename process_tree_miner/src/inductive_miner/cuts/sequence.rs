use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::VariantLog,
    inductive_miner::abstraction::InductiveDfg,
    process_tree::process_tree_struct::OperatorType,
};

use super::cut_utils::{group_index, merge_groups, ActivityUnionFind, Group, Partition};

///
/// Maximal sequence cut
///
/// Two activities end up in the same group if they can both reach each other or if neither can
/// reach the other (using the transitive closure of the directly-follows relation).
/// Groups are ordered by how early their activities occur, and the cut is rejected if an
/// activity of a later group can reach an activity of an earlier group.
///
/// With `strict` set, adjacent groups are additionally merged until skipping between them is
/// uniform (see [`merge_non_uniform_skips`]).
///
pub fn detect(dfg: &DirectlyFollowsGraph, strict: bool) -> Option<Partition<'_>> {
    let alphabet = dfg.alphabet();
    let successors = dfg.transitive_successors();
    let reaches = |a: &str, b: &str| successors.get(a).is_some_and(|s| s.contains(b));

    let mut uf = ActivityUnionFind::new(&alphabet);
    for (a, b) in alphabet.iter().copied().tuple_combinations() {
        if reaches(a, b) == reaches(b, a) {
            uf.union(a, b);
        }
    }
    let mut groups = uf.into_groups();
    if groups.len() < 2 {
        return None;
    }

    let mut num_predecessors: BTreeMap<&str, usize> = BTreeMap::new();
    for b in successors.values().flatten() {
        *num_predecessors.entry(*b).or_default() += 1;
    }
    let n = alphabet.len();
    let position = |a: &str| {
        num_predecessors.get(a).copied().unwrap_or_default() + n
            - successors.get(a).map(|s| s.len()).unwrap_or_default()
    };
    groups.sort_by_cached_key(|g| (g.iter().map(|a| position(*a)).min(), g.first().copied()));

    let index = group_index(&groups);
    for (a, reachable) in &successors {
        for b in reachable {
            if index.get(b) < index.get(a) {
                return None;
            }
        }
    }

    if strict {
        merge_non_uniform_skips(dfg, &mut groups);
    }
    (groups.len() > 1).then(|| Partition::new(OperatorType::Sequence, groups))
}

///
/// Merge adjacent groups `G_i`, `G_(i+1)` until skipping between every pair is uniform
///
/// The exits of `G_i` are its activities with a directly-follows relation to a later group or
/// which end a trace. An exit jumps if it leads past `G_(i+1)` (trace ends count as leading
/// past every group).
/// The entries of `G_(i+1)` are its activities with a relation from an earlier group or which
/// start a trace. An entry jumps if it is reached from before `G_i` (trace starts count as
/// coming from before every group).
///
/// Skipping is uniform if all exits agree on jumping and all entries agree on jumping.
///
pub fn merge_non_uniform_skips(dfg: &DirectlyFollowsGraph, groups: &mut Vec<Group<'_>>) {
    'fixpoint: loop {
        let index = group_index(groups);
        for i in 0..groups.len().saturating_sub(1) {
            if !skipping_is_uniform(dfg, &index, i) {
                merge_groups(groups, i, i + 1);
                continue 'fixpoint;
            }
        }
        break;
    }
}

fn skipping_is_uniform(dfg: &DirectlyFollowsGraph, index: &BTreeMap<&str, usize>, i: usize) -> bool {
    let mut exits: BTreeMap<&str, bool> = BTreeMap::new();
    let mut entries: BTreeMap<&str, bool> = BTreeMap::new();
    for (a, b) in dfg.directly_follows_relations.keys() {
        let (Some(&ia), Some(&ib)) = (index.get(a.as_str()), index.get(b.as_str())) else {
            continue;
        };
        if ia == i && ib > i {
            *exits.entry(a.as_str()).or_default() |= ib > i + 1;
        }
        if ib == i + 1 && ia < ib {
            *entries.entry(b.as_str()).or_default() |= ia < i;
        }
    }
    for a in dfg.end_activities.keys() {
        if index.get(a.as_str()) == Some(&i) {
            exits.insert(a.as_str(), true);
        }
    }
    for a in dfg.start_activities.keys() {
        if index.get(a.as_str()) == Some(&(i + 1)) {
            entries.insert(a.as_str(), true);
        }
    }
    exits.values().all_equal() && entries.values().all_equal()
}

/// Restrict every trace to each group, keeping traces that become empty
pub fn project_variants(log: &VariantLog, groups: &[Group<'_>]) -> Vec<VariantLog> {
    groups.iter().map(|g| log.project_on(g)).collect()
}

///
/// Split a directly-follows graph along a sequence cut
///
/// Relations between groups turn into end activities of their source group and start activities
/// of their target group. A group becomes skippable if a relation jumps over it, if a trace starts
/// after it, or if a trace ends before it.
///
pub fn project_dfg(dfg: &InductiveDfg, groups: &[Group<'_>]) -> Vec<InductiveDfg> {
    let index = group_index(groups);
    let mut children: Vec<InductiveDfg> = groups
        .iter()
        .map(|g| InductiveDfg::new(dfg.dfg.restrict_to(g), dfg.skip))
        .collect();

    for ((a, b), w) in &dfg.dfg.directly_follows_relations {
        let (Some(&ia), Some(&ib)) = (index.get(a.as_str()), index.get(b.as_str())) else {
            continue;
        };
        if ia < ib {
            children[ia].dfg.add_end_activity(a.clone(), *w);
            children[ib].dfg.add_start_activity(b.clone(), *w);
            children[ia + 1..ib].iter_mut().for_each(|c| c.skip = true);
        }
    }
    for a in dfg.dfg.start_activities.keys() {
        if let Some(&i) = index.get(a.as_str()) {
            children[..i].iter_mut().for_each(|c| c.skip = true);
        }
    }
    for a in dfg.dfg.end_activities.keys() {
        if let Some(&i) = index.get(a.as_str()) {
            children[i + 1..].iter_mut().for_each(|c| c.skip = true);
        }
    }
    children
}
