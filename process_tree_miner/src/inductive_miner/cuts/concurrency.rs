use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::VariantLog,
    inductive_miner::abstraction::InductiveDfg,
    process_tree::process_tree_struct::OperatorType,
};

use super::cut_utils::{ActivityUnionFind, Group, Partition};

///
/// Concurrency cut
///
/// Activities are kept apart only if they directly follow each other in both directions.
/// Activities that witness the minimum self-distance of each other (`witnesses`) are never
/// separated, since they indicate a loop rather than interleaving.
///
/// Every resulting group must contain a start and an end activity; groups violating this are
/// merged into another group until all groups qualify.
///
pub fn detect<'a>(
    dfg: &'a DirectlyFollowsGraph,
    witnesses: &BTreeMap<&str, BTreeSet<&str>>,
) -> Option<Partition<'a>> {
    let alphabet = dfg.alphabet();
    let is_witness = |a: &str, b: &str| witnesses.get(a).is_some_and(|w| w.contains(b));

    let mut uf = ActivityUnionFind::new(&alphabet);
    for (a, b) in alphabet.iter().copied().tuple_combinations() {
        let both_directions = dfg.contains_df_relation((a, b)) && dfg.contains_df_relation((b, a));
        if !both_directions || is_witness(a, b) || is_witness(b, a) {
            uf.union(a, b);
        }
    }
    let mut groups = uf.into_groups();
    groups.sort_by(|g1, g2| g1.len().cmp(&g2.len()).then_with(|| g1.first().cmp(&g2.first())));

    let mut i = 0;
    while i < groups.len() && groups.len() > 1 {
        let has_start = groups[i].iter().any(|a| dfg.is_start_activity(a));
        let has_end = groups[i].iter().any(|a| dfg.is_end_activity(a));
        if has_start && has_end {
            i += 1;
            continue;
        }
        let group = groups.remove(i);
        let target = if i == 0 { 0 } else { i - 1 };
        groups[target].extend(group);
        i = 0;
    }

    (groups.len() > 1).then(|| Partition::new(OperatorType::Concurrency, groups))
}

/// Restrict every trace to each group
pub fn project_variants(log: &VariantLog, groups: &[Group<'_>]) -> Vec<VariantLog> {
    groups.iter().map(|g| log.project_on(g)).collect()
}

/// Restrict the graph (including start and end activities) to each group
///
/// An empty trace executes no branch, so every branch of a skippable graph is skippable.
pub fn project_dfg(dfg: &InductiveDfg, groups: &[Group<'_>]) -> Vec<InductiveDfg> {
    groups
        .iter()
        .map(|g| InductiveDfg::new(dfg.dfg.restrict_to(g), dfg.skip))
        .collect()
}
