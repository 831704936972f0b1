use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::{Variant, VariantLog},
    inductive_miner::abstraction::InductiveDfg,
    process_tree::process_tree_struct::OperatorType,
};

use super::cut_utils::{ActivityUnionFind, Group, Partition};

/// Connected components of the directly-follows graph (ignoring edge directions)
///
/// Returns [`None`] if the graph is connected.
pub fn detect(dfg: &DirectlyFollowsGraph) -> Option<Partition<'_>> {
    let alphabet = dfg.alphabet();
    let mut uf = ActivityUnionFind::new(&alphabet);
    for (a, b) in dfg.directly_follows_relations.keys() {
        uf.union(a, b);
    }
    let groups = uf.into_groups();
    (groups.len() > 1).then(|| Partition::new(OperatorType::ExclusiveChoice, groups))
}

/// Assign every trace to the group holding most of its events and restrict it to that group
///
/// Ties are resolved in favor of the group with the lowest index, so empty traces end up in the
/// first group.
pub fn project_variants(log: &VariantLog, groups: &[Group<'_>]) -> Vec<VariantLog> {
    let mut ret = vec![VariantLog::new(); groups.len()];
    for (trace, multiplicity) in &log.variants {
        let mut best = 0;
        let mut best_count = 0;
        for (i, g) in groups.iter().enumerate() {
            let count = trace.iter().filter(|a| g.contains(a.as_str())).count();
            if count > best_count {
                best = i;
                best_count = count;
            }
        }
        let projected: Variant = trace
            .iter()
            .filter(|a| groups[best].contains(a.as_str()))
            .cloned()
            .collect();
        ret[best].add_trace(projected, *multiplicity);
    }
    ret
}

/// Restrict the graph to each group
///
/// Empty traces of a skippable graph are assigned to the first branch, as in the variant
/// projection.
pub fn project_dfg(dfg: &InductiveDfg, groups: &[Group<'_>]) -> Vec<InductiveDfg> {
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| InductiveDfg::new(dfg.dfg.restrict_to(g), dfg.skip && i == 0))
        .collect()
}
