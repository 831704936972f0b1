use std::collections::BTreeSet;

use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::{Variant, VariantLog},
    inductive_miner::abstraction::InductiveDfg,
    process_tree::process_tree_struct::OperatorType,
};

use super::cut_utils::{ActivityUnionFind, Group, Partition};

///
/// Loop cut
///
/// The do-part starts out as all start and end activities. The remaining activities are split
/// into the connected components left after removing the do-part from the graph. Components are
/// then moved into the do-part if
///
/// - they are entered from a start activity that is not an end activity,
/// - they lead into an end activity that is not a start activity,
/// - one of their activities leads into a start activity but not into all start activities, or
/// - one of their activities is entered from an end activity but not from all end activities.
///
/// All remaining components together form the redo-part.
///
/// Graphs without start activities have no loop cut, since the do-part could never be entered.
///
pub fn detect(dfg: &DirectlyFollowsGraph) -> Option<Partition<'_>> {
    if dfg.directly_follows_relations.is_empty() {
        return None;
    }
    let alphabet = dfg.alphabet();
    let start: BTreeSet<&str> = dfg.start_activities.keys().map(String::as_str).collect();
    if start.is_empty() {
        return None;
    }
    let end: BTreeSet<&str> = dfg.end_activities.keys().map(String::as_str).collect();
    let do_part: Group<'_> = start.union(&end).copied().collect();

    let rest: BTreeSet<&str> = alphabet.difference(&do_part).copied().collect();
    let mut uf = ActivityUnionFind::new(&rest);
    for (a, b) in dfg.directly_follows_relations.keys() {
        uf.union(a, b);
    }
    let mut groups: Vec<Group<'_>> = vec![do_part];
    groups.extend(uf.into_groups());

    let edges: Vec<(&str, &str)> = dfg
        .directly_follows_relations
        .keys()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();

    // Successors of start activities which do not end a trace
    for a in start.difference(&end) {
        for (_, b) in edges.iter().filter(|(x, _)| x == a) {
            merge_into_front(&mut groups, a, b);
        }
    }
    // Predecessors of end activities which do not start a trace
    for b in end.difference(&start) {
        for (a, _) in edges.iter().filter(|(_, x)| x == b) {
            merge_into_front(&mut groups, a, b);
        }
    }

    let mut i = 1;
    while i < groups.len() {
        let incomplete = groups[i].iter().any(|a| {
            dfg.outgoing_activities(a).iter().any(|b| start.contains(b))
                && start.iter().any(|s| !dfg.contains_df_relation((*a, *s)))
        });
        if incomplete {
            let group = groups.remove(i);
            groups[0].extend(group);
        } else {
            i += 1;
        }
    }

    let mut i = 1;
    while i < groups.len() {
        let incomplete = groups[i].iter().any(|a| {
            dfg.ingoing_activities(a).iter().any(|b| end.contains(b))
                && end.iter().any(|e| !dfg.contains_df_relation((*e, *a)))
        });
        if incomplete {
            let group = groups.remove(i);
            groups[0].extend(group);
        } else {
            i += 1;
        }
    }

    groups.retain(|g| !g.is_empty());
    if groups.len() < 2 {
        return None;
    }
    let do_part = groups.remove(0);
    let redo_part: Group<'_> = groups.into_iter().flatten().collect();
    Some(Partition::new(OperatorType::Loop, vec![do_part, redo_part]))
}

/// Merge the groups of `a` and `b` and move the result to the front
fn merge_into_front(groups: &mut Vec<Group<'_>>, a: &str, b: &str) {
    let ga = groups.iter().position(|g| g.contains(a));
    let gb = groups.iter().position(|g| g.contains(b));
    if let (Some(ga), Some(gb)) = (ga, gb) {
        if ga != gb {
            let (first, second) = if ga < gb { (ga, gb) } else { (gb, ga) };
            let g2 = groups.remove(second);
            let mut merged = groups.remove(first);
            merged.extend(g2);
            groups.insert(0, merged);
        }
    }
}

///
/// Slice every trace into do- and redo-parts
///
/// Each maximal run of do-activities is a do-slice and each maximal run of redo-activities a
/// redo-slice. A trace always contributes a do-slice before and after every redo-slice, even if
/// that do-slice is empty.
///
pub fn project_variants(log: &VariantLog, groups: &[Group<'_>]) -> Vec<VariantLog> {
    let mut ret = vec![VariantLog::new(); groups.len()];
    for (trace, multiplicity) in &log.variants {
        let mut current: Variant = Vec::new();
        let mut current_group = 0;
        for a in trace {
            let group = groups
                .iter()
                .position(|g| g.contains(a.as_str()))
                .unwrap_or_default();
            if group != current_group {
                let slice = std::mem::take(&mut current);
                finish_slice(&mut ret, groups, current_group, slice, *multiplicity);
                if group != 0 && current_group != 0 {
                    // Two adjacent redo-slices are separated by an empty do-slice
                    ret[0].add_trace(Vec::new(), *multiplicity);
                }
                current_group = group;
            }
            current.push(a.clone());
        }
        finish_slice(&mut ret, groups, current_group, current, *multiplicity);
        if current_group != 0 {
            ret[0].add_trace(Vec::new(), *multiplicity);
        }
    }
    ret
}

fn finish_slice(
    ret: &mut [VariantLog],
    groups: &[Group<'_>],
    group: usize,
    slice: Variant,
    multiplicity: u64,
) {
    if group == 0 {
        ret[0].add_trace(slice, multiplicity);
        return;
    }
    // Route the redo-slice to the redo-group it overlaps most with
    let target = (1..groups.len())
        .max_by_key(|i| {
            (
                slice.iter().filter(|a| groups[*i].contains(a.as_str())).count(),
                std::cmp::Reverse(*i),
            )
        })
        .unwrap_or(group);
    ret[target].add_trace(slice, multiplicity);
}

///
/// Split a directly-follows graph along a loop cut
///
/// The do-part keeps the start and end activities of the parent. It is skippable if the parent
/// is, since an empty trace is a single empty do-slice. The redo-part starts with the targets of
/// relations from the do-part and ends with the sources of relations back into the do-part. It is
/// skippable if an end activity is directly followed by a start activity.
///
pub fn project_dfg(dfg: &InductiveDfg, groups: &[Group<'_>]) -> Vec<InductiveDfg> {
    let mut children: Vec<InductiveDfg> = groups
        .iter()
        .map(|g| InductiveDfg::new(dfg.dfg.restrict_to(g), false))
        .collect();
    children[0].skip = dfg.skip;
    let in_group = |i: usize, a: &str| groups[i].contains(a);

    for ((a, b), w) in &dfg.dfg.directly_follows_relations {
        for (i, child) in children.iter_mut().enumerate().skip(1) {
            if in_group(0, a.as_str()) && in_group(i, b.as_str()) {
                child.dfg.add_start_activity(b.clone(), *w);
            }
            if in_group(i, a.as_str()) && in_group(0, b.as_str()) {
                child.dfg.add_end_activity(a.clone(), *w);
            }
        }
    }
    let redo_skippable = dfg
        .dfg
        .directly_follows_relations
        .keys()
        .any(|(a, b)| dfg.dfg.is_end_activity(a) && dfg.dfg.is_start_activity(b));
    children
        .iter_mut()
        .skip(1)
        .for_each(|c| c.skip = redo_skippable);
    children
}
