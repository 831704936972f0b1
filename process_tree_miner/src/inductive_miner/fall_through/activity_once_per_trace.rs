use std::collections::{BTreeMap, BTreeSet};

use crate::{event_log::variant_log::VariantLog, inductive_miner::cuts::cut_finder::CutResult};

use super::activity_concurrent::split_off_activity;

/// Activities occurring exactly once in every trace
pub fn once_per_trace_activities(log: &VariantLog) -> BTreeSet<&str> {
    let mut candidates: Option<BTreeSet<&str>> = None;
    for trace in log.variants.keys() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for a in trace {
            *counts.entry(a.as_str()).or_default() += 1;
        }
        let once: BTreeSet<&str> = counts
            .into_iter()
            .filter_map(|(a, c)| (c == 1).then_some(a))
            .collect();
        candidates = Some(match candidates {
            Some(c) => c.intersection(&once).copied().collect(),
            None => once,
        });
    }
    candidates.unwrap_or_default()
}

/// `+(a, rest)` for the smallest activity `a` occurring exactly once in every trace
pub fn apply(log: &VariantLog) -> Option<CutResult<VariantLog>> {
    if log.alphabet().len() < 2 {
        return None;
    }
    let candidates = once_per_trace_activities(log);
    let activity = candidates.first()?;
    Some(split_off_activity(log, activity))
}
