use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    inductive_miner::{abstraction::IMDataStructure, full::InductiveMinerConfig},
    process_tree::process_tree_struct::OperatorType,
};

use super::{concurrency, cut_utils::Partition, exclusive_choice, loop_cut, sequence};

///
/// Operator together with one sub-abstraction per child
///
/// Produced by cuts and fall-throughs alike.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutResult<T> {
    /// Operator of the resulting node
    pub operator: OperatorType,
    /// Sub-abstractions, one per child of the node
    pub children: Vec<T>,
}

impl<T> CutResult<T> {
    /// Create a new [`CutResult`]
    pub fn new(operator: OperatorType, children: Vec<T>) -> Self {
        Self { operator, children }
    }
}

///
/// Try the cuts in order (exclusive choice, sequence, concurrency, loop) and return the
/// projection along the first cut found
///
pub fn find_cut<T: IMDataStructure>(obj: &T, config: &InductiveMinerConfig) -> Option<CutResult<T>> {
    let dfg = obj.directly_follows();
    let witnesses = obj.concurrency_witnesses();
    let partition = find_partition(&dfg, &witnesses, config, &|name| {
        trace!("No {} cut for {} {:?}", name, T::KIND, obj.alphabet())
    })?;
    Some(CutResult::new(partition.operator, obj.project(&partition)))
}

fn find_partition<'a>(
    dfg: &'a DirectlyFollowsGraph,
    witnesses: &BTreeMap<&str, BTreeSet<&str>>,
    config: &InductiveMinerConfig,
    on_reject: &dyn Fn(&str),
) -> Option<Partition<'a>> {
    let candidates: [(&str, &dyn Fn() -> Option<Partition<'a>>); 4] = [
        ("exclusive choice", &|| exclusive_choice::detect(dfg)),
        ("sequence", &|| sequence::detect(dfg, config.strict_sequence_cut)),
        ("concurrency", &|| concurrency::detect(dfg, witnesses)),
        ("loop", &|| loop_cut::detect(dfg)),
    ];
    for (name, detect) in candidates {
        if let Some(partition) = detect() {
            return Some(partition);
        }
        on_reject(name);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_log::variant_log::VariantLog, inductive_miner::abstraction::InductiveDfg};

    #[test]
    fn cuts_are_tried_in_order() {
        let config = InductiveMinerConfig::default();
        let choice = VariantLog::from_traces(vec![(vec!["a"], 1), (vec!["b"], 1)]);
        assert_eq!(
            find_cut(&choice, &config).map(|c| c.operator),
            Some(OperatorType::ExclusiveChoice)
        );

        let seq = VariantLog::from_traces(vec![(vec!["a", "b"], 1)]);
        assert_eq!(
            find_cut(&seq, &config).map(|c| c.operator),
            Some(OperatorType::Sequence)
        );

        let looping = VariantLog::from_traces(vec![(vec!["a", "b", "a"], 1)]);
        let cut = find_cut(&looping, &config).unwrap();
        assert_eq!(cut.operator, OperatorType::Loop);
        assert_eq!(cut.children.len(), 2);
    }

    #[test]
    fn no_cut_for_single_self_loop() {
        let config = InductiveMinerConfig::default();
        let log = VariantLog::from_traces(vec![(vec!["a", "a"], 1)]);
        assert!(find_cut(&log, &config).is_none());
        let dfg = InductiveDfg::new(DirectlyFollowsGraph::from(&log), false);
        assert!(find_cut(&dfg, &config).is_none());
    }
}
