use log::debug;

use crate::{
    event_log::variant_log::VariantLog,
    process_tree::process_tree_struct::Node,
};

use super::abstraction::{IMDataStructure, InductiveDfg};

/// Leaf for abstractions that are a base case, [`None`] otherwise
pub fn evaluate<T: IMDataStructure>(obj: &T, depth: usize) -> Option<Node> {
    let node = obj.base_case();
    if let Some(node) = &node {
        debug!("[{}] Base case {} on {}", depth, node, T::KIND);
    }
    node
}

///
/// Base cases of a [`VariantLog`]
///
/// - No activity at all (no traces or only empty traces): silent leaf
/// - A single variant consisting of exactly one activity: leaf of that activity
///
/// Logs mixing empty traces with a single activity are not a base case. They are handled by the
/// empty-traces split.
///
pub fn variant_log_base_case(log: &VariantLog) -> Option<Node> {
    let alphabet = log.alphabet();
    if alphabet.is_empty() {
        return Some(Node::tau());
    }
    if alphabet.len() == 1 && log.variants.keys().all(|t| t.len() == 1) {
        return alphabet
            .first()
            .map(|a| Node::new_leaf(Some(a.to_string())));
    }
    None
}

///
/// Base cases of an [`InductiveDfg`]
///
/// - No activity at all: silent leaf
/// - A single non-skippable activity without directly-follows relations: leaf of that activity
///
pub fn dfg_base_case(dfg: &InductiveDfg) -> Option<Node> {
    let alphabet = dfg.dfg.alphabet();
    if alphabet.is_empty() {
        return Some(Node::tau());
    }
    if alphabet.len() == 1 && !dfg.skip && dfg.dfg.directly_follows_relations.is_empty() {
        return alphabet
            .first()
            .map(|a| Node::new_leaf(Some(a.to_string())));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfg::dfg_struct::DirectlyFollowsGraph;

    #[test]
    fn empty_logs() {
        assert_eq!(variant_log_base_case(&VariantLog::new()), Some(Node::tau()));
        let only_empty = VariantLog::from_traces(vec![(Vec::<&str>::new(), 3)]);
        assert_eq!(variant_log_base_case(&only_empty), Some(Node::tau()));
        assert_eq!(dfg_base_case(&InductiveDfg::default()), Some(Node::tau()));
    }

    #[test]
    fn single_activity() {
        let log = VariantLog::from_traces(vec![(vec!["a"], 3)]);
        assert_eq!(
            variant_log_base_case(&log),
            Some(Node::new_leaf(Some("a".to_string())))
        );
        let repeated = VariantLog::from_traces(vec![(vec!["a", "a"], 1)]);
        assert_eq!(variant_log_base_case(&repeated), None);

        let dfg = InductiveDfg::from_variant_log(&log);
        assert_eq!(
            dfg_base_case(&dfg),
            Some(Node::new_leaf(Some("a".to_string())))
        );
        let self_loop = InductiveDfg::new(DirectlyFollowsGraph::from(&repeated), false);
        assert_eq!(dfg_base_case(&self_loop), None);
    }

    #[test]
    fn optional_activity_is_no_base_case() {
        let log = VariantLog::from_traces(vec![(vec!["b"], 2), (vec![], 1)]);
        assert_eq!(variant_log_base_case(&log), None);

        let dfg = InductiveDfg::from_variant_log(&log);
        assert!(dfg.skip);
        assert_eq!(dfg_base_case(&dfg), None);
        assert_eq!(
            dfg_base_case(&InductiveDfg::new(Default::default(), true)),
            Some(Node::tau())
        );
    }

    #[test]
    fn no_base_case_for_two_activities() {
        let log = VariantLog::from_traces(vec![(vec!["a"], 1), (vec!["b"], 1)]);
        assert_eq!(variant_log_base_case(&log), None);
        assert_eq!(evaluate(&InductiveDfg::from_variant_log(&log), 0), None);
    }
}
