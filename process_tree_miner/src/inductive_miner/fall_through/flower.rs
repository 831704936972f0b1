use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::VariantLog,
    inductive_miner::{abstraction::InductiveDfg, cuts::cut_finder::CutResult},
    process_tree::process_tree_struct::OperatorType,
};

/// `*(tau, X(a_1, ..., a_n))` over the alphabet of the log
pub fn flower_variant_log(log: &VariantLog) -> CutResult<VariantLog> {
    let redo = VariantLog::from_traces(log.alphabet().into_iter().map(|a| (vec![a], 1)));
    CutResult::new(OperatorType::Loop, vec![VariantLog::new(), redo])
}

/// `*(tau, X(a_1, ..., a_n))` over the activities of the graph
pub fn flower_dfg(dfg: &InductiveDfg) -> CutResult<InductiveDfg> {
    let mut redo = DirectlyFollowsGraph::new();
    for a in dfg.dfg.alphabet() {
        let frequency = dfg.dfg.activities.get(a).copied().unwrap_or(1);
        redo.add_activity(a.to_string(), frequency);
        redo.add_start_activity(a.to_string(), 1);
        redo.add_end_activity(a.to_string(), 1);
    }
    CutResult::new(
        OperatorType::Loop,
        vec![InductiveDfg::default(), InductiveDfg::new(redo, false)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flower_model() {
        let log = VariantLog::from_traces(vec![(vec!["b", "a", "b"], 1)]);
        let cut = flower_variant_log(&log);
        assert_eq!(cut.operator, OperatorType::Loop);
        assert!(cut.children[0].is_empty());
        assert_eq!(
            cut.children[1],
            VariantLog::from_traces(vec![(vec!["a"], 1), (vec!["b"], 1)])
        );

        let cut = flower_dfg(&InductiveDfg::from_variant_log(&log));
        assert!(cut.children[0].is_empty());
        let redo = &cut.children[1].dfg;
        assert!(redo.directly_follows_relations.is_empty());
        assert_eq!(redo.start_activities.len(), 2);
        assert_eq!(redo.activities.get("b"), Some(&2));
    }
}
