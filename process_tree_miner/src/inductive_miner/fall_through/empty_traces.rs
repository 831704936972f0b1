use crate::{
    event_log::variant_log::VariantLog,
    inductive_miner::{abstraction::InductiveDfg, cuts::cut_finder::CutResult},
    process_tree::process_tree_struct::OperatorType,
};

/// `X(empty traces, non-empty traces)` for logs containing both
pub fn split_variant_log(log: &VariantLog) -> Option<CutResult<VariantLog>> {
    if !(log.has_empty_trace() && log.has_non_empty_trace()) {
        return None;
    }
    let empty = VariantLog {
        variants: log
            .variants
            .iter()
            .filter(|(t, _)| t.is_empty())
            .map(|(t, m)| (t.clone(), *m))
            .collect(),
    };
    Some(CutResult::new(
        OperatorType::ExclusiveChoice,
        vec![empty, log.without_empty_traces()],
    ))
}

/// `X(tau, graph)` for skippable, non-empty graphs
pub fn split_dfg(dfg: &InductiveDfg) -> Option<CutResult<InductiveDfg>> {
    if !dfg.skip || dfg.is_empty() {
        return None;
    }
    Some(CutResult::new(
        OperatorType::ExclusiveChoice,
        vec![
            InductiveDfg::default(),
            InductiveDfg::new(dfg.dfg.clone(), false),
        ],
    ))
}
