use crate::{
    event_log::variant_log::VariantLog, inductive_miner::cuts::cut_finder::CutResult,
    process_tree::process_tree_struct::OperatorType,
};

/// `*(segments, tau)` splitting traces where an end activity is directly followed by a start
/// activity
pub fn strict_tau_loop(log: &VariantLog) -> Option<CutResult<VariantLog>> {
    tau_loop_with(log, true)
}

/// `*(segments, tau)` splitting traces before every start activity
pub fn tau_loop(log: &VariantLog) -> Option<CutResult<VariantLog>> {
    tau_loop_with(log, false)
}

fn tau_loop_with(log: &VariantLog, strict: bool) -> Option<CutResult<VariantLog>> {
    let segments = segment_traces(log, strict);
    (segments.num_traces() > log.num_traces()).then(|| {
        CutResult::new(OperatorType::Loop, vec![segments, VariantLog::new()])
    })
}

/// Cut every trace before each start activity (if `strict`, only when it follows an end activity)
pub fn segment_traces(log: &VariantLog, strict: bool) -> VariantLog {
    let start = log.start_activities();
    let end = log.end_activities();
    let mut ret = VariantLog::new();
    for (trace, multiplicity) in &log.variants {
        let mut from = 0;
        for i in 1..trace.len() {
            if start.contains_key(trace[i].as_str())
                && (!strict || end.contains_key(trace[i - 1].as_str()))
            {
                ret.add_trace(trace[from..i].to_vec(), *multiplicity);
                from = i;
            }
        }
        ret.add_trace(trace[from..].to_vec(), *multiplicity);
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_tau_loop_on_repetitions() {
        let log = VariantLog::from_traces(vec![(vec!["a", "a", "a"], 1)]);
        let cut = strict_tau_loop(&log).unwrap();
        assert_eq!(cut.operator, OperatorType::Loop);
        assert_eq!(cut.children[0], VariantLog::from_traces(vec![(vec!["a"], 3)]));
        assert!(cut.children[1].is_empty());
    }

    #[test]
    fn tau_loop_splits_at_start_activities() {
        let log = VariantLog::from_traces(vec![(vec!["a", "b", "a"], 1), (vec!["a", "b"], 1)]);
        let strict = segment_traces(&log, true);
        assert_eq!(
            strict,
            VariantLog::from_traces(vec![(vec!["a", "b"], 2), (vec!["a"], 1)])
        );

        let log = VariantLog::from_traces(vec![(vec!["a", "b", "a", "c"], 1), (vec!["a", "c"], 1)]);
        assert!(strict_tau_loop(&log).is_none());
        let cut = tau_loop(&log).unwrap();
        assert_eq!(
            cut.children[0],
            VariantLog::from_traces(vec![(vec!["a", "b"], 1), (vec!["a", "c"], 2)])
        );
    }
}
