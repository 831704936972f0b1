use crate::{
    event_log::variant_log::VariantLog,
    inductive_miner::{
        cuts::cut_finder::{find_cut, CutResult},
        full::InductiveMinerConfig,
    },
    process_tree::process_tree_struct::OperatorType,
};

///
/// Put the smallest activity whose removal lets a cut succeed in parallel to the rest of the log
///
/// Returns [`None`] if no single activity removal yields a cut.
///
pub fn apply(log: &VariantLog, config: &InductiveMinerConfig) -> Option<CutResult<VariantLog>> {
    let alphabet = log.alphabet();
    if alphabet.len() < 2 {
        return None;
    }
    alphabet
        .into_iter()
        .find(|a| find_cut(&log.filter_activities(|x| x != *a), config).is_some())
        .map(|a| split_off_activity(log, a))
}

/// `+(activity, rest)` where traces keep their multiplicity in both children
pub fn split_off_activity(log: &VariantLog, activity: &str) -> CutResult<VariantLog> {
    CutResult::new(
        OperatorType::Concurrency,
        vec![
            log.filter_activities(|a| a == activity),
            log.filter_activities(|a| a != activity),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_concurrent() {
        let log = VariantLog::from_traces(vec![
            (vec!["a", "b", "c"], 1),
            (vec!["b", "a", "a", "c"], 1),
        ]);
        let cut = apply(&log, &InductiveMinerConfig::default()).unwrap();
        assert_eq!(cut.operator, OperatorType::Concurrency);
        assert_eq!(cut.children[0].alphabet(), vec!["a"].into_iter().collect());
        assert_eq!(
            cut.children[1],
            VariantLog::from_traces(vec![(vec!["b", "c"], 2)])
        );
    }

    #[test]
    fn single_activity_is_not_split_off() {
        let log = VariantLog::from_traces(vec![(vec!["a", "a"], 1)]);
        assert!(apply(&log, &InductiveMinerConfig::default()).is_none());
    }
}
