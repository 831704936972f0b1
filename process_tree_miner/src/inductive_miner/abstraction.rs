use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use serde::{Deserialize, Serialize};

use crate::{
    dfg::dfg_struct::DirectlyFollowsGraph,
    event_log::variant_log::VariantLog,
    process_tree::process_tree_struct::{Node, OperatorType},
};

use super::{
    base_case,
    cuts::{
        concurrency, cut_finder::CutResult, cut_utils::Partition, exclusive_choice, loop_cut,
        sequence,
    },
    error::InductiveMinerError,
    fall_through::{empty_traces, resolver},
    full::InductiveMinerConfig,
};

///
/// Operations the discovery engine needs from a log abstraction
///
/// Implemented once per abstraction form ([`VariantLog`] and [`InductiveDfg`]).
///
pub trait IMDataStructure: Sized + Send {
    /// Name of the abstraction form, used in log messages and errors
    const KIND: &'static str;

    /// All activities of the abstraction
    fn alphabet(&self) -> BTreeSet<&str>;

    /// Directly-follows graph the cuts are searched on
    fn directly_follows(&self) -> Cow<'_, DirectlyFollowsGraph>;

    /// Pairs of activities that must not be separated by a concurrency cut
    fn concurrency_witnesses(&self) -> BTreeMap<&str, BTreeSet<&str>>;

    /// Leaf for abstractions that need no further splitting
    fn base_case(&self) -> Option<Node>;

    /// `X(tau, rest)` if the abstraction mixes empty and non-empty behavior
    fn split_empty_traces(&self) -> Option<CutResult<Self>>;

    /// One sub-abstraction per group of the partition
    fn project(&self, partition: &Partition<'_>) -> Vec<Self>;

    /// Ordered fall-throughs for abstractions without a cut
    fn fall_throughs(config: &InductiveMinerConfig) -> Vec<resolver::FallThrough<Self>>;
}

impl IMDataStructure for VariantLog {
    const KIND: &'static str = "variant log";

    fn alphabet(&self) -> BTreeSet<&str> {
        VariantLog::alphabet(self)
    }

    fn directly_follows(&self) -> Cow<'_, DirectlyFollowsGraph> {
        Cow::Owned(DirectlyFollowsGraph::from(self))
    }

    fn concurrency_witnesses(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        self.min_self_distance_witnesses()
    }

    fn base_case(&self) -> Option<Node> {
        base_case::variant_log_base_case(self)
    }

    fn split_empty_traces(&self) -> Option<CutResult<Self>> {
        empty_traces::split_variant_log(self)
    }

    fn project(&self, partition: &Partition<'_>) -> Vec<Self> {
        let groups = &partition.groups;
        match partition.operator {
            OperatorType::ExclusiveChoice => exclusive_choice::project_variants(self, groups),
            OperatorType::Sequence => sequence::project_variants(self, groups),
            OperatorType::Concurrency => concurrency::project_variants(self, groups),
            OperatorType::Loop => loop_cut::project_variants(self, groups),
        }
    }

    fn fall_throughs(config: &InductiveMinerConfig) -> Vec<resolver::FallThrough<Self>> {
        resolver::variant_log_fall_throughs(config)
    }
}

///
/// Directly-follows graph used by the Inductive Miner (directly-follows variant)
///
/// Empty traces leave no trace in a directly-follows graph, so their presence is tracked by the
/// separate `skip` flag.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductiveDfg {
    /// Directly-follows graph
    pub dfg: DirectlyFollowsGraph,
    /// Whether the underlying log contains empty traces
    #[serde(default)]
    pub skip: bool,
}

impl InductiveDfg {
    /// Create a new [`InductiveDfg`]
    pub fn new(dfg: DirectlyFollowsGraph, skip: bool) -> Self {
        Self { dfg, skip }
    }

    /// Directly-follows abstraction of a [`VariantLog`]
    pub fn from_variant_log(log: &VariantLog) -> Self {
        Self::new(DirectlyFollowsGraph::from(log), log.has_empty_trace())
    }

    /// Returns `true` if the graph contains no activity
    pub fn is_empty(&self) -> bool {
        self.dfg.alphabet().is_empty()
    }

    ///
    /// Check that the graph is well-formed
    ///
    /// Every activity referenced by a start activity, an end activity or a directly-follows
    /// relation must be declared, every declared activity must be referenced, and all
    /// frequencies must be positive.
    ///
    pub fn validate(&self) -> Result<(), InductiveMinerError> {
        let referenced = self.dfg.referenced_activities();
        if let Some(a) = referenced
            .iter()
            .find(|a| !self.dfg.contains_activity(a))
        {
            return Err(InductiveMinerError::MalformedAbstraction(format!(
                "activity '{a}' is used but not declared"
            )));
        }
        if let Some(a) = self
            .dfg
            .activities
            .keys()
            .find(|a| !referenced.contains(a.as_str()))
        {
            return Err(InductiveMinerError::MalformedAbstraction(format!(
                "activity '{a}' is declared but never used"
            )));
        }
        let zero_weight = self
            .dfg
            .activities
            .iter()
            .chain(self.dfg.start_activities.iter())
            .chain(self.dfg.end_activities.iter())
            .find(|(_, w)| **w == 0)
            .map(|(a, _)| a.clone())
            .or_else(|| {
                self.dfg
                    .directly_follows_relations
                    .iter()
                    .find(|(_, w)| **w == 0)
                    .map(|((a, b), _)| format!("{a} -> {b}"))
            });
        if let Some(item) = zero_weight {
            return Err(InductiveMinerError::MalformedAbstraction(format!(
                "frequency of '{item}' is zero"
            )));
        }
        Ok(())
    }
}

impl IMDataStructure for InductiveDfg {
    const KIND: &'static str = "directly-follows graph";

    fn alphabet(&self) -> BTreeSet<&str> {
        self.dfg.alphabet()
    }

    fn directly_follows(&self) -> Cow<'_, DirectlyFollowsGraph> {
        Cow::Borrowed(&self.dfg)
    }

    fn concurrency_witnesses(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        BTreeMap::new()
    }

    fn base_case(&self) -> Option<Node> {
        base_case::dfg_base_case(self)
    }

    fn split_empty_traces(&self) -> Option<CutResult<Self>> {
        empty_traces::split_dfg(self)
    }

    fn project(&self, partition: &Partition<'_>) -> Vec<Self> {
        let groups = &partition.groups;
        match partition.operator {
            OperatorType::ExclusiveChoice => exclusive_choice::project_dfg(self, groups),
            OperatorType::Sequence => sequence::project_dfg(self, groups),
            OperatorType::Concurrency => concurrency::project_dfg(self, groups),
            OperatorType::Loop => loop_cut::project_dfg(self, groups),
        }
    }

    fn fall_throughs(_config: &InductiveMinerConfig) -> Vec<resolver::FallThrough<Self>> {
        resolver::dfg_fall_throughs()
    }
}

///
/// Input of the Inductive Miner: one of the supported log abstractions
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogAbstraction {
    /// Trace variants with multiplicities
    Variants(VariantLog),
    /// Directly-follows graph with empty-trace flag
    DirectlyFollows(InductiveDfg),
}

impl LogAbstraction {
    /// Name of the abstraction form
    pub fn kind(&self) -> &'static str {
        match self {
            LogAbstraction::Variants(_) => VariantLog::KIND,
            LogAbstraction::DirectlyFollows(_) => InductiveDfg::KIND,
        }
    }

    /// Check that the abstraction is well-formed (see [`InductiveDfg::validate`] and
    /// [`validate_variant_log`])
    pub fn validate(&self) -> Result<(), InductiveMinerError> {
        match self {
            LogAbstraction::Variants(log) => validate_variant_log(log),
            LogAbstraction::DirectlyFollows(dfg) => dfg.validate(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Check that all trace multiplicities of a [`VariantLog`] are positive
pub fn validate_variant_log(log: &VariantLog) -> Result<(), InductiveMinerError> {
    match log.variants.iter().find(|(_, m)| **m == 0) {
        Some((trace, _)) => Err(InductiveMinerError::MalformedAbstraction(format!(
            "multiplicity of trace {trace:?} is zero"
        ))),
        None => Ok(()),
    }
}

impl From<VariantLog> for LogAbstraction {
    fn from(log: VariantLog) -> Self {
        LogAbstraction::Variants(log)
    }
}

impl From<InductiveDfg> for LogAbstraction {
    fn from(dfg: InductiveDfg) -> Self {
        LogAbstraction::DirectlyFollows(dfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dfg_json(activities: &str) -> String {
        format!(
            r#"{{
    "DirectlyFollows": {{
        "dfg": {{
            "activities": {activities},
            "directly_follows_relations": [[["a", "b"], 2]],
            "start_activities": {{"a": 2}},
            "end_activities": {{"b": 2}}
        }},
        "skip": true
    }}
}}"#
        )
    }

    #[test]
    fn well_formed_dfg() {
        let abstraction = LogAbstraction::from_json(&dfg_json(r#"{"a": 2, "b": 2}"#)).unwrap();
        assert_eq!(abstraction.kind(), "directly-follows graph");
        assert!(abstraction.validate().is_ok());
        match abstraction {
            LogAbstraction::DirectlyFollows(dfg) => assert!(dfg.skip),
            LogAbstraction::Variants(_) => panic!("expected a directly-follows graph"),
        }
    }

    #[test]
    fn undeclared_activity_is_rejected() {
        let abstraction = LogAbstraction::from_json(&dfg_json(r#"{"a": 2}"#)).unwrap();
        assert!(matches!(
            abstraction.validate(),
            Err(InductiveMinerError::MalformedAbstraction(_))
        ));
    }

    #[test]
    fn unused_activity_is_rejected() {
        let abstraction =
            LogAbstraction::from_json(&dfg_json(r#"{"a": 2, "b": 2, "c": 1}"#)).unwrap();
        let err = abstraction.validate().unwrap_err();
        assert!(err.to_string().contains("'c'"));
    }

    #[test]
    fn zero_weights_are_rejected() {
        let mut dfg = DirectlyFollowsGraph::new();
        dfg.add_activity("a".into(), 1);
        dfg.add_start_activity("a".into(), 1);
        dfg.add_end_activity("a".into(), 0);
        assert!(InductiveDfg::new(dfg, false).validate().is_err());

        let log = VariantLog::from_traces(vec![(vec!["a"], 0)]);
        assert!(LogAbstraction::from(log).validate().is_err());
    }

    #[test]
    fn dfg_of_variant_log() {
        let log = VariantLog::from_traces(vec![(vec!["a", "b"], 2), (vec![], 1)]);
        let idfg = InductiveDfg::from_variant_log(&log);
        assert!(idfg.skip);
        assert!(!idfg.is_empty());
        assert!(idfg.validate().is_ok());
        assert!(InductiveDfg::default().is_empty());
    }
}
