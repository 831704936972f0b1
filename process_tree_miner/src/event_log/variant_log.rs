use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet},
};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Activity label of an event
pub type Activity = String;

/// A single trace, i.e., a sequence of activity labels
pub type Variant = Vec<Activity>;

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Projection of an event log on just its trace variants
///
/// Each distinct sequence of activity labels is stored once, together with the number of
/// traces following it. The empty sequence represents empty traces.
/// Variants are kept in a sorted map, so iterating a [`VariantLog`] is deterministic.
pub struct VariantLog {
    /// Trace variants and their multiplicity
    #[serde_as(as = "Vec<(_, _)>")]
    pub variants: BTreeMap<Variant, u64>,
}

impl VariantLog {
    /// Create a new [`VariantLog`] without any traces
    pub fn new() -> Self {
        Self {
            variants: BTreeMap::new(),
        }
    }

    /// Construct a [`VariantLog`] from `(trace, multiplicity)` pairs
    ///
    /// Repeated traces are summed up.
    pub fn from_traces<I, T, S>(traces: I) -> Self
    where
        I: IntoIterator<Item = (T, u64)>,
        T: IntoIterator<Item = S>,
        S: Into<Activity>,
    {
        let mut ret = Self::new();
        for (trace, multiplicity) in traces {
            ret.add_trace(trace.into_iter().map(Into::into).collect(), multiplicity);
        }
        ret
    }

    /// Add a trace with the given multiplicity
    ///
    /// If the trace variant already exists, the multiplicity is added to the existing one.
    pub fn add_trace(&mut self, trace: Variant, multiplicity: u64) {
        *self.variants.entry(trace).or_default() += multiplicity;
    }

    /// Total number of traces (sum of all multiplicities)
    pub fn num_traces(&self) -> u64 {
        self.variants.values().sum()
    }

    /// Returns `true` if the log does not contain any trace (not even an empty one)
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// All activity labels occurring in the log
    pub fn alphabet(&self) -> BTreeSet<&str> {
        self.variants
            .keys()
            .flat_map(|t| t.iter().map(String::as_str))
            .collect()
    }

    /// Activities starting a trace, weighted by the number of traces they start
    pub fn start_activities(&self) -> BTreeMap<&str, u64> {
        let mut ret: BTreeMap<&str, u64> = BTreeMap::new();
        for (t, w) in &self.variants {
            if let Some(first) = t.first() {
                *ret.entry(first.as_str()).or_default() += w;
            }
        }
        ret
    }

    /// Activities ending a trace, weighted by the number of traces they end
    pub fn end_activities(&self) -> BTreeMap<&str, u64> {
        let mut ret: BTreeMap<&str, u64> = BTreeMap::new();
        for (t, w) in &self.variants {
            if let Some(last) = t.last() {
                *ret.entry(last.as_str()).or_default() += w;
            }
        }
        ret
    }

    /// Returns `true` if at least one trace is empty
    pub fn has_empty_trace(&self) -> bool {
        self.variants.keys().any(|t| t.is_empty())
    }

    /// Returns `true` if at least one trace contains an event
    pub fn has_non_empty_trace(&self) -> bool {
        self.variants.keys().any(|t| !t.is_empty())
    }

    /// Copy of this log with all empty traces removed
    pub fn without_empty_traces(&self) -> Self {
        Self {
            variants: self
                .variants
                .iter()
                .filter(|(t, _)| !t.is_empty())
                .map(|(t, w)| (t.clone(), *w))
                .collect(),
        }
    }

    /// Restrict every trace to the events whose activity satisfies `keep`
    ///
    /// Traces that lose all their events become empty traces (they are not dropped).
    pub fn filter_activities<F: Fn(&str) -> bool>(&self, keep: F) -> Self {
        let mut ret = Self::new();
        for (t, w) in &self.variants {
            let projected: Variant = t.iter().filter(|a| keep(a.as_str())).cloned().collect();
            ret.add_trace(projected, *w);
        }
        ret
    }

    /// Restrict every trace to the given activities
    pub fn project_on<S: Borrow<str> + Ord>(&self, activities: &BTreeSet<S>) -> Self {
        self.filter_activities(|a| activities.contains(a))
    }

    /// Minimum self-distance witnesses of all repeated activities
    ///
    /// For each activity `a` that occurs at least twice in some trace, the minimum self-distance
    /// is the smallest number of events observed between two consecutive occurrences of `a`.
    /// Its witnesses are all activities occurring between two occurrences of `a` at exactly this
    /// distance.
    pub fn min_self_distance_witnesses(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut min_dist: BTreeMap<&str, usize> = BTreeMap::new();
        let mut witnesses: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for t in self.variants.keys() {
            let mut last_pos: BTreeMap<&str, usize> = BTreeMap::new();
            for (i, a) in t.iter().enumerate() {
                if let Some(prev) = last_pos.insert(a.as_str(), i) {
                    let dist = i - prev - 1;
                    let between = t[prev + 1..i].iter().map(String::as_str);
                    match min_dist.get(a.as_str()) {
                        Some(d) if *d < dist => {}
                        Some(d) if *d == dist => {
                            witnesses.entry(a.as_str()).or_default().extend(between);
                        }
                        _ => {
                            min_dist.insert(a.as_str(), dist);
                            witnesses.insert(a.as_str(), between.collect());
                        }
                    }
                }
            }
        }
        witnesses
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

#[cfg(test)]
mod tests {
    use super::*;

    fn example_log() -> VariantLog {
        VariantLog::from_traces(vec![
            (vec!["a", "b", "c", "b"], 2),
            (vec!["a", "c"], 3),
            (vec![], 1),
            (vec!["a", "c"], 1),
        ])
    }

    #[test]
    fn variant_log_basics() {
        let log = example_log();
        assert_eq!(log.variants.len(), 3);
        assert_eq!(log.num_traces(), 7);
        assert!(log.has_empty_trace());
        assert!(log.has_non_empty_trace());
        assert_eq!(
            log.alphabet(),
            vec!["a", "b", "c"].into_iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(log.start_activities(), vec![("a", 6)].into_iter().collect());
        assert_eq!(
            log.end_activities(),
            vec![("b", 2), ("c", 4)].into_iter().collect()
        );
        let without_empty = log.without_empty_traces();
        assert!(!without_empty.has_empty_trace());
        assert_eq!(without_empty.num_traces(), 6);
    }

    #[test]
    fn projection_keeps_emptied_traces() {
        let log = example_log();
        let group: BTreeSet<&str> = vec!["b"].into_iter().collect();
        let projected = log.project_on(&group);
        assert_eq!(projected.variants.get(&vec!["b".to_string(), "b".to_string()]), Some(&2));
        assert_eq!(projected.variants.get(&Vec::new()), Some(&5));
        assert_eq!(projected.num_traces(), log.num_traces());
    }

    #[test]
    fn min_self_distance() {
        let log = VariantLog::from_traces(vec![
            (vec!["a", "b", "a", "c", "d", "a"], 1),
            (vec!["x", "c", "e", "c", "x", "x"], 1),
        ]);
        let msdw = log.min_self_distance_witnesses();
        assert_eq!(msdw.get("a"), Some(&vec!["b"].into_iter().collect()));
        assert_eq!(msdw.get("c"), Some(&vec!["e"].into_iter().collect()));
        // Directly repeated activity: distance zero, no witnesses
        assert_eq!(msdw.get("x"), Some(&BTreeSet::new()));
        assert!(!msdw.contains_key("b"));
    }

    #[test]
    fn variant_log_json() {
        let log = example_log();
        let json = log.to_json();
        let parsed = VariantLog::from_json(&json).unwrap();
        assert_eq!(parsed, log);
    }
}
