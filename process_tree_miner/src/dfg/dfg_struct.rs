use crate::event_log::variant_log::{Activity, VariantLog};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::collections::{BTreeMap, BTreeSet};

/// A directly-follows graph of [`Activity`]s.
/// Graph containing a set of activities, a set of directly-follows relations, a set of start
/// activities, and a set of end activities.
/// Activities, directly follows relations, start activities and end activities are all annotated
/// with their frequency.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectlyFollowsGraph {
    /// Activities
    pub activities: BTreeMap<Activity, u64>,
    /// Directly-follows relations
    #[serde_as(as = "Vec<(_, _)>")]
    pub directly_follows_relations: BTreeMap<(Activity, Activity), u64>,
    /// Start activities
    pub start_activities: BTreeMap<Activity, u64>,
    /// End activities
    pub end_activities: BTreeMap<Activity, u64>,
}

impl DirectlyFollowsGraph {
    /// Create new [`DirectlyFollowsGraph`] with no activities and directly-follows relations.
    pub fn new() -> Self {
        Self {
            activities: BTreeMap::new(),
            directly_follows_relations: BTreeMap::new(),
            start_activities: BTreeMap::new(),
            end_activities: BTreeMap::new(),
        }
    }

    /// Construct a [`DirectlyFollowsGraph`] from a [`VariantLog`]
    ///
    /// Every frequency is weighted by the multiplicity of the variant it was observed in.
    /// Empty traces do not leave a trace in the graph.
    pub fn create_from_variant_log(log: &VariantLog) -> Self {
        let mut result = Self::new();
        log.variants.iter().for_each(|(t, w)| {
            let mut last_activity: Option<&Activity> = None;
            t.iter().for_each(|a| {
                result.add_activity(a.clone(), *w);
                if let Some(last) = last_activity.take() {
                    result.add_df_relation(last.clone(), a.clone(), *w);
                } else {
                    result.add_start_activity(a.clone(), *w);
                }
                last_activity = Some(a);
            });
            if let Some(last) = last_activity.take() {
                result.add_end_activity(last.clone(), *w);
            }
        });

        result
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add an activity with a frequency.
    ///
    /// If the activity already exists, the frequency count is added to the existing activity.
    pub fn add_activity(&mut self, activity: Activity, frequency: u64) {
        *self.activities.entry(activity).or_default() += frequency;
    }

    /// Adds an activity to the start activities with the given frequency.
    pub fn add_start_activity(&mut self, activity: Activity, frequency: u64) {
        *self.start_activities.entry(activity).or_default() += frequency;
    }

    /// Adds an activity to the end activities with the given frequency.
    pub fn add_end_activity(&mut self, activity: Activity, frequency: u64) {
        *self.end_activities.entry(activity).or_default() += frequency;
    }

    /// Checks if an activity is already contained in the directly-follows graph.
    pub fn contains_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.activities.contains_key(activity.as_ref())
    }

    /// Checks if an activity is a start activity in the directly-follows graph.
    pub fn is_start_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.start_activities.contains_key(activity.as_ref())
    }

    /// Checks if an activity is an end activity in the directly-follows graph.
    pub fn is_end_activity<S: AsRef<str>>(&self, activity: S) -> bool {
        self.end_activities.contains_key(activity.as_ref())
    }

    /// Add a directly-follows relation with a frequency.
    ///
    /// If the directly-follows relation already exists, the frequency count is added to the
    /// existing directly-follows relation.
    pub fn add_df_relation(&mut self, from: Activity, to: Activity, frequency: u64) {
        *self
            .directly_follows_relations
            .entry((from, to))
            .or_default() += frequency;
    }

    /// Checks if a directly-follows relation is already contained in the directly-follows graph.
    pub fn contains_df_relation<S: AsRef<str>>(&self, (a, b): (S, S)) -> bool {
        self.directly_follows_relations
            .contains_key(&(a.as_ref().to_string(), b.as_ref().to_string()))
    }

    /// Returns the ingoing activities of an activity in the directly-follows graph.
    pub fn ingoing_activities<S: AsRef<str>>(&self, activity: S) -> BTreeSet<&str> {
        self.directly_follows_relations
            .keys()
            .filter_map(|(x, y)| (y == activity.as_ref()).then_some(x.as_str()))
            .collect()
    }

    /// Returns the outgoing activities of an activity in the directly-follows graph.
    pub fn outgoing_activities<S: AsRef<str>>(&self, activity: S) -> BTreeSet<&str> {
        self.directly_follows_relations
            .keys()
            .filter_map(|(x, y)| (x == activity.as_ref()).then_some(y.as_str()))
            .collect()
    }

    /// All activities of the directly-follows graph
    ///
    /// This is the union of the declared activities, the start and end activities, and all
    /// activities taking part in a directly-follows relation.
    pub fn alphabet(&self) -> BTreeSet<&str> {
        self.activities
            .keys()
            .chain(self.start_activities.keys())
            .chain(self.end_activities.keys())
            .map(String::as_str)
            .chain(
                self.directly_follows_relations
                    .keys()
                    .flat_map(|(a, b)| [a.as_str(), b.as_str()]),
            )
            .collect()
    }

    /// Activities referenced by a start activity, an end activity or a directly-follows relation
    pub fn referenced_activities(&self) -> BTreeSet<&str> {
        self.start_activities
            .keys()
            .chain(self.end_activities.keys())
            .map(String::as_str)
            .chain(
                self.directly_follows_relations
                    .keys()
                    .flat_map(|(a, b)| [a.as_str(), b.as_str()]),
            )
            .collect()
    }

    /// The directly-follows relations as a [`petgraph`] graph over all activities
    pub fn as_graph_map(&self) -> DiGraphMap<&str, u64> {
        let mut graph = DiGraphMap::new();
        for a in self.alphabet() {
            graph.add_node(a);
        }
        for ((a, b), w) in &self.directly_follows_relations {
            graph.add_edge(a.as_str(), b.as_str(), *w);
        }
        graph
    }

    /// For each activity, all activities reachable via one or more directly-follows relations
    ///
    /// An activity is only contained in its own successor set if it lies on a cycle.
    pub fn transitive_successors(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let graph = self.as_graph_map();
        graph
            .nodes()
            .map(|a| {
                let mut reachable = BTreeSet::new();
                for b in graph.neighbors(a) {
                    let mut dfs = Dfs::new(&graph, b);
                    while let Some(x) = dfs.next(&graph) {
                        reachable.insert(x);
                    }
                }
                (a, reachable)
            })
            .collect()
    }

    /// Sub-graph over the given activities
    ///
    /// Keeps the declared activities, the relations between two activities of the group, and the
    /// start and end activities of the group (with their frequencies).
    pub fn restrict_to<S: AsRef<str>>(&self, group: &BTreeSet<S>) -> Self
    where
        S: Ord + std::borrow::Borrow<str>,
    {
        let mut ret = Self::new();
        for a in group {
            let freq = self.activities.get(a.as_ref()).copied().unwrap_or_default();
            ret.activities.insert(a.as_ref().to_string(), freq);
        }
        ret.directly_follows_relations = self
            .directly_follows_relations
            .iter()
            .filter(|((a, b), _)| group.contains(a.as_str()) && group.contains(b.as_str()))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        ret.start_activities = self
            .start_activities
            .iter()
            .filter(|(a, _)| group.contains(a.as_str()))
            .map(|(a, w)| (a.clone(), *w))
            .collect();
        ret.end_activities = self
            .end_activities
            .iter()
            .filter(|(a, _)| group.contains(a.as_str()))
            .map(|(a, w)| (a.clone(), *w))
            .collect();
        ret
    }
}

impl From<&VariantLog> for DirectlyFollowsGraph {
    fn from(log: &VariantLog) -> Self {
        Self::create_from_variant_log(log)
    }
}
