use log::{debug, trace};

use crate::{
    event_log::variant_log::VariantLog,
    inductive_miner::{
        abstraction::{IMDataStructure, InductiveDfg},
        cuts::cut_finder::CutResult,
        full::InductiveMinerConfig,
    },
};

use super::{activity_concurrent, activity_once_per_trace, empty_traces, flower, tau_loop};

/// A named fall-through heuristic
pub struct FallThrough<T> {
    /// Name used in log messages
    pub name: &'static str,
    /// Returns [`None`] if the fall-through does not apply
    pub apply: fn(&T, &InductiveMinerConfig) -> Option<CutResult<T>>,
}

impl<T> FallThrough<T> {
    /// Create a new [`FallThrough`]
    pub fn new(
        name: &'static str,
        apply: fn(&T, &InductiveMinerConfig) -> Option<CutResult<T>>,
    ) -> Self {
        Self { name, apply }
    }
}

impl<T> std::fmt::Debug for FallThrough<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallThrough")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

///
/// Apply the first applicable fall-through
///
/// The last fall-through of every chain is the flower model, which applies to any abstraction.
///
pub fn resolve<T: IMDataStructure>(
    obj: &T,
    config: &InductiveMinerConfig,
    depth: usize,
) -> CutResult<T> {
    for fall_through in T::fall_throughs(config) {
        if let Some(result) = (fall_through.apply)(obj, config) {
            debug!(
                "[{}] Fall-through {} on {} yields {} children",
                depth,
                fall_through.name,
                T::KIND,
                result.children.len()
            );
            return result;
        }
        trace!("[{}] Fall-through {} not applicable", depth, fall_through.name);
    }
    unreachable!("the flower model applies to every {}", T::KIND)
}

/// Fall-throughs of [`VariantLog`]s, in the order they are tried
pub fn variant_log_fall_throughs(config: &InductiveMinerConfig) -> Vec<FallThrough<VariantLog>> {
    let mut ret: Vec<FallThrough<VariantLog>> = vec![
        FallThrough::new("empty traces", |log, _| {
            empty_traces::split_variant_log(log)
        }),
        FallThrough::new("activity once per trace", |log, _| {
            activity_once_per_trace::apply(log)
        }),
    ];
    if config.activity_concurrent_fall_through {
        ret.push(FallThrough::new(
            "activity concurrent",
            activity_concurrent::apply,
        ));
    }
    ret.extend([
        FallThrough::new("strict tau loop", |log, _| tau_loop::strict_tau_loop(log)),
        FallThrough::new("tau loop", |log, _| tau_loop::tau_loop(log)),
        FallThrough::new("flower model", |log, _| {
            Some(flower::flower_variant_log(log))
        }),
    ]);
    ret
}

/// Fall-throughs of [`InductiveDfg`]s, in the order they are tried
pub fn dfg_fall_throughs() -> Vec<FallThrough<InductiveDfg>> {
    vec![
        FallThrough::new("empty traces", |dfg, _| empty_traces::split_dfg(dfg)),
        FallThrough::new("flower model", |dfg, _| Some(flower::flower_dfg(dfg))),
    ]
}
