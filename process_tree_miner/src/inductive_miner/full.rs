use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    event_log::variant_log::VariantLog,
    process_tree::process_tree_struct::{Node, ProcessTree},
};

use super::{
    abstraction::{validate_variant_log, IMDataStructure, InductiveDfg, LogAbstraction},
    base_case,
    cuts::cut_finder::{find_cut, CutResult},
    error::InductiveMinerError,
    fall_through::resolver,
    model_assembler::assemble,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
/// Algorithm parameters for the Inductive Miner
pub struct InductiveMinerConfig {
    /// Merge adjacent sequence groups until skipping between them is uniform
    pub strict_sequence_cut: bool,
    /// Split off empty traces before checking for base cases
    pub empty_traces_first: bool,
    /// Use the activity-concurrent fall-through (variant logs only)
    pub activity_concurrent_fall_through: bool,
    /// Discover sibling subtrees in parallel
    pub parallel: bool,
}

impl Default for InductiveMinerConfig {
    fn default() -> Self {
        Self {
            strict_sequence_cut: true,
            empty_traces_first: true,
            activity_concurrent_fall_through: true,
            parallel: false,
        }
    }
}

impl InductiveMinerConfig {
    /// Serialize Inductive Miner parameters to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
    /// Deserialize Inductive Miner parameters from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

///
/// Inductive Miner variant
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InductiveMinerVariant {
    /// Inductive Miner on trace variants
    IM,
    /// Inductive Miner on the directly-follows graph
    IMd,
}

impl std::fmt::Display for InductiveMinerVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InductiveMinerVariant::IM => write!(f, "IM"),
            InductiveMinerVariant::IMd => write!(f, "IMd"),
        }
    }
}

///
/// Discover a [`ProcessTree`] using the Inductive Miner
///
/// [`InductiveMinerVariant::IM`] requires trace variants, [`InductiveMinerVariant::IMd`] accepts
/// both abstractions (trace variants are turned into their directly-follows graph first).
///
pub fn discover_process_tree(
    abstraction: &LogAbstraction,
    variant: InductiveMinerVariant,
    config: &InductiveMinerConfig,
) -> Result<ProcessTree, InductiveMinerError> {
    match (variant, abstraction) {
        (InductiveMinerVariant::IM, LogAbstraction::Variants(log)) => {
            discover_process_tree_from_variants(log, config)
        }
        (InductiveMinerVariant::IMd, LogAbstraction::Variants(log)) => {
            validate_variant_log(log)?;
            discover_process_tree_from_dfg(&InductiveDfg::from_variant_log(log), config)
        }
        (InductiveMinerVariant::IMd, LogAbstraction::DirectlyFollows(dfg)) => {
            discover_process_tree_from_dfg(dfg, config)
        }
        (InductiveMinerVariant::IM, LogAbstraction::DirectlyFollows(_)) => {
            Err(InductiveMinerError::UnsupportedOperation {
                variant,
                abstraction: abstraction.kind(),
            })
        }
    }
}

/// Discover a [`ProcessTree`] from trace variants (IM)
pub fn discover_process_tree_from_variants(
    log: &VariantLog,
    config: &InductiveMinerConfig,
) -> Result<ProcessTree, InductiveMinerError> {
    validate_variant_log(log)?;
    info!(
        "Started Inductive Miner (IM) on {} variants with {} activities",
        log.variants.len(),
        log.alphabet().len()
    );
    Ok(discover(log.clone(), config))
}

/// Discover a [`ProcessTree`] from a directly-follows graph (IMd)
pub fn discover_process_tree_from_dfg(
    dfg: &InductiveDfg,
    config: &InductiveMinerConfig,
) -> Result<ProcessTree, InductiveMinerError> {
    dfg.validate()?;
    info!(
        "Started Inductive Miner (IMd) on {} activities and {} directly-follows relations",
        dfg.dfg.alphabet().len(),
        dfg.dfg.directly_follows_relations.len()
    );
    Ok(discover(dfg.clone(), config))
}

fn discover<T: IMDataStructure>(obj: T, config: &InductiveMinerConfig) -> ProcessTree {
    let start = Instant::now();
    let tree = ProcessTree::new(mine(obj, config, 0));
    info!(
        "Discovered process tree with {} leaves in {:.4}s",
        tree.find_all_leaves().len(),
        start.elapsed().as_secs_f32()
    );
    tree
}

///
/// Recursively discover the subtree for an abstraction
///
/// Empty traces are split off first (if enabled), then base cases, cuts and finally
/// fall-throughs are tried.
///
pub fn mine<T: IMDataStructure>(obj: T, config: &InductiveMinerConfig, depth: usize) -> Node {
    if config.empty_traces_first {
        if let Some(split) = obj.split_empty_traces() {
            debug!("[{}] Splitting off empty traces of {}", depth, T::KIND);
            return mine_children(split, config, depth);
        }
    }
    if let Some(node) = base_case::evaluate(&obj, depth) {
        return node;
    }
    let cut = match find_cut(&obj, config) {
        Some(cut) => {
            debug!(
                "[{}] Found {} cut on {} with child alphabets of size {:?}",
                depth,
                cut.operator,
                T::KIND,
                cut.children
                    .iter()
                    .map(|c| c.alphabet().len())
                    .collect::<Vec<_>>()
            );
            cut
        }
        None => resolver::resolve(&obj, config, depth),
    };
    mine_children(cut, config, depth)
}

fn mine_children<T: IMDataStructure>(
    cut: CutResult<T>,
    config: &InductiveMinerConfig,
    depth: usize,
) -> Node {
    let children: Vec<Node> = if config.parallel {
        cut.children
            .into_par_iter()
            .map(|child| mine(child, config, depth + 1))
            .collect()
    } else {
        cut.children
            .into_iter()
            .map(|child| mine(child, config, depth + 1))
            .collect()
    };
    assemble(cut.operator, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_json() {
        let config = InductiveMinerConfig::default();
        assert!(config.strict_sequence_cut);
        assert!(!config.parallel);
        assert_eq!(
            InductiveMinerConfig::from_json(&config.to_json()).unwrap(),
            config
        );
        let partial = InductiveMinerConfig::from_json(r#"{"parallel": true}"#).unwrap();
        assert!(partial.parallel);
        assert!(partial.empty_traces_first);
    }

    #[test]
    fn mine_simple_sequence() {
        let log = VariantLog::from_traces(vec![(vec!["A", "B"], 5)]);
        let tree = discover_process_tree_from_variants(&log, &Default::default()).unwrap();
        assert_eq!(tree.to_string(), "->( 'A', 'B' )");
    }

    #[test]
    fn im_rejects_dfg() {
        let log = VariantLog::from_traces(vec![(vec!["A", "B"], 5)]);
        let abstraction = LogAbstraction::DirectlyFollows(InductiveDfg::from_variant_log(&log));
        let err = discover_process_tree(
            &abstraction,
            InductiveMinerVariant::IM,
            &Default::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            InductiveMinerError::UnsupportedOperation {
                variant: InductiveMinerVariant::IM,
                abstraction: "directly-follows graph",
            }
        );
        assert_eq!(err.to_string(), "IM cannot be applied to a directly-follows graph");
    }
}
