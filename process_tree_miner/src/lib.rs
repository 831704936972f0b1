#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![doc = include_str!("../README.md")]

///
/// Event data abstractions ([`VariantLog`])
///
pub mod event_log {
    /// [`VariantLog`] struct (trace variants with multiplicities)
    pub mod variant_log;

    #[doc(inline)]
    pub use variant_log::VariantLog;
}

///
/// Directly-follows graph
///
pub mod dfg {
    /// [`DirectlyFollowsGraph`] struct
    pub mod dfg_struct;

    #[doc(inline)]
    pub use crate::dfg::dfg_struct::DirectlyFollowsGraph;
}

///
/// Process trees
///
pub mod process_tree {
    /// [`ProcessTree`] struct and sub-structs
    pub mod process_tree_struct;
    /// Bounded playout of a [`ProcessTree`]
    pub mod playout;

    #[doc(inline)]
    pub use process_tree_struct::ProcessTree;
}

///
/// Inductive Miner process discovery
///
/// Recursively splits a log abstraction along cuts of its directly-follows graph until only
/// base cases remain. If no cut can be found, a fall-through is applied instead.
///
pub mod inductive_miner {
    /// Log abstractions the miner works on
    pub mod abstraction;
    /// Base cases (empty and single-activity abstractions)
    pub mod base_case;
    /// Errors returned by the discovery entry points
    pub mod error;
    /// Entry points, configuration and the recursive discovery loop
    pub mod full;
    /// Assembling discovered children into tree nodes
    pub mod model_assembler;

    ///
    /// Cut detection and projection
    ///
    pub mod cuts {
        /// Trying all cuts in order
        pub mod cut_finder;
        /// Partitions of the activity alphabet
        pub mod cut_utils;
        /// Exclusive-choice cut
        pub mod exclusive_choice;
        /// Sequence cut
        pub mod sequence;
        /// Concurrency cut
        pub mod concurrency;
        /// Loop cut
        pub mod loop_cut;
    }

    ///
    /// Fall-throughs for abstractions without a cut
    ///
    pub mod fall_through {
        /// Trying all fall-throughs in order
        pub mod resolver;
        /// Splitting off empty traces
        pub mod empty_traces;
        /// Activities occurring exactly once per trace
        pub mod activity_once_per_trace;
        /// Activities that can be put in parallel to the rest
        pub mod activity_concurrent;
        /// Tau loops over trace segments
        pub mod tau_loop;
        /// Flower model
        pub mod flower;
    }

    #[cfg(test)]
    mod tests;
}

#[doc(inline)]
pub use event_log::variant_log::VariantLog;

#[doc(inline)]
pub use dfg::dfg_struct::DirectlyFollowsGraph;

#[doc(inline)]
pub use process_tree::process_tree_struct::ProcessTree;

#[doc(inline)]
pub use process_tree::playout::bounded_language;

#[doc(inline)]
pub use inductive_miner::full::discover_process_tree;

#[doc(inline)]
pub use inductive_miner::full::discover_process_tree_from_variants;

#[doc(inline)]
pub use inductive_miner::full::discover_process_tree_from_dfg;

#[doc(inline)]
pub use inductive_miner::full::InductiveMinerConfig;

#[doc(inline)]
pub use inductive_miner::full::InductiveMinerVariant;

#[doc(inline)]
pub use inductive_miner::abstraction::InductiveDfg;

#[doc(inline)]
pub use inductive_miner::abstraction::LogAbstraction;

#[doc(inline)]
pub use inductive_miner::error::InductiveMinerError;
