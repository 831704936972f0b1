use super::full::InductiveMinerVariant;

/// Error type for Inductive Miner discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InductiveMinerError {
    /// The input abstraction is not well-formed (with a description of the first problem found)
    MalformedAbstraction(String),
    /// The requested variant cannot process the given abstraction form
    UnsupportedOperation {
        /// Requested Inductive Miner variant
        variant: InductiveMinerVariant,
        /// Form of the given abstraction
        abstraction: &'static str,
    },
}

impl std::fmt::Display for InductiveMinerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InductiveMinerError::MalformedAbstraction(s) => {
                write!(f, "Malformed log abstraction: {}", s)
            }
            InductiveMinerError::UnsupportedOperation {
                variant,
                abstraction,
            } => write!(f, "{} cannot be applied to a {}", variant, abstraction),
        }
    }
}

impl std::error::Error for InductiveMinerError {}
