use crate::event_log::variant_log::Activity;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

///
/// Leaf in a process tree
///
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum LeafLabel {
    /// Non-silent activity leaf
    Activity(Activity),
    /// Silent activity leaf
    Tau,
}

///
/// Node in a process tree
///
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum Node {
    /// Operator node of a process tree
    Operator(Operator),
    /// Leaf node of a process tree
    Leaf(Leaf),
}

impl Node {
    ///
    /// Creates a new [`Node::Operator`] with the given [`OperatorType`] and children
    ///
    pub fn new_operator(operator_type: OperatorType, children: Vec<Node>) -> Self {
        Node::Operator(Operator::new(operator_type, children))
    }

    ///
    /// Creates a new non-silent or silent leaf [`Node`]
    ///
    pub fn new_leaf(leaf_label: Option<Activity>) -> Self {
        Node::Leaf(Leaf::new(leaf_label))
    }

    ///
    /// Creates a new silent leaf [`Node`]
    ///
    pub fn tau() -> Self {
        Node::Leaf(Leaf::new(None))
    }

    ///
    /// Returns `true` if a loop operator has at least two children or if all other operators
    /// have at least one child.
    ///
    pub fn check_children_valid(&self) -> bool {
        match self {
            Node::Operator(op) => match op.operator_type {
                OperatorType::Loop => op.children.len() >= 2,
                _ => !op.children.is_empty(),
            },
            Node::Leaf(_) => true,
        }
    }

    ///
    /// Returns all activity labels of the non-silent leaves below (and including) this node
    ///
    pub fn activities(&self) -> BTreeSet<&str> {
        let mut result = BTreeSet::new();
        self.collect_activities(&mut result);
        result
    }

    fn collect_activities<'a>(&'a self, result: &mut BTreeSet<&'a str>) {
        match self {
            Node::Operator(op) => op
                .children
                .iter()
                .for_each(|child| child.collect_activities(result)),
            Node::Leaf(leaf) => {
                if let LeafLabel::Activity(a) = &leaf.activity_label {
                    result.insert(a.as_str());
                }
            }
        }
    }

    ///
    /// Smallest activity label below (and including) this node, [`None`] for silent-only
    /// subtrees
    ///
    pub fn min_activity(&self) -> Option<&str> {
        match self {
            Node::Operator(op) => op.children.iter().filter_map(Node::min_activity).min(),
            Node::Leaf(leaf) => match &leaf.activity_label {
                LeafLabel::Activity(a) => Some(a.as_str()),
                LeafLabel::Tau => None,
            },
        }
    }

    ///
    /// Total order used to arrange the children of operators whose child order carries no
    /// meaning
    ///
    /// Nodes are compared by their smallest activity label (silent-only subtrees last) and then
    /// by their textual representation.
    ///
    pub fn canonical_cmp(&self, other: &Node) -> Ordering {
        match (self.min_activity(), other.min_activity()) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operator(op) => write!(
                f,
                "{}( {} )",
                op.operator_type,
                op.children.iter().map(|c| c.to_string()).join(", ")
            ),
            Node::Leaf(leaf) => match &leaf.activity_label {
                LeafLabel::Activity(a) => write!(f, "'{}'", a),
                LeafLabel::Tau => write!(f, "tau"),
            },
        }
    }
}

///
/// Operator type enum for [`Operator`]
///
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub enum OperatorType {
    /// Sequence operator
    Sequence,
    /// Exclusive choice operator
    ExclusiveChoice,
    /// Concurrency operator
    Concurrency,
    /// Loop operator: the first child is executed, then optionally one of the other children
    /// followed by the first child again, any number of times
    Loop,
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            OperatorType::Sequence => "->",
            OperatorType::ExclusiveChoice => "X",
            OperatorType::Concurrency => "+",
            OperatorType::Loop => "*",
        };
        write!(f, "{}", symbol)
    }
}

///
/// Process tree struct that contains [`Node`] as root
///
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct ProcessTree {
    /// The root of the process tree
    pub root: Node,
}

impl ProcessTree {
    ///
    /// Initializes the process tree with the given node as root
    ///
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    ///
    /// Returns `true` if all nodes have the right number of children
    ///
    pub fn is_valid(&self) -> bool {
        let mut stack: Vec<&Node> = vec![&self.root];
        while let Some(node) = stack.pop() {
            if !node.check_children_valid() {
                return false;
            }
            if let Node::Operator(op) = node {
                stack.extend(op.children.iter());
            }
        }
        true
    }

    ///
    /// Returns all descendant [`Leaf`]
    ///
    pub fn find_all_leaves(&self) -> Vec<&Leaf> {
        let mut result: Vec<&Leaf> = Vec::new();

        let mut curr_operators: Vec<&Operator> = Vec::new();
        match &self.root {
            Node::Operator(op) => curr_operators.push(op),
            Node::Leaf(leaf) => result.push(leaf),
        };

        let mut next_operators = Vec::new();

        while !curr_operators.is_empty() {
            curr_operators.iter().for_each(|op| {
                op.children.iter().for_each(|child| match child {
                    Node::Operator(op) => next_operators.push(op),
                    Node::Leaf(leaf) => result.push(leaf),
                })
            });

            curr_operators = next_operators;
            next_operators = Vec::new();
        }

        result
    }

    ///
    /// Returns the labels of all non-silent leaves
    ///
    pub fn activities(&self) -> BTreeSet<&str> {
        self.root.activities()
    }

    ///
    /// Serialize to JSON string
    ///
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl fmt::Display for ProcessTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

///
/// An operator node in a process tree
///
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Operator {
    /// The [`OperatorType`] of the tree itself
    pub operator_type: OperatorType,
    /// The children nodes of the operator node
    pub children: Vec<Node>,
}

impl Operator {
    ///
    /// A constructor for the struct that initializes with the given [`OperatorType`] and
    /// children
    ///
    pub fn new(operator_type: OperatorType, children: Vec<Node>) -> Self {
        Self {
            operator_type,
            children,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
///
/// A leaf in a process tree
///
pub struct Leaf {
    /// The silent or non-silent activity label [`LeafLabel`]
    pub activity_label: LeafLabel,
}

impl Leaf {
    ///
    /// Creates a new [`Leaf`] either by using a given label or making it silent if a label
    /// is missing
    ///
    pub fn new(leaf_label: Option<Activity>) -> Self {
        if let Some(leaf_label) = leaf_label {
            Self {
                activity_label: LeafLabel::Activity(leaf_label),
            }
        } else {
            Self {
                activity_label: LeafLabel::Tau,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(a: &str) -> Node {
        Node::new_leaf(Some(a.to_string()))
    }

    #[test]
    fn process_tree_display() {
        let tree = ProcessTree::new(Node::new_operator(
            OperatorType::Sequence,
            vec![
                leaf("a"),
                Node::new_operator(
                    OperatorType::Loop,
                    vec![
                        Node::new_operator(OperatorType::Concurrency, vec![leaf("b"), leaf("c")]),
                        Node::tau(),
                    ],
                ),
                Node::new_operator(OperatorType::ExclusiveChoice, vec![leaf("d"), Node::tau()]),
            ],
        ));
        assert_eq!(
            tree.to_string(),
            "->( 'a', *( +( 'b', 'c' ), tau ), X( 'd', tau ) )"
        );
        assert!(tree.is_valid());
        assert_eq!(tree.find_all_leaves().len(), 6);
        assert_eq!(
            tree.activities(),
            vec!["a", "b", "c", "d"].into_iter().collect()
        );
    }

    #[test]
    fn invalid_process_trees() {
        let loop_with_one_child = ProcessTree::new(Node::new_operator(
            OperatorType::Sequence,
            vec![leaf("a"), Node::new_operator(OperatorType::Loop, vec![leaf("b")])],
        ));
        assert!(!loop_with_one_child.is_valid());

        let empty_choice =
            ProcessTree::new(Node::new_operator(OperatorType::ExclusiveChoice, vec![]));
        assert!(!empty_choice.is_valid());
    }

    #[test]
    fn canonical_order() {
        let tau = Node::tau();
        let b = leaf("b");
        let seq_a = Node::new_operator(OperatorType::Sequence, vec![leaf("z"), leaf("a")]);
        let mut nodes = [tau.clone(), b.clone(), seq_a.clone()];
        nodes.sort_by(|x, y| x.canonical_cmp(y));
        assert_eq!(nodes, [seq_a, b, tau]);
    }

    #[test]
    fn process_tree_json() {
        let tree = ProcessTree::new(Node::new_operator(
            OperatorType::ExclusiveChoice,
            vec![leaf("a"), Node::tau()],
        ));
        let parsed: ProcessTree = serde_json::from_str(&tree.to_json()).unwrap();
        assert_eq!(parsed, tree);
    }
}
