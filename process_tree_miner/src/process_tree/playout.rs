use std::collections::BTreeSet;

use crate::event_log::variant_log::{Activity, Variant};

use super::process_tree_struct::{LeafLabel, Node, OperatorType, ProcessTree};

///
/// All traces of a [`ProcessTree`] in which every loop repeats at most `loop_bound` times
///
/// A loop iteration consists of one execution of a redo-child followed by the do-child again.
/// The number of traces grows exponentially with the size of the tree, so this is only meant for
/// small trees.
///
pub fn bounded_language(tree: &ProcessTree, loop_bound: usize) -> BTreeSet<Variant> {
    node_language(&tree.root, loop_bound)
}

fn node_language(node: &Node, loop_bound: usize) -> BTreeSet<Variant> {
    let op = match node {
        Node::Leaf(leaf) => {
            return match &leaf.activity_label {
                LeafLabel::Activity(a) => BTreeSet::from([vec![a.clone()]]),
                LeafLabel::Tau => BTreeSet::from([Vec::new()]),
            }
        }
        Node::Operator(op) => op,
    };
    let languages: Vec<BTreeSet<Variant>> = op
        .children
        .iter()
        .map(|c| node_language(c, loop_bound))
        .collect();

    match op.operator_type {
        OperatorType::ExclusiveChoice => languages.into_iter().flatten().collect(),
        OperatorType::Sequence => languages
            .iter()
            .fold(BTreeSet::from([Vec::new()]), |acc, l| concatenate(&acc, l)),
        OperatorType::Concurrency => languages
            .iter()
            .fold(BTreeSet::from([Vec::new()]), |acc, l| shuffle(&acc, l)),
        OperatorType::Loop => {
            let mut parts = languages.into_iter();
            let body = parts.next().unwrap_or_default();
            let redo: BTreeSet<Variant> = parts.flatten().collect();
            let mut result = body.clone();
            let mut frontier = body.clone();
            for _ in 0..loop_bound {
                frontier = concatenate(&concatenate(&frontier, &redo), &body);
                result.extend(frontier.iter().cloned());
            }
            result
        }
    }
}

fn concatenate(first: &BTreeSet<Variant>, second: &BTreeSet<Variant>) -> BTreeSet<Variant> {
    first
        .iter()
        .flat_map(|x| {
            second
                .iter()
                .map(move |y| x.iter().chain(y.iter()).cloned().collect::<Variant>())
        })
        .collect()
}

fn shuffle(first: &BTreeSet<Variant>, second: &BTreeSet<Variant>) -> BTreeSet<Variant> {
    let mut ret = BTreeSet::new();
    for x in first {
        for y in second {
            interleave(x, y, &mut Vec::new(), &mut ret);
        }
    }
    ret
}

fn interleave(x: &[Activity], y: &[Activity], prefix: &mut Variant, ret: &mut BTreeSet<Variant>) {
    match (x.split_first(), y.split_first()) {
        (None, None) => {
            ret.insert(prefix.clone());
        }
        (first, second) => {
            if let Some((head, tail)) = first {
                prefix.push(head.clone());
                interleave(tail, y, prefix, ret);
                prefix.pop();
            }
            if let Some((head, tail)) = second {
                prefix.push(head.clone());
                interleave(x, tail, prefix, ret);
                prefix.pop();
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

    fn traces(ts: &[&[&str]]) -> BTreeSet<Variant> {
        ts.iter()
            .map(|t| t.iter().map(|a| a.to_string()).collect())
            .collect()
    }

    #[test]
    fn language_of_block_structure() {
        let tree = ProcessTree::new(Node::new_operator(
            OperatorType::Sequence,
            vec![
                leaf("a"),
                Node::new_operator(OperatorType::ExclusiveChoice, vec![leaf("b"), Node::tau()]),
                Node::new_operator(OperatorType::Concurrency, vec![leaf("c"), leaf("d")]),
            ],
        ));
        assert_eq!(
            bounded_language(&tree, 0),
            traces(&[
                &["a", "b", "c", "d"],
                &["a", "b", "d", "c"],
                &["a", "c", "d"],
                &["a", "d", "c"],
            ])
        );
    }

    #[test]
    fn loops_are_bounded() {
        let tree = ProcessTree::new(Node::new_operator(
            OperatorType::Loop,
            vec![leaf("a"), leaf("b")],
        ));
        assert_eq!(bounded_language(&tree, 0), traces(&[&["a"]]));
        assert_eq!(
            bounded_language(&tree, 2),
            traces(&[&["a"], &["a", "b", "a"], &["a", "b", "a", "b", "a"]])
        );
    }
}
