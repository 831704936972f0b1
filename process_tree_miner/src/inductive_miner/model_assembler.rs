use crate::process_tree::process_tree_struct::{Node, OperatorType};

///
/// Build the node for an operator and its already discovered children
///
/// - Non-loop operators with a single child collapse into that child.
/// - Children of the same associative operator type are flattened into the parent.
/// - Children of exclusive choices and concurrency operators are brought into canonical order
///   (see [`Node::canonical_cmp`]).
///
pub fn assemble(operator: OperatorType, mut children: Vec<Node>) -> Node {
    if operator != OperatorType::Loop && children.len() == 1 {
        return children.remove(0);
    }

    let mut flattened: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Operator(op) if operator != OperatorType::Loop && op.operator_type == operator => {
                flattened.extend(op.children)
            }
            other => flattened.push(other),
        }
    }

    if matches!(
        operator,
        OperatorType::ExclusiveChoice | OperatorType::Concurrency
    ) {
        flattened.sort_by(|a, b| a.canonical_cmp(b));
    }
    Node::new_operator(operator, flattened)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(a: &str) -> Node {
        Node::new_leaf(Some(a.to_string()))
    }

    #[test]
    fn single_child_collapses() {
        assert_eq!(assemble(OperatorType::Sequence, vec![leaf("a")]), leaf("a"));
        assert_eq!(
            assemble(OperatorType::Loop, vec![leaf("a"), Node::tau()]).to_string(),
            "*( 'a', tau )"
        );
    }

    #[test]
    fn nested_operators_are_flattened() {
        let inner = assemble(OperatorType::Sequence, vec![leaf("b"), leaf("c")]);
        let outer = assemble(OperatorType::Sequence, vec![leaf("a"), inner]);
        assert_eq!(outer.to_string(), "->( 'a', 'b', 'c' )");

        let inner_loop = assemble(OperatorType::Loop, vec![leaf("b"), leaf("c")]);
        let outer_loop = assemble(OperatorType::Loop, vec![inner_loop, Node::tau()]);
        assert_eq!(outer_loop.to_string(), "*( *( 'b', 'c' ), tau )");
    }

    #[test]
    fn choice_children_are_ordered() {
        let node = assemble(
            OperatorType::ExclusiveChoice,
            vec![
                Node::tau(),
                assemble(OperatorType::ExclusiveChoice, vec![leaf("c"), leaf("a")]),
                leaf("b"),
            ],
        );
        assert_eq!(node.to_string(), "X( 'a', 'b', 'c', tau )");

        // Sequence order is meaningful and left untouched
        let node = assemble(OperatorType::Sequence, vec![leaf("b"), leaf("a")]);
        assert_eq!(node.to_string(), "->( 'b', 'a' )");
    }
}
