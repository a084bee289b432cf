//! Flattening of nested parse results
//!
//! A grammar may hand back its results nested to any depth (one level per
//! ambiguous or recursive production). [`flatten_deep`] reduces such a
//! structure to its leaves, depth-first and left to right.

/// A parse result: either a leaf value or a list of further results.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode<T> {
    /// A finished value
    Leaf(T),

    /// Nested results, in order
    Branch(Vec<ParseNode<T>>),
}

impl<T> ParseNode<T> {
    /// Wrap a single value.
    pub fn leaf(value: T) -> Self {
        ParseNode::Leaf(value)
    }

    /// Wrap a list of results.
    pub fn branch(nodes: Vec<ParseNode<T>>) -> Self {
        ParseNode::Branch(nodes)
    }

    /// Leaves of this node, depth-first and left to right.
    pub fn into_leaves(self) -> Vec<T> {
        flatten_deep(vec![self])
    }
}

/// Collect every leaf of `nodes`, depth-first and left to right.
///
/// Order is preserved across branches. Uses an explicit stack so deep
/// nesting cannot overflow the call stack.
pub fn flatten_deep<T>(nodes: Vec<ParseNode<T>>) -> Vec<T> {
    let mut leaves = Vec::new();
    // Pending iterators, innermost last.
    let mut stack = vec![nodes.into_iter()];

    while let Some(top) = stack.last_mut() {
        match top.next() {
            Some(ParseNode::Leaf(value)) => leaves.push(value),
            Some(ParseNode::Branch(children)) => stack.push(children.into_iter()),
            None => {
                stack.pop();
            }
        }
    }

    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParseNode::{Branch, Leaf};

    #[test]
    fn test_flat_input_unchanged() {
        assert_eq!(flatten_deep(vec![Leaf(1), Leaf(2), Leaf(3)]), vec![1, 2, 3]);
    }

    #[test]
    fn test_nested_order_preserved() {
        let nodes = vec![
            Leaf(1),
            Branch(vec![Leaf(2), Branch(vec![Leaf(3), Leaf(4)]), Leaf(5)]),
            Branch(vec![]),
            Leaf(6),
        ];
        assert_eq!(flatten_deep(nodes), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty() {
        let nodes: Vec<ParseNode<i32>> = vec![Branch(vec![Branch(vec![])])];
        assert!(flatten_deep(nodes).is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let mut node = Leaf("x");
        for _ in 0..10_000 {
            node = Branch(vec![node]);
        }
        assert_eq!(node.into_leaves(), vec!["x"]);
    }
}
