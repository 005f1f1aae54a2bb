use crate::red_black_tree::node::{Color, NodeId};
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::vec::Vec;

/// Draws the shape of the tree, one node per line in pre-order, with each node's color.
///
/// # Examples
///
/// ```
/// use ordered_tree::red_black_tree::RedBlackTree;
///
/// let tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
/// assert_eq!(
///     tree.to_string(),
///     "R----2(BLACK)\n     L----1(RED)\n     R----3(RED)\n",
/// );
/// ```
impl<T> fmt::Display for RedBlackTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_nil() {
            return writeln!(f, "Tree is empty");
        }

        let mut stack: Vec<(NodeId, String, bool)> = vec![(self.root, String::new(), true)];
        while let Some((node, mut indent, last)) = stack.pop() {
            if node.is_nil() {
                continue;
            }

            write!(f, "{}", indent)?;
            if last {
                write!(f, "R----")?;
                indent.push_str("     ");
            } else {
                write!(f, "L----")?;
                indent.push_str("|    ");
            }

            let color = match self.color(node) {
                Color::Red => "RED",
                Color::Black => "BLACK",
            };
            writeln!(f, "{}({})", self.node(node).key, color)?;

            stack.push((self.right(node), indent.clone(), true));
            stack.push((self.left(node), indent, false));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::RedBlackTree;

    #[test]
    fn test_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.to_string(), "Tree is empty\n");
    }

    #[test]
    fn test_nested_indent() {
        let tree: RedBlackTree<u32> = vec![10, 5, 15, 1].into_iter().collect();
        assert_eq!(
            tree.to_string(),
            concat!(
                "R----10(BLACK)\n",
                "     L----5(BLACK)\n",
                "     |    L----1(RED)\n",
                "     R----15(BLACK)\n",
            ),
        );
    }
}
