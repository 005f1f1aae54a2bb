use crate::red_black_tree::node::NodeId;
use crate::red_black_tree::tree::RedBlackTree;
use std::error;
use std::fmt;

/// A structural defect found by `RedBlackTree::validate`.
///
/// None of these can be produced through the public API. Observing one means the tree was
/// corrupted and should be discarded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantViolation {
    /// A key is out of order with respect to one of its ancestors.
    BinarySearch,
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedNodeRedChild,
    /// Two paths from the same node reach the sentinel through different numbers of black nodes.
    BlackHeightBalanced,
    /// A child does not point back at its parent, or the root has a parent.
    ParentLink,
    /// The sentinel still records a parent after an operation completed.
    SentinelParent,
    /// The number of reachable nodes differs from the number of allocated nodes.
    SizeConsistency,
}

impl error::Error for InvariantViolation {}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InvariantViolation::BinarySearch => "key out of order",
            InvariantViolation::RedRoot => "root is red",
            InvariantViolation::RedNodeRedChild => "red node has a red child",
            InvariantViolation::BlackHeightBalanced => "black height differs between paths",
            InvariantViolation::ParentLink => "parent link does not match child link",
            InvariantViolation::SentinelParent => "sentinel parent was not reset",
            InvariantViolation::SizeConsistency => "reachable nodes differ from allocated nodes",
        };
        write!(f, "red black tree invariant violated: {}", message)
    }
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Walks the whole tree and checks every red black invariant along with the parent links.
    /// Returns the black height of the tree on success.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = (0..100).collect();
    /// assert_eq!(tree.validate(), Ok(tree.black_height()));
    /// ```
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        if self.color(self.root).is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.sentinel_parent().is_nil() {
            return Err(InvariantViolation::SentinelParent);
        }
        if !self.root.is_nil() && !self.node(self.root).parent.is_nil() {
            return Err(InvariantViolation::ParentLink);
        }

        let mut count = 0;
        let black_height = self.validate_subtree(self.root, None, None, &mut count)?;
        if count != self.len() {
            return Err(InvariantViolation::SizeConsistency);
        }
        Ok(black_height)
    }

    fn validate_subtree(
        &self,
        id: NodeId,
        lower: Option<&T>,
        upper: Option<&T>,
        count: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if id.is_nil() {
            return Ok(0);
        }

        *count += 1;
        // a cycle would otherwise never terminate
        if *count > self.len() {
            return Err(InvariantViolation::SizeConsistency);
        }

        let node = self.node(id);
        if lower.map_or(false, |lower| node.key < *lower)
            || upper.map_or(false, |upper| node.key > *upper)
        {
            return Err(InvariantViolation::BinarySearch);
        }

        for &child in &[node.left, node.right] {
            if !child.is_nil() && self.node(child).parent != id {
                return Err(InvariantViolation::ParentLink);
            }
        }

        if node.color.is_red()
            && (self.color(node.left).is_red() || self.color(node.right).is_red())
        {
            return Err(InvariantViolation::RedNodeRedChild);
        }

        let left_height = self.validate_subtree(node.left, lower, Some(&node.key), count)?;
        let right_height = self.validate_subtree(node.right, Some(&node.key), upper, count)?;
        if left_height != right_height {
            return Err(InvariantViolation::BlackHeightBalanced);
        }

        Ok(left_height + usize::from(node.color.is_black()))
    }
}

#[cfg(test)]
mod tests {
    use super::InvariantViolation;
    use crate::red_black_tree::node::{Color, NodeId};
    use crate::red_black_tree::RedBlackTree;

    // 2 (black) with children 1 (black) and 3 (black), 3 has right child 4 (red)
    fn sample() -> RedBlackTree<u32> {
        vec![2, 1, 3, 4].into_iter().collect()
    }

    #[test]
    fn test_valid() {
        let tree = sample();
        assert_eq!(tree.validate(), Ok(2));
        assert_eq!(tree.black_height(), 2);
    }

    #[test]
    fn test_empty_is_valid() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_red_root() {
        let mut tree = sample();
        let root = tree.root;
        tree.node_mut(root).color = Color::Red;
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn test_red_node_red_child() {
        let mut tree = sample();
        let right = tree.right(tree.root);
        tree.node_mut(right).color = Color::Red;
        assert_eq!(tree.validate(), Err(InvariantViolation::RedNodeRedChild));
    }

    #[test]
    fn test_black_height_balanced() {
        let mut tree = sample();
        let leaf = tree.right(tree.right(tree.root));
        tree.node_mut(leaf).color = Color::Black;
        assert_eq!(tree.validate(), Err(InvariantViolation::BlackHeightBalanced));
    }

    #[test]
    fn test_binary_search() {
        let mut tree = sample();
        let left = tree.left(tree.root);
        tree.node_mut(left).key = 3;
        assert_eq!(tree.validate(), Err(InvariantViolation::BinarySearch));
    }

    #[test]
    fn test_parent_link() {
        let mut tree = sample();
        let left = tree.left(tree.root);
        tree.node_mut(left).parent = NodeId::NIL;
        assert_eq!(tree.validate(), Err(InvariantViolation::ParentLink));
    }

    #[test]
    fn test_size_consistency() {
        let mut tree = sample();
        let right = tree.right(tree.root);
        let leaf = tree.right(right);
        tree.node_mut(right).right = NodeId::NIL;
        tree.node_mut(leaf).parent = NodeId::NIL;
        assert_eq!(tree.validate(), Err(InvariantViolation::SizeConsistency));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            InvariantViolation::RedRoot.to_string(),
            "red black tree invariant violated: root is red",
        );
    }
}
