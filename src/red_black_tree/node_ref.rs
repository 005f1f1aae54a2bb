use crate::red_black_tree::node::{Color, NodeId};
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;

/// A read-only view of a node in a `RedBlackTree<T>`.
///
/// Views are returned by `RedBlackTree::search` and `RedBlackTree::root` and can walk to the
/// node's children and parent. The sentinel is never exposed: walking to it yields `None`.
///
/// # Examples
///
/// ```
/// use ordered_tree::red_black_tree::{Color, RedBlackTree};
///
/// let tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
///
/// let node = tree.search(&1).unwrap();
/// assert_eq!(node.color(), Color::Red);
/// assert_eq!(node.parent().map(|parent| *parent.key()), Some(2));
/// assert!(node.left().is_none());
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a RedBlackTree<T>,
    id: NodeId,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn from_id(tree: &'a RedBlackTree<T>, id: NodeId) -> Option<Self> {
        if id.is_nil() {
            None
        } else {
            Some(NodeRef { tree, id })
        }
    }

    /// Returns the arena index of the node. The index is stable across rotations and changes only
    /// when the node is removed.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a T {
        &self.tree.node(self.id).key
    }

    pub fn color(&self) -> Color {
        self.tree.color(self.id)
    }

    pub fn is_red(&self) -> bool {
        self.color().is_red()
    }

    pub fn is_black(&self) -> bool {
        self.color().is_black()
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        NodeRef::from_id(self.tree, self.tree.left(self.id))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        NodeRef::from_id(self.tree, self.tree.right(self.id))
    }

    /// Returns the parent of the node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        NodeRef::from_id(self.tree, self.tree.parent(self.id))
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
