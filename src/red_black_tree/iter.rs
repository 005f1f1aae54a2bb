use crate::red_black_tree::node::{Node, NodeId};
use crate::red_black_tree::tree::RedBlackTree;
use std::vec::Vec;

impl<T> IntoIterator for RedBlackTree<T> {
    type IntoIter = RedBlackTreeIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        Self::IntoIter {
            current: self.root,
            tree: self,
            stack: Vec::new(),
            remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T>
where
    T: 'a,
{
    type IntoIter = RedBlackTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackTree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned keys. Each node is
/// released from the arena as soon as its key is yielded.
pub struct RedBlackTreeIntoIter<T> {
    tree: RedBlackTree<T>,
    current: NodeId,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<T> Iterator for RedBlackTreeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.current.is_nil() {
            self.stack.push(self.current);
            self.current = self.tree.left(self.current);
        }

        let node = self.stack.pop()?;
        self.current = self.tree.right(node);
        self.remaining -= 1;
        let Node { key, .. } = self.tree.arena.free(node.0);
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RedBlackTreeIntoIter<T> {}

/// An iterator for `RedBlackTree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references.
/// Equal keys are yielded in insertion order.
pub struct RedBlackTreeIter<'a, T> {
    tree: &'a RedBlackTree<T>,
    current: NodeId,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> RedBlackTreeIter<'a, T> {
    pub(crate) fn new(tree: &'a RedBlackTree<T>) -> Self {
        RedBlackTreeIter {
            tree,
            current: tree.root,
            stack: Vec::new(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for RedBlackTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.current.is_nil() {
            self.stack.push(self.current);
            self.current = self.tree.left(self.current);
        }

        let node = self.stack.pop()?;
        self.current = self.tree.right(node);
        self.remaining -= 1;
        Some(&self.tree.node(node).key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RedBlackTreeIter<'a, T> where T: 'a {}
