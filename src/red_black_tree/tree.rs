use crate::arena::TypedArena;
use crate::red_black_tree::iter::RedBlackTreeIter;
use crate::red_black_tree::node::{Color, Node, NodeId};
use crate::red_black_tree::node_ref::NodeRef;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::vec::Vec;

/// An ordered collection implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree in which every node carries a color.
/// The root is black, no red node has a red child, and every path from a node to a leaf passes
/// through the same number of black nodes. Together these bound the height of the tree by
/// `2 * log2(n + 1)`, so searching, inserting and removing are all `O(log n)`.
///
/// Nodes live in an arena and refer to each other by index. Every absent child, and the parent of
/// the root, is the shared sentinel `NodeId::NIL`, which is always black.
///
/// Keys equal to an existing key are stored as separate nodes and are inserted to the right of
/// the existing key.
///
/// # Examples
///
/// ```
/// use ordered_tree::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(0);
/// tree.insert(3);
///
/// assert_eq!(tree.len(), 2);
///
/// assert_eq!(tree.min(), Some(&0));
/// assert!(tree.search(&3).is_some());
///
/// assert_eq!(tree.remove(&0), Some(0));
/// assert_eq!(tree.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T> {
    pub(crate) arena: TypedArena<Node<T>>,
    pub(crate) root: NodeId,
    // parent of the sentinel, only meaningful while a removal is being repaired
    nil_parent: NodeId,
}

impl<T> RedBlackTree<T> {
    /// Constructs a new, empty `RedBlackTree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// ```
    pub fn new() -> Self {
        RedBlackTree {
            arena: TypedArena::new(),
            root: NodeId::NIL,
            nil_parent: NodeId::NIL,
        }
    }

    /// Constructs a new, empty `RedBlackTree<T>` with room for `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::with_capacity(1024);
    /// assert!(tree.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            arena: TypedArena::with_capacity(capacity),
            root: NodeId::NIL,
            nil_parent: NodeId::NIL,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.arena[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.arena[id.0]
    }

    pub(crate) fn color(&self, id: NodeId) -> Color {
        if id.is_nil() {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        if id.is_nil() {
            debug_assert!(color.is_black(), "Expected the sentinel to stay black.");
            return;
        }
        self.node_mut(id).color = color;
    }

    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            self.nil_parent
        } else {
            self.node(id).parent
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if id.is_nil() {
            self.nil_parent = parent;
        } else {
            self.node_mut(id).parent = parent;
        }
    }

    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).left
        }
    }

    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).right
        }
    }

    fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.node_mut(id).left = child;
    }

    fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.node_mut(id).right = child;
    }

    pub(crate) fn sentinel_parent(&self) -> NodeId {
        self.nil_parent
    }

    // Points whichever slot of `parent` held `old` at `new`. A sentinel parent means `old` was
    // the root.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    fn rotate_left(&mut self, node: NodeId) {
        let child = self.right(node);
        debug_assert!(!child.is_nil(), "Expected right child node to be non-nil.");
        log::trace!("rotate left at {:?}", node);

        let inner = self.left(child);
        self.set_right(node, inner);
        if !inner.is_nil() {
            self.set_parent(inner, node);
        }

        let parent = self.parent(node);
        self.set_parent(child, parent);
        self.replace_child(parent, node, child);

        self.set_left(child, node);
        self.set_parent(node, child);
    }

    fn rotate_right(&mut self, node: NodeId) {
        let child = self.left(node);
        debug_assert!(!child.is_nil(), "Expected left child node to be non-nil.");
        log::trace!("rotate right at {:?}", node);

        let inner = self.right(child);
        self.set_left(node, inner);
        if !inner.is_nil() {
            self.set_parent(inner, node);
        }

        let parent = self.parent(node);
        self.set_parent(child, parent);
        self.replace_child(parent, node, child);

        self.set_right(child, node);
        self.set_parent(node, child);
    }

    // Puts `v` where `u` hangs from its parent. `u` keeps its own children.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }

    fn min_node(&self, node: NodeId) -> NodeId {
        let mut curr = node;
        while !self.left(curr).is_nil() {
            curr = self.left(curr);
        }
        curr
    }

    fn max_node(&self, node: NodeId) -> NodeId {
        let mut curr = node;
        while !self.right(curr).is_nil() {
            curr = self.right(curr);
        }
        curr
    }

    fn fix_insert(&mut self, mut node: NodeId) {
        while self.color(self.parent(node)).is_red() {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle).is_red() {
                    log::trace!("insert fixup: red uncle at {:?}", grandparent);
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        log::trace!("insert fixup: inner child at {:?}", node);
                        node = parent;
                        self.rotate_left(node);
                    }
                    log::trace!("insert fixup: outer child at {:?}", node);
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle).is_red() {
                    log::trace!("insert fixup: red uncle at {:?}", grandparent);
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        log::trace!("insert fixup: inner child at {:?}", node);
                        node = parent;
                        self.rotate_right(node);
                    }
                    log::trace!("insert fixup: outer child at {:?}", node);
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    fn fix_delete(&mut self, mut node: NodeId) {
        while node != self.root && self.color(node).is_black() {
            let parent = self.parent(node);

            if node == self.left(parent) {
                let mut sibling = self.right(parent);

                if self.color(sibling).is_red() {
                    log::trace!("delete fixup: red sibling at {:?}", sibling);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }

                if self.color(self.left(sibling)).is_black()
                    && self.color(self.right(sibling)).is_black()
                {
                    log::trace!("delete fixup: black nephews at {:?}", sibling);
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.right(sibling)).is_black() {
                        log::trace!("delete fixup: red near nephew at {:?}", sibling);
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }

                    log::trace!("delete fixup: red far nephew at {:?}", sibling);
                    let parent = self.parent(node);
                    let far = self.right(sibling);
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);

                if self.color(sibling).is_red() {
                    log::trace!("delete fixup: red sibling at {:?}", sibling);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }

                if self.color(self.right(sibling)).is_black()
                    && self.color(self.left(sibling)).is_black()
                {
                    log::trace!("delete fixup: black nephews at {:?}", sibling);
                    self.set_color(sibling, Color::Red);
                    node = self.parent(node);
                } else {
                    if self.color(self.left(sibling)).is_black() {
                        log::trace!("delete fixup: red near nephew at {:?}", sibling);
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }

                    log::trace!("delete fixup: red far nephew at {:?}", sibling);
                    let parent = self.parent(node);
                    let far = self.left(sibling);
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        self.set_color(node, Color::Black);
    }

    fn find<V>(&self, key: &V) -> NodeId
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while !curr.is_nil() {
            match key.cmp(self.node(curr).key.borrow()) {
                Ordering::Less => curr = self.left(curr),
                Ordering::Greater => curr = self.right(curr),
                Ordering::Equal => break,
            }
        }
        curr
    }

    /// Inserts a key into the tree. Inserting a key that already exists adds another node holding
    /// an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.contains(&1));
    /// ```
    pub fn insert(&mut self, key: T)
    where
        T: Ord,
    {
        let mut parent = NodeId::NIL;
        let mut curr = self.root;
        let mut is_left = false;
        while !curr.is_nil() {
            parent = curr;
            is_left = key < self.node(curr).key;
            curr = if is_left {
                self.left(curr)
            } else {
                self.right(curr)
            };
        }

        let node = NodeId(self.arena.allocate(Node::new(key, parent)));
        if parent.is_nil() {
            self.root = node;
        } else if is_left {
            self.set_left(parent, node);
        } else {
            self.set_right(parent, node);
        }

        self.fix_insert(node);
    }

    /// Removes a key from the tree. If the key exists in the tree, it will return the removed
    /// key. Otherwise it will return `None` and leave the tree untouched. When several equal keys
    /// are stored, exactly one of them is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let node = self.find(key);
        if node.is_nil() {
            return None;
        }

        let mut removed_color = self.color(node);
        let replacement;

        if self.left(node).is_nil() {
            replacement = self.right(node);
            self.transplant(node, replacement);
        } else if self.right(node).is_nil() {
            replacement = self.left(node);
            self.transplant(node, replacement);
        } else {
            let successor = self.min_node(self.right(node));
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == node {
                self.set_parent(replacement, successor);
            } else {
                self.transplant(successor, replacement);
                let right = self.right(node);
                self.set_right(successor, right);
                self.set_parent(right, successor);
            }

            self.transplant(node, successor);
            let left = self.left(node);
            self.set_left(successor, left);
            self.set_parent(left, successor);
            self.set_color(successor, self.color(node));
        }

        let Node { key, .. } = self.arena.free(node.0);

        if removed_color.is_black() {
            self.fix_delete(replacement);
        }
        self.nil_parent = NodeId::NIL;

        Some(key)
    }

    /// Returns a view of the first node found holding a key equal to `key`, or `None` if no
    /// such node exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.search(&1).map(|node| *node.key()), Some(1));
    /// assert!(tree.search(&2).is_none());
    /// ```
    pub fn search<V>(&self, key: &V) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        NodeRef::from_id(self, self.find(key))
    }

    /// Checks if a key exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.find(key).is_nil()
    }

    /// Returns a view of the root node, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::{Color, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.root().is_none());
    ///
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.insert(3);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.color(), Color::Black);
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::from_id(self, self.root)
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Returns the number of black nodes on the path from the root down to any leaf, counting
    /// the root and not counting the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.black_height(), 0);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.black_height(), 1);
    /// ```
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut curr = self.root;
        while !curr.is_nil() {
            if self.color(curr).is_black() {
                height += 1;
            }
            curr = self.left(curr);
        }
        height
    }

    /// Clears the tree, removing all keys.
    ///
    /// Nodes are released bottom-up with an explicit stack, so the cost is `O(n)` time and
    /// `O(log n)` additional space.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert_eq!(tree.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        let mut released = 0;
        let mut stack = Vec::new();
        if !self.root.is_nil() {
            stack.push((self.root, false));
        }

        while let Some((node, children_released)) = stack.pop() {
            if children_released {
                self.arena.free(node.0);
                released += 1;
                continue;
            }

            stack.push((node, true));
            let right = self.right(node);
            if !right.is_nil() {
                stack.push((right, false));
            }
            let left = self.left(node);
            if !left.is_nil() {
                stack.push((left, false));
            }
        }

        debug_assert!(self.arena.is_empty());
        self.arena.clear();
        self.root = NodeId::NIL;
        self.nil_parent = NodeId::NIL;
        log::debug!("released {} nodes", released);
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        if self.root.is_nil() {
            return None;
        }
        Some(&self.node(self.min_node(self.root)).key)
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        if self.root.is_nil() {
            return None;
        }
        Some(&self.node(self.max_node(self.root)).key)
    }

    /// Returns the keys of the tree in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.traverse(), vec![&1, &3, &3]);
    /// ```
    pub fn traverse(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackTreeIter<'_, T> {
        RedBlackTreeIter::new(self)
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for RedBlackTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackTree<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
