/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is `Red`.
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    /// Returns `true` if the color is `Black`.
    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

/// Index of a node in the tree's arena.
///
/// `NodeId::NIL` is never allocated and stands in for every absent child and for the parent of
/// the root.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const NIL: NodeId = NodeId(usize::max_value());

    pub fn is_nil(self) -> bool {
        self == NodeId::NIL
    }
}

/// A struct representing an internal node of a red black tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub parent: NodeId,
    pub left: NodeId,
    pub right: NodeId,
}

impl<T> Node<T> {
    pub fn new(key: T, parent: NodeId) -> Self {
        Node {
            key,
            color: Color::Red,
            parent,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}
