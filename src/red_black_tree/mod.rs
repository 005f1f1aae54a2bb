//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes are stored in a `TypedArena` and linked by index, with parent links and a shared black
//! sentinel standing in for every missing child.

mod iter;
mod node;
mod node_ref;
mod render;
mod serialize;
mod tree;
mod validate;

pub use self::iter::{RedBlackTreeIntoIter, RedBlackTreeIter};
pub use self::node::{Color, NodeId};
pub use self::node_ref::NodeRef;
pub use self::tree::RedBlackTree;
pub use self::validate::InvariantViolation;
