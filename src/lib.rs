//! An ordered collection backed by a red black tree whose nodes live in an index-addressed arena.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::red_black_tree::RedBlackTree;
//!
//! let mut tree: RedBlackTree<u32> = vec![50, 30, 70, 20, 40].into_iter().collect();
//! tree.insert(30);
//! assert_eq!(tree.remove(&70), Some(70));
//! assert_eq!(tree.traverse(), vec![&20, &30, &30, &40, &50]);
//! assert!(tree.validate().is_ok());
//! ```

pub mod arena;
pub mod red_black_tree;
