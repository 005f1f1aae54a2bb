use ordered_tree::red_black_tree::{Color, NodeRef, RedBlackTree};
use rand::Rng;
use serde_test::{assert_de_tokens, assert_tokens, Token};
use std::collections::BTreeMap;

// Checks the red black invariants using only the public node views. Returns the black height of
// the subtree.
fn check_subtree(node: Option<NodeRef<'_, u32>>, lower: Option<u32>, upper: Option<u32>) -> usize {
    let node = match node {
        Some(node) => node,
        None => return 0,
    };
    let key = *node.key();

    if let Some(lower) = lower {
        assert!(key >= lower, "{} is left of {}", lower, key);
    }
    if let Some(upper) = upper {
        assert!(key <= upper, "{} is right of {}", upper, key);
    }

    for child in node.left().iter().chain(node.right().iter()) {
        assert_eq!(child.parent().map(|parent| parent.id()), Some(node.id()));
        if node.is_red() {
            assert_eq!(child.color(), Color::Black, "red {} has a red child", key);
        }
    }

    let left_height = check_subtree(node.left(), lower, Some(key));
    let right_height = check_subtree(node.right(), Some(key), upper);
    assert_eq!(left_height, right_height, "black height differs below {}", key);
    left_height + if node.is_black() { 1 } else { 0 }
}

fn check_invariants(tree: &RedBlackTree<u32>) {
    if let Some(root) = tree.root() {
        assert_eq!(root.color(), Color::Black);
        assert!(root.parent().is_none());
    }
    let black_height = check_subtree(tree.root(), None, None);
    assert_eq!(tree.black_height(), black_height);
    assert_eq!(tree.validate(), Ok(black_height));
}

fn expected_keys(model: &BTreeMap<u32, usize>) -> Vec<u32> {
    model
        .iter()
        .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
        .collect()
}

#[test]
fn test_insert_balanced_sequence() {
    let keys = [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45];
    let mut tree = RedBlackTree::new();
    for &key in &keys {
        tree.insert(key);
    }

    for key in &keys {
        assert_eq!(tree.search(key).map(|node| *node.key()), Some(*key));
    }
    assert_eq!(tree.root().map(|root| root.color()), Some(Color::Black));
    check_invariants(&tree);
}

#[test]
fn test_remove_even_keys() {
    let mut tree = RedBlackTree::new();
    for key in 1..=100 {
        tree.insert(key);
    }
    for key in (2..=100).step_by(2) {
        assert_eq!(tree.remove(&key), Some(key));
        check_invariants(&tree);
    }

    for key in 1..=100 {
        assert_eq!(tree.contains(&key), key % 2 == 1);
    }
    assert_eq!(tree.len(), 50);
    check_invariants(&tree);
}

#[test]
fn test_insert_remove_single_key() {
    let mut tree = RedBlackTree::new();
    tree.insert(42);
    assert_eq!(tree.remove(&42), Some(42));

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert!(tree.search(&42).is_none());
    check_invariants(&tree);
}

#[test]
fn test_remove_red_leaf() {
    let mut tree: RedBlackTree<u32> = vec![10, 5, 15, 3, 7, 12, 20].into_iter().collect();
    assert_eq!(tree.remove(&3), Some(3));

    for key in &[5, 7, 10, 12, 15, 20] {
        assert!(tree.contains(key));
    }
    assert!(!tree.contains(&3));
    check_invariants(&tree);
}

#[test]
fn test_alternating_insert_remove() {
    let mut tree = RedBlackTree::new();
    for key in 1..=10 {
        tree.insert(key);
        assert_eq!(tree.remove(&key), Some(key));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
    }
}

#[test]
fn test_remove_absent_key() {
    let mut tree: RedBlackTree<u32> = vec![1, 2, 3].into_iter().collect();
    let before = tree.to_string();

    assert_eq!(tree.remove(&4), None);
    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.len(), 3);

    let mut empty: RedBlackTree<u32> = RedBlackTree::new();
    assert_eq!(empty.remove(&1), None);
    assert!(empty.search(&1).is_none());
    assert!(empty.is_empty());
}

#[test]
fn test_duplicates() {
    let mut tree = RedBlackTree::new();
    for _ in 0..5 {
        tree.insert(7);
    }
    tree.insert(3);
    tree.insert(9);
    check_invariants(&tree);
    assert_eq!(tree.traverse(), vec![&3, &7, &7, &7, &7, &7, &9]);

    for remaining in (0..5).rev() {
        assert_eq!(tree.remove(&7), Some(7));
        assert_eq!(tree.contains(&7), remaining > 0);
        assert_eq!(tree.len(), remaining + 2);
        check_invariants(&tree);
    }
}

#[test]
fn test_descending_insert() {
    let tree: RedBlackTree<u32> = (0..1000).rev().collect();
    check_invariants(&tree);
    assert_eq!(tree.min(), Some(&0));
    assert_eq!(tree.max(), Some(&999));
    assert!(tree.black_height() <= 10);
}

#[test]
fn test_search_borrowed_key() {
    let mut tree = RedBlackTree::new();
    tree.insert(String::from("b"));
    tree.insert(String::from("a"));
    tree.insert(String::from("c"));

    assert_eq!(tree.search("a").map(|node| node.key().as_str()), Some("a"));
    assert_eq!(tree.remove("b"), Some(String::from("b")));
    assert!(!tree.contains("b"));
}

#[test]
fn test_random_operations() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = RedBlackTree::new();
    let mut model: BTreeMap<u32, usize> = BTreeMap::new();

    for i in 0..20_000 {
        let key = rng.gen_range(0, 512);
        if rng.gen_range(0, 3) < 2 {
            tree.insert(key);
            *model.entry(key).or_insert(0) += 1;
        } else {
            let expected = match model.get_mut(&key) {
                Some(count) => {
                    *count -= 1;
                    Some(key)
                },
                None => None,
            };
            if model.get(&key) == Some(&0) {
                model.remove(&key);
            }
            assert_eq!(tree.remove(&key), expected);
        }

        if i % 500 == 0 {
            check_invariants(&tree);
        }
    }

    check_invariants(&tree);
    for key in 0..512 {
        assert_eq!(tree.contains(&key), model.contains_key(&key));
    }
    assert_eq!(
        tree.iter().cloned().collect::<Vec<u32>>(),
        expected_keys(&model),
    );
}

#[test]
fn test_random_drain() {
    let mut rng = rand::thread_rng();
    let mut keys = Vec::new();
    let mut tree = RedBlackTree::new();
    for _ in 0..5_000 {
        let key = rng.gen::<u32>();
        tree.insert(key);
        keys.push(key);
    }
    check_invariants(&tree);

    rng.shuffle(&mut keys);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(tree.remove(key), Some(*key));
        if i % 250 == 0 {
            check_invariants(&tree);
        }
    }
    assert!(tree.is_empty());
}

#[test]
fn test_into_iter_sorted() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let mut expected = Vec::new();
    let mut tree = RedBlackTree::new();
    for _ in 0..1_000 {
        let key = rng.next_u32() % 100;
        tree.insert(key);
        expected.push(key);
    }
    expected.sort();

    assert_eq!(tree.into_iter().collect::<Vec<u32>>(), expected);
}

#[test]
fn test_clone_is_independent() {
    let mut tree: RedBlackTree<u32> = (0..10).collect();
    let cloned = tree.clone();
    tree.remove(&5);

    assert!(cloned.contains(&5));
    assert!(!tree.contains(&5));
    check_invariants(&cloned);
    check_invariants(&tree);
}

#[test]
fn test_serde_tokens() {
    let tree: RedBlackTree<u32> = vec![3, 1, 2].into_iter().collect();
    assert_tokens(
        &tree,
        &[
            Token::Seq { len: Some(3) },
            Token::U32(1),
            Token::U32(2),
            Token::U32(3),
            Token::SeqEnd,
        ],
    );
}

#[test]
fn test_serde_unsorted_input() {
    let tree: RedBlackTree<u32> = vec![1, 2, 2, 3].into_iter().collect();
    assert_de_tokens(
        &tree,
        &[
            Token::Seq { len: None },
            Token::U32(2),
            Token::U32(3),
            Token::U32(1),
            Token::U32(2),
            Token::SeqEnd,
        ],
    );
}

#[test]
fn test_serde_empty() {
    let tree: RedBlackTree<u32> = RedBlackTree::new();
    assert_tokens(&tree, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);
}
