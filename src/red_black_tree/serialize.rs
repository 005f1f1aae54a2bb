use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::cmp;
use std::fmt;
use std::marker::PhantomData;

impl<T> Serialize for RedBlackTree<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct RedBlackTreeVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for RedBlackTreeVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackTree<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = cmp::min(seq.size_hint().unwrap_or(0), 4096);
        let mut tree = RedBlackTree::with_capacity(capacity);
        while let Some(key) = seq.next_element()? {
            tree.insert(key);
        }
        Ok(tree)
    }
}

impl<'de, T> Deserialize<'de> for RedBlackTree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackTreeVisitor {
            marker: PhantomData,
        })
    }
}
