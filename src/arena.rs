//! Index-addressed node storage.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A growable table of objects of a single type, addressed by `usize` index.
///
/// Freed slots are threaded onto a free list and handed out again by later allocations, so an
/// index stays stable for as long as its object is alive. All objects inside the arena are
/// destroyed when the typed arena is destroyed. The underlying container is a single `Vec` and
/// the arena uses no unsafe code.
///
/// # Examples
///
/// ```
/// use ordered_tree::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct TypedArena<T> {
    head: Option<usize>,
    blocks: Vec<Block<T>>,
    size: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            size: 0,
        }
    }

    /// Constructs a new, empty `TypedArena<T>` with room for `capacity` objects before the
    /// underlying table reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::with_capacity(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            size: 0,
        }
    }

    /// Allocates an object in the typed arena and returns its index. The index can later be used
    /// to retrieve mutable and immutable references to the object, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> usize {
        self.size += 1;

        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                self.blocks.len() - 1
            },
            Some(index) => {
                let vacant_block = mem::replace(&mut self.blocks[index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_index) => {
                        self.head = next_index;
                        index
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if `index` corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, index: usize) -> T {
        if index >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        if let Block::Vacant(_) = self.blocks[index] {
            panic!("Error: attempting to free vacant block.");
        }
        let old_block = mem::replace(&mut self.blocks[index], Block::Vacant(self.head.take()));
        self.head = Some(index);
        self.size -= 1;
        match old_block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the index
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// assert_eq!(arena.get(x + 1), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.blocks.get(index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the index
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.blocks.get_mut(index) {
            Some(Block::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the typed arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// arena.allocate(1);
    /// arena.free(x);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the typed arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Destroys every object in the typed arena and forgets all free slots. Indices handed out
    /// before the call are invalidated.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.size = 0;
    }
}

impl<T> Clone for TypedArena<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let blocks = self
            .blocks
            .iter()
            .map(|block| match block {
                Block::Occupied(value) => Block::Occupied(value.clone()),
                Block::Vacant(next_index) => Block::Vacant(*next_index),
            })
            .collect();
        TypedArena {
            head: self.head,
            blocks,
            size: self.size,
        }
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for TypedArena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Error: index out of bounds.")
    }
}

impl<T> IndexMut<usize> for TypedArena<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Error: index out of bounds.")
    }
}
