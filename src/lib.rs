//! An ordered container built on a red-black tree.
//!
//! The rebalancing is translated from the linux kernel's implementation of
//! red-black trees. Nodes live in an arena and refer to each other by index,
//! so the tree is plain safe Rust: there is no parent/child ownership cycle
//! and no raw pointer to dangle.
//!
//! [`Tree`] is the engine. It stores elements of any type ordered by a
//! [`Comparator`] and rejects duplicates. [`Set`] and [`Map`] adapt it to the
//! usual "set of keys" and "key to value" shapes.
//!
//! ```
//! use noirtree::Tree;
//!
//! let mut tree: Tree<u32> = [7, 1, 5, 3].into_iter().collect();
//! assert_eq!(tree.lower_bound(&4).get(), Some(&5));
//! assert_eq!(tree.upper_bound(&5).get(), Some(&7));
//!
//! tree.remove(&5);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 7]);
//! ```
mod arena;
mod cmp;
mod config;
mod cursor;
mod error;
mod iter;
mod map;
mod node;
mod root;
mod set;
mod tree;
mod validate;

pub use cmp::{Comparator, FnComparator, KeyComparator, OrdComparator, Reversed};
pub use config::Config;
pub use cursor::{Cursor, CursorMut};
pub use error::{Error, InsertError, InsertResult, Result, Violation};
pub use iter::{
    Entries, IntoEntries, IntoIter, IntoKeys, IntoValues, Iter, Keys, Range, Values, ValuesMut,
};

use arena::NodeArena;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

/// Index of a node in its tree's arena.
///
/// A `NodeId` stays valid until the element it names is erased; after that
/// the slot may be handed to a newly inserted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A position in a tree: a node, or the sentinel.
pub type NodePtr = Option<NodeId>;

/// The "no node" position. It is the root's parent, every missing child and
/// the end of an in-order walk. It is black and never counted in a tree's
/// length.
pub const SENTINEL: NodePtr = None;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

pub(crate) struct Node<T> {
    pub(crate) parent: NodePtr,
    pub(crate) right: NodePtr,
    pub(crate) left: NodePtr,
    pub(crate) color: Color,
    pub(crate) value: T,
}

/// The structural half of a tree: the node arena and the root link.
///
/// Everything here is driven by colors and link sides only; comparing
/// elements is the [`Tree`]'s job.
pub(crate) struct Root<T> {
    nodes: NodeArena<T>,
    root: NodePtr,
}

/// A red-black tree of unique elements ordered by `C`.
pub struct Tree<T, C = OrdComparator> {
    root: Root<T>,
    cmp: C,
    len: usize,
    config: Config,
}

/// An ordered set of unique keys.
pub struct Set<T, C = OrdComparator> {
    tree: Tree<T, C>,
}

/// An ordered map; entries are ordered by key alone.
pub struct Map<K, V, C = OrdComparator> {
    tree: Tree<(K, V), KeyComparator<C>>,
}
