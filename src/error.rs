//! Error types for tree operations and invariant checks.

use std::collections::TryReserveError;
use std::error;
use std::fmt::{self, Display, Formatter};

use crate::NodeId;

/// Why a tree operation could not complete.
///
/// Every operation that returns one of these left the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The node arena could not grow.
    AllocFailed(TryReserveError),
    /// The tree already holds as many elements as its
    /// [`Config::max_len`](crate::Config::max_len) allows.
    CapacityExceeded { max_len: usize },
    /// Direct access to a key that is not in the map.
    KeyNotFound,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed(err) => write!(f, "node allocation failed: {err}"),
            Self::CapacityExceeded { max_len } => {
                write!(f, "tree is full ({max_len} elements)")
            }
            Self::KeyNotFound => f.write_str("no such element"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::AllocFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Self::AllocFailed(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of an insert that may fail: the node and whether it is new, or the
/// rejected element.
pub type InsertResult<T> = std::result::Result<(NodeId, bool), InsertError<T>>;

/// A failed insert, holding the element that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertError<T> {
    pub value: T,
    pub error: Error,
}

impl<T> InsertError<T> {
    pub(crate) fn new(value: T, error: Error) -> Self {
        InsertError { value, error }
    }

    /// Gives the rejected element back.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> Display for InsertError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl<T: fmt::Debug> error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<InsertError<T>> for Error {
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}

/// A broken tree invariant, as reported by [`Tree::validate`](crate::Tree::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The root has a parent link.
    RootHasParent,
    /// The root is red.
    RedRoot,
    /// A child does not point back at its parent.
    ParentLink(NodeId),
    /// A red node has a red parent.
    RedRed(NodeId),
    /// The two subtrees of a node have different black heights.
    BlackHeight(NodeId),
    /// The element at this in-order position is not greater than the one
    /// before it.
    Order(usize),
    /// The length counter disagrees with the number of reachable nodes.
    Len { expected: usize, found: usize },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootHasParent => f.write_str("root has a parent"),
            Self::RedRoot => f.write_str("root is red"),
            Self::ParentLink(id) => write!(f, "node {} has a stale parent link", id.index()),
            Self::RedRed(id) => write!(f, "red node {} has a red parent", id.index()),
            Self::BlackHeight(id) => {
                write!(f, "subtrees of node {} differ in black height", id.index())
            }
            Self::Order(position) => write!(f, "element {position} is out of order"),
            Self::Len { expected, found } => {
                write!(f, "length is {expected} but {found} nodes are reachable")
            }
        }
    }
}

impl error::Error for Violation {}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display() {
        assert_eq!("no such element", Error::KeyNotFound.to_string());
        assert_eq!(
            "tree is full (3 elements)",
            Error::CapacityExceeded { max_len: 3 }.to_string()
        );
        assert_eq!(
            "length is 2 but 1 nodes are reachable",
            Violation::Len {
                expected: 2,
                found: 1
            }
            .to_string()
        );
    }

    #[test]
    fn insert_error_hands_the_value_back() {
        let err = InsertError::new(String::from("kept"), Error::CapacityExceeded { max_len: 1 });
        assert_eq!("tree is full (1 elements)", err.to_string());
        assert!(error::Error::source(&err).is_some());
        assert_eq!(
            Error::CapacityExceeded { max_len: 1 },
            Error::from(err.clone())
        );
        assert_eq!("kept", err.into_value());
    }

    #[test]
    fn alloc_failure_keeps_its_source() {
        let err: Error = Vec::<u64>::new().try_reserve(usize::MAX).unwrap_err().into();
        assert!(matches!(err, Error::AllocFailed(_)));
        assert!(error::Error::source(&err).is_some());
    }
}
