use std::fmt::{self, Debug, Formatter};
use std::ptr;

use crate::{NodeId, NodePtr, Tree};

/// A position in a [`Tree`]: an element, or the end.
///
/// Moving is circular through the end position: stepping forward from the
/// last element reaches the end, and stepping forward again wraps to the
/// first element. Backwards from the end lands on the last element.
pub struct Cursor<'a, T, C> {
    tree: &'a Tree<T, C>,
    current: NodePtr,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(tree: &'a Tree<T, C>, current: NodePtr) -> Self {
        Cursor { tree, current }
    }

    /// The node under the cursor; `None` at the end.
    pub fn node(&self) -> NodePtr {
        self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<&'a T> {
        self.current.and_then(|n| self.tree.get_at(n))
    }

    pub fn move_next(&mut self) {
        self.current = self.tree.next(self.current);
    }

    pub fn move_prev(&mut self) {
        self.current = self.tree.prev(self.current);
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        self.tree
            .next(self.current)
            .and_then(|n| self.tree.get_at(n))
    }

    pub fn peek_prev(&self) -> Option<&'a T> {
        self.tree
            .prev(self.current)
            .and_then(|n| self.tree.get_at(n))
    }
}

impl<T, C> Clone for Cursor<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for Cursor<'_, T, C> {}

/// Cursors are equal when they sit on the same position of the same tree.
impl<T, C> PartialEq for Cursor<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<T, C> Eq for Cursor<'_, T, C> {}

impl<T: Debug, C> Debug for Cursor<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}

/// A [`Cursor`] that can also erase the element under it.
pub struct CursorMut<'a, T, C> {
    tree: &'a mut Tree<T, C>,
    current: NodePtr,
}

impl<'a, T, C> CursorMut<'a, T, C> {
    pub(crate) fn new(tree: &'a mut Tree<T, C>, current: NodePtr) -> Self {
        CursorMut { tree, current }
    }

    pub fn node(&self) -> NodePtr {
        self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.current.and_then(|n| self.tree.get_at(n))
    }

    pub fn move_next(&mut self) {
        self.current = self.tree.next(self.current);
    }

    pub fn move_prev(&mut self) {
        self.current = self.tree.prev(self.current);
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.tree
            .next(self.current)
            .and_then(|n| self.tree.get_at(n))
    }

    pub fn peek_prev(&self) -> Option<&T> {
        self.tree
            .prev(self.current)
            .and_then(|n| self.tree.get_at(n))
    }

    /// A read-only view of the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor::new(&*self.tree, self.current)
    }

    /// Erases the element under the cursor and moves to its successor.
    /// Returns `None`, and stays put, at the end.
    pub fn remove_current(&mut self) -> Option<T> {
        let node: NodeId = self.current?;
        self.current = self.tree.next(self.current);
        self.tree.erase(node)
    }
}

impl<T: Debug, C> Debug for CursorMut<'_, T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.as_cursor().fmt(f)
    }
}
