use std::iter::FusedIterator;

use crate::{Comparator, NodeId, NodePtr, Root, Tree};

mod map;
mod set;

pub use map::{Entries, IntoEntries, IntoKeys, IntoValues, Keys, Values, ValuesMut};

/// The elements between two positions of a tree, in order.
///
/// This `struct` is created by the [`range`] method on [`Tree`]. See its
/// documentation for more.
///
/// [`range`]: Tree::range
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, T> {
    root: &'a Root<T>,
    // Inclusive front and back; None once the two ends have met.
    bounds: Option<(NodeId, NodeId)>,
}

impl<'a, T> Range<'a, T> {
    /// `[first, last)`; `last` may be the sentinel.
    pub(crate) fn new(root: &'a Root<T>, first: NodePtr, last: NodePtr) -> Self {
        let (first, last) = match (root.live(first), root.live(last)) {
            (None, _) if first.is_some() => (None, None),
            live => live,
        };
        let back = match last {
            Some(last) => root.prev(last),
            None => root.last(),
        };
        let bounds = match (first, back) {
            (Some(front), Some(back)) if first != last => Some((front, back)),
            _ => None,
        };
        Range { root, bounds }
    }

    fn value(&self, node: NodeId) -> &'a T {
        let root = self.root;
        &root.nodes().node(node).value
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let (front, back) = self.bounds?;
        self.bounds = if front == back {
            None
        } else {
            self.root.next(front).map(|next| (next, back))
        };
        Some(self.value(front))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let (front, back) = self.bounds?;
        self.bounds = if front == back {
            None
        } else {
            self.root.prev(back).map(|prev| (front, prev))
        };
        Some(self.value(back))
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            root: self.root,
            bounds: self.bounds,
        }
    }
}

/// An iterator over the elements of a [`Tree`], in order.
///
/// This `struct` is created by the [`iter`] method on [`Tree`]. See its
/// documentation for more.
///
/// [`iter`]: Tree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    range: Range<'a, T>,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(range: Range<'a, T>, len: usize) -> Self {
        Iter { range, len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.range.next()?;
        self.len -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }

    fn min(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let value = self.range.next_back()?;
        self.len -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            range: self.range.clone(),
            len: self.len,
        }
    }
}

/// An owning iterator over the elements of a [`Tree`], in order.
pub struct IntoIter<T, C>(Tree<T, C>);

impl<T, C> IntoIter<T, C> {
    /// Returns an iterator of references over the remaining items.
    pub fn iter(&self) -> Iter<'_, T> {
        self.0.iter()
    }
}

impl<T, C> IntoIterator for Tree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter(self)
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }

    fn last(mut self) -> Option<T> {
        self.next_back()
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_last()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T, C: Comparator<T> + Default> FromIterator<T> for Tree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::default();
        tree.extend(iter);
        tree
    }
}

/// Inserts one element at a time; elements already taken stay inserted if a
/// later one panics.
impl<T, C: Comparator<T>> Extend<T> for Tree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for Tree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
