use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

/// A total order over `T`, stored by value in the tree.
///
/// Two elements comparing [`Ordering::Equal`] are the same element as far as
/// the tree is concerned: the second one is rejected on insert.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdComparator;

impl<T: Ord + ?Sized> Comparator<T> for OrdComparator {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders elements with a closure.
///
/// ```
/// use noirtree::{FnComparator, Tree};
///
/// let mut tree = Tree::with_comparator(FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len())));
/// tree.insert("ccc");
/// tree.insert("a");
/// assert!(!tree.insert("b").1);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "ccc"]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnComparator<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> Debug for FnComparator<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

/// Flips another comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders map entries by key.
///
/// This is the comparator a [`Map`](crate::Map) runs its engine with; it shows
/// up in the cursor types the map hands out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyComparator<C>(pub C);

impl<K, V, C: Comparator<K>> Comparator<(K, V)> for KeyComparator<C> {
    #[inline]
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Ordering {
        self.0.compare(&a.0, &b.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ord_comparator() {
        assert_eq!(Ordering::Less, OrdComparator.compare(&1, &2));
        assert_eq!(Ordering::Equal, OrdComparator.compare("a", "a"));
    }

    #[test]
    fn reversed() {
        let cmp = Reversed(OrdComparator);
        assert_eq!(Ordering::Greater, cmp.compare(&1, &2));
    }

    #[test]
    fn key_comparator_ignores_values() {
        let cmp = KeyComparator(OrdComparator);
        assert_eq!(Ordering::Equal, cmp.compare(&(1, "x"), &(1, "y")));
        assert_eq!(Ordering::Less, cmp.compare(&(1, "z"), &(2, "a")));
    }
}
