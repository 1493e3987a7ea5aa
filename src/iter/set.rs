use crate::{Comparator, IntoIter, Iter, Set, Tree};

impl<T, C: Comparator<T> + Default> FromIterator<T> for Set<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Set<T, C> {
        Set {
            tree: Tree::from_iter(iter),
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for Set<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for Set<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<T, C> IntoIterator for Set<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    /// Gets an owning iterator over the keys of the set, in order.
    fn into_iter(self) -> IntoIter<T, C> {
        self.tree.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
