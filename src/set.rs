use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use crate::{
    Comparator, Config, Cursor, CursorMut, InsertError, InsertResult, Iter, NodeId, NodePtr,
    OrdComparator, Range, Set, Tree,
};

impl<T> Set<T, OrdComparator> {
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<T, C: Default> Default for Set<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Set<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: Tree::with_comparator(cmp),
        }
    }

    pub fn with_config(cmp: C, config: Config) -> Self {
        Self {
            tree: Tree::with_config(cmp, config),
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.tree.retain(f);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// The keys from `first` up to, but excluding, `last`.
    pub fn range(&self, first: NodePtr, last: NodePtr) -> Range<'_, T> {
        self.tree.range(first, last)
    }

    pub fn begin(&self) -> Cursor<'_, T, C> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, T, C> {
        self.tree.end()
    }

    pub fn cursor_at(&self, node: NodePtr) -> Cursor<'_, T, C> {
        self.tree.cursor_at(node)
    }

    /// A cursor that can remove keys as it walks.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, C> {
        self.tree.begin_mut()
    }

    pub fn cursor_at_mut(&mut self, node: NodePtr) -> CursorMut<'_, T, C> {
        self.tree.cursor_at_mut(node)
    }

    /// Removes the key at `node`, if `node` is live.
    pub fn erase_at(&mut self, node: NodeId) -> Option<T> {
        self.tree.erase(node)
    }

    /// Removes the keys in `[first, last)`; returns how many went away.
    pub fn erase_range(&mut self, first: NodePtr, last: NodePtr) -> usize {
        self.tree.erase_range(first, last)
    }

    /// The underlying tree.
    pub fn as_tree(&self) -> &Tree<T, C> {
        &self.tree
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<T, C: Comparator<T>> Set<T, C> {
    /// Adds `key`; returns whether it was new.
    ///
    /// # Panics
    ///
    /// Panics if the set is full or cannot grow.
    pub fn insert(&mut self, key: T) -> bool {
        self.tree.insert(key).1
    }

    /// Like [`Self::insert`], but a failure hands `key` back.
    pub fn try_insert(&mut self, key: T) -> Result<bool, InsertError<T>> {
        self.tree.try_insert(key).map(|(_, inserted)| inserted)
    }

    /// Adds `key` right before `hint` when it belongs there, otherwise
    /// searches from the root. Returns the node holding the key and whether
    /// it was new.
    ///
    /// # Panics
    ///
    /// Panics if the set is full or cannot grow.
    pub fn insert_hint(&mut self, hint: NodePtr, key: T) -> (NodeId, bool) {
        self.tree.insert_hint(hint, key)
    }

    pub fn try_insert_hint(&mut self, hint: NodePtr, key: T) -> InsertResult<T> {
        self.tree.try_insert_hint(hint, key)
    }

    /// A cursor on `key`, or the end if it is missing.
    pub fn find(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.find(key)
    }

    pub fn remove(&mut self, key: &T) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Removes and returns the stored key equal to `key`.
    pub fn take(&mut self, key: &T) -> Option<T> {
        self.tree.remove(key)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.tree.contains(key)
    }

    pub fn get(&self, key: &T) -> Option<&T> {
        self.tree.get(key)
    }

    pub fn count(&self, key: &T) -> usize {
        self.tree.count(key)
    }

    pub fn lower_bound(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.lower_bound(key)
    }

    pub fn upper_bound(&self, key: &T) -> Cursor<'_, T, C> {
        self.tree.upper_bound(key)
    }

    pub fn equal_range(&self, key: &T) -> (Cursor<'_, T, C>, Cursor<'_, T, C>) {
        self.tree.equal_range(key)
    }
}

impl<T: Clone, C: Clone> Clone for Set<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T: PartialEq, C> PartialEq for Set<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for Set<T, C> {}

impl<T: PartialOrd, C> PartialOrd for Set<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<T: Ord, C> Ord for Set<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<T: Debug, C> Debug for Set<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Error, Reversed};
    use pretty_assertions::assert_eq;

    #[test]
    fn set_ctor_works() {
        let set = Set::<usize>::new();
        assert_eq!(None, set.first());
        assert_eq!(false, set.contains(&42));
        assert!(set.is_empty());
    }

    #[test]
    fn insert_remove() {
        let mut set = Set::new();
        assert!(set.insert(42));
        assert!(!set.insert(42));
        assert!(set.insert(0));
        assert_eq!(2, set.len());
        assert_eq!(1, set.count(&42));

        assert!(set.remove(&42));
        assert!(!set.remove(&42));
        assert_eq!(Some(0), set.take(&0));
        assert_eq!(None, set.take(&0));
        assert!(set.is_empty());
    }

    #[test]
    fn first_last_pop() {
        let mut set: Set<_> = [42, 0, 100].into_iter().collect();
        assert_eq!(Some(&0), set.first());
        assert_eq!(Some(&100), set.last());
        assert_eq!(Some(0), set.pop_first());
        assert_eq!(Some(100), set.pop_last());
        assert_eq!(Some(&42), set.get(&42));
        set.clear();
        assert_eq!(None, set.pop_first());
    }

    #[test]
    fn bounds() {
        let set: Set<_> = [1, 3, 5, 7].into_iter().collect();
        assert_eq!(Some(&5), set.lower_bound(&4).get());
        assert_eq!(Some(&5), set.lower_bound(&5).get());
        assert_eq!(Some(&7), set.upper_bound(&5).get());
        let (lo, hi) = set.equal_range(&7);
        assert_eq!(Some(&7), lo.get());
        assert!(hi.is_end());
        assert_eq!(set.as_tree().end(), hi);
    }

    #[test]
    fn retain_and_iter() {
        let mut set: Set<_> = (0..10).collect();
        set.retain(|v| v % 2 == 1);
        assert_eq!(vec![&1, &3, &5, &7, &9], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn reversed_order() {
        let mut set = Set::with_comparator(Reversed(OrdComparator));
        set.insert("a");
        set.insert("c");
        set.insert("b");
        assert_eq!(Some(&"c"), set.first());
        assert_eq!("{\"c\", \"b\", \"a\"}", format!("{set:?}"));
    }

    #[test]
    fn limited_set() {
        let mut set = Set::with_config(OrdComparator, Config::new().with_max_len(1));
        assert_eq!(Ok(true), set.try_insert(1));
        assert_eq!(Ok(false), set.try_insert(1));
        let rejected = set.try_insert(2).unwrap_err();
        assert_eq!(Error::CapacityExceeded { max_len: 1 }, rejected.error);
        assert_eq!(2, rejected.into_value());
        assert!(set.try_insert_hint(None, 3).is_err());
    }

    #[test]
    fn find_and_walk() {
        let set: Set<_> = (0..10).collect();
        assert_eq!(Some(&4), set.find(&4).get());
        assert_eq!(set.end(), set.find(&42));
        assert_eq!(Some(&0), set.begin().get());

        let mut cursor = set.end();
        cursor.move_prev();
        assert_eq!(Some(&9), cursor.get());

        let first = set.find(&5).node();
        let last = set.find(&7).node();
        assert_eq!(vec![&5, &6], set.range(first, last).collect::<Vec<_>>());
        assert_eq!(Some(&5), set.cursor_at(first).get());
    }

    #[test]
    fn erase_by_position() {
        let mut set: Set<_> = (0..10).collect();
        let first = set.find(&2).node();
        let last = set.find(&5).node();
        assert_eq!(3, set.erase_range(first, last));

        let five = set.find(&5).node().unwrap();
        assert_eq!(Some(5), set.erase_at(five));
        assert_eq!(None, set.erase_at(five));
        assert_eq!(vec![&0, &1, &6, &7, &8, &9], set.iter().collect::<Vec<_>>());
        assert!(set.as_tree().validate().is_ok());
    }

    #[test]
    fn insert_with_hint() {
        let mut set: Set<_> = [1, 3, 7].into_iter().collect();
        let hint = set.find(&7).node();
        let (node, inserted) = set.insert_hint(hint, 5);
        assert!(inserted);
        assert_eq!(Some(&5), set.cursor_at(Some(node)).get());

        // A wrong hint still lands the key in order.
        let (_, inserted) = set.insert_hint(hint, 9);
        assert!(inserted);
        let (existing, inserted) = set.insert_hint(None, 5);
        assert!(!inserted);
        assert_eq!(node, existing);
        assert_eq!(vec![&1, &3, &5, &7, &9], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn remove_while_walking() {
        let mut set: Set<_> = (0..10).collect();
        let mut cursor = set.begin_mut();
        while !cursor.is_end() {
            if cursor.get().is_some_and(|v| v % 3 == 0) {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }
        let eight = set.find(&8).node();
        let mut cursor = set.cursor_at_mut(eight);
        assert_eq!(Some(8), cursor.remove_current());
        assert!(cursor.is_end());
        assert_eq!(vec![&1, &2, &4, &5, &7], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn compare_sets() {
        let a: Set<_> = [1, 2].into_iter().collect();
        let b = a.clone();
        assert_eq!(a, b);
        let c: Set<_> = [1, 3].into_iter().collect();
        assert!(a < c);
        assert_eq!(Ordering::Greater, c.cmp(&a));
    }
}
