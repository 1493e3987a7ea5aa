use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::ops::Index;

use crate::{
    Comparator, Config, Cursor, CursorMut, Error, InsertError, InsertResult, KeyComparator, Map,
    NodeId, NodePtr, OrdComparator, Result, Tree,
};

impl<K, V> Map<K, V, OrdComparator> {
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }
}

impl<K, V, C: Default> Default for Map<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Map<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, Config::default())
    }

    pub fn with_config(cmp: C, config: Config) -> Self {
        Self {
            tree: Tree::with_config(KeyComparator(cmp), config),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.tree.comparator().0
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|(k, v)| (k, v))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|(k, v)| (k, v))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Keeps only the entries `f` approves; `f` may update the values it
    /// keeps.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut current = self.tree.begin().node();
        while let Some(node) = current {
            current = self.tree.next(current);
            let keep = match self.tree.get_at_mut(node) {
                Some(entry) => f(&entry.0, &mut entry.1),
                None => true,
            };
            if !keep {
                self.tree.erase(node);
            }
        }
    }

    /// A cursor on the entry with the smallest key.
    pub fn begin(&self) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.end()
    }

    pub fn cursor_at(&self, node: NodePtr) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.cursor_at(node)
    }

    /// A cursor that can remove entries as it walks.
    pub fn begin_mut(&mut self) -> CursorMut<'_, (K, V), KeyComparator<C>> {
        self.tree.begin_mut()
    }

    pub fn cursor_at_mut(&mut self, node: NodePtr) -> CursorMut<'_, (K, V), KeyComparator<C>> {
        self.tree.cursor_at_mut(node)
    }

    /// Removes the entry at `node`, if `node` is live.
    pub fn erase_at(&mut self, node: NodeId) -> Option<(K, V)> {
        self.tree.erase(node)
    }

    /// Removes the entries in `[first, last)`; returns how many went away.
    pub fn erase_range(&mut self, first: NodePtr, last: NodePtr) -> usize {
        self.tree.erase_range(first, last)
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<K, V, C: Comparator<K>> Map<K, V, C> {
    fn by_key<'k>(&'k self, key: &'k K) -> impl Fn(&(K, V)) -> Ordering + 'k {
        move |entry: &(K, V)| self.tree.comparator().0.compare(&entry.0, key)
    }

    /// A cursor on the entry under `key`, or the end if it is missing.
    pub fn find(&self, key: &K) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.find_by(self.by_key(key))
    }

    /// Inserts `value` under `key` unless the key is taken; an existing entry
    /// is left alone. Returns whether the entry was inserted.
    ///
    /// # Panics
    ///
    /// Panics if the map is full or cannot grow.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert((key, value)).1
    }

    /// Like [`Self::insert`], but a failure hands the entry back.
    pub fn try_insert(
        &mut self,
        key: K,
        value: V,
    ) -> std::result::Result<bool, InsertError<(K, V)>> {
        self.tree
            .try_insert((key, value))
            .map(|(_, inserted)| inserted)
    }

    /// Inserts the entry right before `hint` when its key belongs there,
    /// otherwise searches from the root. An existing entry is left alone.
    ///
    /// # Panics
    ///
    /// Panics if the map is full or cannot grow.
    pub fn insert_hint(&mut self, hint: NodePtr, key: K, value: V) -> (NodeId, bool) {
        self.tree.insert_hint(hint, (key, value))
    }

    pub fn try_insert_hint(&mut self, hint: NodePtr, key: K, value: V) -> InsertResult<(K, V)> {
        self.tree.try_insert_hint(hint, (key, value))
    }

    /// Inserts, or replaces the value of an existing key and returns the old
    /// one. The stored key is kept.
    ///
    /// # Panics
    ///
    /// Panics if `key` is new and the map is full or cannot grow; use
    /// [`Self::try_insert_or_replace`] to handle that.
    pub fn insert_or_replace(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.insert(key, value);
        None
    }

    /// Like [`Self::insert_or_replace`], but a failure to add a new key
    /// hands the entry back.
    pub fn try_insert_or_replace(
        &mut self,
        key: K,
        value: V,
    ) -> std::result::Result<Option<V>, InsertError<(K, V)>> {
        if let Some(slot) = self.get_mut(&key) {
            return Ok(Some(std::mem::replace(slot, value)));
        }
        self.try_insert(key, value).map(|_| None)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).get().map(|(k, v)| (k, v))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.find(key).node()?;
        self.tree.get_at_mut(node).map(|(_, v)| v)
    }

    /// Checked access to an existing entry.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// The value under `key`, inserting `V::default()` first if the key is
    /// missing.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let found = self.find(&key).node();
        let node = match found {
            Some(node) => node,
            None => self.tree.try_insert((key, V::default()))?.0,
        };
        self.tree
            .get_at_mut(node)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key).node()?;
        self.tree.erase(node)
    }

    /// Erases the entry under `key`; returns how many went away.
    pub fn erase(&mut self, key: &K) -> usize {
        self.remove_entry(key).is_some() as usize
    }

    pub fn contains_key(&self, key: &K) -> bool {
        !self.find(key).is_end()
    }

    pub fn count(&self, key: &K) -> usize {
        self.contains_key(key) as usize
    }

    pub fn lower_bound(&self, key: &K) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.lower_bound_by(self.by_key(key))
    }

    pub fn upper_bound(&self, key: &K) -> Cursor<'_, (K, V), KeyComparator<C>> {
        self.tree.upper_bound_by(self.by_key(key))
    }

    #[allow(clippy::type_complexity)]
    pub fn equal_range(
        &self,
        key: &K,
    ) -> (
        Cursor<'_, (K, V), KeyComparator<C>>,
        Cursor<'_, (K, V), KeyComparator<C>>,
    ) {
        self.tree.equal_range_by(self.by_key(key))
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for Map<K, V, C> {
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `Map`.
    #[inline]
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for Map<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for Map<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for Map<K, V, C> {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for Map<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.tree.partial_cmp(&other.tree)
    }
}

impl<K: Ord, V: Ord, C> Ord for Map<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tree.cmp(&other.tree)
    }
}

impl<K: Debug, V: Debug, C> Debug for Map<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{FnComparator, Reversed};
    use pretty_assertions::assert_eq;

    #[test]
    fn map_ctor_works() {
        let map = Map::<u32, String>::new();
        assert!(map.is_empty());
        assert_eq!(None, map.first_key_value());
        assert_eq!(false, map.contains_key(&1));
    }

    #[test]
    fn insert_never_overwrites() {
        let mut map = Map::new();
        assert!(map.insert(1, "one"));
        assert!(!map.insert(1, "uno"));
        assert_eq!(Some(&"one"), map.get(&1));
        assert_eq!(1, map.len());
    }

    #[test]
    fn insert_or_replace() {
        let mut map = Map::new();
        assert_eq!(None, map.insert_or_replace(1, "one"));
        assert_eq!(Some("one"), map.insert_or_replace(1, "uno"));
        assert_eq!(Some(&"uno"), map.get(&1));
    }

    #[test]
    fn get_mut_and_at() {
        let mut map: Map<_, _> = [(1, 10), (2, 20)].into_iter().collect();
        *map.get_mut(&1).unwrap() += 1;
        assert_eq!(Ok(&11), map.at(&1));
        assert_eq!(Err(Error::KeyNotFound), map.at(&3));
        *map.at_mut(&2).unwrap() = 0;
        assert_eq!(Some((&2, &0)), map.get_key_value(&2));
        assert!(map.at_mut(&5).is_err());
    }

    #[test]
    fn get_or_insert_default() {
        let mut map: Map<&str, u32> = Map::new();
        *map.get_or_insert_default("a").unwrap() += 1;
        *map.get_or_insert_default("a").unwrap() += 1;
        *map.get_or_insert_default("b").unwrap() += 1;
        assert_eq!(2, map[&"a"]);
        assert_eq!(1, map[&"b"]);
    }

    #[test]
    fn full_map_reports_instead_of_defaulting() {
        let mut map: Map<u32, u32> = Map::with_config(OrdComparator, Config::new().with_max_len(1));
        *map.get_or_insert_default(1).unwrap() = 5;
        assert_eq!(
            Err(Error::CapacityExceeded { max_len: 1 }),
            map.get_or_insert_default(2).map(|v| *v)
        );
        assert_eq!(Ok(false), map.try_insert(1, 9));
        assert_eq!(5, map[&1]);

        let rejected = map.try_insert(2, 7).unwrap_err();
        assert_eq!((2, 7), rejected.into_value());
        assert_eq!(Ok(Some(5)), map.try_insert_or_replace(1, 6));
        let rejected = map.try_insert_or_replace(3, 8).unwrap_err();
        assert_eq!(Error::CapacityExceeded { max_len: 1 }, rejected.error);
        assert_eq!((3, 8), rejected.value);
        assert_eq!(vec![(&1, &6)], map.iter().collect::<Vec<_>>());
    }

    #[test]
    #[should_panic]
    fn insert_or_replace_panics_when_full() {
        let mut map = Map::with_config(OrdComparator, Config::new().with_max_len(1));
        map.insert_or_replace(1, 'a');
        map.insert_or_replace(1, 'b');
        map.insert_or_replace(2, 'c');
    }

    #[test]
    fn find_and_walk() {
        let map: Map<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
        assert_eq!(Some(&(2, 'b')), map.find(&2).get());
        assert_eq!(map.end(), map.find(&4));

        let mut cursor = map.begin();
        assert_eq!(Some(&(1, 'a')), cursor.get());
        cursor.move_prev();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert_eq!(Some(&(3, 'c')), cursor.get());

        let two = map.find(&2).node();
        assert_eq!(Some(&(2, 'b')), map.cursor_at(two).get());
        assert_eq!(Some(&(3, 'c')), map.cursor_at(two).peek_next());
    }

    #[test]
    fn erase_by_position() {
        let mut map: Map<u32, u32> = (0..10).map(|k| (k, k * k)).collect();
        let first = map.lower_bound(&3).node();
        let last = map.upper_bound(&6).node();
        assert_eq!(4, map.erase_range(first, last));

        let nine = map.find(&9).node().unwrap();
        assert_eq!(Some((9, 81)), map.erase_at(nine));
        assert_eq!(None, map.erase_at(nine));
        assert_eq!(vec![0, 1, 2, 7, 8], map.keys().copied().collect::<Vec<_>>());

        let mut cursor = map.begin_mut();
        while !cursor.is_end() {
            if cursor.get().is_some_and(|(k, _)| k % 2 == 0) {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }
        let seven = map.find(&7).node();
        assert_eq!(Some((7, 49)), map.cursor_at_mut(seven).remove_current());
        assert_eq!(vec![(&1, &1)], map.iter().collect::<Vec<_>>());
    }

    #[test]
    fn insert_with_hint() {
        let mut map = Map::new();
        let mut hint = None;
        for k in (0..5).rev() {
            let (node, inserted) = map.insert_hint(hint, k, k.to_string());
            assert!(inserted);
            hint = Some(node);
        }
        let (node, inserted) = map.insert_hint(None, 2, "two".to_string());
        assert!(!inserted);
        assert_eq!(Some(&(2, "2".to_string())), map.cursor_at(Some(node)).get());
        assert!(map.try_insert_hint(None, 5, "5".to_string()).is_ok());
        assert_eq!(6, map.len());
    }

    #[test]
    fn cursor_types_can_be_named() {
        let map: Map<u8, ()> = [(1, ())].into_iter().collect();
        let cursor: Cursor<'_, (u8, ()), KeyComparator<OrdComparator>> = map.lower_bound(&0);
        assert_eq!(&OrdComparator, map.comparator());
        assert_eq!(Some(&(1, ())), cursor.get());
    }

    #[test]
    fn index_passes() {
        let mut map = Map::new();
        let forty_two = "forty two".to_string();
        map.insert(forty_two.clone(), forty_two.clone());
        assert_eq!(forty_two, map[&forty_two]);
    }

    #[test]
    #[should_panic]
    fn index_panics() {
        let map: Map<usize, ()> = Map::new();
        assert_eq!((), map[&42]);
    }

    #[test]
    fn remove_and_erase() {
        let mut map: Map<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
        assert_eq!(Some('b'), map.remove(&2));
        assert_eq!(None, map.remove(&2));
        assert_eq!(1, map.erase(&3));
        assert_eq!(0, map.erase(&3));
        assert_eq!(Some((1, 'a')), map.remove_entry(&1));
        assert!(map.is_empty());
    }

    #[test]
    fn bounds() {
        let map: Map<_, _> = [(1, "a"), (3, "c"), (5, "e"), (7, "g")].into_iter().collect();
        assert_eq!(Some(&(5, "e")), map.lower_bound(&4).get());
        assert_eq!(Some(&(5, "e")), map.lower_bound(&5).get());
        assert_eq!(Some(&(7, "g")), map.upper_bound(&5).get());
        let (lo, hi) = map.equal_range(&3);
        assert_eq!(Some(&(3, "c")), lo.get());
        assert_eq!(Some(&(5, "e")), hi.get());
        assert_eq!(1, map.count(&7));
        assert_eq!(0, map.count(&8));
    }

    #[test]
    fn first_last_and_pop() {
        let mut map: Map<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
        assert_eq!(Some((&1, &'a')), map.first_key_value());
        assert_eq!(Some((&3, &'c')), map.last_key_value());
        assert_eq!(Some((1, 'a')), map.pop_first());
        assert_eq!(Some((3, 'c')), map.pop_last());
        map.clear();
        assert_eq!(None, map.pop_last());
    }

    #[test]
    fn retain_can_update_values() {
        let mut map: Map<u32, u32> = (0..8).map(|k| (k, k)).collect();
        map.retain(|k, v| {
            *v *= 100;
            k % 2 == 0
        });
        assert_eq!(
            vec![(&0, &0), (&2, &200), (&4, &400), (&6, &600)],
            map.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn custom_key_order() {
        let mut map = Map::with_comparator(Reversed(OrdComparator));
        map.insert(1, "a");
        map.insert(2, "b");
        assert_eq!(Some((&2, &"b")), map.first_key_value());
        assert_eq!(Some(&(1, "a")), map.lower_bound(&1).get());

        let mut caseless = Map::with_comparator(FnComparator(|a: &String, b: &String| {
            a.to_lowercase().cmp(&b.to_lowercase())
        }));
        caseless.insert("Key".to_string(), 1);
        assert!(!caseless.insert("KEY".to_string(), 2));
        assert_eq!(Some(&1), caseless.get(&"key".to_string()));
    }

    #[test]
    fn comparisons_and_debug() {
        let a: Map<_, _> = [(1, 'x')].into_iter().collect();
        let b = a.clone();
        assert_eq!(a, b);
        let c: Map<_, _> = [(1, 'y')].into_iter().collect();
        assert!(a < c);
        assert_eq!("{1: 'x'}", format!("{a:?}"));
    }
}
