use std::cmp::Ordering::{self, *};
use std::fmt::{self, Debug, Formatter};

use log::{debug, trace, warn};

use crate::{
    Comparator, Config, Cursor, CursorMut, Error, InsertError, InsertResult, Iter, NodeArena,
    NodeId, NodePtr, OrdComparator, Range, Result, Root, Side, Tree,
};

/// Where a descent for an element ended.
enum Search {
    Found(NodeId),
    Vacant(NodePtr, Side),
}

impl<T> Tree<T, OrdComparator> {
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }
}

impl<T, C: Default> Default for Tree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Tree<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config(cmp, Config::default())
    }

    pub fn with_config(cmp: C, config: Config) -> Self {
        Tree {
            root: Root::new(NodeArena::with_capacity(config.initial_capacity)),
            cmp,
            len: 0,
            config,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The most elements this tree can ever hold: the configured
    /// [`Config::max_len`], or what the arena can address.
    pub fn max_size(&self) -> usize {
        self.config
            .max_len
            .unwrap_or_else(NodeArena::<T>::max_slots)
    }

    /// Node slots allocated, live or reusable.
    pub fn capacity(&self) -> usize {
        self.root.nodes().capacity()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Makes sure the next `additional` inserts will not allocate.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.root.nodes_mut().try_reserve(additional)
    }

    pub fn first(&self) -> Option<&T> {
        self.root.first().map(|n| &self.root.nodes().node(n).value)
    }

    pub fn last(&self) -> Option<&T> {
        self.root.last().map(|n| &self.root.nodes().node(n).value)
    }

    /// The element at `node`, if `node` is live.
    pub fn get_at(&self, node: NodeId) -> Option<&T> {
        self.root.nodes().get(node).map(|n| &n.value)
    }

    /// Mutable access that bypasses ordering; callers only touch parts of
    /// the element the comparator ignores.
    pub(crate) fn get_at_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.root.nodes_mut().get_mut(node).map(|n| &mut n.value)
    }

    /// The position after `node`; the sentinel wraps to the first element.
    ///
    /// An erased `node` has no neighbours and steps to the sentinel.
    pub fn next(&self, node: NodePtr) -> NodePtr {
        match self.root.live(node) {
            Some(id) => self.root.next(id),
            None if node.is_none() => self.root.first(),
            None => None,
        }
    }

    /// The position before `node`; the sentinel wraps to the last element.
    ///
    /// An erased `node` has no neighbours and steps to the sentinel.
    pub fn prev(&self, node: NodePtr) -> NodePtr {
        match self.root.live(node) {
            Some(id) => self.root.prev(id),
            None if node.is_none() => self.root.last(),
            None => None,
        }
    }

    /// A cursor on the smallest element (the end if empty).
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, self.root.first())
    }

    /// A cursor on the sentinel.
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(self, None)
    }

    pub fn cursor_at(&self, node: NodePtr) -> Cursor<'_, T, C> {
        Cursor::new(self, node)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T, C> {
        let first = self.root.first();
        CursorMut::new(self, first)
    }

    pub fn cursor_at_mut(&mut self, node: NodePtr) -> CursorMut<'_, T, C> {
        CursorMut::new(self, node)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(Range::new(&self.root, self.root.first(), None), self.len)
    }

    /// The elements from `first` up to, but excluding, `last`.
    ///
    /// An erased `first` gives an empty range; an erased `last` reads as the
    /// end.
    pub fn range(&self, first: NodePtr, last: NodePtr) -> Range<'_, T> {
        Range::new(&self.root, first, last)
    }

    /// Binary search with a caller ordering. `order(element)` tells how the
    /// stored element orders against the searched one.
    pub fn find_by<F>(&self, order: F) -> Cursor<'_, T, C>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut node = self.root.root();
        while let Some(candidate) = node {
            let candidate_ref = self.root.nodes().node(candidate);
            match order(&candidate_ref.value) {
                Equal => break,
                Less => node = candidate_ref.right,
                Greater => node = candidate_ref.left,
            }
        }
        Cursor::new(self, node)
    }

    /// The first element `order` does not place before the target.
    pub fn lower_bound_by<F>(&self, order: F) -> Cursor<'_, T, C>
    where
        F: Fn(&T) -> Ordering,
    {
        self.bound_by(|value| order(value) != Less)
    }

    /// The first element `order` places after the target.
    pub fn upper_bound_by<F>(&self, order: F) -> Cursor<'_, T, C>
    where
        F: Fn(&T) -> Ordering,
    {
        self.bound_by(|value| order(value) == Greater)
    }

    pub fn equal_range_by<F>(&self, order: F) -> (Cursor<'_, T, C>, Cursor<'_, T, C>)
    where
        F: Fn(&T) -> Ordering,
    {
        (self.lower_bound_by(&order), self.upper_bound_by(&order))
    }

    /// Erases the element at `node` and hands it back. Returns `None` when
    /// `node` is not live.
    pub fn erase(&mut self, node: NodeId) -> Option<T> {
        self.root.nodes().get(node)?;
        self.root.erase(node);
        self.len -= 1;
        trace!("erased node {}", node.index());
        Some(self.root.nodes_mut().free(node))
    }

    /// Erases `[first, last)` and returns how many elements went away.
    ///
    /// Each successor is taken before its predecessor's slot is freed. An
    /// erased `first` erases nothing; an erased `last` reads as the end.
    pub fn erase_range(&mut self, first: NodePtr, last: NodePtr) -> usize {
        let last = self.root.live(last);
        let mut count = 0;
        let mut current = first;
        while current != last {
            let Some(node) = self.root.live(current) else {
                break;
            };
            current = self.root.next(node);
            self.erase(node);
            count += 1;
        }
        debug!("erased {count} elements in range");
        count
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.root.first()?;
        self.erase(first)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.root.last()?;
        self.erase(last)
    }

    /// Keeps only the elements `f` approves, visiting them in order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut current = self.root.first();
        while let Some(node) = current {
            current = self.root.next(node);
            if !f(&self.root.nodes().node(node).value) {
                self.erase(node);
            }
        }
    }

    pub fn clear(&mut self) {
        debug!("clearing tree of {} elements", self.len);
        self.root.clear();
        self.len = 0;
    }

    /// In-order mutable references; see [`Self::get_at_mut`].
    pub(crate) fn values_mut_in_order(&mut self) -> Vec<&mut T> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.root.first();
        while let Some(node) = current {
            order.push(node);
            current = self.root.next(node);
        }
        self.root.nodes_mut().values_mut_in(order)
    }

    /// Deep copy that leaves `self` untouched and reports allocation
    /// failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        C: Clone,
    {
        let mut nodes = NodeArena::with_capacity(0);
        nodes.try_reserve(self.len.max(self.config.initial_capacity))?;
        let mut root = Root::new(nodes);

        // Pre-order walk: (source node, copied parent, side under it).
        let mut stack = Vec::new();
        if let Some(source) = self.root.root() {
            stack.push((source, None, Side::Left));
        }
        while let Some((source, parent, side)) = stack.pop() {
            let source = self.root.nodes().node(source);
            let copy = root.nodes_mut().alloc(source.value.clone())?;
            root.nodes_mut().set_color(Some(copy), source.color);
            root.link(copy, parent, side);
            if let Some(right) = source.right {
                stack.push((right, Some(copy), Side::Right));
            }
            if let Some(left) = source.left {
                stack.push((left, Some(copy), Side::Left));
            }
        }
        debug!("cloned tree of {} elements", self.len);

        Ok(Tree {
            root,
            cmp: self.cmp.clone(),
            len: self.len,
            config: self.config,
        })
    }

    /// Replaces the contents with a deep copy of `other`. The copy is built
    /// before anything is dropped, so on error `self` is unchanged.
    pub fn assign(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
        C: Clone,
    {
        let copy = other.try_clone()?;
        debug!("assigning {} elements over {}", copy.len, self.len);
        *self = copy;
        Ok(())
    }
}

impl<T, C: Comparator<T>> Tree<T, C> {
    pub fn find(&self, value: &T) -> Cursor<'_, T, C> {
        self.find_by(|candidate| self.cmp.compare(candidate, value))
    }

    pub fn contains(&self, value: &T) -> bool {
        !self.find(value).is_end()
    }

    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).get()
    }

    /// 1 if `value` is present, 0 otherwise.
    pub fn count(&self, value: &T) -> usize {
        self.contains(value) as usize
    }

    /// The first element not less than `value`.
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, C> {
        self.lower_bound_by(|candidate| self.cmp.compare(candidate, value))
    }

    /// The first element greater than `value`.
    pub fn upper_bound(&self, value: &T) -> Cursor<'_, T, C> {
        self.upper_bound_by(|candidate| self.cmp.compare(candidate, value))
    }

    pub fn equal_range(&self, value: &T) -> (Cursor<'_, T, C>, Cursor<'_, T, C>) {
        (self.lower_bound(value), self.upper_bound(value))
    }

    /// Inserts `value` unless an equal element is present.
    ///
    /// Returns the node holding the element and whether it was inserted; a
    /// duplicate `value` is dropped. On error the tree is unchanged and the
    /// error carries `value` back.
    pub fn try_insert(&mut self, value: T) -> InsertResult<T> {
        match self.search(&value) {
            Search::Found(node) => Ok((node, false)),
            Search::Vacant(parent, side) => self.attach(value, parent, side).map(|n| (n, true)),
        }
    }

    /// Like [`Self::try_insert`].
    ///
    /// # Panics
    ///
    /// Panics if the tree is full or the arena cannot grow.
    pub fn insert(&mut self, value: T) -> (NodeId, bool) {
        self.try_insert(value)
            .unwrap_or_else(|err| panic!("cannot insert: {}", err.error))
    }

    /// Inserts `value` next to `hint` when it belongs right before it,
    /// skipping the descent from the root; otherwise behaves like
    /// [`Self::try_insert`]. The sentinel hints at the end.
    pub fn try_insert_hint(&mut self, hint: NodePtr, value: T) -> InsertResult<T> {
        if let Some((parent, side)) = self.hinted_slot(hint, &value) {
            return self.attach(value, parent, side).map(|n| (n, true));
        }
        self.try_insert(value)
    }

    /// # Panics
    ///
    /// Panics if the tree is full or the arena cannot grow.
    pub fn insert_hint(&mut self, hint: NodePtr, value: T) -> (NodeId, bool) {
        self.try_insert_hint(hint, value)
            .unwrap_or_else(|err| panic!("cannot insert: {}", err.error))
    }

    /// Erases the element equal to `value`; returns how many went away.
    pub fn erase_key(&mut self, value: &T) -> usize {
        self.remove(value).is_some() as usize
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        let node = self.find(value).node()?;
        self.erase(node)
    }

    fn search(&self, value: &T) -> Search {
        let mut parent = None;
        let mut side = Side::Left;
        let mut link = self.root.root();
        while let Some(candidate) = link {
            let candidate_ref = self.root.nodes().node(candidate);
            parent = link;
            match self.cmp.compare(value, &candidate_ref.value) {
                Equal => return Search::Found(candidate),
                Greater => {
                    side = Side::Right;
                    link = candidate_ref.right;
                }
                Less => {
                    side = Side::Left;
                    link = candidate_ref.left;
                }
            }
        }
        Search::Vacant(parent, side)
    }

    fn hinted_slot(&self, hint: NodePtr, value: &T) -> Option<(NodePtr, Side)> {
        let nodes = self.root.nodes();
        let Some(hint) = hint else {
            // Hinting the end: value must go after the current maximum.
            let last = self.root.last()?;
            let after_last = self.cmp.compare(&nodes.node(last).value, value) == Less;
            return after_last.then_some((Some(last), Side::Right));
        };
        let hint_ref = nodes.get(hint)?;
        if self.cmp.compare(value, &hint_ref.value) != Less {
            return None;
        }
        let prev = self.root.prev(hint);
        if let Some(prev) = prev {
            if self.cmp.compare(&nodes.node(prev).value, value) != Less {
                return None;
            }
        }
        if hint_ref.left.is_none() {
            Some((Some(hint), Side::Left))
        } else {
            // prev is the maximum of hint's left subtree: its right is free.
            Some((prev, Side::Right))
        }
    }
}

// Private

impl<T, C> Tree<T, C> {
    fn bound_by<F>(&self, is_candidate: F) -> Cursor<'_, T, C>
    where
        F: Fn(&T) -> bool,
    {
        let mut candidate = None;
        let mut node = self.root.root();
        while let Some(current) = node {
            let current_ref = self.root.nodes().node(current);
            if is_candidate(&current_ref.value) {
                candidate = node;
                node = current_ref.left;
            } else {
                node = current_ref.right;
            }
        }
        Cursor::new(self, candidate)
    }

    fn attach(
        &mut self,
        value: T,
        parent: NodePtr,
        side: Side,
    ) -> std::result::Result<NodeId, InsertError<T>> {
        let max_len = self.max_size();
        if self.len >= max_len {
            warn!("tree is full at {max_len} elements");
            return Err(InsertError::new(value, Error::CapacityExceeded { max_len }));
        }
        if let Err(err) = self.root.nodes_mut().try_reserve(1) {
            warn!("{err}");
            return Err(InsertError::new(value, err));
        }
        let node = self.root.nodes_mut().place(value);
        self.root.link(node, parent, side);
        self.root.insert_color(node);
        self.len += 1;
        trace!("inserted node {}", node.index());
        Ok(node)
    }
}

impl<T: Clone, C: Clone> Clone for Tree<T, C> {
    /// # Panics
    ///
    /// Panics if the arena cannot grow; use [`Tree::try_clone`] to handle it.
    fn clone(&self) -> Self {
        self.try_clone()
            .unwrap_or_else(|err| panic!("cannot clone tree: {err}"))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source)
            .unwrap_or_else(|err| panic!("cannot clone tree: {err}"))
    }
}

impl<T: PartialEq, C> PartialEq for Tree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for Tree<T, C> {}

impl<T: PartialOrd, C> PartialOrd for Tree<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C> Ord for Tree<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Debug, C> Debug for Tree<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
