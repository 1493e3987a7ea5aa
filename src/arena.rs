use std::mem;

use log::trace;

use crate::{Color, Node, NodeId, NodePtr, Result};

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: NodePtr },
}

/// Slot storage for the nodes of one tree.
///
/// Erased slots form an intrusive free list and are reused before the
/// backing vector grows. Growth goes through `try_reserve` so running out of
/// memory surfaces as an [`Error`](crate::Error) before any node is touched.
pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free: NodePtr,
    vacant: usize,
}

impl<T> NodeArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free: None,
            vacant: 0,
        }
    }

    /// The largest number of slots a `Vec` of this element type can address.
    pub const fn max_slots() -> usize {
        let size = mem::size_of::<Slot<T>>();
        if size == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / size
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Makes room for `additional` more nodes, counting reusable slots.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        if additional > self.vacant {
            self.slots.try_reserve(additional - self.vacant)?;
        }
        Ok(())
    }

    pub fn alloc(&mut self, value: T) -> Result<NodeId> {
        self.try_reserve(1)?;
        Ok(self.place(value))
    }

    /// Stores `value` in room made by an earlier [`Self::try_reserve`].
    pub fn place(&mut self, value: T) -> NodeId {
        if let Some(id) = self.free {
            let next_free = match &self.slots[id.0] {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => unreachable!("free list points at live node {id:?}"),
            };
            trace!("reusing arena slot {}", id.0);
            self.slots[id.0] = Slot::Occupied(Node::new(value));
            self.free = next_free;
            self.vacant -= 1;
            return id;
        }
        let id = NodeId(self.slots.len());
        self.slots.push(Slot::Occupied(Node::new(value)));
        id
    }

    /// Releases a slot that is no longer linked into the tree.
    pub fn free(&mut self, id: NodeId) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free = Some(id);
                self.vacant += 1;
                node.value
            }
            Slot::Vacant { .. } => panic!("arena slot {id:?} freed twice"),
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.vacant = 0;
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.0)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// A node that is linked into the tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` names a vacant slot, which means the links are corrupt.
    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("vacant arena slot {id:?} is linked into the tree"),
        }
    }

    #[inline(always)]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("vacant arena slot {id:?} is linked into the tree"),
        }
    }

    /// Mutable references to the values of `order`, in that order.
    ///
    /// `order` must name distinct live slots; each slot is borrowed once.
    pub fn values_mut_in<I>(&mut self, order: I) -> Vec<&mut T>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut rank = vec![usize::MAX; self.slots.len()];
        let mut len = 0;
        for id in order {
            rank[id.0] = len;
            len += 1;
        }
        let mut placed: Vec<Option<&mut T>> = Vec::with_capacity(len);
        placed.resize_with(len, || None);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let (Slot::Occupied(node), Some(&position)) = (slot, rank.get(index)) {
                if position != usize::MAX {
                    placed[position] = Some(&mut node.value);
                }
            }
        }
        placed.into_iter().flatten().collect()
    }
}

// Link helpers over positions. The sentinel reads as a black node with no
// links, and writes to it are ignored.
impl<T> NodeArena<T> {
    #[inline(always)]
    pub fn is_black(&self, node: NodePtr) -> bool {
        node.map_or(true, |id| self.node(id).is_black())
    }

    #[inline(always)]
    pub fn is_red(&self, node: NodePtr) -> bool {
        node.map_or(false, |id| self.node(id).is_red())
    }

    #[inline(always)]
    pub fn color(&self, node: NodePtr) -> Color {
        node.map_or(Color::Black, |id| self.node(id).color)
    }

    #[inline(always)]
    pub fn parent(&self, node: NodePtr) -> NodePtr {
        node.and_then(|id| self.node(id).parent)
    }

    #[inline(always)]
    pub fn left(&self, node: NodePtr) -> NodePtr {
        node.and_then(|id| self.node(id).left)
    }

    #[inline(always)]
    pub fn right(&self, node: NodePtr) -> NodePtr {
        node.and_then(|id| self.node(id).right)
    }

    #[inline(always)]
    pub fn set_parent(&mut self, node: NodePtr, parent: NodePtr) {
        if let Some(id) = node {
            self.node_mut(id).parent = parent;
        }
    }

    #[inline(always)]
    pub fn set_parent_and_color(&mut self, node: NodePtr, parent: NodePtr, color: Color) {
        if let Some(id) = node {
            self.node_mut(id).set_parent_and_color(parent, color);
        }
    }

    #[inline(always)]
    pub fn set_color(&mut self, node: NodePtr, color: Color) {
        if let Some(id) = node {
            self.node_mut(id).color = color;
        }
    }

    #[inline(always)]
    pub fn set_left(&mut self, node: NodePtr, left: NodePtr) {
        if let Some(id) = node {
            self.node_mut(id).left = left;
        }
    }

    #[inline(always)]
    pub fn set_right(&mut self, node: NodePtr, right: NodePtr) {
        if let Some(id) = node {
            self.node_mut(id).right = right;
        }
    }
}
