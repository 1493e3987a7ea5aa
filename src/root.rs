use log::trace;

use super::{Color, NodeArena, NodeId, NodePtr, Root, Side};

// Public
impl<T> Root<T> {
    pub fn new(nodes: NodeArena<T>) -> Self {
        Root { nodes, root: None }
    }

    #[inline(always)]
    pub fn root(&self) -> NodePtr {
        self.root
    }

    #[inline(always)]
    pub fn nodes(&self) -> &NodeArena<T> {
        &self.nodes
    }

    #[inline(always)]
    pub fn nodes_mut(&mut self) -> &mut NodeArena<T> {
        &mut self.nodes
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    /// `node` if it names a live element, the sentinel otherwise.
    pub fn live(&self, node: NodePtr) -> NodePtr {
        node.filter(|&id| self.nodes.get(id).is_some())
    }

    pub fn first(&self) -> NodePtr {
        self.root.map(|n| self.leftmost(n))
    }

    pub fn last(&self) -> NodePtr {
        self.root.map(|n| self.rightmost(n))
    }

    /// The in-order successor of `node`, or the sentinel after the last one.
    pub fn next(&self, node: NodeId) -> NodePtr {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.nodes.node(node).right {
            return Some(self.leftmost(right));
        }
        // No right-hand children. Everything down and left is smaller than us,
        // so any 'next' node must be in the general direction of our parent.
        // Go up the tree; any time the ancestor is a right-hand child of its
        // parent, keep going up. The first time it's a left-hand child of its
        // parent, said parent is our 'next' node.
        let mut node = node;
        let mut parent = self.nodes.node(node).parent;
        while let Some(p) = parent {
            if self.nodes.node(p).right != Some(node) {
                break;
            }
            node = p;
            parent = self.nodes.node(p).parent;
        }
        parent
    }

    /// The in-order predecessor of `node`, or the sentinel before the first
    /// one.
    pub fn prev(&self, node: NodeId) -> NodePtr {
        if let Some(left) = self.nodes.node(node).left {
            return Some(self.rightmost(left));
        }
        let mut node = node;
        let mut parent = self.nodes.node(node).parent;
        while let Some(p) = parent {
            if self.nodes.node(p).left != Some(node) {
                break;
            }
            node = p;
            parent = self.nodes.node(p).parent;
        }
        parent
    }

    /// Hangs a fresh node under `parent` on `side`; the sentinel parent makes
    /// it the root. The caller guarantees the slot is empty.
    pub fn link(&mut self, node: NodeId, parent: NodePtr, side: Side) {
        self.nodes.set_parent(Some(node), parent);
        match (parent, side) {
            (None, _) => self.root = Some(node),
            (Some(_), Side::Left) => self.nodes.set_left(parent, Some(node)),
            (Some(_), Side::Right) => self.nodes.set_right(parent, Some(node)),
        }
    }

    /// Rebalances after [`Self::link`] put the red `node` in place.
    pub fn insert_color(&mut self, node: NodeId) {
        let mut node: NodePtr = Some(node);
        let mut parent = self.nodes.parent(node);
        let mut gparent;
        let mut tmp;

        loop {
            /*
             * Loop invariant: node is red.
             */
            if parent.is_none() {
                /*
                 * The inserted node is root. Either this is the
                 * first node, or we recursed at Case 1 below and
                 * are no longer violating 4).
                 */
                self.nodes.set_parent_and_color(node, None, Color::Black);
                trace!("insert fixup ended at the root");
                break;
            }

            /*
             * If there is a black parent, we are done.
             * Otherwise, take some corrective action as,
             * per 4), we don't want a red root or two
             * consecutive red nodes.
             */
            if self.nodes.is_black(parent) {
                trace!("insert fixup ended under a black parent");
                break;
            }

            gparent = self.nodes.parent(parent);
            tmp = self.nodes.right(gparent);

            if parent != tmp {
                /* parent == gparent->left */
                if self.nodes.is_red(tmp) {
                    /*
                     * Case 1 - node's uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * However, since g's parent might be red, and
                     * 4) does not allow this, we need to recurse
                     * at g.
                     */
                    self.nodes.set_parent_and_color(tmp, gparent, Color::Black);
                    self.nodes.set_parent_and_color(parent, gparent, Color::Black);
                    node = gparent;
                    parent = self.nodes.parent(node);
                    self.nodes.set_parent_and_color(node, parent, Color::Red);
                    continue;
                }

                tmp = self.nodes.right(parent);
                if node == tmp {
                    /*
                     * Case 2 - node's uncle is black and node is
                     * the parent's right child (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     *
                     * This still leaves us in violation of 4), the
                     * continuation into Case 3 will fix that.
                     */
                    tmp = self.nodes.left(node);
                    self.nodes.set_right(parent, tmp);
                    self.nodes.set_left(node, parent);
                    self.nodes.set_parent_and_color(tmp, parent, Color::Black);
                    self.nodes.set_parent_and_color(parent, node, Color::Red);
                    parent = node;
                    tmp = self.nodes.right(node);
                }

                /*
                 * Case 3 - node's uncle is black and node is
                 * the parent's left child (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                self.nodes.set_left(gparent, tmp); /* == parent->right */
                self.nodes.set_right(parent, gparent);
                self.nodes.set_parent_and_color(tmp, gparent, Color::Black);
                self.rotate_set_parents(gparent, parent, Color::Red);
                trace!("insert fixup ended with a rotation");
                break;
            } else {
                tmp = self.nodes.left(gparent);
                if self.nodes.is_red(tmp) {
                    /* Case 1 - color flips */
                    self.nodes.set_parent_and_color(tmp, gparent, Color::Black);
                    self.nodes.set_parent_and_color(parent, gparent, Color::Black);
                    node = gparent;
                    parent = self.nodes.parent(node);
                    self.nodes.set_parent_and_color(node, parent, Color::Red);
                    continue;
                }

                tmp = self.nodes.left(parent);
                if node == tmp {
                    /* Case 2 - right rotate at parent */
                    tmp = self.nodes.right(node);
                    self.nodes.set_left(parent, tmp);
                    self.nodes.set_right(node, parent);
                    self.nodes.set_parent_and_color(tmp, parent, Color::Black);
                    self.nodes.set_parent_and_color(parent, node, Color::Red);
                    parent = node;
                    tmp = self.nodes.left(node);
                }

                /* Case 3 - left rotate at gparent */
                self.nodes.set_right(gparent, tmp); /* == parent->left */
                self.nodes.set_left(parent, gparent);
                self.nodes.set_parent_and_color(tmp, gparent, Color::Black);
                self.rotate_set_parents(gparent, parent, Color::Red);
                trace!("insert fixup ended with a rotation");
                break;
            }
        }
    }

    /// Unlinks `node` and rebalances. The slot itself stays allocated; the
    /// caller frees it.
    pub fn erase(&mut self, node: NodeId) {
        let rebalance = self.erase_node(node);
        if rebalance.is_some() {
            self.erase_color(rebalance);
        }
    }
}

// Private

impl<T> Root<T> {
    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.nodes.node(node).left {
            node = left;
        }
        node
    }

    fn rightmost(&self, mut node: NodeId) -> NodeId {
        while let Some(right) = self.nodes.node(node).right {
            node = right;
        }
        node
    }

    /// Splices `node` out and returns the parent to rebalance from, if a
    /// black node left its position without a red child to take its color.
    #[inline]
    fn erase_node(&mut self, node: NodeId) -> NodePtr {
        let (pc_parent, pc_color, left, right) = {
            let node = self.nodes.node(node);
            (node.parent, node.color, node.left, node.right)
        };
        let node: NodePtr = Some(node);
        let child = right;
        let mut tmp = left;

        if tmp.is_none() {
            /*
             * Case 1: node to erase has no more than 1 child (easy!)
             *
             * Note that if there is one child it must be red due to 5)
             * and node must be black due to 4). We adjust colors locally
             * so as to bypass erase_color() later on.
             */
            self.change_child(node, child, pc_parent);
            if child.is_some() {
                self.nodes.set_parent_and_color(child, pc_parent, pc_color);
                None
            } else if pc_color == Color::Black {
                pc_parent
            } else {
                None
            }
        } else if child.is_none() {
            /* Still case 1, but this time the child is node->left */
            self.nodes.set_parent_and_color(tmp, pc_parent, pc_color);
            self.change_child(node, tmp, pc_parent);
            None
        } else {
            let mut successor = child;
            let mut parent;
            let child2;

            tmp = self.nodes.left(child);
            if tmp.is_none() {
                /*
                 * Case 2: node's successor is its right child
                 *
                 *    (n)          (s)
                 *    / \          / \
                 *  (x) (s)  ->  (x) (c)
                 *        \
                 *        (c)
                 */
                parent = successor;
                child2 = self.nodes.right(successor);
            } else {
                /*
                 * Case 3: node's successor is leftmost under
                 * node's right child subtree
                 *
                 *    (n)          (s)
                 *    / \          / \
                 *  (x) (y)  ->  (x) (y)
                 *      /            /
                 *    (p)          (p)
                 *    /            /
                 *  (s)          (c)
                 *    \
                 *    (c)
                 */
                loop {
                    parent = successor;
                    successor = tmp;
                    tmp = self.nodes.left(tmp);
                    if tmp.is_none() {
                        break;
                    }
                }
                child2 = self.nodes.right(successor);
                self.nodes.set_left(parent, child2);
                self.nodes.set_right(successor, child);
                self.nodes.set_parent(child, successor);
            }

            self.nodes.set_left(successor, left);
            self.nodes.set_parent(left, successor);

            self.change_child(node, successor, pc_parent);
            let rebalance = if child2.is_some() {
                self.nodes.set_parent_and_color(child2, parent, Color::Black);
                None
            } else if self.nodes.is_black(successor) {
                parent
            } else {
                None
            };
            self.nodes.set_parent_and_color(successor, pc_parent, pc_color);
            rebalance
        }
    }

    #[inline]
    fn erase_color(&mut self, mut parent: NodePtr) {
        let mut node = None;
        let mut sibling;
        let mut tmp1;
        let mut tmp2;

        loop {
            /*
             * Loop invariants:
             * - node is black (or the sentinel on first iteration)
             * - node is not the root (parent is not the sentinel)
             * - All leaf paths going through parent and node have a
             *   black node count that is 1 lower than other leaf paths.
             */
            sibling = self.nodes.right(parent);
            if node != sibling {
                /* node == parent->left */
                if self.nodes.is_red(sibling) {
                    /*
                     * Case 1 - left rotate at parent
                     *
                     *     P               S
                     *    / \             / \
                     *   N   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      N   Sl
                     */
                    tmp1 = self.nodes.left(sibling);
                    self.nodes.set_right(parent, tmp1);
                    self.nodes.set_left(sibling, parent);
                    self.nodes.set_parent_and_color(tmp1, parent, Color::Black);
                    self.rotate_set_parents(parent, sibling, Color::Red);
                    sibling = tmp1;
                }
                tmp1 = self.nodes.right(sibling);
                if self.nodes.is_black(tmp1) {
                    tmp2 = self.nodes.left(sibling);
                    if self.nodes.is_black(tmp2) {
                        /*
                         * Case 2 - sibling color flip
                         * (p could be either color here)
                         *
                         *    (p)           (p)
                         *    / \           / \
                         *   N   S    -->  N   s
                         *      / \           / \
                         *     Sl  Sr        Sl  Sr
                         *
                         * This leaves us violating 5) which
                         * can be fixed by flipping p to black
                         * if it was red, or by recursing at p.
                         * p is red when coming from Case 1.
                         */
                        self.nodes.set_parent_and_color(sibling, parent, Color::Red);
                        if self.nodes.is_red(parent) {
                            self.nodes.set_color(parent, Color::Black);
                        } else {
                            node = parent;
                            parent = self.nodes.parent(node);
                            if parent.is_some() {
                                continue;
                            }
                        }
                        trace!("erase fixup ended with a recolor");
                        break;
                    }
                    /*
                     * Case 3 - right rotate at sibling
                     * (p could be either color here)
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   sl
                     *     / \             \
                     *    sl  sr            S
                     *                       \
                     *                        sr
                     *
                     * Note: p might be red, and then both
                     * p and sl are red after rotation (which
                     * breaks property 4). This is fixed in
                     * Case 4 (in rotate_set_parents() which
                     * sets sl the color of p and sets p black)
                     *
                     *   (p)            (sl)
                     *   / \            /  \
                     *  N   sl   -->   P    S
                     *       \        /      \
                     *        S      N        sr
                     *         \
                     *          sr
                     */
                    tmp1 = self.nodes.right(tmp2);
                    self.nodes.set_left(sibling, tmp1);
                    self.nodes.set_right(tmp2, sibling);
                    self.nodes.set_right(parent, tmp2);
                    self.nodes.set_parent_and_color(tmp1, sibling, Color::Black);
                    tmp1 = sibling;
                    sibling = tmp2;
                }
                /*
                 * Case 4 - left rotate at parent + color flips
                 * (p and sl could be either color here.
                 *  After rotation, p becomes black, s acquires
                 *  p's color, and sl keeps its color)
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                tmp2 = self.nodes.left(sibling);
                self.nodes.set_right(parent, tmp2);
                self.nodes.set_left(sibling, parent);
                self.nodes.set_parent_and_color(tmp1, sibling, Color::Black);
                self.nodes.set_parent(tmp2, parent);
                self.rotate_set_parents(parent, sibling, Color::Black);
                trace!("erase fixup ended with a rotation");
                break;
            } else {
                sibling = self.nodes.left(parent);
                if self.nodes.is_red(sibling) {
                    /* Case 1 - right rotate at parent */
                    tmp1 = self.nodes.right(sibling);
                    self.nodes.set_left(parent, tmp1);
                    self.nodes.set_right(sibling, parent);
                    self.nodes.set_parent_and_color(tmp1, parent, Color::Black);
                    self.rotate_set_parents(parent, sibling, Color::Red);
                    sibling = tmp1;
                }
                tmp1 = self.nodes.left(sibling);
                if self.nodes.is_black(tmp1) {
                    tmp2 = self.nodes.right(sibling);
                    if self.nodes.is_black(tmp2) {
                        /* Case 2 - sibling color flip */
                        self.nodes.set_parent_and_color(sibling, parent, Color::Red);
                        if self.nodes.is_red(parent) {
                            self.nodes.set_color(parent, Color::Black);
                        } else {
                            node = parent;
                            parent = self.nodes.parent(node);
                            if parent.is_some() {
                                continue;
                            }
                        }
                        trace!("erase fixup ended with a recolor");
                        break;
                    }
                    /* Case 3 - left rotate at sibling */
                    tmp1 = self.nodes.left(tmp2);
                    self.nodes.set_right(sibling, tmp1);
                    self.nodes.set_left(tmp2, sibling);
                    self.nodes.set_left(parent, tmp2);
                    self.nodes.set_parent_and_color(tmp1, sibling, Color::Black);
                    tmp1 = sibling;
                    sibling = tmp2;
                }
                /* Case 4 - right rotate at parent + color flips */
                tmp2 = self.nodes.right(sibling);
                self.nodes.set_left(parent, tmp2);
                self.nodes.set_right(sibling, parent);
                self.nodes.set_parent_and_color(tmp1, sibling, Color::Black);
                self.nodes.set_parent(tmp2, parent);
                self.rotate_set_parents(parent, sibling, Color::Black);
                trace!("erase fixup ended with a rotation");
                break;
            }
        }
    }

    fn change_child(&mut self, old: NodePtr, new: NodePtr, parent: NodePtr) {
        if parent.is_some() {
            if self.nodes.left(parent) == old {
                self.nodes.set_left(parent, new);
            } else {
                self.nodes.set_right(parent, new);
            }
        } else {
            self.root = new;
        }
    }

    /// Helper function for rotations:
    /// - old's parent and color get assigned to new
    /// - old gets assigned new as a parent and 'color' as a color.
    #[inline]
    fn rotate_set_parents(&mut self, old: NodePtr, new: NodePtr, color: Color) {
        let parent = self.nodes.parent(old);
        let old_color = self.nodes.color(old);
        self.nodes.set_parent_and_color(new, parent, old_color);
        self.nodes.set_parent_and_color(old, new, color);
        self.change_child(old, new, parent);
    }
}
