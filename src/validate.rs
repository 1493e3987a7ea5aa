use std::cmp::Ordering;

use crate::{Comparator, NodePtr, Tree, Violation};

impl<T, C: Comparator<T>> Tree<T, C> {
    /// Checks every red-black and ordering invariant, returning the black
    /// height of the tree (the sentinel counts as zero).
    ///
    /// Walks the whole tree; meant for tests and debugging.
    pub fn validate(&self) -> Result<usize, Violation> {
        let nodes = self.root.nodes();
        if let Some(root) = self.root.root() {
            if nodes.node(root).parent.is_some() {
                return Err(Violation::RootHasParent);
            }
            if nodes.node(root).is_red() {
                return Err(Violation::RedRoot);
            }
        }

        let mut found = 0;
        let height = self.black_height(self.root.root(), &mut found)?;
        if found != self.len {
            return Err(Violation::Len {
                expected: self.len,
                found,
            });
        }

        let mut previous: Option<&T> = None;
        for (position, value) in self.iter().enumerate() {
            if let Some(previous) = previous {
                if self.cmp.compare(previous, value) != Ordering::Less {
                    return Err(Violation::Order(position));
                }
            }
            previous = Some(value);
        }
        Ok(height)
    }

    fn black_height(&self, node: NodePtr, found: &mut usize) -> Result<usize, Violation> {
        let Some(id) = node else {
            return Ok(0);
        };
        *found += 1;
        let nodes = self.root.nodes();
        let current = nodes.node(id);
        for child in [current.left, current.right].into_iter().flatten() {
            let child_ref = nodes.node(child);
            if child_ref.parent != node {
                return Err(Violation::ParentLink(child));
            }
            if current.is_red() && child_ref.is_red() {
                return Err(Violation::RedRed(child));
            }
        }
        let left = self.black_height(current.left, found)?;
        let right = self.black_height(current.right, found)?;
        if left != right {
            return Err(Violation::BlackHeight(id));
        }
        Ok(left + current.is_black() as usize)
    }
}

#[cfg(test)]
mod test {
    use crate::{Color, FnComparator, Tree, Violation};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_tree_is_valid() {
        assert_eq!(Ok(0), Tree::<u8>::new().validate());
    }

    #[test]
    fn height_grows_logarithmically() {
        let tree: Tree<u32> = (0..1000).collect();
        let height = tree.validate().unwrap();
        assert!((5..=10).contains(&height), "black height {height}");
    }

    #[test]
    fn detects_broken_links_and_colors() {
        let mut tree: Tree<u32> = (0..3).collect();
        let root = tree.root.root().unwrap();
        let left = tree.root.nodes().node(root).left;
        let right = tree.root.nodes().node(root).right;

        tree.root.nodes_mut().set_parent(left, right);
        assert_eq!(Err(Violation::ParentLink(left.unwrap())), tree.validate());
        tree.root.nodes_mut().set_parent(left, Some(root));

        tree.root.nodes_mut().set_color(left, Color::Black);
        assert_eq!(Err(Violation::BlackHeight(root)), tree.validate());
        tree.root.nodes_mut().set_color(left, Color::Red);
        assert_eq!(Ok(1), tree.validate());

        tree.len = 4;
        assert_eq!(
            Err(Violation::Len {
                expected: 4,
                found: 3
            }),
            tree.validate()
        );
    }

    #[test]
    fn detects_order_against_a_different_comparator() {
        let tree: Tree<u32> = (0..4).collect();
        // Reinterpret the same shape under a reversed order.
        let reversed = Tree {
            root: tree.root,
            cmp: FnComparator(|a: &u32, b: &u32| b.cmp(a)),
            len: tree.len,
            config: tree.config,
        };
        assert_eq!(Err(Violation::Order(1)), reversed.validate());
    }
}
