use std::fmt::Debug;

use super::{Color, Node, NodePtr};

impl<T> Node<T> {
    /// A fresh node is red and unlinked; it only gets black when it becomes
    /// the root or a fixup recolors it.
    pub fn new(value: T) -> Self {
        Node {
            parent: None,
            right: None,
            left: None,
            color: Color::Red,
            value,
        }
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline(always)]
    pub fn set_parent_and_color(&mut self, parent: NodePtr, color: Color) {
        self.parent = parent;
        self.color = color;
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color, self.value))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NodeId;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_node_is_red_and_unlinked() {
        let node = Node::new(42);
        assert!(node.is_red());
        assert!(!node.is_black());
        assert_eq!((None, None), (node.left, node.right));
        assert_eq!(None, node.parent);
    }

    #[test]
    fn set_parent_and_color() {
        let mut node = Node::new("value");
        node.set_parent_and_color(Some(NodeId(3)), Color::Black);
        assert!(node.is_black());
        assert_eq!(Some(NodeId(3)), node.parent);
    }

    #[test]
    fn debug_shows_color_and_value() {
        let mut node = Node::new(7);
        assert_eq!("Red::(7)", format!("{node:?}"));
        node.color = Color::Black;
        assert_eq!("Black::(7)", format!("{node:?}"));
    }
}
