/// How a tree allocates its nodes.
///
/// ```
/// use noirtree::{Config, OrdComparator, Tree};
///
/// let config = Config::new().with_capacity(16).with_max_len(2);
/// let mut tree = Tree::with_config(OrdComparator, config);
/// tree.insert(1);
/// tree.insert(2);
/// assert!(tree.try_insert(3).is_err());
/// assert_eq!(2, tree.max_size());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Node slots to allocate up front.
    pub initial_capacity: usize,
    /// Upper bound on the number of elements; inserts past it fail with
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded).
    pub max_len: Option<usize>,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            initial_capacity: 0,
            max_len: None,
        }
    }

    pub const fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}
