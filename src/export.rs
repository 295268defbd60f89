use crate::error::Error;
use crate::handle::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::OrderedTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree: &OrderedTree<K, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    K: Ord,
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !tree.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = tree.node_ref(x, Node::left);
    }
    nodes
}

impl<K, Ix> OrderedTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Export every key in order, smallest first. Duplicates appear as many
    /// times as they were inserted.
    ///
    /// The traversal keeps an explicit left-spine stack, so export never
    /// recurses over the tree height.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(4);
    /// tree.insert(1);
    /// tree.insert(4);
    /// assert_eq!(tree.to_ordered_vec(), vec![&1, &4, &4]);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_ordered_vec(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = left_link(self, self.root);
        while let Some(x) = stack.pop() {
            stack.extend(left_link(self, self.node_ref(x, Node::right)));
            keys.push(self.node_ref(x, Node::key));
        }
        keys
    }

    /// Clone every key in order into the caller's buffer, returning the
    /// count written. The buffer is checked up front: when it cannot hold
    /// the whole tree, [`Error::ExportOverflow`] is returned and nothing
    /// is written.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::{Error, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut buf = [0; 4];
    /// assert_eq!(tree.export_into(&mut buf), Ok(2));
    /// assert_eq!(&buf[..2], &[1, 2]);
    ///
    /// let mut small = [0; 1];
    /// assert_eq!(
    ///     tree.export_into(&mut small),
    ///     Err(Error::ExportOverflow { capacity: 1, required: 2 })
    /// );
    /// ```
    #[inline]
    pub fn export_into(&self, buf: &mut [K]) -> Result<usize, Error>
    where
        K: Clone,
    {
        if buf.len() < self.len() {
            return Err(Error::ExportOverflow {
                capacity: buf.len(),
                required: self.len(),
            });
        }
        let mut written = 0;
        let mut stack = left_link(self, self.root);
        while let Some(x) = stack.pop() {
            stack.extend(left_link(self, self.node_ref(x, Node::right)));
            buf[written] = self.node_ref(x, Node::key).clone();
            written = written.wrapping_add(1);
        }
        Ok(written)
    }
}
