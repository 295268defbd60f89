use crate::error::Error;
use crate::handle::{DefaultIx, IndexType, NodeIndex, NodeRef};
use crate::node::{Color, Node};

/// An ordered multiset of keys, backed by an arena-allocated red-black tree.
///
/// Equal keys are kept (descending into the right subtree), so the tree
/// behaves as a multiset rather than a map. Erasure is by [`NodeRef`]
/// handle, which pins a single occurrence of a key even when duplicates
/// are present.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderedTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes; slot 0 is the sentinel
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Vacated slots awaiting reuse
    pub(crate) free: Vec<NodeIndex<Ix>>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> OrderedTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        OrderedTree {
            nodes,
            root: Self::sentinel(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Insert a key into the tree and return a handle to the new node.
    /// Equal keys are kept; the new occurrence lands in the right subtree
    /// of the existing one.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes
    /// for its index type
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// let first = tree.insert(10);
    /// let second = tree.insert(10);
    /// assert_ne!(first, second);
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) -> NodeRef<Ix> {
        let node_idx = self.allocate(key);
        self.insert_inner(node_idx);
        self.handle(node_idx)
    }

    /// Find a node with the given key, returning a handle on exact match.
    /// When duplicates exist, the handle names the first occurrence met on
    /// the descent from the root.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1);
    /// tree.insert(7);
    /// assert!(tree.find(&7).is_some());
    /// assert!(tree.find(&4).is_none());
    /// ```
    #[inline]
    #[must_use]
    pub fn find(&self, key: &K) -> Option<NodeRef<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            if self.node_ref(x, Node::key) == key {
                return Some(self.handle(x));
            }
            if self.node_ref(x, Node::key) > key {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        None
    }

    /// Check if the tree holds at least one occurrence of the key.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Handle to the node with the smallest key, `None` when empty.
    #[inline]
    #[must_use]
    pub fn min(&self) -> Option<NodeRef<Ix>> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        Some(self.handle(self.tree_minimum(self.root)))
    }

    /// Handle to the node with the largest key, `None` when empty.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Option<NodeRef<Ix>> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        Some(self.handle(self.tree_maximum(self.root)))
    }

    /// Read the key behind a handle, `None` when the handle is stale.
    #[inline]
    #[must_use]
    pub fn key(&self, node: NodeRef<Ix>) -> Option<&K> {
        self.resolve(node).map(|idx| self.node_ref(idx, Node::key))
    }

    /// Erase the node named by the handle and return its key.
    ///
    /// The handle is validated before anything is touched: erasing through
    /// a handle whose node is already gone reports [`Error::StaleNodeRef`]
    /// and leaves the tree unchanged.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::{Error, OrderedTree};
    ///
    /// let mut tree = OrderedTree::new();
    /// let five = tree.insert(5);
    /// assert_eq!(tree.erase(five), Ok(5));
    /// assert_eq!(tree.erase(five), Err(Error::StaleNodeRef));
    /// ```
    #[inline]
    pub fn erase(&mut self, node: NodeRef<Ix>) -> Result<K, Error> {
        let z = self.resolve(node).ok_or(Error::StaleNodeRef)?;
        self.erase_inner(z);
        let key = self.node_mut(z, Node::retire);
        self.free.push(z);
        Ok(key)
    }

    /// Remove all keys from the tree, retaining the allocation.
    /// Every outstanding handle becomes stale.
    #[inline]
    pub fn clear(&mut self) {
        for (i, node) in self.nodes.iter_mut().enumerate().skip(1) {
            if node.key.is_some() {
                let _ignore = node.retire();
                self.free.push(NodeIndex::new(i));
            }
        }
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> OrderedTree<K>
where
    K: Ord,
{
    /// Create an empty `OrderedTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<K> Default for OrderedTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> OrderedTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Create the sentinel node. Its links point at itself so a link read
    /// never dangles; only `transplant` may later rewrite its parent.
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent: Self::sentinel(),
            color: Color::Black,
            key: None,
            generation: 0,
        }
    }

    /// Create a new tree node, red with all links at the sentinel.
    fn new_node(key: K) -> Node<K, Ix> {
        Node {
            left: Self::sentinel(),
            right: Self::sentinel(),
            parent: Self::sentinel(),
            color: Color::Red,
            key: Some(key),
            generation: 0,
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }

    /// Issue a handle for a live slot.
    fn handle(&self, idx: NodeIndex<Ix>) -> NodeRef<Ix> {
        NodeRef {
            idx,
            generation: self.node_ref(idx, Node::generation),
        }
    }

    /// Map a handle back to its slot, or `None` when the handle is stale.
    fn resolve(&self, node: NodeRef<Ix>) -> Option<NodeIndex<Ix>> {
        let slot = self.nodes.get(node.idx.index())?;
        (slot.key.is_some() && slot.generation == node.generation).then_some(node.idx)
    }

    /// Place a key in a vacated slot, or grow the arena.
    fn allocate(&mut self, key: K) -> NodeIndex<Ix> {
        if let Some(idx) = self.free.pop() {
            let node = &mut self.nodes[idx.index()];
            node.key = Some(key);
            node.color = Color::Red;
            node.left = Self::sentinel();
            node.right = Self::sentinel();
            node.parent = Self::sentinel();
            return idx;
        }
        let idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key));
        idx
    }

    /// Attach a freshly allocated node to the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            if self.node_ref(x, Node::key) > self.node_ref(z, Node::key) {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else if self.node_ref(y, Node::key) > self.node_ref(z, Node::key) {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
    }

    /// Unlink a node from the tree, leaving its slot to the caller.
    fn erase_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = z;
        let mut y_orig_color = self.node_ref(y, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
        } else {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                // x may be the sentinel; the parent write is the delete
                // bookkeeping erase_fixup relies on
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));
        }

        if matches!(y_orig_color, Color::Black) {
            self.erase_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after an erase. `x` carries the
    /// extra black left behind by the vacated black node.
    fn erase_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key in the subtree rooted at `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree rooted at `x`.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    /// Writes `v`'s parent link even when `v` is the sentinel; erase_fixup
    /// reads it back before anything else can overwrite it.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, Ix> OrderedTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}
