use std::fmt;
use std::hash::Hash;

/// The default index width of the node arena.
pub type DefaultIx = u32;

/// Trait for the unsigned integer type used as arena indices.
///
/// # Safety
///
/// Marked `unsafe` because the arena assumes `new` and `index` round-trip
/// losslessly for every slot it hands out.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

unsafe impl IndexType for u32 {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x as u32
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self as usize
    }
    #[inline(always)]
    fn max() -> Self {
        u32::MAX
    }
}

unsafe impl IndexType for usize {
    #[inline(always)]
    fn new(x: usize) -> Self {
        x
    }
    #[inline(always)]
    fn index(&self) -> usize {
        *self
    }
    #[inline(always)]
    fn max() -> Self {
        usize::MAX
    }
}

/// Internal slot identifier. Slot 0 is always the sentinel.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}

/// Handle to a live node, as returned by `insert`, `find`, `min` and `max`.
///
/// A `NodeRef` stays valid across unrelated mutations of the tree and is
/// invalidated exactly when its node is erased or the tree is cleared. The
/// tree detects a stale handle by its generation instead of dereferencing
/// it, so erasing through an old handle reports an error rather than
/// corrupting the structure.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef<Ix = DefaultIx> {
    /// Arena slot of the node
    pub(crate) idx: NodeIndex<Ix>,
    /// Slot generation observed when the handle was issued
    pub(crate) generation: u32,
}

impl<Ix: fmt::Debug> fmt::Debug for NodeRef<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeRef({:?}, gen {})", self.idx, self.generation)
    }
}
