use thiserror::Error;

/// Errors reported by fallible tree operations.
///
/// A key that is simply not present is never an error; lookups report
/// absence through `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The handle does not name a live node of this tree: the node was
    /// already erased, the tree was cleared, or the handle was issued by
    /// another tree.
    #[error("node reference does not name a live node in this tree")]
    StaleNodeRef,

    /// The caller's buffer cannot hold a full in-order export.
    #[error("export buffer holds {capacity} keys but the tree has {required}")]
    ExportOverflow {
        /// Number of keys the buffer can hold
        capacity: usize,
        /// Number of keys currently in the tree
        required: usize,
    },
}
