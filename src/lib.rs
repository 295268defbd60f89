//! `rb-ordered-tree` is an ordered multiset built on a red-black tree.
//!
//! It fully implements the insertion and deletion rebalancing of a red-black
//! tree, ensuring that each operation requires at most O(logN) time
//! complexity. Equal keys are kept rather than overwritten, and every node
//! is addressable through a stable [`NodeRef`] handle, so a particular
//! occurrence of a duplicated key can be erased.
//!
//! To safely and efficiently handle the cyclic parent-child references of a
//! red-black tree in Rust, `rb-ordered-tree` uses an array to simulate
//! pointers: nodes live in an arena and the links between them are indices.
//! This approach also ensures the tree is `Send` and `Unpin`, allowing it
//! to be safely transferred between threads and to maintain a fixed memory
//! location during asynchronous operations. Vacated slots are recycled
//! through a free list, and each slot carries a generation counter so an
//! erase through a stale handle is reported as an error instead of
//! corrupting the tree.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! let five = tree.insert(5);
//! tree.insert(3);
//! tree.insert(9);
//! assert_eq!(tree.key(five), Some(&5));
//! assert_eq!(tree.to_ordered_vec(), vec![&3, &5, &9]);
//! assert_eq!(tree.erase(five), Ok(5));
//! assert!(tree.find(&5).is_none());
//! ```

mod error;
mod export;
#[cfg(feature = "graphviz")]
mod graphviz;
mod handle;
mod node;
mod tree;


pub use error::Error;
pub use handle::{DefaultIx, IndexType, NodeRef};
pub use tree::OrderedTree;
