//! # General Tree
//!
//! An ordered n-ary tree stored in left-child/right-sibling form.
//!
//! ## Core Structure
//!
//! 1. **Two owning links per node**: first child and next sibling, plus a
//!    non-owning parent back-reference
//! 2. **Null-safe handles**: navigation on a missing node yields a null
//!    handle; reading data from it is an explicit error
//! 3. **O(1)-state cursors**: preorder and postorder walks driven purely by
//!    the links
//! 4. **Breadth-first algorithms**: deep copy, structural equality and
//!    subtree deletion use an explicit worklist, never recursion
//!
//! ## Usage Example
//!
//! ```
//! use general_tree::{GeneralTree, IterationType};
//!
//! let mut tree = GeneralTree::new();
//! let root = tree.create_root(1)?;
//! let n2 = tree.insert_left_child(root, 2)?;
//! let n3 = tree.insert_right_sibling(n2, 3)?;
//! let n4 = tree.insert_left_child(n2, 4)?;
//! tree.insert_right_sibling(n4, 5)?;
//! tree.insert_left_child(n3, 6)?;
//!
//! let preorder: Vec<i32> = tree.iter(IterationType::Preorder).copied().collect();
//! assert_eq!(preorder, [1, 2, 4, 5, 3, 6]);
//!
//! let postorder: Vec<i32> = tree.iter(IterationType::Postorder).copied().collect();
//! assert_eq!(postorder, [4, 5, 2, 6, 3, 1]);
//!
//! assert_eq!(tree.root().children_count()?, 2);
//! assert_eq!(tree.node(n4).depth()?, 2);
//! # Ok::<(), general_tree::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod error;   // InvalidState / InvalidOperation taxonomy
pub mod outline; // Indented text form used by the CLI
pub mod tree;    // Node store, handles, cursors, algorithms

// Re-exports for convenience
pub use error::{TreeError, TreeResult};
pub use tree::{
    Children, Cursor, CursorMut, DepthFirst, GeneralTree, IterationType, Iter, IterMut, NodeId,
    NodeRef,
};
#[cfg(feature = "visualize")]
pub use tree::SnapshotEntry;
