//! An ordered set backed by an AVL tree.
//!
//! The set is ordered by a caller-supplied total order and answers membership, parent and
//! nearest-neighbor queries in logarithmic time. Nodes are kept in an [`arena`] and link to
//! each other by handle, so no operation recurses.

pub mod arena;
pub mod avl_tree;
