//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod node;
mod order;
mod query;
mod set;
mod tree;

pub use self::order::{Compare, Natural, Predicates};
pub use self::query::{IntoIter, Iter, Neighbor, NeighborIter, Neighbors};
pub use self::set::AvlSet;
