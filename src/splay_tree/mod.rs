//! Self-adjusting binary search tree with the additional property that recently accessed elements
//! are quick to access again.

mod balance;

pub use self::balance::SplayBalancer;

use crate::tree::TreeMap;

/// An ordered map implemented using a splay tree.
///
/// There is no per-node bookkeeping; instead every insert, every successful
/// `get_mut`, and every delete rotates a node (the touched node, or the
/// removed node's former parent) all the way to the root, which keeps
/// recently accessed entries cheap to reach again.
pub type SplayMap<T, U> = TreeMap<T, U, SplayBalancer>;
