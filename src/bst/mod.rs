//! Unbalanced binary search tree that keeps whatever shape the insertion
//! order produces.

mod balance;

pub use self::balance::BstBalancer;

use crate::tree::TreeMap;

/// An ordered map implemented using a plain binary search tree.
///
/// No rebalancing is performed, so operations cost O(height) with nothing
/// bounding the height below the number of entries; an adversarial insertion
/// order degrades the tree to a chain. The baseline against which the
/// self-balancing variants are measured.
pub type BstMap<T, U> = TreeMap<T, U, BstBalancer>;
