//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

mod balance;

pub use self::balance::{Color, RedBlackBalancer};

use crate::tree::TreeMap;
use std::borrow::Borrow;

/// An ordered map implemented using a red-black tree.
///
/// Every node is red or black; the balancer keeps the root black, forbids
/// red-red edges, and keeps the black-node count equal on every path to an
/// absent child, which bounds the height at twice the minimum.
pub type RedBlackMap<T, U> = TreeMap<T, U, RedBlackBalancer>;

impl<T, U> TreeMap<T, U, RedBlackBalancer>
where T: Ord
{
    /// Returns the color of the node holding a particular key, or `None` if
    /// the key does not exist in the map. Read-only; meant for rendering or
    /// inspecting a stable snapshot of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::red_black_tree::{Color, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.color(&1), Some(Color::Black));
    /// assert_eq!(map.color(&2), None);
    /// ```
    pub fn color<V>(&self, key: &V) -> Option<Color>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key).map(|index| self.tree.node(index).meta)
    }
}
