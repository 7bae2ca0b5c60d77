//! Ordered key-value maps backed by binary search trees.
//!
//! All four maps share one generic tree core and differ only in the balancing
//! strategy plugged into it: [`bst::BstMap`] keeps the raw insertion shape,
//! [`avl_tree::AvlMap`] is height-balanced, [`red_black_tree::RedBlackMap`] is
//! color-balanced, and [`splay_tree::SplayMap`] self-adjusts by rotating
//! accessed entries to the root.

#[macro_use]
extern crate serde_derive;

mod entry;
pub mod avl_tree;
pub mod bst;
pub mod error;
pub mod red_black_tree;
pub mod splay_tree;
pub mod tree;
