//! Diagnostics produced by the per-variant validity checkers.

use thiserror::Error;

/// An error describing the first structural invariant violation found while
/// auditing a tree.
///
/// Only ever constructed by `validate`; the public map operations maintain
/// these invariants and never surface it. Each variant names the offending
/// key so a failing audit points directly at the broken node.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("left child of node {node} is adopted by another node")]
    LeftChildAdopted { node: String },
    #[error("right child of node {node} is adopted by another node")]
    RightChildAdopted { node: String },
    #[error("root node {node} has a parent")]
    RootAdopted { node: String },
    #[error("node {node} is to the left of node {parent} but is larger")]
    LeftOrder { node: String, parent: String },
    #[error("node {node} is to the right of node {parent} but is smaller")]
    RightOrder { node: String, parent: String },
    #[error("inorder sequence is not strictly increasing at node {node}")]
    NotSorted { node: String },
    #[error("height of node {node} is {actual} but should be {expected}")]
    WrongHeight {
        node: String,
        actual: isize,
        expected: isize,
    },
    #[error("balance of node {node} is {actual} but should be {expected}")]
    WrongBalance {
        node: String,
        actual: isize,
        expected: isize,
    },
    #[error("tree is unbalanced at node {node}")]
    Unbalanced { node: String },
    #[error("root node {node} is red")]
    RedRoot { node: String },
    #[error("node {node} is red and has a red child")]
    RedRed { node: String },
    #[error("not all paths below node {node} have the same number of black nodes")]
    BlackHeightMismatch { node: String },
    #[error("{reachable} nodes are reachable from the root but {allocated} are allocated")]
    CountMismatch { reachable: usize, allocated: usize },
}
