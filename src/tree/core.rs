use crate::entry::Entry;
use crate::error::InvariantError;
use crate::tree::arena::{Arena, NodeIndex};
use crate::tree::balance::Balancer;
use crate::tree::node::Node;
use std::borrow::Borrow;
use std::cmp;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::mem;

/// The generic binary-search-tree core shared by every map variant.
///
/// The core owns the node arena and performs all raw structural edits:
/// locating keys and insertion points, attaching leaves, splicing out nodes
/// with at most one child, and the two-child entry swap. After each edit it
/// invokes the balancer `B`, which restores the variant's own invariant.
/// Rotations live here because every balancer shares them; they update all
/// affected child and parent links before returning, so callers never observe
/// a half-rotated tree.
pub struct OrderedTree<T, U, B>
where B: Balancer<T, U>
{
    pub(crate) arena: Arena<Node<T, U, B::Meta>>,
    pub(crate) root: Option<NodeIndex>,
}

impl<T, U, B> OrderedTree<T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new() -> Self {
        OrderedTree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &Node<T, U, B::Meta> {
        &self.arena[index]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node<T, U, B::Meta> {
        &mut self.arena[index]
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub(crate) fn min(&self) -> Option<NodeIndex> {
        self.root.map(|root| self.min_in(root))
    }

    pub(crate) fn max(&self) -> Option<NodeIndex> {
        self.root.map(|root| self.max_in(root))
    }

    pub(crate) fn min_in(&self, from: NodeIndex) -> NodeIndex {
        let mut curr = from;
        while let Some(child) = self.arena[curr].left {
            curr = child;
        }
        curr
    }

    pub(crate) fn max_in(&self, from: NodeIndex) -> NodeIndex {
        let mut curr = from;
        while let Some(child) = self.arena[curr].right {
            curr = child;
        }
        curr
    }

    /// Computes the structural height of a subtree; an absent subtree is -1
    /// and a leaf is 0. Breadth-first so a degenerate chain cannot overflow
    /// the call stack.
    pub(crate) fn subtree_height(&self, node: Option<NodeIndex>) -> isize {
        let mut height = -1;
        let mut queue = VecDeque::new();
        if let Some(index) = node {
            queue.push_back((index, 0));
        }
        while let Some((index, depth)) = queue.pop_front() {
            height = cmp::max(height, depth);
            if let Some(child) = self.arena[index].left {
                queue.push_back((child, depth + 1));
            }
            if let Some(child) = self.arena[index].right {
                queue.push_back((child, depth + 1));
            }
        }
        height
    }

    pub(crate) fn subtree_count(&self, node: Option<NodeIndex>) -> usize {
        let mut count = 0;
        let mut stack: Vec<NodeIndex> = node.into_iter().collect();
        while let Some(index) = stack.pop() {
            count += 1;
            if let Some(child) = self.arena[index].left {
                stack.push(child);
            }
            if let Some(child) = self.arena[index].right {
                stack.push(child);
            }
        }
        count
    }

    /// Rotates the pivot's right child into the pivot's position and returns
    /// the new subtree root.
    pub(crate) fn rotate_left(&mut self, pivot: NodeIndex) -> NodeIndex {
        let new_root = self.arena[pivot]
            .right
            .expect("Expected right child node to be `Some`.");
        let parent = self.arena[pivot].parent;
        let inner = self.arena[new_root].left;

        self.arena[pivot].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(pivot);
        }
        self.arena[new_root].left = Some(pivot);
        self.arena[pivot].parent = Some(new_root);
        self.arena[new_root].parent = parent;
        self.replace_child(parent, pivot, Some(new_root));
        new_root
    }

    /// Rotates the pivot's left child into the pivot's position and returns
    /// the new subtree root.
    pub(crate) fn rotate_right(&mut self, pivot: NodeIndex) -> NodeIndex {
        let new_root = self.arena[pivot]
            .left
            .expect("Expected left child node to be `Some`.");
        let parent = self.arena[pivot].parent;
        let inner = self.arena[new_root].right;

        self.arena[pivot].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(pivot);
        }
        self.arena[new_root].right = Some(pivot);
        self.arena[pivot].parent = Some(new_root);
        self.arena[new_root].parent = parent;
        self.replace_child(parent, pivot, Some(new_root));
        new_root
    }

    fn replace_child(
        &mut self,
        parent: Option<NodeIndex>,
        old_child: NodeIndex,
        new_child: Option<NodeIndex>,
    ) {
        match parent {
            None => self.root = new_child,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old_child) {
                    node.left = new_child;
                } else {
                    node.right = new_child;
                }
            },
        }
    }

    fn swap_entries(&mut self, a: NodeIndex, b: NodeIndex) {
        let (first, second) = self.arena.get_pair_mut(a, b);
        mem::swap(&mut first.entry, &mut second.entry);
    }

    /// Unlinks a node with at most one child, splicing the child (if any)
    /// into its position, and hands the balancer the removed metadata.
    fn remove_simple(&mut self, node: NodeIndex) -> (T, U) {
        let parent = self.arena[node].parent;
        let child = self.arena[node].left.or(self.arena[node].right);
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, node, child);
        let removed = self.arena.free(node);
        B::on_delete(self, removed.meta, child, parent);
        let Entry { key, value } = removed.entry;
        (key, value)
    }
}

impl<T, U, B> OrderedTree<T, U, B>
where
    T: Ord,
    B: Balancer<T, U>,
{
    pub(crate) fn find<V>(&self, key: &V) -> Option<NodeIndex>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(index) = curr {
            curr = match key.cmp(self.arena[index].entry.key.borrow()) {
                Ordering::Less => self.arena[index].left,
                Ordering::Greater => self.arena[index].right,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    pub(crate) fn access<V>(&mut self, key: &V) -> Option<NodeIndex>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let index = self.find(key)?;
        B::on_access(self, index);
        Some(index)
    }

    /// Attaches a new leaf and runs the post-insert hook from it. If the key
    /// is already present the tree is left untouched and the rejected pair is
    /// handed back.
    pub(crate) fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        let mut curr = match self.root {
            Some(root) => root,
            None => {
                let node = self.arena.allocate(Node::new(key, value));
                self.root = Some(node);
                B::on_insert(self, node);
                return None;
            },
        };

        loop {
            curr = match key.cmp(&self.arena[curr].entry.key) {
                Ordering::Equal => return Some((key, value)),
                Ordering::Less => match self.arena[curr].left {
                    Some(child) => child,
                    None => {
                        let node = self.arena.allocate(Node::new(key, value));
                        self.arena[node].parent = Some(curr);
                        self.arena[curr].left = Some(node);
                        B::on_insert(self, node);
                        return None;
                    },
                },
                Ordering::Greater => match self.arena[curr].right {
                    Some(child) => child,
                    None => {
                        let node = self.arena.allocate(Node::new(key, value));
                        self.arena[node].parent = Some(curr);
                        self.arena[curr].right = Some(node);
                        B::on_insert(self, node);
                        return None;
                    },
                },
            };
        }
    }

    /// Removes a key if present.
    ///
    /// A node with two children swaps entries with its structural successor
    /// first: the maximum of the left subtree when the left subtree is at
    /// least as tall as the right, otherwise the minimum of the right
    /// subtree. The successor node has at most one child, so the physical
    /// unlink is always a detach or a single-child splice.
    pub(crate) fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let target = self.find(key)?;
        let left = self.arena[target].left;
        let right = self.arena[target].right;
        match (left, right) {
            (Some(left), Some(right)) => {
                let successor = if self.subtree_height(Some(left)) >= self.subtree_height(Some(right))
                {
                    self.max_in(left)
                } else {
                    self.min_in(right)
                };
                self.swap_entries(target, successor);
                Some(self.remove_simple(successor))
            },
            _ => Some(self.remove_simple(target)),
        }
    }
}

impl<T, U, B> OrderedTree<T, U, B>
where
    T: Debug,
    B: Balancer<T, U>,
{
    pub(crate) fn key_debug(&self, index: NodeIndex) -> String {
        format!("{:?}", self.arena[index].entry.key)
    }
}

impl<T, U, B> OrderedTree<T, U, B>
where
    T: Ord + Debug,
    B: Balancer<T, U>,
{
    /// Audits the invariants every variant shares: every allocated node is
    /// reachable from the root, each child's parent link points back at its
    /// parent, each edge is correctly ordered, and the inorder sequence is
    /// strictly increasing.
    pub(crate) fn check_structure(&self) -> Result<(), InvariantError> {
        let reachable = self.subtree_count(self.root);
        if reachable != self.arena.len() {
            return Err(InvariantError::CountMismatch {
                reachable,
                allocated: self.arena.len(),
            });
        }

        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(InvariantError::RootAdopted {
                    node: self.key_debug(root),
                });
            }
        }

        let mut stack: Vec<NodeIndex> = self.root.into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = &self.arena[index];
            if let Some(left) = node.left {
                if self.arena[left].parent != Some(index) {
                    return Err(InvariantError::LeftChildAdopted {
                        node: self.key_debug(index),
                    });
                }
                if self.arena[left].entry.key > node.entry.key {
                    return Err(InvariantError::LeftOrder {
                        node: self.key_debug(left),
                        parent: self.key_debug(index),
                    });
                }
                stack.push(left);
            }
            if let Some(right) = node.right {
                if self.arena[right].parent != Some(index) {
                    return Err(InvariantError::RightChildAdopted {
                        node: self.key_debug(index),
                    });
                }
                if self.arena[right].entry.key < node.entry.key {
                    return Err(InvariantError::RightOrder {
                        node: self.key_debug(right),
                        parent: self.key_debug(index),
                    });
                }
                stack.push(right);
            }
        }

        let mut stack = Vec::new();
        let mut curr = self.root;
        let mut last: Option<NodeIndex> = None;
        loop {
            while let Some(index) = curr {
                stack.push(index);
                curr = self.arena[index].left;
            }
            let index = match stack.pop() {
                Some(index) => index,
                None => break,
            };
            if let Some(prev) = last {
                if self.arena[prev].entry.key >= self.arena[index].entry.key {
                    return Err(InvariantError::NotSorted {
                        node: self.key_debug(index),
                    });
                }
            }
            last = Some(index);
            curr = self.arena[index].right;
        }
        Ok(())
    }
}
