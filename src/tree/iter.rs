use crate::entry::Entry;
use crate::tree::arena::NodeIndex;
use crate::tree::balance::Balancer;
use crate::tree::core::OrderedTree;
use std::collections::VecDeque;

/// An inorder iterator over a tree's entries.
///
/// Inorder is the sort order, so this is the iterator behind `iter` and the
/// borrowing `IntoIterator` impls.
pub struct Iter<'a, T, U, B>
where B: Balancer<T, U>
{
    tree: &'a OrderedTree<T, U, B>,
    current: Option<NodeIndex>,
    stack: Vec<NodeIndex>,
}

impl<'a, T, U, B> Iter<'a, T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new(tree: &'a OrderedTree<T, U, B>) -> Self {
        Iter {
            tree,
            current: tree.root(),
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U, B> Iterator for Iter<'a, T, U, B>
where B: Balancer<T, U>
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = tree.node(index).left;
        }
        self.stack.pop().map(|index| {
            let node = tree.node(index);
            self.current = node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A preorder iterator over a tree's entries.
pub struct Preorder<'a, T, U, B>
where B: Balancer<T, U>
{
    tree: &'a OrderedTree<T, U, B>,
    stack: Vec<NodeIndex>,
}

impl<'a, T, U, B> Preorder<'a, T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new(tree: &'a OrderedTree<T, U, B>) -> Self {
        Preorder {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T, U, B> Iterator for Preorder<'a, T, U, B>
where B: Balancer<T, U>
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.stack.pop().map(|index| {
            let node = tree.node(index);
            if let Some(child) = node.right {
                self.stack.push(child);
            }
            if let Some(child) = node.left {
                self.stack.push(child);
            }
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A postorder iterator over a tree's entries.
///
/// The visit order is materialized up front by reversing a
/// root-right-left walk.
pub struct Postorder<'a, T, U, B>
where B: Balancer<T, U>
{
    tree: &'a OrderedTree<T, U, B>,
    ordered: std::vec::IntoIter<NodeIndex>,
}

impl<'a, T, U, B> Postorder<'a, T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new(tree: &'a OrderedTree<T, U, B>) -> Self {
        let mut stack: Vec<NodeIndex> = tree.root().into_iter().collect();
        let mut ordered = Vec::new();
        while let Some(index) = stack.pop() {
            ordered.push(index);
            if let Some(child) = tree.node(index).left {
                stack.push(child);
            }
            if let Some(child) = tree.node(index).right {
                stack.push(child);
            }
        }
        ordered.reverse();
        Postorder {
            tree,
            ordered: ordered.into_iter(),
        }
    }
}

impl<'a, T, U, B> Iterator for Postorder<'a, T, U, B>
where B: Balancer<T, U>
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ordered.next().map(|index| {
            let node = tree.node(index);
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A level-order (breadth-first) iterator over a tree's entries.
pub struct Levelorder<'a, T, U, B>
where B: Balancer<T, U>
{
    tree: &'a OrderedTree<T, U, B>,
    queue: VecDeque<NodeIndex>,
}

impl<'a, T, U, B> Levelorder<'a, T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new(tree: &'a OrderedTree<T, U, B>) -> Self {
        Levelorder {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T, U, B> Iterator for Levelorder<'a, T, U, B>
where B: Balancer<T, U>
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.queue.pop_front().map(|index| {
            let node = tree.node(index);
            if let Some(child) = node.left {
                self.queue.push_back(child);
            }
            if let Some(child) = node.right {
                self.queue.push_back(child);
            }
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// An owning inorder iterator; nodes are freed as they are yielded.
pub struct IntoIter<T, U, B>
where B: Balancer<T, U>
{
    tree: OrderedTree<T, U, B>,
    current: Option<NodeIndex>,
    stack: Vec<NodeIndex>,
}

impl<T, U, B> IntoIter<T, U, B>
where B: Balancer<T, U>
{
    pub(crate) fn new(tree: OrderedTree<T, U, B>) -> Self {
        let current = tree.root();
        IntoIter {
            tree,
            current,
            stack: Vec::new(),
        }
    }
}

impl<T, U, B> Iterator for IntoIter<T, U, B>
where B: Balancer<T, U>
{
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.tree.node(index).left;
        }
        self.stack.pop().map(|index| {
            let node = self.tree.arena.free(index);
            self.current = node.right;
            let Entry { key, value } = node.entry;
            (key, value)
        })
    }
}
