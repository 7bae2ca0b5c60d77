use crate::error::InvariantError;
use crate::tree::{Balancer, NodeIndex, OrderedTree};
use std::fmt::Debug;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl Default for Color {
    // a freshly attached node starts red
    fn default() -> Self {
        Color::Red
    }
}

/// The color-rebalancing strategy.
pub struct RedBlackBalancer;

type RbTree<T, U> = OrderedTree<T, U, RedBlackBalancer>;

/// An absent node reads as black.
fn is_red<T, U>(tree: &RbTree<T, U>, node: Option<NodeIndex>) -> bool {
    node.map_or(false, |index| tree.node(index).meta == Color::Red)
}

fn set_color<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex, color: Color) {
    tree.node_mut(node).meta = color;
}

fn left_of<T, U>(tree: &RbTree<T, U>, node: Option<NodeIndex>) -> Option<NodeIndex> {
    node.and_then(|index| tree.node(index).left)
}

fn right_of<T, U>(tree: &RbTree<T, U>, node: Option<NodeIndex>) -> Option<NodeIndex> {
    node.and_then(|index| tree.node(index).right)
}

/// The other child of `parent`; `node` may be absent after a leaf removal.
fn sibling_of<T, U>(
    tree: &RbTree<T, U>,
    node: Option<NodeIndex>,
    parent: NodeIndex,
) -> Option<NodeIndex> {
    if tree.node(parent).left == node {
        tree.node(parent).right
    } else {
        tree.node(parent).left
    }
}

// The node is the root: recolor it black.
fn insert_case_one<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex) {
    match tree.node(node).parent {
        None => set_color(tree, node, Color::Black),
        Some(_) => insert_case_two(tree, node),
    }
}

// The parent is black: nothing to restore.
fn insert_case_two<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex) {
    let parent = tree.node(node).parent.expect("Expected a parent node.");
    if tree.node(parent).meta == Color::Red {
        insert_case_three(tree, node);
    }
}

// Parent and uncle are both red: push the red up to the grandparent and
// restart from there.
fn insert_case_three<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex) {
    let parent = tree.node(node).parent.expect("Expected a parent node.");
    let grandparent = tree
        .node(parent)
        .parent
        .expect("Expected a red node to have a parent.");
    match sibling_of(tree, Some(parent), grandparent) {
        Some(uncle) if tree.node(uncle).meta == Color::Red => {
            set_color(tree, parent, Color::Black);
            set_color(tree, uncle, Color::Black);
            set_color(tree, grandparent, Color::Red);
            insert_case_one(tree, grandparent);
        },
        _ => insert_case_four(tree, node),
    }
}

// The node is an inner grandchild: rotate at the parent so the outer case
// below applies to the demoted parent.
fn insert_case_four<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex) {
    let parent = tree.node(node).parent.expect("Expected a parent node.");
    let grandparent = tree
        .node(parent)
        .parent
        .expect("Expected a red node to have a parent.");
    let mut outer = node;
    if tree.node(grandparent).left == Some(parent) && tree.node(parent).right == Some(node) {
        tree.rotate_left(parent);
        outer = tree
            .node(node)
            .left
            .expect("Expected the demoted parent node.");
    } else if tree.node(grandparent).right == Some(parent) && tree.node(parent).left == Some(node) {
        tree.rotate_right(parent);
        outer = tree
            .node(node)
            .right
            .expect("Expected the demoted parent node.");
    }
    insert_case_five(tree, outer);
}

// The node is an outer grandchild: swap the parent and grandparent colors and
// rotate at the grandparent. Terminal.
fn insert_case_five<T, U>(tree: &mut RbTree<T, U>, node: NodeIndex) {
    let parent = tree.node(node).parent.expect("Expected a parent node.");
    let grandparent = tree
        .node(parent)
        .parent
        .expect("Expected a red node to have a parent.");
    set_color(tree, parent, Color::Black);
    set_color(tree, grandparent, Color::Red);
    if tree.node(parent).left == Some(node) {
        tree.rotate_right(grandparent);
    } else {
        tree.rotate_left(grandparent);
    }
}

// The replacement is the new root: nothing to restore.
fn delete_case_one<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: Option<NodeIndex>) {
    if let Some(parent) = parent {
        delete_case_two(tree, node, parent);
    }
}

// The sibling is red: swap the parent and sibling colors and rotate toward
// the deleted side, then continue with the new (black) sibling.
fn delete_case_two<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: NodeIndex) {
    if let Some(sibling) = sibling_of(tree, node, parent) {
        if tree.node(sibling).meta == Color::Red {
            set_color(tree, sibling, Color::Black);
            set_color(tree, parent, Color::Red);
            if tree.node(parent).left == node {
                tree.rotate_left(parent);
            } else {
                tree.rotate_right(parent);
            }
        }
    }
    delete_case_three(tree, node, parent);
}

// Parent, sibling, and the sibling's children are all black: recolor the
// sibling red and restart one level up.
fn delete_case_three<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: NodeIndex) {
    let sibling = sibling_of(tree, node, parent);
    let all_black = !is_red(tree, Some(parent))
        && !is_red(tree, sibling)
        && !is_red(tree, left_of(tree, sibling))
        && !is_red(tree, right_of(tree, sibling));
    if all_black {
        if let Some(sibling) = sibling {
            set_color(tree, sibling, Color::Red);
        }
        let grandparent = tree.node(parent).parent;
        delete_case_one(tree, Some(parent), grandparent);
    } else {
        delete_case_four(tree, node, parent);
    }
}

// Parent red, sibling and its children black: swap the parent and sibling
// colors. Terminal.
fn delete_case_four<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: NodeIndex) {
    let sibling = sibling_of(tree, node, parent);
    let swap_restores = is_red(tree, Some(parent))
        && !is_red(tree, sibling)
        && !is_red(tree, left_of(tree, sibling))
        && !is_red(tree, right_of(tree, sibling));
    if swap_restores {
        if let Some(sibling) = sibling {
            set_color(tree, sibling, Color::Red);
        }
        set_color(tree, parent, Color::Black);
    } else {
        delete_case_five(tree, node, parent);
    }
}

// Black sibling with a red near child and a black far child: rotate at the
// sibling so the red moves to the far side.
fn delete_case_five<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: NodeIndex) {
    if let Some(sibling) = sibling_of(tree, node, parent) {
        if tree.node(sibling).meta == Color::Black {
            let deleted_left = tree.node(parent).left == node;
            if deleted_left
                && !is_red(tree, tree.node(sibling).right)
                && is_red(tree, tree.node(sibling).left)
            {
                set_color(tree, sibling, Color::Red);
                let near = tree
                    .node(sibling)
                    .left
                    .expect("Expected a red near child node.");
                set_color(tree, near, Color::Black);
                tree.rotate_right(sibling);
            } else if !deleted_left
                && !is_red(tree, tree.node(sibling).left)
                && is_red(tree, tree.node(sibling).right)
            {
                set_color(tree, sibling, Color::Red);
                let near = tree
                    .node(sibling)
                    .right
                    .expect("Expected a red near child node.");
                set_color(tree, near, Color::Black);
                tree.rotate_left(sibling);
            }
        }
    }
    delete_case_six(tree, node, parent);
}

// Black sibling with a red far child: rotate at the parent toward the
// deleted side, give the sibling the parent's color, and recolor the parent
// and far child black. Terminal.
fn delete_case_six<T, U>(tree: &mut RbTree<T, U>, node: Option<NodeIndex>, parent: NodeIndex) {
    if let Some(sibling) = sibling_of(tree, node, parent) {
        if tree.node(sibling).meta == Color::Black {
            let deleted_left = tree.node(parent).left == node;
            if deleted_left && is_red(tree, tree.node(sibling).right) {
                let parent_color = tree.node(parent).meta;
                set_color(tree, sibling, parent_color);
                set_color(tree, parent, Color::Black);
                let far = tree
                    .node(sibling)
                    .right
                    .expect("Expected a red far child node.");
                set_color(tree, far, Color::Black);
                tree.rotate_left(parent);
            } else if !deleted_left && is_red(tree, tree.node(sibling).left) {
                let parent_color = tree.node(parent).meta;
                set_color(tree, sibling, parent_color);
                set_color(tree, parent, Color::Black);
                let far = tree
                    .node(sibling)
                    .left
                    .expect("Expected a red far child node.");
                set_color(tree, far, Color::Black);
                tree.rotate_right(parent);
            }
        }
    }
}

impl<T, U> Balancer<T, U> for RedBlackBalancer {
    type Meta = Color;

    fn on_insert(tree: &mut RbTree<T, U>, node: NodeIndex) {
        insert_case_one(tree, node);
    }

    fn on_delete(
        tree: &mut RbTree<T, U>,
        removed: Color,
        replacement: Option<NodeIndex>,
        parent: Option<NodeIndex>,
    ) {
        // Removing a red node changes no black count on any path.
        if removed == Color::Red {
            return;
        }
        // A red replacement absorbs the missing black by turning black.
        if is_red(tree, replacement) {
            let replacement = replacement.expect("Expected a red replacement node.");
            set_color(tree, replacement, Color::Black);
            return;
        }
        delete_case_one(tree, replacement, parent);
    }

    fn validate(tree: &RbTree<T, U>) -> Result<(), InvariantError>
    where T: Ord + Debug {
        tree.check_structure()?;

        if let Some(root) = tree.root() {
            if tree.node(root).meta == Color::Red {
                return Err(InvariantError::RedRoot {
                    node: tree.key_debug(root),
                });
            }
        }

        let mut stack: Vec<NodeIndex> = tree.root().into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = tree.node(index);
            if node.meta == Color::Red && (is_red(tree, node.left) || is_red(tree, node.right)) {
                return Err(InvariantError::RedRed {
                    node: tree.key_debug(index),
                });
            }
            if let Some(child) = node.left {
                stack.push(child);
            }
            if let Some(child) = node.right {
                stack.push(child);
            }
        }

        black_height(tree, tree.root()).map(|_| ())
    }
}

/// The number of black nodes on every path from `node` to an absent-child
/// position, counting the absent position itself; errs at the shallowest
/// node whose two subtrees disagree.
fn black_height<T, U>(
    tree: &RbTree<T, U>,
    node: Option<NodeIndex>,
) -> Result<usize, InvariantError>
where T: Ord + Debug {
    match node {
        None => Ok(1),
        Some(index) => {
            let left = black_height(tree, tree.node(index).left)?;
            let right = black_height(tree, tree.node(index).right)?;
            if left != right {
                return Err(InvariantError::BlackHeightMismatch {
                    node: tree.key_debug(index),
                });
            }
            let own = if tree.node(index).meta == Color::Black {
                1
            } else {
                0
            };
            Ok(left + own)
        },
    }
}
