use crate::error::InvariantError;
use crate::tree::{Balancer, NodeIndex, OrderedTree};
use std::cmp;
use std::fmt::Debug;

/// Height and balance bookkeeping carried by every AVL node.
///
/// A leaf has height 0 and an absent subtree counts as -1, so `Default` is
/// the metadata of a freshly attached leaf. `balance` is the left subtree
/// height minus the right subtree height.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AvlMeta {
    pub height: isize,
    pub balance: isize,
}

/// The height-rebalancing strategy.
pub struct AvlBalancer;

type AvlTree<T, U> = OrderedTree<T, U, AvlBalancer>;

fn height<T, U>(tree: &AvlTree<T, U>, node: Option<NodeIndex>) -> isize {
    node.map_or(-1, |index| tree.node(index).meta.height)
}

/// Recomputes a node's stored height and balance from its children.
fn refresh<T, U>(tree: &mut AvlTree<T, U>, node: NodeIndex) {
    let left = height(tree, tree.node(node).left);
    let right = height(tree, tree.node(node).right);
    let meta = &mut tree.node_mut(node).meta;
    meta.height = cmp::max(left, right) + 1;
    meta.balance = left - right;
}

fn rotate_left<T, U>(tree: &mut AvlTree<T, U>, pivot: NodeIndex) -> NodeIndex {
    let new_root = tree.rotate_left(pivot);
    refresh(tree, pivot);
    refresh(tree, new_root);
    new_root
}

fn rotate_right<T, U>(tree: &mut AvlTree<T, U>, pivot: NodeIndex) -> NodeIndex {
    let new_root = tree.rotate_right(pivot);
    refresh(tree, pivot);
    refresh(tree, new_root);
    new_root
}

/// Restores `|balance| <= 1` at a pivot whose balance has reached +/-2 and
/// returns the root of the rotated subtree.
///
/// A right-heavy pivot whose right child leans left (and mirror) needs the
/// double rotation; every other out-of-range pivot needs a single one.
fn rebalance<T, U>(tree: &mut AvlTree<T, U>, pivot: NodeIndex) -> NodeIndex {
    let balance = tree.node(pivot).meta.balance;
    if balance < -1 {
        let right = tree
            .node(pivot)
            .right
            .expect("Expected right child node to be `Some`.");
        if tree.node(right).meta.balance > 0 {
            rotate_right(tree, right);
        }
        rotate_left(tree, pivot)
    } else if balance > 1 {
        let left = tree
            .node(pivot)
            .left
            .expect("Expected left child node to be `Some`.");
        if tree.node(left).meta.balance < 0 {
            rotate_left(tree, left);
        }
        rotate_right(tree, pivot)
    } else {
        pivot
    }
}

impl<T, U> Balancer<T, U> for AvlBalancer {
    type Meta = AvlMeta;

    fn on_insert(tree: &mut AvlTree<T, U>, node: NodeIndex) {
        // A single rotation site restores the invariant after an insert; the
        // rotated subtree regains its pre-insert height, so ancestors above
        // it are already correct.
        let mut curr = tree.node(node).parent;
        while let Some(index) = curr {
            refresh(tree, index);
            if tree.node(index).meta.balance.abs() > 1 {
                rebalance(tree, index);
                break;
            }
            curr = tree.node(index).parent;
        }
    }

    fn on_delete(
        tree: &mut AvlTree<T, U>,
        _removed: AvlMeta,
        _replacement: Option<NodeIndex>,
        parent: Option<NodeIndex>,
    ) {
        // Unlike insert, a deletion can shrink a subtree and leave several
        // ancestors out of range, so the walk continues to the root even
        // after a rotation.
        let mut curr = parent;
        while let Some(index) = curr {
            refresh(tree, index);
            let subtree_root = if tree.node(index).meta.balance.abs() > 1 {
                rebalance(tree, index)
            } else {
                index
            };
            curr = tree.node(subtree_root).parent;
        }
    }

    fn validate(tree: &AvlTree<T, U>) -> Result<(), InvariantError>
    where T: Ord + Debug {
        tree.check_structure()?;

        let mut stack: Vec<NodeIndex> = tree.root().into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = tree.node(index);
            let expected_height = tree.subtree_height(Some(index));
            let expected_balance =
                tree.subtree_height(node.left) - tree.subtree_height(node.right);
            if node.meta.height != expected_height {
                return Err(InvariantError::WrongHeight {
                    node: tree.key_debug(index),
                    actual: node.meta.height,
                    expected: expected_height,
                });
            }
            if node.meta.balance != expected_balance {
                return Err(InvariantError::WrongBalance {
                    node: tree.key_debug(index),
                    actual: node.meta.balance,
                    expected: expected_balance,
                });
            }
            if expected_balance.abs() > 1 {
                return Err(InvariantError::Unbalanced {
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::AvlMap;
    use rand::Rng;

    fn keys(map: &AvlMap<u32, u32>) -> Vec<u32> {
        map.iter().map(|pair| *pair.0).collect()
    }

    #[test]
    fn test_insert_left_rotation() {
        let map: AvlMap<u32, u32> = vec![(10, 0), (20, 0), (30, 0)].into_iter().collect();
        assert_eq!(map.root(), Some(&20));
        assert_eq!(keys(&map), vec![10, 20, 30]);
        assert_eq!(map.height(), 1);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_insert_right_rotation() {
        let map: AvlMap<u32, u32> = vec![(30, 0), (20, 0), (10, 0)].into_iter().collect();
        assert_eq!(map.root(), Some(&20));
        assert_eq!(keys(&map), vec![10, 20, 30]);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_insert_right_left_rotation() {
        let map: AvlMap<u32, u32> = vec![(10, 0), (30, 0), (20, 0)].into_iter().collect();
        assert_eq!(map.root(), Some(&20));
        assert_eq!(keys(&map), vec![10, 20, 30]);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_insert_left_right_rotation() {
        let map: AvlMap<u32, u32> = vec![(30, 0), (10, 0), (20, 0)].into_iter().collect();
        assert_eq!(map.root(), Some(&20));
        assert_eq!(keys(&map), vec![10, 20, 30]);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let map: AvlMap<u32, u32> = (0..128).map(|key| (key, key)).collect();
        assert!(map.validate().is_ok());
        // the sparsest AVL tree of height 9 already needs 143 nodes
        assert!(map.height() <= 8);
    }

    #[test]
    fn test_delete_rebalances_to_root() {
        let mut map: AvlMap<u32, u32> = (0..64).map(|key| (key, key)).collect();
        for key in 0..48 {
            assert_eq!(map.remove(&key), Some((key, key)));
            assert!(map.validate().is_ok());
        }
        assert_eq!(keys(&map), (48..64).collect::<Vec<u32>>());
    }

    #[test]
    fn test_randomized_operations_stay_valid() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut map = AvlMap::new();
        for _ in 0..1000 {
            let key = rng.gen_range(0, 200);
            if rng.gen() {
                map.insert(key, key);
            } else {
                map.remove(&key);
            }
            assert!(map.validate().is_ok());
        }
    }
}
