use crate::tree::{Balancer, NodeIndex, OrderedTree};

/// The rotate-to-root strategy.
pub struct SplayBalancer;

type SplayTree<T, U> = OrderedTree<T, U, SplayBalancer>;

/// Rotates a node to the root.
///
/// With no grandparent a single rotation finishes the job; otherwise zig-zig
/// (same-side chain) rotates the grandparent before the parent while zig-zag
/// (opposite sides) rotates the parent before the grandparent.
fn splay<T, U>(tree: &mut SplayTree<T, U>, node: NodeIndex) {
    while let Some(parent) = tree.node(node).parent {
        let node_is_left = tree.node(parent).left == Some(node);
        match tree.node(parent).parent {
            None => {
                if node_is_left {
                    tree.rotate_right(parent);
                } else {
                    tree.rotate_left(parent);
                }
            },
            Some(grandparent) => {
                let parent_is_left = tree.node(grandparent).left == Some(parent);
                match (parent_is_left, node_is_left) {
                    (true, true) => {
                        tree.rotate_right(grandparent);
                        tree.rotate_right(parent);
                    },
                    (false, false) => {
                        tree.rotate_left(grandparent);
                        tree.rotate_left(parent);
                    },
                    (true, false) => {
                        tree.rotate_left(parent);
                        tree.rotate_right(grandparent);
                    },
                    (false, true) => {
                        tree.rotate_right(parent);
                        tree.rotate_left(grandparent);
                    },
                }
            },
        }
    }
}

impl<T, U> Balancer<T, U> for SplayBalancer {
    type Meta = ();

    fn on_insert(tree: &mut SplayTree<T, U>, node: NodeIndex) {
        splay(tree, node);
    }

    fn on_access(tree: &mut SplayTree<T, U>, node: NodeIndex) {
        splay(tree, node);
    }

    fn on_delete(
        tree: &mut SplayTree<T, U>,
        _removed: (),
        _replacement: Option<NodeIndex>,
        parent: Option<NodeIndex>,
    ) {
        if let Some(parent) = parent {
            splay(tree, parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::splay_tree::SplayMap;

    fn keys(map: &SplayMap<u32, char>) -> Vec<u32> {
        map.iter().map(|pair| *pair.0).collect()
    }

    #[test]
    fn test_insert_splays_to_root() {
        let mut map = SplayMap::new();
        map.insert(5, 'a');
        assert_eq!(map.root(), Some(&5));
        map.insert(3, 'b');
        assert_eq!(map.root(), Some(&3));
        map.insert(8, 'c');
        assert_eq!(map.root(), Some(&8));
        assert_eq!(keys(&map), vec![3, 5, 8]);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_access_splays_to_root() {
        let mut map: SplayMap<u32, char> =
            vec![(5, 'a'), (3, 'b'), (8, 'c')].into_iter().collect();
        assert!(map.get_mut(&3).is_some());
        assert_eq!(map.root(), Some(&3));
        assert_eq!(keys(&map), vec![3, 5, 8]);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_passive_lookup_does_not_splay() {
        let mut map = SplayMap::new();
        map.insert(5, 'a');
        map.insert(3, 'b');
        assert_eq!(map.root(), Some(&3));
        assert_eq!(map.get(&5), Some(&'a'));
        assert_eq!(map.root(), Some(&3));
    }

    #[test]
    fn test_missed_access_does_not_splay() {
        let mut map = SplayMap::new();
        map.insert(5, 'a');
        map.insert(3, 'b');
        assert_eq!(map.get_mut(&9), None);
        assert_eq!(map.root(), Some(&3));
    }

    #[test]
    fn test_zig_zig_chain() {
        // ascending inserts build a left spine; accessing the deepest node
        // splays it back up through zig-zig steps
        let mut map: SplayMap<u32, char> = (1..=6).map(|key| (key, 'x')).collect();
        assert_eq!(map.root(), Some(&6));
        assert!(map.get_mut(&1).is_some());
        assert_eq!(map.root(), Some(&1));
        assert_eq!(keys(&map).len(), 6);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_remove_splays_former_parent() {
        let mut map: SplayMap<u32, char> =
            vec![(5, 'a'), (3, 'b'), (8, 'c'), (6, 'd')].into_iter().collect();
        assert_eq!(map.root(), Some(&6));
        // 5 hangs off the root, so its former parent is splayed in place
        assert_eq!(map.remove(&5), Some((5, 'a')));
        assert_eq!(map.root(), Some(&6));
        assert!(map.validate().is_ok());
        assert!(!map.contains_key(&5));
    }

    #[test]
    fn test_remove_root_leaf_empties_tree() {
        let mut map = SplayMap::new();
        map.insert(5, 'a');
        assert_eq!(map.remove(&5), Some((5, 'a')));
        assert!(map.is_empty());
        assert_eq!(map.root(), None);
    }
}
