use quickcheck::{quickcheck, Arbitrary, Gen};
use std::collections::BTreeMap;

/// The kinds of operations a generated workload can apply to a map. The key
/// space is a single byte so sequences revisit, shadow, and remove the same
/// keys often.
#[derive(Clone, Copy, Debug)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1]).unwrap() {
            0 => Op::Insert(u8::arbitrary(g), u16::arbitrary(g)),
            _ => Op::Remove(u8::arbitrary(g)),
        }
    }
}

macro_rules! quickcheck_map_ops {
    ($($test_name:ident => $module_name:ident: $type_name:ident,)*) => {
        $(
            #[test]
            fn $test_name() {
                fn matches_oracle(ops: Vec<Op>) -> bool {
                    let mut map = ordered_collections::$module_name::$type_name::new();
                    let mut oracle = BTreeMap::new();

                    for op in ops {
                        match op {
                            Op::Insert(key, val) => {
                                if oracle.contains_key(&key) {
                                    assert_eq!(map.insert(key, val), Some((key, val)));
                                } else {
                                    assert_eq!(map.insert(key, val), None);
                                    oracle.insert(key, val);
                                }
                            },
                            Op::Remove(key) => {
                                assert_eq!(
                                    map.remove(&key),
                                    oracle.remove(&key).map(|val| (key, val)),
                                );
                            },
                        }
                        if map.validate().is_err() {
                            return false;
                        }
                    }

                    map.iter().collect::<Vec<_>>() == oracle.iter().collect::<Vec<_>>()
                }

                quickcheck(matches_oracle as fn(Vec<Op>) -> bool);
            }
        )*
    }
}

quickcheck_map_ops!(
    avl_matches_oracle => avl_tree: AvlMap,
    bst_matches_oracle => bst: BstMap,
    red_black_matches_oracle => red_black_tree: RedBlackMap,
    splay_matches_oracle => splay_tree: SplayMap,
);
