use std::cmp::Ordering;
use std::collections::BTreeMap;

use baltree::balance::{Avl, Balance, Splay, Unbalanced, WeightBalanced};
use baltree::{AvlMap, BstMap, KeyNotFound, Rank, SplayMap, TreeMap, WbtMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    // Smaller than TEST_SIZE so keys collide and removals hit.
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

/// Routes the crate's trace events to the test harness output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Put(i64, i64),
    Remove(i64),
    Get(i64),
    Lookup(i64),
    Floor(i64),
    Len,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Put(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::Lookup),
        1 => key_strategy().prop_map(MapOp::Floor),
        1 => Just(MapOp::Len),
    ]
}

/// Replays `ops` on a `TreeMap<_, _, B>` and a `BTreeMap`, asserting identical
/// results at every step.
fn replay<B: Balance>(ops: &[MapOp]) -> Result<TreeMap<i64, i64, B>, TestCaseError> {
    let mut map: TreeMap<i64, i64, B> = TreeMap::new();
    let mut model: BTreeMap<i64, i64> = BTreeMap::new();

    for op in ops {
        match *op {
            MapOp::Put(k, v) => {
                prop_assert_eq!(map.put(k, v), model.insert(k, v), "put({}, {}) under {}", k, v, B::NAME);
            }
            MapOp::Remove(k) => {
                prop_assert_eq!(map.remove(&k).ok(), model.remove(&k), "remove({}) under {}", k, B::NAME);
            }
            MapOp::Get(k) => {
                prop_assert_eq!(map.get(&k).ok(), model.get(&k), "get({}) under {}", k, B::NAME);
            }
            MapOp::Lookup(k) => {
                prop_assert_eq!(map.lookup(&k), model.get(&k), "lookup({}) under {}", k, B::NAME);
            }
            MapOp::Floor(k) => {
                let expected = model.range(..=k).next_back();
                prop_assert_eq!(map.floor(&k), expected, "floor({}) under {}", k, B::NAME);
            }
            MapOp::Len => {
                prop_assert_eq!(map.len(), model.len());
            }
        }
    }

    prop_assert!(map.iter().eq(model.iter()), "final contents differ under {}", B::NAME);
    Ok(map)
}

// ─── Core operations against BTreeMap ────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Every policy gives the same answers as `BTreeMap` for the same operations.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let bst = replay::<Unbalanced>(&ops)?;
        let avl = replay::<Avl>(&ops)?;
        let wbt = replay::<WeightBalanced>(&ops)?;
        let splay = replay::<Splay>(&ops)?;

        // Same contents regardless of shape.
        prop_assert!(bst.iter().eq(avl.iter()));
        prop_assert!(avl.iter().eq(wbt.iter()));
        prop_assert!(wbt.iter().eq(splay.iter()));
    }

    #[test]
    fn round_trip_is_ascending(keys in proptest::collection::hash_set(key_strategy(), 0..500)) {
        let entries: Vec<(i64, i64)> = keys.iter().map(|&k| (k, -k)).collect();
        let mut expected = entries.clone();
        expected.sort_unstable();

        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let avl: AvlMap<i64, i64> = entries.iter().copied().collect();
        let wbt: WbtMap<i64, i64> = entries.iter().copied().collect();
        let splay: SplayMap<i64, i64> = entries.iter().copied().collect();

        prop_assert_eq!(bst.into_iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(avl.into_iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(wbt.into_iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(splay.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn get_after_put_and_remove(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        pick in any::<prop::sample::Index>(),
    ) {
        let (key, value) = entries[pick.index(entries.len())];
        let mut maps = (
            entries.iter().copied().collect::<BstMap<_, _>>(),
            entries.iter().copied().collect::<AvlMap<_, _>>(),
            entries.iter().copied().collect::<WbtMap<_, _>>(),
            entries.iter().copied().collect::<SplayMap<_, _>>(),
        );
        maps.0.put(key, value);
        maps.1.put(key, value);
        maps.2.put(key, value);
        maps.3.put(key, value);
        prop_assert_eq!(maps.0.get(&key), Ok(&value));
        prop_assert_eq!(maps.1.get(&key), Ok(&value));
        prop_assert_eq!(maps.2.get(&key), Ok(&value));
        prop_assert_eq!(maps.3.get(&key), Ok(&value));

        prop_assert_eq!(maps.0.remove(&key), Ok(value));
        prop_assert_eq!(maps.1.remove(&key), Ok(value));
        prop_assert_eq!(maps.2.remove(&key), Ok(value));
        prop_assert_eq!(maps.3.remove(&key), Ok(value));
        prop_assert_eq!(maps.0.get(&key), Err(KeyNotFound));
        prop_assert_eq!(maps.1.get(&key), Err(KeyNotFound));
        prop_assert_eq!(maps.2.get(&key), Err(KeyNotFound));
        prop_assert_eq!(maps.3.get(&key), Err(KeyNotFound));
    }

    /// A failed `get` or `remove` leaves every tree exactly as it was.
    #[test]
    fn failed_operations_keep_shape(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        missing in 1_000i64..2_000,
    ) {
        let mut splay: SplayMap<i64, i64> = entries.iter().copied().collect();
        let mut avl: AvlMap<i64, i64> = entries.iter().copied().collect();

        let splay_before: Vec<i64> = splay.preorder().copied().collect();
        let avl_before: Vec<i64> = avl.preorder().copied().collect();

        prop_assert_eq!(splay.get(&missing), Err(KeyNotFound));
        prop_assert_eq!(splay.remove(&missing), Err(KeyNotFound));
        prop_assert_eq!(avl.get(&missing), Err(KeyNotFound));
        prop_assert_eq!(avl.remove(&missing), Err(KeyNotFound));

        prop_assert_eq!(splay.preorder().copied().collect::<Vec<_>>(), splay_before);
        prop_assert_eq!(avl.preorder().copied().collect::<Vec<_>>(), avl_before);
    }
}

// ─── Order statistics ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn get_by_rank_matches_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let map: WbtMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<(&i64, &i64)> = model.iter().collect();

        for (rank, &(k, v)) in sorted.iter().enumerate() {
            prop_assert_eq!(map.get_by_rank(rank), Some((k, v)));
            prop_assert_eq!(map.rank_of(k), Some(rank));
            prop_assert_eq!(&map[Rank(rank)], v);
        }
        prop_assert_eq!(map.get_by_rank(sorted.len()), None);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

/// An `f64` key ordered by `total_cmp`, so fractional probes can be used with `floor`.
#[derive(Clone, Copy, Debug)]
struct OrdF64(f64);

impl PartialEq for OrdF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn floor_with_fractional_probes<B: Balance>() {
    let mut map: TreeMap<OrdF64, i32, B> = TreeMap::new();
    for key in [4, 2, 1, 3, 5, 0, 7, 6] {
        map.put(OrdF64(f64::from(key)), key + 1);
    }

    let floor = |probe: f64| map.floor(&OrdF64(probe)).map(|(k, v)| (k.0, *v));
    assert_eq!(floor(2.0), Some((2.0, 3)), "{}", B::NAME);
    assert_eq!(floor(2.1), Some((2.0, 3)), "{}", B::NAME);
    assert_eq!(floor(-1.0), None, "{}", B::NAME);
    assert_eq!(floor(7.5), Some((7.0, 8)), "{}", B::NAME);
}

#[test]
fn floor_scenario() {
    init_tracing();
    floor_with_fractional_probes::<Unbalanced>();
    floor_with_fractional_probes::<Avl>();
    floor_with_fractional_probes::<WeightBalanced>();
    floor_with_fractional_probes::<Splay>();
}

fn floor_after_remove<B: Balance>() {
    let mut map: TreeMap<i32, i32, B> = TreeMap::new();
    map.put(3, 3);
    map.put(1, 1);
    map.put(5, 5);
    assert_eq!(map.floor(&4), Some((&3, &3)), "{}", B::NAME);
    assert_eq!(map.remove(&3), Ok(3), "{}", B::NAME);
    assert_eq!(map.floor(&4), Some((&1, &1)), "{}", B::NAME);
    assert_eq!(map.len(), 2);
}

#[test]
fn remove_scenario() {
    init_tracing();
    floor_after_remove::<Unbalanced>();
    floor_after_remove::<Avl>();
    floor_after_remove::<WeightBalanced>();
    floor_after_remove::<Splay>();
}

fn iterates_sorted<B: Balance>() {
    let map: TreeMap<i32, (), B> = [9, 1, 2, 6, 3, 4].into_iter().map(|k| (k, ())).collect();
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 6, 9], "{}", B::NAME);
    // Iteration can be restarted.
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), keys);
    assert_eq!((&map).into_iter().count(), 6);
}

#[test]
fn iteration_scenario() {
    iterates_sorted::<Unbalanced>();
    iterates_sorted::<Avl>();
    iterates_sorted::<WeightBalanced>();
    iterates_sorted::<Splay>();
}

#[test]
fn empty_maps() {
    let mut map: SplayMap<i32, i32> = SplayMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.floor(&0), None);
    assert_eq!(map.get(&0), Err(KeyNotFound));
    assert_eq!(map.remove(&0), Err(KeyNotFound));
    assert_eq!(map.iter().next(), None);
    assert_eq!(map.height(), None);
    assert_eq!(map.root_key_value(), None);
    assert_eq!(map.to_string(), "{}");
}

#[test]
fn overwrite_keeps_len() {
    let mut map = AvlMap::new();
    assert_eq!(map.put("k", 1), None);
    assert_eq!(map.put("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Ok(&2));
}

#[test]
fn splay_moves_touched_key_to_root() {
    init_tracing();
    let mut map = SplayMap::new();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        map.put(key, key);
        assert_eq!(map.root_key_value(), Some((&key, &key)));
    }
    for key in [20, 80, 40, 50] {
        assert_eq!(map.get(&key), Ok(&key));
        assert_eq!(map.root_key_value(), Some((&key, &key)));
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![20, 30, 40, 50, 60, 70, 80]);
}

#[test]
fn balanced_policies_stay_shallow() {
    let mut bst = BstMap::new();
    let mut avl = AvlMap::new();
    let mut wbt = WbtMap::new();
    for key in 0..1_000 {
        bst.put(key, ());
        avl.put(key, ());
        wbt.put(key, ());
    }
    assert_eq!(bst.height(), Some(999));
    assert!(avl.height().unwrap() <= 14);
    assert!(wbt.height().unwrap() <= 20);
}

#[test]
fn display_and_debug() {
    let map: WbtMap<&str, i32> = [("b", 2), ("a", 1)].into();
    assert_eq!(map.to_string(), "{a : 1, b : 2}");
    assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 2}"#);
}

#[test]
fn extend_and_clear() {
    let mut map = BstMap::new();
    map.extend([(2, 'b'), (1, 'a')]);
    let other: BstMap<i32, char> = BstMap::from([(3, 'c')]);
    map.extend(&other);
    assert_eq!(map.values().collect::<String>(), "abc");
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.to_string(), "{}");
}
