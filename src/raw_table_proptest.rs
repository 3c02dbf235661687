#![cfg(test)]

// Property tests for RawTable kept inside the crate so they sit next to
// the engine they exercise and can share its test helpers.

use crate::error::Error;
use crate::hash::{bytewise, fnv1a};
use crate::raw_table::{KeyLayout, RawTable};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Contains(Vec<u8>),
    Iterate,
    Clear,
}

fn key_from(pool: &[Vec<u8>], i: usize) -> Vec<u8> {
    pool[i].clone()
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    let pool_key = proptest::collection::vec(any::<u8>(), 0..=5);
    proptest::collection::vec(pool_key, 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            prop_oneof![
                contains_pool.prop_map(|k: Vec<u8>| k),
                proptest::collection::vec(any::<u8>(), 0..=5)
            ]
            .prop_map(OpI::Contains),
            Just(OpI::Iterate),
            Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared state-machine check against std::collections::HashMap. Both
// proptest entry points feed it tables that differ only in hash function.
fn check_scenario(
    mut sut: RawTable<i32>,
    pool: &[Vec<u8>],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                match sut.insert(&k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(Error::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {:?}", e),
                }
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                match sut.remove(&k) {
                    Ok(v) => {
                        let mv = model.remove(&k).expect("present in model");
                        prop_assert_eq!(v, mv, "removed value must match model");
                    }
                    Err(Error::NotFound) => {
                        prop_assert!(!model.contains_key(&k), "not-found only when absent");
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {:?}", e),
                }
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                match sut.get(&k) {
                    Ok(v) => prop_assert_eq!(Some(v), model.get(&k)),
                    Err(Error::NotFound) => {
                        prop_assert!(!model.contains_key(&k), "not-found only when absent");
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {:?}", e),
                }
                prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match sut.get_mut(&k) {
                    Ok(v) => {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(&k).expect("present in model");
                        *mv = mv.saturating_add(d);
                    }
                    Err(Error::NotFound) => {
                        prop_assert!(!model.contains_key(&k), "not-found only when absent");
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {:?}", e),
                }
            }
            OpI::Contains(k) => {
                prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<Vec<u8>> = sut.iter().map(|(k, _)| k.to_vec()).collect();
                let m_keys: BTreeSet<Vec<u8>> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys, "iteration must cover exactly the live keys");
            }
            OpI::Clear => {
                let capacity = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), capacity, "clear must keep the bucket array");
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(
            sut.len() <= sut.capacity(),
            "occupancy {} cannot exceed bucket count {}",
            sut.len(),
            sut.capacity()
        );
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected; successful inserts land in the model too.
// - `get`/`contains` parity for present and absent keys, arbitrary byte
//   keys (empty and interior-zero included).
// - `remove` returns the stored value matching the model.
// - `iter` yields each live key exactly once; `clear` keeps capacity.
// - `len`/`is_empty` parity after every op; occupancy never exceeds the
//   bucket count even while growth doubles it.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut = RawTable::new(2, KeyLayout::Variable, fnv1a, bytewise).unwrap();
        check_scenario(sut, &pool, ops)?;
    }
}

fn zero_hash(_key: &[u8]) -> u64 {
    0
}

// Property: Same state-machine invariants under worst-case collision
// behavior (constant hash), forcing every entry into one chain. This
// stresses comparison-driven probing and removal anywhere in a chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = RawTable::new(2, KeyLayout::Variable, zero_hash, bytewise).unwrap();
        check_scenario(sut, &pool, ops)?;
    }
}
