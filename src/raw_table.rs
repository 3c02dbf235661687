//! RawTable: chained hash table over raw key bytes with caller-supplied functions.

use crate::error::{Error, Result};
use core::cmp::Ordering;
use core::marker::PhantomData;
use core::mem;
use core::slice;

/// Hash function over the key's bytes. The table reduces the result modulo its
/// bucket count, so the full 64-bit range should be used.
pub type HashFn = fn(&[u8]) -> u64;

/// Comparison function over key bytes, called as `cmp(stored, probe)`.
/// `Ordering::Equal` means the keys match.
pub type CmpFn = fn(&[u8], &[u8]) -> Ordering;

/// Shape of the keys a table accepts.
///
/// `Fixed(n)` tables reject any key whose length differs from `n`.
/// `Variable` tables accept any byte slice, including the empty one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyLayout {
    Fixed(usize),
    Variable,
}

const DEFAULT_CAPACITY: usize = 16;

// Grow when the pre-insert load factor strictly exceeds 3/4.
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

#[derive(Debug)]
struct Entry<V> {
    key: Box<[u8]>,
    value: V,
}

type Bucket<V> = Vec<Entry<V>>;

// A claimed position plus the owned key copy, produced by `find_vacant` and
// consumed by `fill_vacant` with no table mutation in between.
pub(crate) struct VacantSlot {
    index: usize,
    key: Box<[u8]>,
}

pub struct RawTable<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
    layout: KeyLayout,
    hash: HashFn,
    cmp: CmpFn,
}

/// Staged configuration for a [`RawTable`]. `build` fails with
/// [`Error::MissingHashFn`] or [`Error::MissingCmpFn`] when the corresponding
/// function was never supplied.
pub struct RawTableBuilder<V> {
    capacity: usize,
    layout: KeyLayout,
    hash: Option<HashFn>,
    cmp: Option<CmpFn>,
    _marker: PhantomData<fn() -> V>,
}

impl<V> RawTableBuilder<V> {
    pub fn new() -> Self {
        RawTableBuilder {
            capacity: DEFAULT_CAPACITY,
            layout: KeyLayout::Variable,
            hash: None,
            cmp: None,
            _marker: PhantomData,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn layout(mut self, layout: KeyLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn hash_fn(mut self, hash: HashFn) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn cmp_fn(mut self, cmp: CmpFn) -> Self {
        self.cmp = Some(cmp);
        self
    }

    pub fn build(self) -> Result<RawTable<V>> {
        let hash = self.hash.ok_or(Error::MissingHashFn)?;
        let cmp = self.cmp.ok_or(Error::MissingCmpFn)?;
        if self.layout == KeyLayout::Fixed(0) {
            return Err(Error::InvalidArgument);
        }
        let capacity = self.capacity.max(1);
        let buckets = alloc_buckets(capacity)?;
        Ok(RawTable {
            buckets,
            len: 0,
            layout: self.layout,
            hash,
            cmp,
        })
    }
}

impl<V> Default for RawTableBuilder<V> {
    fn default() -> Self {
        RawTableBuilder::new()
    }
}

fn alloc_buckets<V>(capacity: usize) -> Result<Vec<Bucket<V>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| Error::AllocFailed)?;
    buckets.resize_with(capacity, Vec::new);
    Ok(buckets)
}

impl<V> RawTable<V> {
    pub fn builder() -> RawTableBuilder<V> {
        RawTableBuilder::new()
    }

    pub fn new(capacity: usize, layout: KeyLayout, hash: HashFn, cmp: CmpFn) -> Result<Self> {
        RawTable::builder()
            .capacity(capacity)
            .layout(layout)
            .hash_fn(hash)
            .cmp_fn(cmp)
            .build()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets currently allocated.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        match self.layout {
            KeyLayout::Fixed(n) if key.len() != n => Err(Error::InvalidArgument),
            _ => Ok(()),
        }
    }

    fn bucket_index(&self, key: &[u8]) -> usize {
        ((self.hash)(key) % self.buckets.len() as u64) as usize
    }

    fn position_in_bucket(&self, index: usize, key: &[u8]) -> Option<usize> {
        self.buckets[index]
            .iter()
            .position(|entry| (self.cmp)(&entry.key, key) == Ordering::Equal)
    }

    pub fn insert(&mut self, key: &[u8], value: V) -> Result<()> {
        let slot = self.find_vacant(key)?;
        self.fill_vacant(slot, value);
        Ok(())
    }

    // Two-phase insert. The set adapter encodes its key bytes from the same
    // item it stores as the value, so the key borrow must end before the
    // value moves in.
    pub(crate) fn find_vacant(&mut self, key: &[u8]) -> Result<VacantSlot> {
        self.check_key(key)?;
        let mut index = self.bucket_index(key);
        if self.position_in_bucket(index, key).is_some() {
            return Err(Error::DuplicateKey);
        }
        // Copy the key before growing so that any allocation failure leaves
        // the table observably unchanged, capacity included.
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| Error::AllocFailed)?;
        owned.extend_from_slice(key);
        if self.len * MAX_LOAD_DEN > self.buckets.len() * MAX_LOAD_NUM {
            self.grow()?;
            index = self.bucket_index(key);
        }
        Ok(VacantSlot {
            index,
            key: owned.into_boxed_slice(),
        })
    }

    pub(crate) fn fill_vacant(&mut self, slot: VacantSlot, value: V) {
        self.buckets[slot.index].push(Entry {
            key: slot.key,
            value,
        });
        self.len += 1;
    }

    // Doubles the bucket array and redistributes every entry by rehashing its
    // own stored key bytes. On allocation failure the table is left untouched.
    fn grow(&mut self) -> Result<()> {
        let new_capacity = self.buckets.len() * 2;
        let mut new_buckets = alloc_buckets(new_capacity)?;
        let hash = self.hash;
        for bucket in mem::take(&mut self.buckets) {
            for entry in bucket {
                let index = (hash(&entry.key) % new_capacity as u64) as usize;
                new_buckets[index].push(entry);
            }
        }
        self.buckets = new_buckets;
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Result<&V> {
        self.check_key(key)?;
        let index = self.bucket_index(key);
        match self.position_in_bucket(index, key) {
            Some(pos) => Ok(&self.buckets[index][pos].value),
            None => Err(Error::NotFound),
        }
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Result<&mut V> {
        self.check_key(key)?;
        let index = self.bucket_index(key);
        match self.position_in_bucket(index, key) {
            Some(pos) => Ok(&mut self.buckets[index][pos].value),
            None => Err(Error::NotFound),
        }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_ok()
    }

    pub fn remove(&mut self, key: &[u8]) -> Result<V> {
        self.check_key(key)?;
        let index = self.bucket_index(key);
        match self.position_in_bucket(index, key) {
            Some(pos) => {
                let entry = self.buckets[index].swap_remove(pos);
                self.len -= 1;
                Ok(entry.value)
            }
            None => Err(Error::NotFound),
        }
    }

    /// Removes every entry while keeping the bucket array at its current size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Like [`clear`](RawTable::clear) but hands each removed value to `f`.
    pub fn clear_with<F>(&mut self, mut f: F)
    where
        F: FnMut(V),
    {
        for bucket in &mut self.buckets {
            for entry in bucket.drain(..) {
                f(entry.value);
            }
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: Default::default(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            entries: Default::default(),
        }
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut(self.iter_mut())
    }
}

/// Iterator over `(key bytes, value)` pairs in unspecified order.
pub struct Iter<'a, V> {
    buckets: slice::Iter<'a, Bucket<V>>,
    entries: slice::Iter<'a, Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some((&entry.key, &entry.value));
            }
            self.entries = self.buckets.next()?.iter();
        }
    }
}

/// Iterator over `(key bytes, mutable value)` pairs in unspecified order.
pub struct IterMut<'a, V> {
    buckets: slice::IterMut<'a, Bucket<V>>,
    entries: slice::IterMut<'a, Entry<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a [u8], &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                let Entry { key, value } = entry;
                return Some((&key[..], value));
            }
            self.entries = self.buckets.next()?.iter_mut();
        }
    }
}

/// Iterator over key byte slices in unspecified order.
pub struct Keys<'a, V>(Iter<'a, V>);

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

/// Iterator over shared value references in unspecified order.
pub struct Values<'a, V>(Iter<'a, V>);

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

/// Iterator over mutable value references in unspecified order.
pub struct ValuesMut<'a, V>(IterMut<'a, V>);

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{bytewise, fnv1a};
    use std::collections::HashMap;

    fn zero_hash(_key: &[u8]) -> u64 {
        0
    }

    fn table(capacity: usize) -> RawTable<i32> {
        match RawTable::new(capacity, KeyLayout::Variable, fnv1a, bytewise) {
            Ok(t) => t,
            Err(e) => panic!("unexpected result: {:?}", e),
        }
    }

    /// Invariant: `build` without a hash function fails with `MissingHashFn`,
    /// and without a comparison function with `MissingCmpFn`; the hash check
    /// runs first when both are absent.
    #[test]
    fn builder_requires_both_functions() {
        let neither = RawTable::<i32>::builder().build();
        assert_eq!(neither.err(), Some(Error::MissingHashFn));

        let no_cmp = RawTable::<i32>::builder().hash_fn(fnv1a).build();
        assert_eq!(no_cmp.err(), Some(Error::MissingCmpFn));

        let no_hash = RawTable::<i32>::builder().cmp_fn(bytewise).build();
        assert_eq!(no_hash.err(), Some(Error::MissingHashFn));
    }

    /// Invariant: a fixed layout of width zero is rejected at build time.
    #[test]
    fn builder_rejects_zero_width_fixed_layout() {
        let result = RawTable::<i32>::builder()
            .layout(KeyLayout::Fixed(0))
            .hash_fn(fnv1a)
            .cmp_fn(bytewise)
            .build();
        assert_eq!(result.err(), Some(Error::InvalidArgument));
    }

    /// Invariant: a requested capacity of zero is clamped to one bucket, and
    /// the table still works.
    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut t = table(0);
        assert_eq!(t.capacity(), 1);
        t.insert(b"a", 1).unwrap();
        assert_eq!(t.get(b"a"), Ok(&1));
    }

    /// Invariant: insert/get/remove round-trip; a removed key is absent and
    /// `remove` returns its value.
    #[test]
    fn insert_get_remove_round_trip() {
        let mut t = table(8);
        t.insert(b"alpha", 1).unwrap();
        t.insert(b"beta", 2).unwrap();
        assert_eq!(t.get(b"alpha"), Ok(&1));
        assert_eq!(t.get(b"beta"), Ok(&2));
        assert_eq!(t.remove(b"alpha"), Ok(1));
        assert_eq!(t.get(b"alpha"), Err(Error::NotFound));
        assert_eq!(t.remove(b"alpha"), Err(Error::NotFound));
        assert_eq!(t.len(), 1);
    }

    /// Invariant: inserting an existing key fails with `DuplicateKey` and
    /// leaves the stored value and length unchanged.
    #[test]
    fn duplicate_insert_rejected() {
        let mut t = table(8);
        t.insert(b"k", 1).unwrap();
        assert_eq!(t.insert(b"k", 2), Err(Error::DuplicateKey));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(b"k"), Ok(&1));
    }

    /// Invariant: the duplicate check runs before the growth check, so a
    /// duplicate insert at the load-factor boundary does not resize the table.
    #[test]
    fn duplicate_insert_does_not_grow() {
        let mut t = table(4);
        for i in 0..4u8 {
            t.insert(&[i], i32::from(i)).unwrap();
        }
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.insert(&[0], 99), Err(Error::DuplicateKey));
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.len(), 4);
    }

    /// Invariant: growth triggers when the pre-insert load factor strictly
    /// exceeds 3/4. From four buckets, the fourth insert fits (load 3/4) and
    /// the fifth doubles the capacity to eight.
    #[test]
    fn growth_doubles_capacity_at_load_factor() {
        let mut t = table(4);
        for i in 0..4u8 {
            t.insert(&[i], i32::from(i)).unwrap();
            assert_eq!(t.capacity(), 4);
        }
        t.insert(&[4], 4).unwrap();
        assert_eq!(t.capacity(), 8);
        assert_eq!(t.len(), 5);
    }

    /// Invariant: every entry survives a rehash and remains reachable under
    /// its own key after repeated growth.
    #[test]
    fn growth_preserves_entries() {
        let mut t = table(1);
        for i in 0..200u8 {
            t.insert(&[i], i32::from(i)).unwrap();
        }
        assert!(t.capacity() >= 200);
        assert_eq!(t.len(), 200);
        for i in 0..200u8 {
            assert_eq!(t.get(&[i]), Ok(&i32::from(i)));
        }
    }

    /// Invariant: with a constant hash function every entry shares one chain,
    /// and lookup and removal still resolve the correct key anywhere in it.
    #[test]
    fn collision_chain_lookup_and_removal() {
        let mut t = match RawTable::new(16, KeyLayout::Variable, zero_hash, bytewise) {
            Ok(t) => t,
            Err(e) => panic!("unexpected result: {:?}", e),
        };
        for i in 0..8u8 {
            t.insert(&[i], i32::from(i)).unwrap();
        }
        for i in 0..8u8 {
            assert_eq!(t.get(&[i]), Ok(&i32::from(i)));
        }
        // Remove from the middle of the chain, then the head, then a miss.
        assert_eq!(t.remove(&[3]), Ok(3));
        assert_eq!(t.remove(&[0]), Ok(0));
        assert_eq!(t.remove(&[3]), Err(Error::NotFound));
        assert_eq!(t.len(), 6);
        for i in [1u8, 2, 4, 5, 6, 7] {
            assert_eq!(t.get(&[i]), Ok(&i32::from(i)));
        }
    }

    /// Invariant: a fixed-layout table rejects keys of any other length with
    /// `InvalidArgument` on insert, get, and remove, without changing state.
    #[test]
    fn fixed_layout_checks_key_length() {
        let mut t = match RawTable::<i32>::new(8, KeyLayout::Fixed(4), fnv1a, bytewise) {
            Ok(t) => t,
            Err(e) => panic!("unexpected result: {:?}", e),
        };
        t.insert(b"four", 4).unwrap();
        assert_eq!(t.insert(b"trois", 5), Err(Error::InvalidArgument));
        assert_eq!(t.get(b"xy"), Err(Error::InvalidArgument));
        assert_eq!(t.remove(b""), Err(Error::InvalidArgument));
        assert!(!t.contains(b"xy"));
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(b"four"), Ok(&4));
    }

    /// Invariant: variable-layout keys are arbitrary bytes; the empty key and
    /// keys with interior zero bytes are all distinct entries.
    #[test]
    fn variable_layout_accepts_arbitrary_bytes() {
        let mut t = table(8);
        t.insert(b"", 0).unwrap();
        t.insert(b"\0", 1).unwrap();
        t.insert(b"a\0b", 2).unwrap();
        t.insert(b"a\0c", 3).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.get(b""), Ok(&0));
        assert_eq!(t.get(b"\0"), Ok(&1));
        assert_eq!(t.get(b"a\0b"), Ok(&2));
        assert_eq!(t.get(b"a\0c"), Ok(&3));
    }

    /// Invariant: `clear` empties the table but keeps the bucket array, and
    /// the table accepts inserts afterwards.
    #[test]
    fn clear_keeps_capacity_and_allows_reuse() {
        let mut t = table(4);
        for i in 0..6u8 {
            t.insert(&[i], i32::from(i)).unwrap();
        }
        let capacity = t.capacity();
        t.clear();
        assert_eq!(t.len(), 0);
        assert!(t.is_empty());
        assert_eq!(t.capacity(), capacity);
        t.insert(b"again", 7).unwrap();
        assert_eq!(t.get(b"again"), Ok(&7));
    }

    /// Invariant: `clear_with` hands every stored value to the callback
    /// exactly once and leaves the table empty.
    #[test]
    fn clear_with_drains_values() {
        let mut t = table(8);
        for i in 0..5u8 {
            t.insert(&[i], i32::from(i)).unwrap();
        }
        let mut drained = Vec::new();
        t.clear_with(|v| drained.push(v));
        drained.sort_unstable();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(t.is_empty());
    }

    /// Invariant: iteration yields each entry exactly once with its stored
    /// key bytes; `keys` and `values` agree with `iter`.
    #[test]
    fn iteration_covers_every_entry_once() {
        let mut t = table(4);
        let mut expected = HashMap::new();
        for i in 0..20u8 {
            t.insert(&[i, i], i32::from(i)).unwrap();
            expected.insert(vec![i, i], i32::from(i));
        }

        let mut seen = HashMap::new();
        for (key, value) in t.iter() {
            assert!(seen.insert(key.to_vec(), *value).is_none());
        }
        assert_eq!(seen, expected);

        assert_eq!(t.keys().count(), 20);
        let mut total: i32 = t.values().sum();
        assert_eq!(total, (0..20).sum());

        for value in t.values_mut() {
            *value += 100;
        }
        total = t.values().sum();
        assert_eq!(total, (0..20).map(|v| v + 100).sum());
        assert_eq!(t.get(&[3, 3]), Ok(&103));
    }

    /// Invariant: `iter_mut` writes are visible through later lookups.
    #[test]
    fn iter_mut_updates_are_observable() {
        let mut t = table(8);
        t.insert(b"a", 1).unwrap();
        t.insert(b"b", 2).unwrap();
        for (key, value) in t.iter_mut() {
            if key == b"a" {
                *value = 10;
            }
        }
        assert_eq!(t.get(b"a"), Ok(&10));
        assert_eq!(t.get(b"b"), Ok(&2));
    }

    /// Invariant: `len` and `is_empty` track live entries, unaffected by
    /// failed duplicate inserts and updated after removals.
    #[test]
    fn len_tracks_live_entries() {
        let mut t = table(8);
        assert!(t.is_empty());
        t.insert(b"a", 1).unwrap();
        t.insert(b"b", 2).unwrap();
        assert_eq!(t.len(), 2);
        let _ = t.insert(b"a", 3);
        assert_eq!(t.len(), 2);
        t.remove(b"a").unwrap();
        assert_eq!(t.len(), 1);
        t.remove(b"b").unwrap();
        assert!(t.is_empty());
    }
}
