//! Map: typed facade over the raw engine, encoding keys at the boundary.

use crate::error::Result;
use crate::hash::{bytewise, fnv1a};
use crate::key::TableKey;
use crate::raw_table::{CmpFn, HashFn, Keys, RawTable, Values, ValuesMut};
use core::marker::PhantomData;

/// A hash map from any [`TableKey`] type to `V`.
///
/// Keys are encoded to bytes on every call and the engine stores its own
/// copy, so lookups and inserts take `&K` and never require owned keys.
/// The engine's contract is unchanged: duplicate inserts are rejected, the
/// table doubles when the load factor exceeds 3/4, and failures come back
/// as [`Error`](crate::Error) values.
pub struct Map<K: ?Sized, V> {
    table: RawTable<V>,
    _key: PhantomData<fn(&K)>,
}

impl<K: TableKey + ?Sized, V> Map<K, V> {
    /// Creates a map with the stock FNV-1a hash and bytewise comparison.
    /// A capacity of zero is clamped to one bucket.
    pub fn new(capacity: usize) -> Result<Self> {
        Map::with_fns(capacity, fnv1a, bytewise)
    }

    /// Creates a map with caller-supplied hash and comparison functions,
    /// which both operate on the key's encoded bytes.
    pub fn with_fns(capacity: usize, hash: HashFn, cmp: CmpFn) -> Result<Self> {
        let table = RawTable::new(capacity, K::LAYOUT, hash, cmp)?;
        Ok(Map {
            table,
            _key: PhantomData,
        })
    }

    pub fn insert(&mut self, key: &K, value: V) -> Result<()> {
        key.with_bytes(|bytes| self.table.insert(bytes, value))
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        key.with_bytes(|bytes| self.table.get(bytes))
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        key.with_bytes(|bytes| self.table.get_mut(bytes))
    }

    pub fn contains(&self, key: &K) -> bool {
        key.with_bytes(|bytes| self.table.contains(bytes))
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        key.with_bytes(|bytes| self.table.remove(bytes))
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn clear_with<F>(&mut self, f: F)
    where
        F: FnMut(V),
    {
        self.table.clear_with(f);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Iterator over the stored keys as raw encoded bytes.
    pub fn keys(&self) -> Keys<'_, V> {
        self.table.keys()
    }

    pub fn values(&self) -> Values<'_, V> {
        self.table.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        self.table.values_mut()
    }

    /// The underlying byte-keyed table.
    pub fn raw(&self) -> &RawTable<V> {
        &self.table
    }
}
