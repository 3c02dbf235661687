//! Set: membership container storing each item as its own key and value.

use crate::array::Array;
use crate::error::{Error, Result};
use crate::hash::{bytewise, fnv1a};
use crate::key::TableKey;
use crate::raw_table::{CmpFn, HashFn, RawTable, Values};

/// A set of items keyed by their own byte encodings.
///
/// Adding an item stores it in the underlying table under its encoded
/// bytes, so a second add of an equal-encoding item is rejected and the
/// first instance stays canonical.
pub struct Set<T> {
    table: RawTable<T>,
}

impl<T: TableKey> Set<T> {
    /// Creates a set with the stock FNV-1a hash and bytewise comparison.
    pub fn new(capacity: usize) -> Result<Self> {
        Set::with_fns(capacity, fnv1a, bytewise)
    }

    pub fn with_fns(capacity: usize, hash: HashFn, cmp: CmpFn) -> Result<Self> {
        let table = RawTable::new(capacity, T::LAYOUT, hash, cmp)?;
        Ok(Set { table })
    }

    /// Adds an item, failing with `DuplicateKey` when an equal-encoding
    /// item is already present. The item is stored as the table value and
    /// its encoding as the key.
    pub fn add(&mut self, item: T) -> Result<()> {
        let slot = item.with_bytes(|bytes| self.table.find_vacant(bytes))?;
        self.table.fill_vacant(slot, item);
        Ok(())
    }

    /// Membership test that returns the canonical stored instance.
    pub fn get(&self, item: &T) -> Result<&T> {
        item.with_bytes(|bytes| self.table.get(bytes))
    }

    pub fn contains(&self, item: &T) -> bool {
        item.with_bytes(|bytes| self.table.contains(bytes))
    }

    /// Removes and returns the canonical stored instance, or `NotFound`.
    pub fn remove(&mut self, item: &T) -> Result<T> {
        item.with_bytes(|bytes| self.table.remove(bytes))
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn clear_with<F>(&mut self, f: F)
    where
        F: FnMut(T),
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

    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.table.values())
    }

    /// Builds a set from a slice, silently skipping duplicate encodings;
    /// the first occurrence of each item wins.
    pub fn from_slice(source: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut set = Set::new(source.len())?;
        for item in source {
            match set.add(item.clone()) {
                Ok(()) | Err(Error::DuplicateKey) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(set)
    }

    /// Copies the items into an array in unspecified order.
    pub fn to_array(&self) -> Result<Array<T>>
    where
        T: Clone,
    {
        let mut array = Array::new(self.len())?;
        for item in self.iter() {
            array.push(item.clone())?;
        }
        Ok(array)
    }
}

/// Iterator over the stored items in unspecified order.
pub struct Iter<'a, T>(Values<'a, T>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
