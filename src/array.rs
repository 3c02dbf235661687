//! Array: growable contiguous buffer with an explicit capacity contract.

use crate::error::{Error, Result};
use crate::key::TableKey;
use crate::set::Set;
use core::mem::size_of;
use core::slice;

const DEFAULT_CAPACITY: usize = 256;

/// A growable array of `T` with doubling growth and bounds-checked access.
///
/// Capacity here is the contract value the container reports and doubles,
/// tracked separately from whatever the backing buffer over-reserves.
pub struct Array<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T> Array<T> {
    /// Creates an array with room for `capacity` items. A capacity of zero
    /// defaults to 256. Zero-sized item types are rejected with
    /// `InvalidArgument`.
    pub fn new(capacity: usize) -> Result<Self> {
        if size_of::<T>() == 0 {
            return Err(Error::InvalidArgument);
        }
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocFailed)?;
        Ok(Array {
            items,
            cap: capacity,
        })
    }

    pub fn from_slice(source: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        let mut array = Array::new(source.len())?;
        for item in source {
            array.push(item.clone())?;
        }
        Ok(array)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Appends an item, doubling the capacity when full. A failed growth
    /// allocation leaves length, capacity, and contents untouched.
    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() == self.cap {
            let new_cap = self.cap * 2;
            self.items
                .try_reserve_exact(new_cap - self.items.len())
                .map_err(|_| Error::AllocFailed)?;
            self.cap = new_cap;
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the last item, or `Empty`. Capacity is kept.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(Error::Empty)
    }

    /// Bounds-checked against the current length, not the capacity.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(Error::OutOfRange)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.items.get_mut(index).ok_or(Error::OutOfRange)
    }

    /// Drops every item; length becomes zero and capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sets the length to `new_len`. Growing past the capacity reserves
    /// storage for exactly `new_len` items; new slots are filled with clones
    /// of `value`. Shrinking only truncates, never releases storage.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        if new_len > self.cap {
            self.items
                .try_reserve_exact(new_len - self.items.len())
                .map_err(|_| Error::AllocFailed)?;
            self.cap = new_len;
        }
        self.items.resize(new_len, value);
        Ok(())
    }

    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.items.iter().for_each(f);
    }

    /// Applies `f` to every item in index order, mutating in place.
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        for item in &mut self.items {
            f(item);
        }
    }

    /// Builds a new array holding clones of the items `pred` accepts, in
    /// index order. The result's capacity equals this array's capacity and
    /// this array is left unmodified.
    pub fn filter<F>(&self, mut pred: F) -> Result<Array<T>>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut out = Array::new(self.cap)?;
        for item in &self.items {
            if pred(item) {
                out.push(item.clone())?;
            }
        }
        Ok(out)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: TableKey> Array<T> {
    /// Collects the distinct items into a set; duplicates are dropped.
    pub fn to_set(&self) -> Result<Set<T>>
    where
        T: Clone,
    {
        Set::from_slice(self.as_slice())
    }

    /// Whether any two items have equal key encodings. An empty array has
    /// no duplicates. Allocation failure while building the scratch set is
    /// reported as an error.
    pub fn has_duplicates(&self) -> Result<bool> {
        let mut seen = Set::new(self.len())?;
        for item in self.iter() {
            match seen.add(item) {
                Ok(()) => {}
                Err(Error::DuplicateKey) => return Ok(true),
                Err(e) => return Err(e),
            }
        }
        Ok(false)
    }
}
