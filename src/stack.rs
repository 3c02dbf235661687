//! Stack: LIFO adapter over the growable array.

use crate::array::Array;
use crate::error::{Error, Result};

/// A last-in-first-out stack whose top is the array's highest index.
pub struct Stack<T> {
    items: Array<T>,
}

impl<T> Stack<T> {
    /// Creates a stack with the array's capacity defaulting (zero means
    /// 256) and item-type rules.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Stack {
            items: Array::new(capacity)?,
        })
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        self.items.push(item)
    }

    /// Moves the top item out, or fails with `Empty`. The stack remains
    /// usable after a failed pop.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop()
    }

    /// Borrows the top item without changing the stack.
    pub fn peek(&self) -> Result<&T> {
        self.items.as_slice().last().ok_or(Error::Empty)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
