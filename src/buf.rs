//! Growable contiguous buffer with an explicit amortized-growth contract.
//!
//! [`Buf`] is the storage primitive behind the intern table, the lexer's
//! string-literal scanner, and AST argument lists. It differs from a bare
//! `Vec` only in that its growth schedule is part of the contract: a push
//! into a full buffer reallocates to `max(2 * capacity + 1, needed)`
//! elements, which guarantees amortized O(1) append and that a single push
//! never under-allocates. Capacity never shrinks except by dropping the
//! buffer; [`Buf::clear`] resets the length and keeps the allocation.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Contiguous growable buffer of `T` with doubling-plus-one growth.
///
/// Allocation failure aborts the process (the standard allocator's
/// behavior); it is a resource-exhaustion condition, not a recoverable
/// error.
#[derive(Clone, PartialEq)]
pub struct Buf<T> {
    items: Vec<T>,
}

impl<T> Buf<T> {
    /// Create an empty buffer. Does not allocate.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a value, growing the backing store if it is full.
    ///
    /// Growth target is `max(2 * capacity + 1, len + 1)`; existing elements
    /// are moved to the new allocation, so indices stay valid but interior
    /// references do not survive a reallocating push.
    pub fn push(&mut self, value: T) {
        if self.items.len() == self.items.capacity() {
            let needed = self.items.len() + 1;
            let target = usize::max(2 * self.items.capacity() + 1, needed);
            self.items.reserve_exact(target - self.items.len());
        }
        self.items.push(value);
    }

    /// Number of elements in use.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots; always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Drop all elements but keep the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Consume the buffer, yielding its elements as a `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Buf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Buf<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for Buf<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for Buf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> IntoIterator for Buf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Buf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Buf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Buf::new();
        for item in iter {
            buf.push(item);
        }
        buf
    }
}
