//! The indexed key-value mapping contract.
//!
//! This module defines [`ListMap`], a mapping in which every entry
//! additionally carries a position in `[0, len)`. Positions are contiguous
//! and renumber under insertion and removal exactly like
//! [`ListSet`](crate::ListSet) positions: removing the entry at position `i`
//! shifts every following entry down by one.
//!
//! Iteration over keys, values and entries follows the positional order, and
//! the three views stay index-aligned at every observable point: `key_at(i)`
//! and `value_at(i)` always describe the entry inserted together.
//!
//! The provided implementation is [`ListSetMap`](crate::ListSetMap).

use crate::error::IndexedError;

/// A key-value mapping whose entries are simultaneously addressable by key
/// and by contiguous zero-based position.
///
/// Key uniqueness and ordering are those of an ordered unique sequence of
/// keys; values ride along in a parallel positional store. Inserting an
/// existing key replaces its value in place, leaving its position unchanged;
/// inserting a new key appends the entry at position `len`.
pub trait ListMap<K, V> {
    /// The borrowing entry iterator type, yielding `(key, value)` pairs in
    /// position order.
    type Entries<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns the structural change counter, shared with the key sequence.
    fn change_count(&self) -> u64;

    /// Returns `true` if the map contains an entry for `key`.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns `true` if any entry holds `value`.
    ///
    /// Always an O(n) scan of the value store, regardless of the key-sequence
    /// backing.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;

    /// Returns the value for `key`, or `None` if absent.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the position of the entry for `key`, or `None` if absent.
    fn index_of_key(&self, key: &K) -> Option<usize>;

    /// Returns the key at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    fn key_at(&self, index: usize) -> Result<&K, IndexedError>;

    /// Returns the value at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    fn value_at(&self, index: usize) -> Result<&V, IndexedError>;

    /// Returns the entry at `index` as a `(key, value)` pair.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    fn entry_at(&self, index: usize) -> Result<(&K, &V), IndexedError>;

    /// Returns a fresh iterator over the entries in position order.
    fn entries(&self) -> Self::Entries<'_>;

    /// Inserts or replaces the entry for `key`.
    ///
    /// If `key` is already present its value is replaced in place; the
    /// position is unchanged, the previous value is returned and the change
    /// counter is left alone. Otherwise the entry is appended at position
    /// `len` and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying key sequence.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, IndexedError>;

    /// Removes the entry for `key`, renumbering the key sequence and the
    /// value store identically within the same operation.
    ///
    /// Returns `Ok(None)` if `key` is absent (the map is left untouched).
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying key sequence.
    fn remove(&mut self, key: &K) -> Result<Option<V>, IndexedError>;

    /// Removes every entry. A no-op on an already empty map.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying key sequence.
    fn clear(&mut self) -> Result<(), IndexedError>;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
