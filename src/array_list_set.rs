//! [`ListSet`] backed by a positional array plus a membership index.
//!
//! This module provides [`ArrayListSet`], which keeps its elements in a
//! `Vec` (position → element) and mirrors them into an auxiliary hash set
//! used only to answer membership and uniqueness queries in O(1). The two
//! stores agree on membership on every mutation path, including bulk
//! operations and sort.
//!
//! # Time Complexity
//!
//! | Operation             | Cost                        |
//! |-----------------------|-----------------------------|
//! | `push`                | O(1) amortized              |
//! | `contains`            | O(1)                        |
//! | `index_of`            | O(n)                        |
//! | `get`                 | O(1)                        |
//! | `insert` / `remove`   | O(n) shift                  |
//! | `remove_range`        | O(n)                        |
//! | `sort_by`             | O(n log n)                  |
//!
//! Position lookup is not index-accelerated, so `index_of` scans. Compare
//! with [`BiMapListSet`](crate::BiMapListSet), which trades O(1) `index_of`
//! for re-keying every association on a shift.

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Range;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::IndexedError;
use crate::list_set::ListSet;

/// Inline capacity for bulk-operation scratch buffers.
const BULK_INLINE: usize = 8;

/// An ordered unique sequence backed by a positional `Vec` and an auxiliary
/// membership set.
///
/// Append and membership are O(1); `index_of` and arbitrary-position
/// insertion or removal are O(n). `T` must be `Clone` because each element is
/// also resident in the membership index.
///
/// This structure is not synchronized. Sharing it across threads requires
/// external serialization; the only internal guarantee is best-effort
/// fail-fast detection through [`Cursor`](crate::Cursor).
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{ArrayListSet, ListSet};
///
/// let mut set = ArrayListSet::new();
/// assert!(set.push(10).unwrap());
/// assert!(!set.push(10).unwrap());
///
/// assert!(set.contains(&10));
/// assert_eq!(set.index_of(&10), Some(0));
/// ```
#[derive(Clone)]
pub struct ArrayListSet<T> {
    elements: Vec<T>,
    membership: FxHashSet<T>,
    change_count: u64,
}

impl<T: Clone + Eq + Hash> ArrayListSet<T> {
    /// Creates an empty `ArrayListSet`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            membership: FxHashSet::default(),
            change_count: 0,
        }
    }

    /// Creates an empty `ArrayListSet` with room for `capacity` elements in
    /// both the positional store and the membership index.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            membership: FxHashSet::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            change_count: 0,
        }
    }

    /// Returns the elements as a positional slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    fn bump(&mut self) {
        self.change_count = self.change_count.wrapping_add(1);
    }
}

impl<T: Clone + Eq + Hash> ListSet<T> for ArrayListSet<T> {
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    fn change_count(&self) -> u64 {
        self.change_count
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.membership.contains(element)
    }

    fn index_of(&self, element: &T) -> Option<usize> {
        // O(1) negative answer before the O(n) positional scan.
        if !self.membership.contains(element) {
            return None;
        }
        self.elements.iter().position(|item| item == element)
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, IndexedError> {
        self.elements.get(index).ok_or(IndexedError::OutOfRange {
            index,
            len: self.elements.len(),
        })
    }

    #[inline]
    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    fn push(&mut self, element: T) -> Result<bool, IndexedError> {
        if !self.membership.insert(element.clone()) {
            return Ok(false);
        }
        self.elements.push(element);
        self.bump();
        Ok(true)
    }

    fn insert(&mut self, index: usize, element: T) -> Result<(), IndexedError> {
        let len = self.elements.len();
        if index > len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        if !self.membership.insert(element.clone()) {
            return Err(IndexedError::DuplicateElement);
        }
        self.elements.insert(index, element);
        self.bump();
        Ok(())
    }

    fn replace(&mut self, index: usize, element: T) -> Result<T, IndexedError> {
        let len = self.elements.len();
        let Some(current) = self.elements.get(index) else {
            return Err(IndexedError::OutOfRange { index, len });
        };
        if *current == element {
            return Ok(element);
        }
        if self.membership.contains(&element) {
            return Err(IndexedError::DuplicateElement);
        }
        self.membership.insert(element.clone());
        let previous = std::mem::replace(&mut self.elements[index], element);
        self.membership.remove(&previous);
        Ok(previous)
    }

    fn remove(&mut self, element: &T) -> Result<bool, IndexedError> {
        if !self.membership.remove(element) {
            return Ok(false);
        }
        if let Some(position) = self.elements.iter().position(|item| item == element) {
            self.elements.remove(position);
        }
        self.bump();
        Ok(true)
    }

    fn remove_at(&mut self, index: usize) -> Result<T, IndexedError> {
        let len = self.elements.len();
        if index >= len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        let previous = self.elements.remove(index);
        self.membership.remove(&previous);
        self.bump();
        Ok(previous)
    }

    fn remove_range(&mut self, range: Range<usize>) -> Result<(), IndexedError> {
        let len = self.elements.len();
        if range.end > len {
            return Err(IndexedError::OutOfRange {
                index: range.end,
                len,
            });
        }
        if range.start > range.end {
            return Err(IndexedError::OutOfRange {
                index: range.start,
                len,
            });
        }
        if range.is_empty() {
            return Ok(());
        }
        for removed in self.elements.drain(range) {
            self.membership.remove(&removed);
        }
        self.bump();
        Ok(())
    }

    fn sort_by<F>(&mut self, compare: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        // Reordering leaves membership untouched.
        self.elements.sort_by(compare);
        self.bump();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), IndexedError> {
        if self.elements.is_empty() {
            return Ok(());
        }
        self.elements.clear();
        self.membership.clear();
        self.bump();
        Ok(())
    }

    fn insert_all<I>(&mut self, index: usize, elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
        T: PartialEq,
    {
        let len = self.elements.len();
        if index > len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        let mut batch: SmallVec<[T; BULK_INLINE]> = SmallVec::new();
        for element in elements {
            if !self.membership.contains(&element) && !batch.contains(&element) {
                batch.push(element);
            }
        }
        if batch.is_empty() {
            return Ok(false);
        }
        for element in &batch {
            self.membership.insert(element.clone());
        }
        // One splice shifts the tail a single time for the whole batch.
        self.elements.splice(index..index, batch);
        self.bump();
        Ok(true)
    }
}

impl<T: Clone + Eq + Hash> Default for ArrayListSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + std::fmt::Debug> std::fmt::Debug for ArrayListSet<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for ArrayListSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Clone + Eq + Hash> Eq for ArrayListSet<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for ArrayListSet<T> {
    /// Collects elements in iteration order, keeping only the first
    /// occurrence of any duplicates.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for element in iter {
            // Push on an owned set cannot fail; duplicates are skipped.
            let _ = set.push(element);
        }
        set
    }
}

impl<T: Clone + Eq + Hash> From<Vec<T>> for ArrayListSet<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a ArrayListSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: Clone + Eq + Hash + serde::Serialize> serde::Serialize for ArrayListSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ArrayListSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ArrayListSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    type Value = ArrayListSet<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of unique elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut set = ArrayListSet::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            // First occurrence wins; later duplicates in the input are dropped.
            let _ = set.push(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ArrayListSet<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ArrayListSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
