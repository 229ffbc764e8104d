//! [`ListSet`] backed by a bidirectional index ↔ element association.
//!
//! This module provides [`BiMapListSet`], which stores its elements in two
//! synchronized hash maps, forward (index → element) and inverse
//! (element → index), maintained as a unit so that every renumbering step
//! touches both together.
//!
//! # Time Complexity
//!
//! | Operation             | Cost                        |
//! |-----------------------|-----------------------------|
//! | `push`                | O(1)                        |
//! | `contains`            | O(1)                        |
//! | `index_of`            | O(1)                        |
//! | `get`                 | O(1)                        |
//! | `insert` / `remove`   | O(n) (O(1) at the tail)     |
//! | `remove_range`        | O(n)                        |
//! | `sort_by`             | O(n log n)                  |
//!
//! Arbitrary-position insertion and removal re-key every following
//! association one at a time, which is what makes them linear. When position
//! lookups dominate mutations in the middle of the sequence, this backing is
//! the right choice; for shift-heavy workloads see
//! [`ArrayListSet`](crate::ArrayListSet).
//!
//! # Examples
//!
//! ```rust
//! use indexed_collections::{BiMapListSet, ListSet};
//!
//! let mut set: BiMapListSet<&str> = ["a", "b", "c"].into_iter().collect();
//! set.insert(1, "x").unwrap();
//!
//! assert_eq!(set.to_vec(), vec!["a", "x", "b", "c"]);
//! assert_eq!(set.index_of(&"b"), Some(2));
//! ```

use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Range;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::IndexedError;
use crate::list_set::ListSet;

/// Inline capacity for bulk-operation scratch buffers.
const BULK_INLINE: usize = 8;

/// An ordered unique sequence backed by a bidirectional index ↔ element
/// association.
///
/// Append, membership, position lookup and positional access are all O(1);
/// insertion or removal away from the tail is O(n) because every following
/// association is re-keyed.
///
/// `T` must be `Clone` because each element is resident in both directions of
/// the association.
///
/// This structure is not synchronized. Sharing it across threads requires
/// external serialization; the only internal guarantee is best-effort
/// fail-fast detection through [`Cursor`](crate::Cursor).
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{BiMapListSet, ListSet};
///
/// let mut set = BiMapListSet::new();
/// assert!(set.push("a").unwrap());
/// assert!(!set.push("a").unwrap());
///
/// assert_eq!(set.len(), 1);
/// assert_eq!(set.get(0), Ok(&"a"));
/// ```
#[derive(Clone)]
pub struct BiMapListSet<T> {
    forward: FxHashMap<usize, T>,
    inverse: FxHashMap<T, usize>,
    change_count: u64,
}

impl<T: Clone + Eq + Hash> BiMapListSet<T> {
    /// Creates an empty `BiMapListSet`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            forward: FxHashMap::default(),
            inverse: FxHashMap::default(),
            change_count: 0,
        }
    }

    /// Creates an empty `BiMapListSet` with room for `capacity` elements in
    /// both directions of the association.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            inverse: FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            change_count: 0,
        }
    }

    /// Inserts `element` at `index` in both directions of the association.
    ///
    /// The caller is responsible for `index` being unoccupied and `element`
    /// being absent.
    fn associate(&mut self, index: usize, element: T) {
        self.inverse.insert(element.clone(), index);
        self.forward.insert(index, element);
    }

    /// Removes the association at `index` from both directions, returning the
    /// element.
    fn dissociate(&mut self, index: usize) -> Option<T> {
        let element = self.forward.remove(&index)?;
        self.inverse.remove(&element);
        Some(element)
    }

    /// Moves the association at `from` to the unoccupied index `to`, keeping
    /// both directions in step.
    fn reassociate(&mut self, from: usize, to: usize) {
        if let Some(element) = self.forward.remove(&from) {
            if let Some(position) = self.inverse.get_mut(&element) {
                *position = to;
            }
            self.forward.insert(to, element);
        }
    }

    fn bump(&mut self) {
        self.change_count = self.change_count.wrapping_add(1);
    }
}

impl<T: Clone + Eq + Hash> ListSet<T> for BiMapListSet<T> {
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    fn change_count(&self) -> u64 {
        self.change_count
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.inverse.contains_key(element)
    }

    #[inline]
    fn index_of(&self, element: &T) -> Option<usize> {
        self.inverse.get(element).copied()
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, IndexedError> {
        self.forward.get(&index).ok_or(IndexedError::OutOfRange {
            index,
            len: self.forward.len(),
        })
    }

    #[inline]
    fn iter(&self) -> Iter<'_, T> {
        Iter {
            forward: &self.forward,
            position: 0,
        }
    }

    fn push(&mut self, element: T) -> Result<bool, IndexedError> {
        if self.inverse.contains_key(&element) {
            return Ok(false);
        }
        let index = self.forward.len();
        self.associate(index, element);
        self.bump();
        Ok(true)
    }

    fn insert(&mut self, index: usize, element: T) -> Result<(), IndexedError> {
        let len = self.forward.len();
        if index > len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        if self.inverse.contains_key(&element) {
            return Err(IndexedError::DuplicateElement);
        }
        // Re-key the tail from the top down so no association is clobbered.
        for new_index in (index + 1..=len).rev() {
            self.reassociate(new_index - 1, new_index);
        }
        self.associate(index, element);
        self.bump();
        Ok(())
    }

    fn replace(&mut self, index: usize, element: T) -> Result<T, IndexedError> {
        let len = self.forward.len();
        {
            let Some(current) = self.forward.get(&index) else {
                return Err(IndexedError::OutOfRange { index, len });
            };
            if *current == element {
                return Ok(element);
            }
        }
        if self.inverse.contains_key(&element) {
            return Err(IndexedError::DuplicateElement);
        }
        // Forced replacement at this index only; not a structural mutation.
        let Some(previous) = self.forward.insert(index, element.clone()) else {
            return Err(IndexedError::OutOfRange { index, len });
        };
        self.inverse.remove(&previous);
        self.inverse.insert(element, index);
        Ok(previous)
    }

    fn remove(&mut self, element: &T) -> Result<bool, IndexedError> {
        let Some(&index) = self.inverse.get(element) else {
            return Ok(false);
        };
        self.dissociate(index);
        let last = self.forward.len();
        for new_index in index..last {
            self.reassociate(new_index + 1, new_index);
        }
        self.bump();
        Ok(true)
    }

    fn remove_at(&mut self, index: usize) -> Result<T, IndexedError> {
        let len = self.forward.len();
        let Some(previous) = self.dissociate(index) else {
            return Err(IndexedError::OutOfRange { index, len });
        };
        let last = self.forward.len();
        for new_index in index..last {
            self.reassociate(new_index + 1, new_index);
        }
        self.bump();
        Ok(previous)
    }

    fn remove_range(&mut self, range: Range<usize>) -> Result<(), IndexedError> {
        let len = self.forward.len();
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
        let width = range.len();
        for index in range.clone() {
            self.dissociate(index);
        }
        // Single renumbering pass: close the gap left by the removed range.
        for old_index in range.end..len {
            self.reassociate(old_index, old_index - width);
        }
        self.bump();
        Ok(())
    }

    fn sort_by<F>(&mut self, compare: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut elements: Vec<T> = self.iter().cloned().collect();
        elements.sort_by(compare);
        self.forward.clear();
        self.inverse.clear();
        for (index, element) in elements.into_iter().enumerate() {
            self.associate(index, element);
        }
        self.bump();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), IndexedError> {
        if self.forward.is_empty() {
            return Ok(());
        }
        self.forward.clear();
        self.inverse.clear();
        self.bump();
        Ok(())
    }

    fn insert_all<I>(&mut self, index: usize, elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
        T: PartialEq,
    {
        let len = self.forward.len();
        if index > len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        let mut batch: SmallVec<[T; BULK_INLINE]> = SmallVec::new();
        for element in elements {
            if !self.inverse.contains_key(&element) && !batch.contains(&element) {
                batch.push(element);
            }
        }
        if batch.is_empty() {
            return Ok(false);
        }
        // Shift the whole tail up by the batch width in one pass, top down,
        // instead of renumbering once per inserted element.
        let width = batch.len();
        for old_index in (index..len).rev() {
            self.reassociate(old_index, old_index + width);
        }
        for (offset, element) in batch.into_iter().enumerate() {
            self.associate(index + offset, element);
        }
        self.bump();
        Ok(true)
    }
}

impl<T: Clone + Eq + Hash> Default for BiMapListSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + std::fmt::Debug> std::fmt::Debug for BiMapListSet<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for BiMapListSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in_order(other)
    }
}

impl<T: Clone + Eq + Hash> Eq for BiMapListSet<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for BiMapListSet<T> {
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

impl<T: Clone + Eq + Hash> From<Vec<T>> for BiMapListSet<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a BiMapListSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Position-ordered iterator over a [`BiMapListSet`].
///
/// Each step is a single O(1) lookup in the forward direction of the
/// association.
pub struct Iter<'a, T> {
    forward: &'a FxHashMap<usize, T>,
    position: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        // Contiguity means the walk ends exactly at the first absent index.
        let element = self.forward.get(&self.position)?;
        self.position += 1;
        Some(element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.forward.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.forward.len().saturating_sub(self.position)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: Clone + Eq + Hash + serde::Serialize> serde::Serialize for BiMapListSet<T> {
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
struct BiMapListSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for BiMapListSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    type Value = BiMapListSet<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of unique elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut set = BiMapListSet::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            // First occurrence wins; later duplicates in the input are dropped.
            let _ = set.push(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for BiMapListSet<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(BiMapListSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn coherent<T: Clone + Eq + Hash>(set: &BiMapListSet<T>) -> bool {
        set.forward.len() == set.inverse.len()
            && set
                .forward
                .iter()
                .all(|(index, element)| set.inverse.get(element) == Some(index))
    }

    #[rstest]
    fn test_new_is_empty() {
        let set: BiMapListSet<i32> = BiMapListSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[rstest]
    fn test_push_skips_duplicate() {
        let mut set = BiMapListSet::new();
        assert!(set.push("a").unwrap());
        assert!(set.push("b").unwrap());
        assert!(!set.push("a").unwrap());

        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(&"a"), Some(0));
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_insert_shifts_following_elements() {
        let mut set: BiMapListSet<&str> = ["a", "b", "c"].into_iter().collect();
        set.insert(1, "x").unwrap();

        assert_eq!(set.to_vec(), vec!["a", "x", "b", "c"]);
        assert_eq!(set.index_of(&"b"), Some(2));
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_insert_at_tail_is_append() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        set.insert(2, 3).unwrap();
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_insert_duplicate_is_rejected() {
        let mut set: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(set.insert(0, 2), Err(IndexedError::DuplicateElement));
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_insert_out_of_range_is_rejected() {
        let mut set: BiMapListSet<i32> = [1].into_iter().collect();
        assert_eq!(
            set.insert(2, 9),
            Err(IndexedError::OutOfRange { index: 2, len: 1 })
        );
    }

    #[rstest]
    fn test_remove_at_renumbers_down() {
        let mut set: BiMapListSet<&str> = ["a", "x", "b", "c"].into_iter().collect();
        assert_eq!(set.remove_at(0), Ok("a"));

        assert_eq!(set.to_vec(), vec!["x", "b", "c"]);
        assert_eq!(set.index_of(&"x"), Some(0));
        assert_eq!(set.index_of(&"c"), Some(2));
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_remove_by_value_absent_is_noop() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        let change_count = set.change_count();
        assert_eq!(set.remove(&9), Ok(false));
        assert_eq!(set.change_count(), change_count);
    }

    #[rstest]
    fn test_remove_by_value_renumbers() {
        let mut set: BiMapListSet<i32> = [1, 2, 3, 4].into_iter().collect();
        assert_eq!(set.remove(&2), Ok(true));
        assert_eq!(set.to_vec(), vec![1, 3, 4]);
        assert_eq!(set.index_of(&4), Some(2));
        assert!(coherent(&set));
    }

    #[rstest]
    #[case::prefix(0..2, vec![3, 4, 5])]
    #[case::middle(1..4, vec![1, 5])]
    #[case::suffix(3..5, vec![1, 2, 3])]
    #[case::all(0..5, vec![])]
    #[case::empty(2..2, vec![1, 2, 3, 4, 5])]
    fn test_remove_range(#[case] range: std::ops::Range<usize>, #[case] expected: Vec<i32>) {
        let mut set: BiMapListSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        set.remove_range(range).unwrap();
        assert_eq!(set.to_vec(), expected);
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_remove_range_out_of_range() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(
            set.remove_range(0..3),
            Err(IndexedError::OutOfRange { index: 3, len: 2 })
        );
    }

    #[rstest]
    fn test_replace_equal_value_is_noop() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        let change_count = set.change_count();
        assert_eq!(set.replace(1, 2), Ok(2));
        assert_eq!(set.change_count(), change_count);
    }

    #[rstest]
    fn test_replace_rejects_element_at_other_position() {
        let mut set: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(set.replace(0, 3), Err(IndexedError::DuplicateElement));
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_replace_swaps_in_new_element() {
        let mut set: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(set.replace(1, 9), Ok(2));
        assert_eq!(set.to_vec(), vec![1, 9, 3]);
        assert_eq!(set.index_of(&9), Some(1));
        assert_eq!(set.index_of(&2), None);
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_sort_by_rebuilds_association() {
        let mut set: BiMapListSet<i32> = [3, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
        set.sort_by(i32::cmp).unwrap();

        assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5, 6, 9]);
        assert_eq!(set.index_of(&9), Some(6));
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_insert_all_single_renumbering_pass() {
        let mut set: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        // 2 is already present, the second 5 duplicates the batch.
        let changed = set.insert_all(1, [4, 2, 5, 5]).unwrap();

        assert!(changed);
        assert_eq!(set.to_vec(), vec![1, 4, 5, 2, 3]);
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_insert_all_nothing_to_insert() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        let change_count = set.change_count();
        assert!(!set.insert_all(0, [1, 2]).unwrap());
        assert_eq!(set.change_count(), change_count);
    }

    #[rstest]
    fn test_extend_unique_appends_in_order() {
        let mut set: BiMapListSet<i32> = [1].into_iter().collect();
        assert!(set.extend_unique([2, 1, 3]).unwrap());
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_retain_all_uses_sequence_equality() {
        let mut set: BiMapListSet<i32> = [1, 2, 3, 4, 5].into_iter().collect();
        assert!(set.retain_all(&[2, 4, 9]).unwrap());
        assert_eq!(set.to_vec(), vec![2, 4]);
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_remove_all() {
        let mut set: BiMapListSet<i32> = [1, 2, 3, 4].into_iter().collect();
        assert!(set.remove_all(&[2, 4]).unwrap());
        assert_eq!(set.to_vec(), vec![1, 3]);
    }

    #[rstest]
    fn test_replace_all_applies_operator() {
        let mut set: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        set.replace_all(|element| element * 10).unwrap();
        assert_eq!(set.to_vec(), vec![10, 20, 30]);
        assert!(coherent(&set));
    }

    #[rstest]
    fn test_clear_empties_both_directions() {
        let mut set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        set.clear().unwrap();
        assert!(set.is_empty());
        assert_eq!(set.index_of(&1), None);
    }

    #[rstest]
    fn test_from_iterator_first_occurrence_wins() {
        let set: BiMapListSet<&str> = ["a", "b", "a", "c", "b"].into_iter().collect();
        assert_eq!(set.to_vec(), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn test_iterator_yields_position_order() {
        let set: BiMapListSet<i32> = [5, 3, 8, 1].into_iter().collect();
        let collected: Vec<i32> = set.iter().copied().collect();
        assert_eq!(collected, vec![5, 3, 8, 1]);
        assert_eq!(set.iter().len(), 4);
    }

    #[rstest]
    fn test_positional_equality() {
        let left: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        let right: BiMapListSet<i32> = [1, 2, 3].into_iter().collect();
        let reordered: BiMapListSet<i32> = [3, 2, 1].into_iter().collect();

        assert_eq!(left, right);
        assert_ne!(left, reordered);
    }

    #[rstest]
    fn test_debug_renders_as_list() {
        let set: BiMapListSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(format!("{set:?}"), "[1, 2]");
    }
}
