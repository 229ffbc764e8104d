//! [`ListMap`] implementation composing a [`ListSet`] of keys with a
//! parallel positional value store.
//!
//! Every structural mutation on the key sequence is paired, within the same
//! operation, with the identical positional mutation on the value store;
//! the pairing is the correctness-critical invariant, since a renumbering
//! applied to keys but not values (or vice versa) would corrupt the map.
//!
//! The key-sequence backing is a type parameter, so `get`, `insert` and
//! `contains_key` inherit the cost model of the chosen [`ListSet`]; removal
//! and `contains_value` are O(n) regardless, removal because both stores must
//! renumber and `contains_value` because it is an unindexed scan.
//!
//! # Examples
//!
//! ```rust
//! use indexed_collections::{ListMap, ListSetMap};
//!
//! let mut map: ListSetMap<_, _> = ListSetMap::new();
//! map.insert("k1", "v1").unwrap();
//! map.insert("k2", "v2").unwrap();
//! // Replacing an existing key keeps its position.
//! assert_eq!(map.insert("k1", "v9"), Ok(Some("v1")));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&"k1"), Some(&"v9"));
//! assert_eq!(map.key_at(0), Ok(&"k1"));
//! ```

use std::marker::PhantomData;

use crate::array_list_set::ArrayListSet;
use crate::bimap_list_set::BiMapListSet;
use crate::error::IndexedError;
use crate::list_map::ListMap;
use crate::list_set::ListSet;

/// A [`ListMap`] backed by a [`ListSet`] of keys and a positional `Vec` of
/// values; the entry at position `i` is `(keys[i], values[i])`.
///
/// The default backing is [`BiMapListSet`], giving O(1) key lookup; use
/// [`ArrayListSetMap`] for the array backing.
pub struct ListSetMap<K, V, S = BiMapListSet<K>> {
    keys: S,
    values: Vec<V>,
    marker: PhantomData<K>,
}

/// A [`ListSetMap`] whose key sequence is backed by [`ArrayListSet`].
pub type ArrayListSetMap<K, V> = ListSetMap<K, V, ArrayListSet<K>>;

impl<K, V, S: ListSet<K> + Default> ListSetMap<K, V, S> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: S::default(),
            values: Vec::new(),
            marker: PhantomData,
        }
    }
}

impl<K, V, S: ListSet<K>> ListSetMap<K, V, S> {
    /// Returns a fresh iterator over the keys in position order.
    #[inline]
    pub fn keys(&self) -> S::Iter<'_> {
        self.keys.iter()
    }

    /// Returns a fresh iterator over the values in position order.
    #[inline]
    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Returns a mutable reference to the value for `key`, or `None` if
    /// absent. Mutating a value in place is not a structural change.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = self.keys.index_of(key)?;
        self.values.get_mut(position)
    }

    /// Returns a mutable reference to the value at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    pub fn value_at_mut(&mut self, index: usize) -> Result<&mut V, IndexedError> {
        let len = self.values.len();
        self.values
            .get_mut(index)
            .ok_or(IndexedError::OutOfRange { index, len })
    }

    /// Creates a detached fail-fast cursor over the entries, positioned
    /// before the first entry. See [`EntryCursor`].
    #[must_use]
    pub fn entry_cursor(&self) -> EntryCursor {
        EntryCursor {
            expected_change_count: self.keys.change_count(),
            position: 0,
            last_returned: None,
        }
    }
}

impl<K, V, S: ListSet<K>> ListMap<K, V> for ListSetMap<K, V, S> {
    type Entries<'a>
        = std::iter::Zip<S::Iter<'a>, std::slice::Iter<'a, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn change_count(&self) -> u64 {
        self.keys.change_count()
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values.contains(value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        let position = self.keys.index_of(key)?;
        self.values.get(position)
    }

    #[inline]
    fn index_of_key(&self, key: &K) -> Option<usize> {
        self.keys.index_of(key)
    }

    #[inline]
    fn key_at(&self, index: usize) -> Result<&K, IndexedError> {
        self.keys.get(index)
    }

    fn value_at(&self, index: usize) -> Result<&V, IndexedError> {
        let len = self.values.len();
        self.values
            .get(index)
            .ok_or(IndexedError::OutOfRange { index, len })
    }

    fn entry_at(&self, index: usize) -> Result<(&K, &V), IndexedError> {
        let key = self.keys.get(index)?;
        let len = self.values.len();
        let value = self
            .values
            .get(index)
            .ok_or(IndexedError::OutOfRange { index, len })?;
        Ok((key, value))
    }

    #[inline]
    fn entries(&self) -> Self::Entries<'_> {
        self.keys.iter().zip(self.values.iter())
    }

    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, IndexedError> {
        if let Some(position) = self.keys.index_of(&key) {
            let len = self.values.len();
            let Some(slot) = self.values.get_mut(position) else {
                return Err(IndexedError::OutOfRange {
                    index: position,
                    len,
                });
            };
            Ok(Some(std::mem::replace(slot, value)))
        } else {
            self.keys.push(key)?;
            self.values.push(value);
            Ok(None)
        }
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, IndexedError> {
        let Some(position) = self.keys.index_of(key) else {
            return Ok(None);
        };
        // Validate alignment before touching either store, so the paired
        // renumbering is all-or-nothing.
        if position >= self.values.len() {
            return Err(IndexedError::OutOfRange {
                index: position,
                len: self.values.len(),
            });
        }
        self.keys.remove_at(position)?;
        Ok(Some(self.values.remove(position)))
    }

    fn clear(&mut self) -> Result<(), IndexedError> {
        self.keys.clear()?;
        self.values.clear();
        Ok(())
    }
}

impl<K, V, S: ListSet<K> + Default> Default for ListSetMap<K, V, S> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> std::fmt::Debug for ListSetMap<K, V, S>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
    S: ListSet<K>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map().entries(self.entries()).finish()
    }
}

impl<K, V, S> PartialEq for ListSetMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
    S: ListSet<K>,
{
    /// Positional equality: equal lengths and equal entries at every
    /// position.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .zip(other.entries())
                .all(|(left, right)| left == right)
    }
}

impl<K: Eq, V: Eq, S: ListSet<K>> Eq for ListSetMap<K, V, S> {}

impl<K, V, S: ListSet<K> + Default> FromIterator<(K, V)> for ListSetMap<K, V, S> {
    /// Collects entries in iteration order; a repeated key replaces the
    /// value at the key's original position.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            // Insert on an owned map cannot fail.
            let _ = map.insert(key, value);
        }
        map
    }
}

impl<'a, K, V, S: ListSet<K>> IntoIterator for &'a ListSetMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Zip<S::Iter<'a>, std::slice::Iter<'a, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// A detached fail-fast traversal over the entries of a [`ListSetMap`].
///
/// Works like [`Cursor`](crate::Cursor): no borrow is held, the map is
/// re-presented on every advance, and any structural mutation performed
/// outside the cursor makes the next advance fail with
/// [`IndexedError::ConcurrentModification`].
#[derive(Debug, Clone)]
pub struct EntryCursor {
    expected_change_count: u64,
    position: usize,
    last_returned: Option<usize>,
}

impl EntryCursor {
    /// Advances the cursor, returning the next entry or `Ok(None)` at the
    /// end of the map.
    ///
    /// # Errors
    ///
    /// [`IndexedError::ConcurrentModification`] if `map` was structurally
    /// mutated since this cursor was created or last mutated through it.
    pub fn next<'a, K, V, S: ListSet<K>>(
        &mut self,
        map: &'a ListSetMap<K, V, S>,
    ) -> Result<Option<(&'a K, &'a V)>, IndexedError> {
        if map.change_count() != self.expected_change_count {
            return Err(IndexedError::ConcurrentModification);
        }
        if self.position >= map.len() {
            return Ok(None);
        }
        let entry = map.entry_at(self.position)?;
        self.last_returned = Some(self.position);
        self.position += 1;
        Ok(Some(entry))
    }

    /// Removes the entry most recently returned by [`next`](Self::next) and
    /// resynchronizes the cursor with the new change counter.
    ///
    /// # Errors
    ///
    /// - [`IndexedError::ConcurrentModification`] if `map` was structurally
    ///   mutated outside this cursor.
    /// - [`IndexedError::Unsupported`] if no entry has been returned since
    ///   the cursor was created or since the last removal.
    pub fn remove<K, V, S: ListSet<K>>(
        &mut self,
        map: &mut ListSetMap<K, V, S>,
    ) -> Result<(K, V), IndexedError> {
        if map.change_count() != self.expected_change_count {
            return Err(IndexedError::ConcurrentModification);
        }
        let index = self.last_returned.take().ok_or(IndexedError::Unsupported {
            operation: "EntryCursor::remove before next",
        })?;
        if index >= map.values.len() {
            return Err(IndexedError::OutOfRange {
                index,
                len: map.values.len(),
            });
        }
        let key = map.keys.remove_at(index)?;
        let value = map.values.remove(index);
        self.position = index;
        self.expected_change_count = map.change_count();
        Ok((key, value))
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for ListSetMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
    S: ListSet<K>,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.entries() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct ListSetMapVisitor<K, V, S> {
    marker: PhantomData<(K, V, S)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::de::Visitor<'de> for ListSetMapVisitor<K, V, S>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    S: ListSet<K> + Default,
{
    type Value = ListSetMap<K, V, S>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = ListSetMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value).map_err(serde::de::Error::custom)?;
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for ListSetMap<K, V, S>
where
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
    S: ListSet<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(ListSetMapVisitor {
            marker: PhantomData,
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

    #[rstest]
    fn test_insert_existing_key_replaces_in_place() {
        let mut map: ListSetMap<&str, &str> = ListSetMap::new();
        assert_eq!(map.insert("k1", "v1"), Ok(None));
        assert_eq!(map.insert("k2", "v2"), Ok(None));
        assert_eq!(map.insert("k1", "v9"), Ok(Some("v1")));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"k1"), Some(&"v9"));
        assert_eq!(map.key_at(0), Ok(&"k1"));
    }

    #[rstest]
    fn test_value_replacement_is_not_structural() {
        let mut map: ListSetMap<&str, i32> = ListSetMap::new();
        map.insert("k", 1).unwrap();
        let change_count = map.change_count();
        map.insert("k", 2).unwrap();
        assert_eq!(map.change_count(), change_count);
    }

    #[rstest]
    fn test_remove_renumbers_both_stores() {
        let mut map: ListSetMap<&str, i32> = ListSetMap::new();
        map.insert("k1", 1).unwrap();
        map.insert("k2", 2).unwrap();
        map.insert("k3", 3).unwrap();

        assert_eq!(map.remove(&"k1"), Ok(Some(1)));
        assert_eq!(map.key_at(0), Ok(&"k2"));
        assert_eq!(map.value_at(0), Ok(&2));
        assert_eq!(map.entry_at(1), Ok((&"k3", &3)));
        assert!(!map.contains_key(&"k1"));
    }

    #[rstest]
    fn test_remove_absent_key_is_noop() {
        let mut map: ListSetMap<&str, i32> = ListSetMap::new();
        map.insert("k", 1).unwrap();
        assert_eq!(map.remove(&"missing"), Ok(None));
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_contains_value_scans_value_store() {
        let mut map: ListSetMap<&str, i32> = ListSetMap::new();
        map.insert("a", 10).unwrap();
        map.insert("b", 20).unwrap();

        assert!(map.contains_value(&20));
        assert!(!map.contains_value(&30));
    }

    #[rstest]
    fn test_positional_access_out_of_range() {
        let map: ListSetMap<&str, i32> = ListSetMap::new();
        assert_eq!(
            map.key_at(0),
            Err(IndexedError::OutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            map.value_at(0),
            Err(IndexedError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[rstest]
    fn test_entries_keys_values_stay_aligned() {
        let mut map: ArrayListSetMap<&str, i32> = ListSetMap::new();
        map.insert("a", 1).unwrap();
        map.insert("b", 2).unwrap();
        map.insert("c", 3).unwrap();
        map.remove(&"b").unwrap();

        let keys: Vec<&str> = map.keys().copied().collect();
        let values: Vec<i32> = map.values().copied().collect();
        let entries: Vec<(&str, i32)> = map.entries().map(|(k, v)| (*k, *v)).collect();

        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(values, vec![1, 3]);
        assert_eq!(entries, vec![("a", 1), ("c", 3)]);
    }

    #[rstest]
    fn test_get_mut_updates_value_in_place() {
        let mut map: ListSetMap<&str, i32> = ListSetMap::new();
        map.insert("k", 1).unwrap();
        if let Some(value) = map.get_mut(&"k") {
            *value = 5;
        }
        assert_eq!(map.get(&"k"), Some(&5));
    }

    #[rstest]
    fn test_from_iterator_repeated_key_keeps_position() {
        let map: ListSetMap<&str, i32> = [("a", 1), ("b", 2), ("a", 9)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.key_at(0), Ok(&"a"));
        assert_eq!(map.get(&"a"), Some(&9));
    }

    #[rstest]
    fn test_entry_cursor_fails_fast() {
        let mut map: ListSetMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let mut cursor = map.entry_cursor();
        assert_eq!(cursor.next(&map).unwrap(), Some((&"a", &1)));

        map.insert("c", 3).unwrap();
        assert_eq!(cursor.next(&map), Err(IndexedError::ConcurrentModification));
    }

    #[rstest]
    fn test_entry_cursor_remove_resynchronizes() {
        let mut map: ListSetMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let mut cursor = map.entry_cursor();
        cursor.next(&map).unwrap();
        assert_eq!(cursor.remove(&mut map), Ok(("a", 1)));

        assert_eq!(cursor.next(&map).unwrap(), Some((&"b", &2)));
        assert_eq!(map.len(), 2);
    }

    #[rstest]
    fn test_clear_empties_both_stores() {
        let mut map: ListSetMap<&str, i32> = [("a", 1)].into_iter().collect();
        map.clear().unwrap();
        assert!(map.is_empty());
        assert_eq!(map.get(&"a"), None);
    }

    #[rstest]
    fn test_debug_renders_as_map() {
        let map: ListSetMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(format!("{map:?}"), r#"{"a": 1, "b": 2}"#);
    }

    #[rstest]
    fn test_positional_equality() {
        let left: ListSetMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let right: ListSetMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let reordered: ListSetMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();

        assert_eq!(left, right);
        assert_ne!(left, reordered);
    }
}
