//! Integration tests for [`ListSetMap`]: the key sequence and the value
//! store must renumber together, and positional access must stay aligned
//! with key-based access through every mutation.

use indexed_collections::{ArrayListSetMap, IndexedError, ListMap, ListSetMap};
use rstest::rstest;

fn populated() -> ListSetMap<&'static str, i32> {
    [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
}

#[rstest]
fn test_insert_appends_new_keys_in_order() {
    let map = populated();

    assert_eq!(map.len(), 3);
    assert_eq!(map.key_at(0), Ok(&"a"));
    assert_eq!(map.key_at(2), Ok(&"c"));
    assert_eq!(map.value_at(1), Ok(&2));
    assert_eq!(map.index_of_key(&"b"), Some(1));
}

#[rstest]
fn test_insert_existing_key_replaces_value_in_place() {
    let mut map = populated();

    assert_eq!(map.insert("b", 20), Ok(Some(2)));

    assert_eq!(map.len(), 3);
    assert_eq!(map.index_of_key(&"b"), Some(1));
    assert_eq!(map.get(&"b"), Some(&20));
    assert_eq!(map.entry_at(1), Ok((&"b", &20)));
}

#[rstest]
fn test_value_replacement_is_not_structural() {
    let mut map = populated();
    let before = map.change_count();

    map.insert("a", 100).unwrap();

    assert_eq!(map.change_count(), before);
}

#[rstest]
fn test_remove_renumbers_both_stores() {
    let mut map = populated();

    assert_eq!(map.remove(&"a"), Ok(Some(1)));

    assert_eq!(map.len(), 2);
    assert_eq!(map.index_of_key(&"b"), Some(0));
    assert_eq!(map.entry_at(0), Ok((&"b", &2)));
    assert_eq!(map.entry_at(1), Ok((&"c", &3)));
}

#[rstest]
fn test_remove_missing_key_is_a_no_op() {
    let mut map = populated();
    let before = map.change_count();

    assert_eq!(map.remove(&"zzz"), Ok(None));

    assert_eq!(map.len(), 3);
    assert_eq!(map.change_count(), before);
}

#[rstest]
fn test_keys_values_and_entries_stay_paired() {
    let mut map = populated();
    map.remove(&"b").unwrap();
    map.insert("d", 4).unwrap();

    let keys: Vec<_> = map.keys().copied().collect();
    let values: Vec<_> = map.values().copied().collect();
    let entries: Vec<_> = map.entries().map(|(key, value)| (*key, *value)).collect();

    assert_eq!(keys, vec!["a", "c", "d"]);
    assert_eq!(values, vec![1, 3, 4]);
    assert_eq!(entries, vec![("a", 1), ("c", 3), ("d", 4)]);
}

#[rstest]
fn test_contains_value_scans_the_store() {
    let map = populated();

    assert!(map.contains_value(&2));
    assert!(!map.contains_value(&99));
}

#[rstest]
fn test_positional_access_rejects_out_of_range() {
    let map = populated();

    assert_eq!(
        map.key_at(3),
        Err(IndexedError::OutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        map.value_at(3),
        Err(IndexedError::OutOfRange { index: 3, len: 3 })
    );
    assert!(map.entry_at(7).is_err());
}

#[rstest]
fn test_get_mut_and_value_at_mut_write_through() {
    let mut map = populated();

    if let Some(value) = map.get_mut(&"a") {
        *value = 10;
    }
    *map.value_at_mut(1).unwrap() = 20;

    assert_eq!(map.get(&"a"), Some(&10));
    assert_eq!(map.value_at(1), Ok(&20));
}

#[rstest]
fn test_entry_cursor_walks_in_order() {
    let map = populated();
    let mut cursor = map.entry_cursor();

    assert_eq!(cursor.next(&map).unwrap(), Some((&"a", &1)));
    assert_eq!(cursor.next(&map).unwrap(), Some((&"b", &2)));
    assert_eq!(cursor.next(&map).unwrap(), Some((&"c", &3)));
    assert_eq!(cursor.next(&map).unwrap(), None);
}

#[rstest]
fn test_entry_cursor_fails_fast_on_structural_change() {
    let mut map = populated();
    let mut cursor = map.entry_cursor();

    assert_eq!(cursor.next(&map).unwrap(), Some((&"a", &1)));
    map.remove(&"c").unwrap();

    assert_eq!(cursor.next(&map), Err(IndexedError::ConcurrentModification));
}

#[rstest]
fn test_entry_cursor_remove_resynchronizes() {
    let mut map = populated();
    let mut cursor = map.entry_cursor();

    cursor.next(&map).unwrap();
    assert_eq!(cursor.remove(&mut map), Ok(("a", 1)));

    assert_eq!(cursor.next(&map).unwrap(), Some((&"b", &2)));
    assert_eq!(map.len(), 2);
    assert_eq!(map.index_of_key(&"b"), Some(0));
}

#[rstest]
fn test_entry_cursor_remove_before_next_is_rejected() {
    let mut map = populated();
    let mut cursor = map.entry_cursor();

    assert!(matches!(
        cursor.remove(&mut map),
        Err(IndexedError::Unsupported { .. })
    ));
}

#[rstest]
fn test_clear_empties_both_stores() {
    let mut map = populated();

    map.clear().unwrap();

    assert!(map.is_empty());
    assert_eq!(map.index_of_key(&"a"), None);
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.values().count(), 0);
}

#[rstest]
fn test_from_iterator_replaces_repeated_keys_in_place() {
    let map: ListSetMap<&str, i32> =
        [("a", 1), ("b", 2), ("a", 10)].into_iter().collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.index_of_key(&"a"), Some(0));
    assert_eq!(map.get(&"a"), Some(&10));
}

#[rstest]
fn test_array_backed_map_behaves_identically() {
    let mut bimap_backed = populated();
    let mut array_backed: ArrayListSetMap<&str, i32> =
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();

    bimap_backed.remove(&"b").unwrap();
    array_backed.remove(&"b").unwrap();
    bimap_backed.insert("d", 4).unwrap();
    array_backed.insert("d", 4).unwrap();

    let left: Vec<_> = bimap_backed.entries().map(|(k, v)| (*k, *v)).collect();
    let right: Vec<_> = array_backed.entries().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(left, right);
}
