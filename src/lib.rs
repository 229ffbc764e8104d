//! # indexed-collections
//!
//! Order-preserving, uniqueness-enforcing sequences and key-indexed maps
//! with contiguous positional access.
//!
//! ## Overview
//!
//! This library reconciles two conflicting cost models, Set-like membership
//! testing and List-like positional access, inside single structures:
//!
//! - [`ListSet`]: the ordered unique sequence contract. Every element is
//!   addressable by a contiguous zero-based position; no two positions hold
//!   equal elements; positions renumber on every insertion and removal.
//! - [`BiMapListSet`]: bidirectional index ↔ element maps. O(1) append,
//!   membership, position lookup and positional access; O(n) insertion or
//!   removal away from the tail.
//! - [`ArrayListSet`]: positional `Vec` plus an auxiliary membership set.
//!   O(1) append and membership; O(n) position lookup and arbitrary
//!   insertion or removal.
//! - [`ListMap`] / [`ListSetMap`]: a mapping whose entries are addressable
//!   by key and by contiguous position, composing a `ListSet` of keys with a
//!   parallel value store.
//! - [`UnmodifiableView`] / [`SetView`]: read-only facades over live backing
//!   storage.
//!
//! None of these structures are synchronized; callers sharing one across
//! threads must serialize access externally. Detached [`Cursor`] traversals
//! are fail-fast: a structural mutation performed outside the cursor makes
//! its next advance fail with [`IndexedError::ConcurrentModification`].
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the sets (as sequences) and maps
//!   (as maps).
//!
//! ## Example
//!
//! ```rust
//! use indexed_collections::{BiMapListSet, ListMap, ListSet, ListSetMap};
//!
//! let mut set = BiMapListSet::new();
//! set.push("a").unwrap();
//! set.push("b").unwrap();
//! assert!(!set.push("a").unwrap()); // uniqueness enforced
//! assert_eq!(set.index_of(&"b"), Some(1)); // positional addressing
//!
//! let mut map: ListSetMap<_, _> = ListSetMap::new();
//! map.insert("k1", 1).unwrap();
//! map.insert("k2", 2).unwrap();
//! assert_eq!(map.key_at(0), Ok(&"k1")); // entries carry positions
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod array_list_set;
mod bimap_list_set;
mod error;
mod list_map;
mod list_set;
mod list_set_map;
mod view;

pub use array_list_set::ArrayListSet;
pub use bimap_list_set::{BiMapListSet, Iter as BiMapIter};
pub use error::IndexedError;
pub use list_map::ListMap;
pub use list_set::{Cursor, ListSet};
pub use list_set_map::{ArrayListSetMap, EntryCursor, ListSetMap};
pub use view::{SetView, UnmodifiableView};

/// Prelude module for convenient imports.
///
/// Re-exports the contracts and both backings.
///
/// # Usage
///
/// ```rust
/// use indexed_collections::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array_list_set::ArrayListSet;
    pub use crate::bimap_list_set::BiMapListSet;
    pub use crate::error::IndexedError;
    pub use crate::list_map::ListMap;
    pub use crate::list_set::{Cursor, ListSet};
    pub use crate::list_set_map::{ArrayListSetMap, ListSetMap};
}
