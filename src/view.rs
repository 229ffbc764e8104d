//! Read-only adapters over a [`ListSet`].
//!
//! Both views hold a reference to (never a copy of) the backing sequence:
//! they own no storage, and reads always reflect the live backing structure.
//!
//! - [`UnmodifiableView`] exposes the full [`ListSet`] capability surface,
//!   except that every write fails with [`IndexedError::Unsupported`].
//! - [`SetView`] exposes the narrower read-only set capability: size,
//!   membership and traversal, with no positional operations at all.

use std::cmp::Ordering;
use std::ops::Range;

use crate::error::IndexedError;
use crate::list_set::ListSet;

/// A read-only facade implementing [`ListSet`] over a live backing sequence.
///
/// Reads delegate straight through. Every mutator fails deterministically
/// with [`IndexedError::Unsupported`], leaving the backing sequence
/// untouched.
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{ArrayListSet, IndexedError, ListSet};
///
/// let set: ArrayListSet<i32> = [1, 2, 3].into_iter().collect();
/// let mut view = set.unmodifiable();
///
/// assert_eq!(view.get(1), Ok(&2));
/// assert_eq!(
///     view.push(4),
///     Err(IndexedError::Unsupported { operation: "push" })
/// );
/// ```
pub struct UnmodifiableView<'s, S: ?Sized> {
    inner: &'s S,
}

impl<'s, S: ?Sized> UnmodifiableView<'s, S> {
    /// Creates a read-only facade over `inner`.
    #[inline]
    #[must_use]
    pub fn new(inner: &'s S) -> Self {
        Self { inner }
    }
}

impl<T, S: ListSet<T>> ListSet<T> for UnmodifiableView<'_, S> {
    type Iter<'a>
        = S::Iter<'a>
    where
        Self: 'a,
        T: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn change_count(&self) -> u64 {
        self.inner.change_count()
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.inner.contains(element)
    }

    #[inline]
    fn index_of(&self, element: &T) -> Option<usize> {
        self.inner.index_of(element)
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, IndexedError> {
        self.inner.get(index)
    }

    #[inline]
    fn iter(&self) -> S::Iter<'_> {
        self.inner.iter()
    }

    fn push(&mut self, _element: T) -> Result<bool, IndexedError> {
        Err(IndexedError::Unsupported { operation: "push" })
    }

    fn insert(&mut self, _index: usize, _element: T) -> Result<(), IndexedError> {
        Err(IndexedError::Unsupported {
            operation: "insert",
        })
    }

    fn replace(&mut self, _index: usize, _element: T) -> Result<T, IndexedError> {
        Err(IndexedError::Unsupported {
            operation: "replace",
        })
    }

    fn remove(&mut self, _element: &T) -> Result<bool, IndexedError> {
        Err(IndexedError::Unsupported {
            operation: "remove",
        })
    }

    fn remove_at(&mut self, _index: usize) -> Result<T, IndexedError> {
        Err(IndexedError::Unsupported {
            operation: "remove_at",
        })
    }

    fn remove_range(&mut self, _range: Range<usize>) -> Result<(), IndexedError> {
        Err(IndexedError::Unsupported {
            operation: "remove_range",
        })
    }

    fn sort_by<F>(&mut self, _compare: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        Err(IndexedError::Unsupported {
            operation: "sort_by",
        })
    }

    fn clear(&mut self) -> Result<(), IndexedError> {
        Err(IndexedError::Unsupported { operation: "clear" })
    }

    fn extend_unique<I>(&mut self, _elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
    {
        Err(IndexedError::Unsupported {
            operation: "extend_unique",
        })
    }

    fn insert_all<I>(&mut self, _index: usize, _elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
        T: PartialEq,
    {
        Err(IndexedError::Unsupported {
            operation: "insert_all",
        })
    }

    fn retain_all(&mut self, _keep: &[T]) -> Result<bool, IndexedError>
    where
        T: PartialEq,
    {
        Err(IndexedError::Unsupported {
            operation: "retain_all",
        })
    }

    fn remove_all(&mut self, _discard: &[T]) -> Result<bool, IndexedError>
    where
        T: PartialEq,
    {
        Err(IndexedError::Unsupported {
            operation: "remove_all",
        })
    }

    fn replace_all<F>(&mut self, _operator: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T) -> T,
    {
        Err(IndexedError::Unsupported {
            operation: "replace_all",
        })
    }
}

impl<S: std::fmt::Debug + ?Sized> std::fmt::Debug for UnmodifiableView<'_, S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(formatter)
    }
}

/// A read-only set-capability facade over a live backing sequence.
///
/// Only size, membership and traversal are exposed; positions are not part
/// of the set capability.
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{BiMapListSet, ListSet};
///
/// let set: BiMapListSet<&str> = ["a", "b"].into_iter().collect();
/// let view = set.as_set();
///
/// assert_eq!(view.len(), 2);
/// assert!(view.contains(&"a"));
/// ```
pub struct SetView<'s, S: ?Sized> {
    inner: &'s S,
}

impl<'s, S: ?Sized> SetView<'s, S> {
    /// Creates a read-only set facade over `inner`.
    #[inline]
    #[must_use]
    pub fn new(inner: &'s S) -> Self {
        Self { inner }
    }
}

impl<S> SetView<'_, S> {
    /// Returns the number of elements in the backing sequence.
    #[inline]
    #[must_use]
    pub fn len<T>(&self) -> usize
    where
        S: ListSet<T>,
    {
        self.inner.len()
    }

    /// Returns `true` if the backing sequence contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty<T>(&self) -> bool
    where
        S: ListSet<T>,
    {
        self.inner.is_empty()
    }

    /// Returns `true` if the backing sequence contains `element`.
    #[inline]
    pub fn contains<T>(&self, element: &T) -> bool
    where
        S: ListSet<T>,
    {
        self.inner.contains(element)
    }

    /// Returns a fresh iterator over the elements, in the backing sequence's
    /// position order.
    #[inline]
    pub fn iter<T>(&self) -> S::Iter<'_>
    where
        S: ListSet<T>,
    {
        self.inner.iter()
    }

    /// Compares two sets by membership alone, ignoring order.
    pub fn eq_set<T, O>(&self, other: &SetView<'_, O>) -> bool
    where
        S: ListSet<T>,
        O: ListSet<T>,
    {
        self.inner.len() == other.inner.len()
            && self.inner.iter().all(|element| other.inner.contains(element))
    }
}
