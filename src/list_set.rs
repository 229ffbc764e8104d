//! The ordered unique sequence contract.
//!
//! This module defines [`ListSet`], the capability shared by every backing in
//! this crate: a sequence whose elements are unique and whose occupied
//! positions are exactly the contiguous integers `[0, len)`. Positions are
//! recomputed on every structural mutation: after a removal every element at
//! a greater position is renumbered down by one, and after an insertion every
//! element at or after the insertion point is renumbered up by one. They are
//! never stable identifiers.
//!
//! Two implementations are provided:
//!
//! - [`BiMapListSet`](crate::BiMapListSet): bidirectional index ↔ element
//!   maps. O(1) append, contains, `index_of` and `get`; O(n) insertion or
//!   removal at an arbitrary position.
//! - [`ArrayListSet`](crate::ArrayListSet): positional `Vec` plus an
//!   auxiliary membership set. O(1) append and contains; O(n) `index_of` and
//!   arbitrary insertion or removal.
//!
//! # Traversal
//!
//! [`ListSet::iter`] returns a fresh, lazy, position-ordered iterator each
//! call. It borrows the collection, so the borrow checker already rules out
//! structural mutation for its lifetime. [`Cursor`] is the detached
//! alternative: it holds no borrow, snapshots the collection's change counter
//! at creation, and every advance re-presents the collection and fails with
//! [`IndexedError::ConcurrentModification`] if the counter moved through any
//! path other than the cursor's own insert/remove operations.
//!
//! # Examples
//!
//! ```rust
//! use indexed_collections::{BiMapListSet, ListSet};
//!
//! let mut set = BiMapListSet::new();
//! assert!(set.push("a").unwrap());
//! assert!(set.push("b").unwrap());
//! // Second "a" is skipped: the sequence behaves as a set.
//! assert!(!set.push("a").unwrap());
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.index_of(&"a"), Some(0));
//! ```

use std::cmp::Ordering;
use std::ops::Range;

use crate::error::IndexedError;
use crate::view::{SetView, UnmodifiableView};

/// An order-preserving, uniqueness-enforcing sequence with contiguous
/// zero-based positions.
///
/// Implementations guarantee two invariants at every observable point:
///
/// - **Uniqueness**: no two positions hold equal elements.
/// - **Contiguity**: occupied positions are exactly `{0, …, len - 1}`.
///
/// All mutating operations are fallible and report range violations,
/// duplicate elements, or (on read-only views) unsupported writes through
/// [`IndexedError`]. Nothing is clamped or silently merged, and bulk
/// operations either complete fully or leave the collection untouched.
pub trait ListSet<T> {
    /// The borrowing iterator type, yielding elements in position order.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Returns the number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns the structural change counter.
    ///
    /// The counter increases on every structural mutation (append, insert,
    /// remove, clear, sort) and is left alone by value-only replacement via
    /// [`replace`](Self::replace). [`Cursor`] snapshots it to detect
    /// mid-traversal mutation.
    fn change_count(&self) -> u64;

    /// Returns `true` if the sequence contains `element`.
    fn contains(&self, element: &T) -> bool;

    /// Returns the position of `element`, or `None` if it is absent.
    fn index_of(&self, element: &T) -> Option<usize>;

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    fn get(&self, index: usize) -> Result<&T, IndexedError>;

    /// Returns a fresh iterator over the elements in position order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Appends `element` if it is not already present.
    ///
    /// Returns `Ok(true)` if the sequence changed, `Ok(false)` if the element
    /// was already present (the sequence is left untouched).
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn push(&mut self, element: T) -> Result<bool, IndexedError>;

    /// Inserts `element` at `index`, renumbering every element at a position
    /// `>= index` up by one.
    ///
    /// # Errors
    ///
    /// - [`IndexedError::OutOfRange`] if `index > len`.
    /// - [`IndexedError::DuplicateElement`] if `element` is already present.
    fn insert(&mut self, index: usize, element: T) -> Result<(), IndexedError>;

    /// Replaces the element at `index` with `element`, returning the previous
    /// element.
    ///
    /// Replacing an element with an equal one is a no-op that still returns
    /// the resident element. This is a value-only mutation: it does not bump
    /// the change counter and does not invalidate cursors.
    ///
    /// # Errors
    ///
    /// - [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    /// - [`IndexedError::DuplicateElement`] if `element` equals an element
    ///   resident at a *different* position.
    fn replace(&mut self, index: usize, element: T) -> Result<T, IndexedError>;

    /// Removes `element` by value, renumbering every following element down
    /// by one.
    ///
    /// Returns `Ok(true)` if the element was present and removed, `Ok(false)`
    /// if it was absent (the sequence is left untouched).
    fn remove(&mut self, element: &T) -> Result<bool, IndexedError>;

    /// Removes and returns the element at `index`, renumbering every
    /// following element down by one.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index` is outside `[0, len)`.
    fn remove_at(&mut self, index: usize) -> Result<T, IndexedError>;

    /// Removes the positions `range.start..range.end` in a single
    /// renumbering pass. An empty range is a no-op.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `range.start > range.end` or
    /// `range.end > len`.
    fn remove_range(&mut self, range: Range<usize>) -> Result<(), IndexedError>;

    /// Reorders the elements by `compare`, reassigning positions
    /// `0..len` accordingly. This is a structural mutation.
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn sort_by<F>(&mut self, compare: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T, &T) -> Ordering,
        Self: Sized;

    /// Removes every element. A no-op on an already empty sequence.
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn clear(&mut self) -> Result<(), IndexedError>;

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the position of the last occurrence of `element`.
    ///
    /// Elements are unique, so this always equals
    /// [`index_of`](Self::index_of).
    #[inline]
    fn last_index_of(&self, element: &T) -> Option<usize> {
        self.index_of(element)
    }

    /// Appends every element of `elements` that is not already present,
    /// skipping duplicates within the batch after their first occurrence.
    ///
    /// Returns `Ok(true)` if the sequence changed.
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn extend_unique<I>(&mut self, elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut changed = false;
        for element in elements {
            changed |= self.push(element)?;
        }
        Ok(changed)
    }

    /// Inserts every element of `elements` that is not already present at
    /// consecutive positions starting at `index`, renumbering the following
    /// elements once. Elements already present, or duplicated within the
    /// batch after their first occurrence, are skipped.
    ///
    /// Validation happens before the first mutation, so the operation either
    /// completes fully or leaves the sequence untouched.
    ///
    /// Returns `Ok(true)` if the sequence changed.
    ///
    /// # Errors
    ///
    /// [`IndexedError::OutOfRange`] if `index > len`.
    fn insert_all<I>(&mut self, index: usize, elements: I) -> Result<bool, IndexedError>
    where
        I: IntoIterator<Item = T>,
        T: PartialEq,
        Self: Sized,
    {
        let len = self.len();
        if index > len {
            return Err(IndexedError::OutOfRange { index, len });
        }
        let mut batch: Vec<T> = Vec::new();
        for element in elements {
            if !self.contains(&element) && !batch.contains(&element) {
                batch.push(element);
            }
        }
        if batch.is_empty() {
            return Ok(false);
        }
        let mut position = index;
        for element in batch {
            self.insert(position, element)?;
            position += 1;
        }
        Ok(true)
    }

    /// Removes every element not contained in `keep`, working from the
    /// highest position down so renumbering never skips a candidate.
    ///
    /// The keep decision uses this sequence's element equality, not the
    /// semantics of any foreign collection.
    ///
    /// Returns `Ok(true)` if the sequence changed.
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn retain_all(&mut self, keep: &[T]) -> Result<bool, IndexedError>
    where
        T: PartialEq,
        Self: Sized,
    {
        let mut changed = false;
        for index in (0..self.len()).rev() {
            if !keep.contains(self.get(index)?) {
                self.remove_at(index)?;
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Removes every element contained in `discard`, working from the
    /// highest position down.
    ///
    /// Returns `Ok(true)` if the sequence changed.
    ///
    /// # Errors
    ///
    /// [`IndexedError::Unsupported`] on read-only views.
    fn remove_all(&mut self, discard: &[T]) -> Result<bool, IndexedError>
    where
        T: PartialEq,
        Self: Sized,
    {
        let mut changed = false;
        for index in (0..self.len()).rev() {
            if discard.contains(self.get(index)?) {
                self.remove_at(index)?;
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Replaces every element with `operator(element)` via positional
    /// [`replace`](Self::replace) calls.
    ///
    /// # Errors
    ///
    /// [`IndexedError::DuplicateElement`] if an output collides with an
    /// element resident at a different position. Elements at positions below
    /// the failing one keep their replacements.
    fn replace_all<F>(&mut self, mut operator: F) -> Result<(), IndexedError>
    where
        F: FnMut(&T) -> T,
        Self: Sized,
    {
        for index in 0..self.len() {
            let replacement = operator(self.get(index)?);
            self.replace(index, replacement)?;
        }
        Ok(())
    }

    /// Returns a clone of the elements in position order.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Compares two sequences positionally: equal lengths and equal elements
    /// at every position.
    fn eq_in_order<S>(&self, other: &S) -> bool
    where
        S: ListSet<T>,
        T: PartialEq,
        Self: Sized,
    {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }

    /// Creates a detached fail-fast cursor positioned before the first
    /// element. See [`Cursor`].
    fn cursor(&self) -> Cursor
    where
        Self: Sized,
    {
        Cursor::new::<T, Self>(self)
    }

    /// Returns a read-only facade over this sequence.
    ///
    /// The view owns no storage; reads delegate to the live backing sequence
    /// and every write fails with [`IndexedError::Unsupported`].
    fn unmodifiable(&self) -> UnmodifiableView<'_, Self>
    where
        Self: Sized,
    {
        UnmodifiableView::new(self)
    }

    /// Returns a read-only set-capability facade over this sequence.
    fn as_set(&self) -> SetView<'_, Self>
    where
        Self: Sized,
    {
        SetView::new(self)
    }
}

/// A detached fail-fast traversal over a [`ListSet`].
///
/// A cursor holds no borrow of the collection; instead the collection is
/// re-presented on every advance. The cursor snapshots the collection's
/// change counter at creation and compares it on every call, so any
/// structural mutation performed through a path other than the cursor's own
/// [`remove`](Cursor::remove) or [`insert`](Cursor::insert) makes the next
/// advance fail with [`IndexedError::ConcurrentModification`]; it never
/// silently skips or duplicates elements.
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{ArrayListSet, IndexedError, ListSet};
///
/// let mut set: ArrayListSet<i32> = [1, 2, 3].into_iter().collect();
/// let mut cursor = set.cursor();
/// assert_eq!(cursor.next(&set).unwrap(), Some(&1));
///
/// // Mutating outside the cursor invalidates it.
/// set.push(4).unwrap();
/// assert_eq!(cursor.next(&set), Err(IndexedError::ConcurrentModification));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    expected_change_count: u64,
    position: usize,
    last_returned: Option<usize>,
}

impl Cursor {
    /// Creates a cursor over `set`, positioned before the first element.
    #[must_use]
    pub fn new<T, S: ListSet<T>>(set: &S) -> Self {
        Self {
            expected_change_count: set.change_count(),
            position: 0,
            last_returned: None,
        }
    }

    /// Advances the cursor, returning the next element or `Ok(None)` at the
    /// end of the sequence.
    ///
    /// # Errors
    ///
    /// [`IndexedError::ConcurrentModification`] if `set` was structurally
    /// mutated since this cursor was created or last mutated through it.
    pub fn next<'a, T, S: ListSet<T>>(
        &mut self,
        set: &'a S,
    ) -> Result<Option<&'a T>, IndexedError> {
        self.check(set)?;
        if self.position >= set.len() {
            return Ok(None);
        }
        let element = set.get(self.position)?;
        self.last_returned = Some(self.position);
        self.position += 1;
        Ok(Some(element))
    }

    /// Removes the element most recently returned by [`next`](Cursor::next)
    /// and resynchronizes the cursor with the new change counter.
    ///
    /// # Errors
    ///
    /// - [`IndexedError::ConcurrentModification`] if `set` was structurally
    ///   mutated outside this cursor.
    /// - [`IndexedError::Unsupported`] if no element has been returned since
    ///   the cursor was created or since the last removal.
    pub fn remove<T, S: ListSet<T>>(&mut self, set: &mut S) -> Result<T, IndexedError> {
        self.check(set)?;
        let index = self.last_returned.take().ok_or(IndexedError::Unsupported {
            operation: "Cursor::remove before next",
        })?;
        let removed = set.remove_at(index)?;
        self.position = index;
        self.expected_change_count = set.change_count();
        Ok(removed)
    }

    /// Inserts `element` at the cursor position and steps over it, so the
    /// next [`next`](Cursor::next) call returns the element that would have
    /// been returned without the insertion.
    ///
    /// # Errors
    ///
    /// - [`IndexedError::ConcurrentModification`] if `set` was structurally
    ///   mutated outside this cursor.
    /// - [`IndexedError::DuplicateElement`] if `element` is already present.
    pub fn insert<T, S: ListSet<T>>(
        &mut self,
        set: &mut S,
        element: T,
    ) -> Result<(), IndexedError> {
        self.check(set)?;
        set.insert(self.position, element)?;
        self.position += 1;
        self.last_returned = None;
        self.expected_change_count = set.change_count();
        Ok(())
    }

    fn check<T, S: ListSet<T>>(&self, set: &S) -> Result<(), IndexedError> {
        if set.change_count() == self.expected_change_count {
            Ok(())
        } else {
            Err(IndexedError::ConcurrentModification)
        }
    }
}
