//! Error types shared by every collection in this crate.
//!
//! All fallible operations report failure synchronously through
//! [`IndexedError`]; nothing is retried internally and no operation leaves a
//! collection in a partially mutated state.

/// The error type returned by fallible operations on indexed collections.
///
/// # Examples
///
/// ```rust
/// use indexed_collections::{BiMapListSet, IndexedError, ListSet};
///
/// let set: BiMapListSet<i32> = BiMapListSet::new();
/// assert_eq!(set.get(0), Err(IndexedError::OutOfRange { index: 0, len: 0 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedError {
    /// A position argument fell outside the valid range for the operation.
    ///
    /// Range violations are always reported, never silently clamped.
    OutOfRange {
        /// The offending position argument.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },
    /// The operation would have placed an element (or key) equal to one
    /// already present at a different position.
    DuplicateElement,
    /// A cursor detected a structural mutation performed through any path
    /// other than its own insert/remove operations.
    ConcurrentModification,
    /// The operation is not available on this receiver, e.g. any write
    /// attempted through a read-only view.
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl std::fmt::Display for IndexedError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(formatter, "index {index} is out of range for length {len}")
            }
            Self::DuplicateElement => {
                write!(formatter, "element is already present at another position")
            }
            Self::ConcurrentModification => {
                write!(
                    formatter,
                    "collection was structurally modified while a cursor was active"
                )
            }
            Self::Unsupported { operation } => {
                write!(formatter, "operation `{operation}` is not supported")
            }
        }
    }
}

impl std::error::Error for IndexedError {}
