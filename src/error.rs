//! Error types for [`TinyVec`](crate::TinyVec) operations.
//!
//! The cache has no error type: a lookup on an unknown key is an ordinary
//! outcome and is reported as `None`.

use thiserror::Error;

/// Errors reported synchronously by fallible [`TinyVec`](crate::TinyVec)
/// operations.
///
/// Every failing operation leaves the vector exactly as it was before the
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TinyVecError {
    /// `remove_last` was called on an empty vector.
    #[error("cannot remove from an empty vector")]
    Underflow,

    /// A checked access used an index at or past the live length.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The number of live elements at the time of the call.
        len: usize,
    },

    /// `resize` asked for a capacity smaller than the live length.
    #[error("requested capacity {requested} is smaller than length {len}")]
    InvalidArgument {
        /// The capacity passed to `resize`.
        requested: usize,
        /// The number of live elements at the time of the call.
        len: usize,
    },
}
