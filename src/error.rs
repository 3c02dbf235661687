//! Error: the crate-wide failure taxonomy and `Result` alias.

use core::fmt;

/// Failure kinds reported by every container in this crate.
///
/// Success is the `Ok` variant of [`Result`]; each fallible operation
/// reports exactly one of these kinds on failure. Values are plain data:
/// compare them, match on them, or render them with `Display`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A structure-level allocation (bucket array, item buffer) failed.
    /// The container is left in its last good state.
    AllocFailed,
    /// An argument violated a construction- or layout-level requirement,
    /// e.g. a fixed-layout key of the wrong length or a zero-sized item.
    InvalidArgument,
    /// The requested key or element is not present.
    NotFound,
    /// The key is already present; the original entry is retained.
    DuplicateKey,
    /// The index lies outside the occupied range.
    OutOfRange,
    /// The container has no elements to yield.
    Empty,
    /// The table was built without a hash function.
    MissingHashFn,
    /// The table was built without a compare function.
    MissingCmpFn,
}

impl Error {
    /// Short, stable, human-readable description of the failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Error::AllocFailed => "Memory allocation failed",
            Error::InvalidArgument => "Invalid argument",
            Error::NotFound => "Key or element not found",
            Error::DuplicateKey => "Key already exists",
            Error::OutOfRange => "Index out of range",
            Error::Empty => "Container is empty",
            Error::MissingHashFn => "Hash function is missing",
            Error::MissingCmpFn => "Comparison function is missing",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias; all fallible container operations return this.
pub type Result<T> = core::result::Result<T, Error>;
