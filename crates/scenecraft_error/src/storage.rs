//! Draft store error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write entry
    #[display("Failed to write entry: {}", _0)]
    FileWrite(String),
    /// Failed to read entry
    #[display("Failed to read entry: {}", _0)]
    FileRead(String),
    /// Failed to remove entry
    #[display("Failed to remove entry: {}", _0)]
    FileRemove(String),
    /// Stored entry could not be decoded
    #[display("Corrupt entry {}: {}", key, message)]
    Corrupt {
        /// Store key of the entry
        key: String,
        /// Decoder message
        message: String,
    },
    /// Draft not found under the given key
    #[display("Draft not found: {}", _0)]
    NotFound(String),
    /// Text is not a draft identity
    #[display("'{}' is not a draft id: {}", id, message)]
    InvalidDraftId {
        /// Text as given
        id: String,
        /// Parser message
        message: String,
    },
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use scenecraft_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("draft:42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
